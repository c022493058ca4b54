/// 站点本地化配置常量
///
/// 该文件定义了资源本地化相关的常量配置，方便统一管理和维护

/// 站点目录配置
pub mod site_config {
    /// 默认HTML文件名
    pub const DEFAULT_INDEX_FILE: &str = "index.html";

    /// CSS样式表子目录
    pub const CSS_DIR: &str = "css";

    /// JavaScript脚本子目录
    pub const JS_DIR: &str = "js";

    /// 图片资源子目录
    pub const IMAGES_DIR: &str = "images";

    /// 相对路径引用的回退源站
    pub const DEFAULT_FALLBACK_ORIGIN: &str = "https://marquestv.page.tl/";
}

/// 下载配置
pub mod fetch_config {
    /// 默认User-Agent（模拟浏览器）
    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

    /// 请求超时时间（秒）
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;
}

/// 本地文件命名配置
pub mod naming_config {
    /// 样式表URL缺少文件名时的默认名称
    pub const DEFAULT_STYLESHEET_NAME: &str = "style.css";

    /// 脚本URL缺少文件名时的默认名称
    pub const DEFAULT_SCRIPT_NAME: &str = "script.js";

    /// 图片回退文件名前缀
    pub const IMAGE_NAME_PREFIX: &str = "image_";

    /// CSS背景图回退文件名前缀
    pub const BACKGROUND_NAME_PREFIX: &str = "bg_";

    /// 回退文件名使用的扩展名
    pub const FALLBACK_IMAGE_EXTENSION: &str = ".jpg";

    /// URL哈希截取长度
    pub const URL_HASH_LENGTH: usize = 10;
}

/// 确保源站地址以斜杠结尾
pub fn ensure_trailing_slash(origin: &str) -> String {
    if origin.ends_with('/') {
        origin.to_string()
    } else {
        format!("{}/", origin)
    }
}

/// 判断是否为内嵌数据URL（无需下载）
pub fn is_embedded_data_url(url: &str) -> bool {
    url.starts_with("data:")
}
