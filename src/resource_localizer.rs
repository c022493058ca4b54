//! 资源本地化模块
//!
//! 此模块负责：
//! - 解析站点目录下的HTML文档
//! - 按类别（样式表、脚本、图片、CSS背景图）逐个下载外部资源
//! - 将DOM中的引用重写为本地相对路径
//! - 序列化并覆盖写回原HTML文件
//!
//! 下载严格串行执行，单个资源失败只记录日志，不影响整个任务。

// 标准库导入
use std::path::Path;
use std::time::Instant;

// 第三方crate导入
use anyhow::{Context, Result};
use markup5ever_rcdom::{Handle, RcDom};
use regex::Regex;
use tracing::{debug, info, warn};
use url::Url;

// 本地模块导入
use crate::config::LocalizerConfig;
use crate::html_document::{
    attribute_contains_token, collect_elements, element_text, find_first_element, get_attribute,
    parse_html, serialize_dom_to_html, set_attribute, set_element_text,
};
use crate::resource_fetcher::ResourceFetcher;
use crate::site_constants::{is_embedded_data_url, naming_config, site_config};
use crate::stats::LocalizeStats;
use crate::utils::{normalize_url, read_html_lossy, short_url_hash, validate_input_file};

/// 资源类别，决定落盘子目录和回退文件名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCategory {
    /// 外链样式表 (`<link rel="stylesheet">`)
    Stylesheet,
    /// 外链脚本 (`<script src>`)
    Script,
    /// 图片 (`<img src>`)
    Image,
    /// 内联样式中的背景图 (`url(...)`)
    CssBackground,
}

impl ResourceCategory {
    /// 该类别资源的落盘子目录
    pub fn subdirectory(&self) -> &'static str {
        match self {
            ResourceCategory::Stylesheet => site_config::CSS_DIR,
            ResourceCategory::Script => site_config::JS_DIR,
            ResourceCategory::Image | ResourceCategory::CssBackground => site_config::IMAGES_DIR,
        }
    }

    /// URL缺少文件名段时使用的回退文件名
    /// 图片类别用URL哈希合成名称，避免不同URL相互覆盖
    fn fallback_filename(&self, normalized_url: &str) -> String {
        match self {
            ResourceCategory::Stylesheet => naming_config::DEFAULT_STYLESHEET_NAME.to_string(),
            ResourceCategory::Script => naming_config::DEFAULT_SCRIPT_NAME.to_string(),
            ResourceCategory::Image => format!(
                "{}{}{}",
                naming_config::IMAGE_NAME_PREFIX,
                short_url_hash(normalized_url, naming_config::URL_HASH_LENGTH),
                naming_config::FALLBACK_IMAGE_EXTENSION
            ),
            ResourceCategory::CssBackground => format!(
                "{}{}{}",
                naming_config::BACKGROUND_NAME_PREFIX,
                short_url_hash(normalized_url, naming_config::URL_HASH_LENGTH),
                naming_config::FALLBACK_IMAGE_EXTENSION
            ),
        }
    }
}

/// 根据规范化URL推导本地文件名
/// 取URL路径的最后一段（忽略查询参数）；为空时使用类别回退名
pub fn local_filename(normalized_url: &str, category: ResourceCategory) -> String {
    let last_segment = Url::parse(normalized_url)
        .ok()
        .and_then(|url| url.path_segments().and_then(|segments| segments.last().map(String::from)));

    match last_segment {
        Some(segment) if !segment.is_empty() => segment,
        _ => category.fallback_filename(normalized_url),
    }
}

/// 资源本地化器
///
/// 对单个站点目录执行一次完整的本地化：四个独立的遍历轮次
/// （样式表、脚本、图片、内联CSS背景图），每轮处理完才进入下一轮。
pub struct ResourceLocalizer {
    config: LocalizerConfig,
    fetcher: ResourceFetcher,
}

impl ResourceLocalizer {
    /// 创建新的本地化器实例
    pub fn new(config: LocalizerConfig) -> Result<Self> {
        let fetcher = ResourceFetcher::new(config.user_agent(), config.timeout_secs())?;
        Ok(Self { config, fetcher })
    }

    /// 执行完整的本地化流程
    pub async fn run(&self) -> Result<LocalizeStats> {
        let html_path = self.config.index_path();

        self.ensure_resource_dirs()?;
        validate_input_file(&html_path)?;

        let mut stats = LocalizeStats::default();

        // 读取HTML（无法解码的字节宽容处理）
        let read_start = Instant::now();
        let html_content = read_html_lossy(&html_path)?;
        stats.file_read_time = read_start.elapsed();
        stats.input_size = html_content.len();

        let parse_start = Instant::now();
        let dom = parse_html(&html_content)?;
        stats.parse_time = parse_start.elapsed();

        // 四个轮次，每轮独立穷尽自己的标签类别
        let download_start = Instant::now();
        self.localize_stylesheets(&dom, &mut stats).await;
        self.localize_scripts(&dom, &mut stats).await;
        self.localize_images(&dom, &mut stats).await;
        self.localize_inline_css(&dom, &mut stats).await;
        stats.download_time = download_start.elapsed();

        // 覆盖写回原文件；此处失败是致命的，但已下载的资源保留在磁盘上
        let write_start = Instant::now();
        let rewritten_html = serialize_dom_to_html(&dom)?;
        std::fs::write(&html_path, &rewritten_html)
            .with_context(|| format!("写入文件失败: {}", html_path.display()))?;
        stats.file_write_time = write_start.elapsed();
        stats.output_size = rewritten_html.len();

        info!("💾 HTML已更新: {}", html_path.display());
        info!("🎯 总共下载资源: {} 个", stats.total_downloaded());

        Ok(stats)
    }

    /// 确保css/js/images子目录存在（幂等）
    fn ensure_resource_dirs(&self) -> Result<()> {
        for subdirectory in [site_config::CSS_DIR, site_config::JS_DIR, site_config::IMAGES_DIR] {
            let dir = self.config.base_dir().join(subdirectory);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("创建资源目录失败: {}", dir.display()))?;
        }
        Ok(())
    }

    /// 轮次1: 所有带href的样式表link标签
    async fn localize_stylesheets(&self, dom: &RcDom, stats: &mut LocalizeStats) {
        info!("=== 下载CSS样式表 ===");
        let links = collect_elements(dom, |name, attrs| {
            name == "link" && attribute_contains_token(attrs, "rel", "stylesheet")
        });
        let downloaded = self
            .localize_elements(links, "href", ResourceCategory::Stylesheet, stats)
            .await;
        stats.stylesheets_downloaded = downloaded;
    }

    /// 轮次2: 所有带src的script标签
    async fn localize_scripts(&self, dom: &RcDom, stats: &mut LocalizeStats) {
        info!("=== 下载JavaScript ===");
        let scripts = collect_elements(dom, |name, _| name == "script");
        let downloaded = self
            .localize_elements(scripts, "src", ResourceCategory::Script, stats)
            .await;
        stats.scripts_downloaded = downloaded;
    }

    /// 轮次3: 所有带src的img标签
    async fn localize_images(&self, dom: &RcDom, stats: &mut LocalizeStats) {
        info!("=== 下载图片 ===");
        let images = collect_elements(dom, |name, _| name == "img");
        let downloaded = self
            .localize_elements(images, "src", ResourceCategory::Image, stats)
            .await;
        stats.images_downloaded = downloaded;
    }

    /// 对一批元素执行"规范化、下载、重写属性"的通用处理
    /// 返回成功下载的数量；失败的元素保持原属性值不变
    async fn localize_elements(
        &self,
        elements: Vec<Handle>,
        attr_name: &str,
        category: ResourceCategory,
        stats: &mut LocalizeStats,
    ) -> usize {
        let mut downloaded = 0;

        for element in elements {
            let Some(reference) = get_attribute(&element, attr_name) else {
                continue;
            };
            if reference.trim().is_empty() {
                continue;
            }

            let resource_url = normalize_url(&reference, self.config.fallback_origin());
            let filename = local_filename(&resource_url, category);
            let local_relative = format!("{}/{}", category.subdirectory(), filename);
            let local_path = self
                .config
                .base_dir()
                .join(category.subdirectory())
                .join(&filename);

            if self.download_resource(&resource_url, &local_path).await {
                set_attribute(&element, attr_name, &local_relative);
                downloaded += 1;
            } else {
                stats.failed_downloads += 1;
            }
        }

        downloaded
    }

    /// 轮次4: 文档第一个内联style块中的url(...)引用
    async fn localize_inline_css(&self, dom: &RcDom, stats: &mut LocalizeStats) {
        info!("=== 下载CSS背景图 ===");

        let Some(style_element) = find_first_element(dom, "style") else {
            debug!("文档中没有内联样式块");
            return;
        };

        let css_text = element_text(&style_element);
        if css_text.trim().is_empty() {
            debug!("内联样式块为空");
            return;
        }

        let url_token_regex = Regex::new(r#"url\(['"]?(.*?)['"]?\)"#).unwrap();
        let tokens: Vec<String> = url_token_regex
            .captures_iter(&css_text)
            .filter_map(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .collect();

        let mut rewritten_css = css_text.clone();

        for token in tokens {
            // data:内嵌图片无需下载
            if token.is_empty() || is_embedded_data_url(&token) {
                continue;
            }

            let resource_url = normalize_url(&token, self.config.fallback_origin());
            let filename = local_filename(&resource_url, ResourceCategory::CssBackground);
            let local_relative = format!("{}/{}", site_config::IMAGES_DIR, filename);
            let local_path = self
                .config
                .base_dir()
                .join(site_config::IMAGES_DIR)
                .join(&filename);

            if self.download_resource(&resource_url, &local_path).await {
                // 对样式文本做字面替换，命中原token的每一处出现
                rewritten_css = rewritten_css.replace(&token, &local_relative);
                stats.css_backgrounds_downloaded += 1;
            } else {
                stats.failed_downloads += 1;
            }
        }

        set_element_text(&style_element, &rewritten_css);
    }

    /// 下载单个资源并落盘；任何错误只记录日志并返回false
    async fn download_resource(&self, url: &str, local_path: &Path) -> bool {
        info!("⬇️  下载: {}", url);

        match self.fetcher.download_to(url, local_path).await {
            Ok(bytes_written) => {
                info!("✅ 已保存: {} ({} 字节)", local_path.display(), bytes_written);
                true
            }
            Err(e) => {
                warn!("❌ 下载失败 {}: {}", url, e);
                false
            }
        }
    }
}
