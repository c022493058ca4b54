use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

/// 初始化日志系统
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// 验证输入文件
pub fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("输入文件不存在: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("输入路径不是文件: {}", path.display());
    }

    if let Some(ext) = path.extension() {
        if ext != "html" && ext != "htm" {
            warn!("⚠️  文件扩展名不是HTML: {}", ext.to_string_lossy());
        }
    }

    Ok(())
}

/// 宽容地读取HTML文本
/// 无法解码的字节序列替换为替换字符，不会导致读取失败
pub fn read_html_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("读取文件失败: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// 规范化资源URL为可抓取的绝对地址
///
/// - 以`//`开头的协议相对URL补全`https:`前缀
/// - 不以`http`开头的相对路径拼接到回退源站上（去掉路径前导`/`）
/// - 已经是绝对`http`/`https`地址则保持不变
pub fn normalize_url(url: &str, fallback_origin: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else if !url.starts_with("http") {
        format!("{}{}", fallback_origin, url.trim_start_matches('/'))
    } else {
        url.to_string()
    }
}

/// 计算URL的短哈希值（十六进制）
/// 用于为缺少文件名的URL合成稳定且互不冲突的本地文件名
pub fn short_url_hash(url: &str, length: usize) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    let hex = format!("{:016x}", hasher.finish());
    hex[..length.min(hex.len())].to_string()
}
