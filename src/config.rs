//! 配置管理模块
//!
//! 提供CLI参数解析和本地化配置管理功能

// 标准库导入
use std::path::{Path, PathBuf};

// 第三方crate导入
use clap::{Parser, Subcommand};

// 本地模块导入
use crate::site_constants::{ensure_trailing_slash, fetch_config, site_config};

/// CLI参数结构
#[derive(Parser)]
#[command(author, version, about = "网页资源本地化CLI工具 - 扫描外部资源引用并下载后重写HTML", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 静默模式 (仅输出错误)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// 子命令定义：扫描和本地化是两个互不依赖的一次性任务
#[derive(Subcommand)]
pub enum Command {
    /// 扫描HTML文件中的外部资源引用并分组打印
    Scan {
        /// 要扫描的HTML文件路径
        #[arg(value_name = "FILE", default_value = site_config::DEFAULT_INDEX_FILE)]
        file: PathBuf,
    },

    /// 下载外部资源到本地并重写HTML引用
    Localize {
        /// 站点根目录（需包含index.html）
        #[arg(value_name = "DIR", default_value = ".")]
        base_dir: PathBuf,

        /// HTML文件名
        #[arg(long, default_value = site_config::DEFAULT_INDEX_FILE)]
        index: String,

        /// 相对路径引用的回退源站
        #[arg(long, default_value = site_config::DEFAULT_FALLBACK_ORIGIN)]
        origin: String,

        /// 自定义User-Agent字符串
        #[arg(long, default_value = fetch_config::DEFAULT_USER_AGENT)]
        user_agent: String,

        /// 单个请求的超时时间（秒）
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// 显示统计报告
        #[arg(long)]
        stats: bool,
    },
}

/// 本地化配置结构体
///
/// 支持Builder模式进行链式配置。
///
/// # Examples
///
/// ```rust
/// use localize_cli::config::LocalizerConfig;
///
/// let config = LocalizerConfig::new("site")
///     .with_origin("https://example.com")
///     .with_user_agent("Mozilla/5.0")
///     .with_timeout(10);
/// ```
#[derive(Debug, Clone)]
pub struct LocalizerConfig {
    /// 站点根目录
    base_dir: PathBuf,
    /// HTML文件名
    index_file: String,
    /// 相对路径引用的回退源站（始终以`/`结尾）
    fallback_origin: String,
    /// User-Agent字符串
    user_agent: String,
    /// 单个请求的超时时间（秒）
    timeout_secs: u64,
}

impl LocalizerConfig {
    /// 创建新的配置实例，其余字段取默认值
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            index_file: site_config::DEFAULT_INDEX_FILE.to_string(),
            fallback_origin: site_config::DEFAULT_FALLBACK_ORIGIN.to_string(),
            user_agent: fetch_config::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: fetch_config::REQUEST_TIMEOUT_SECONDS,
        }
    }

    /// 获取站点根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 获取HTML文件完整路径
    pub fn index_path(&self) -> PathBuf {
        self.base_dir.join(&self.index_file)
    }

    /// 获取回退源站
    pub fn fallback_origin(&self) -> &str {
        &self.fallback_origin
    }

    /// 获取User-Agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// 获取请求超时时间（秒）
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// 设置HTML文件名
    pub fn with_index_file(mut self, name: &str) -> Self {
        self.index_file = name.to_string();
        self
    }

    /// 设置回退源站（自动补全结尾斜杠）
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.fallback_origin = ensure_trailing_slash(origin);
        self
    }

    /// 设置User-Agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// 设置请求超时时间（秒）
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }
}
