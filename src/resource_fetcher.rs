//! 资源下载模块
//!
//! 封装HTTP客户端，负责单个资源的抓取和落盘

// 标准库导入
use std::path::Path;
use std::time::Duration;

// 第三方crate导入
use anyhow::Context;
use reqwest::Client;

// 本地模块导入
use crate::error::Result;
use crate::localize_error;

/// 资源下载器
///
/// 持有一个配置好User-Agent和超时时间的HTTP客户端，
/// 所有资源共用同一个连接池。下载严格串行，由调用方逐个await。
pub struct ResourceFetcher {
    client: Client,
}

impl ResourceFetcher {
    /// 创建新的资源下载器
    pub fn new(user_agent: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("创建HTTP客户端失败")?;

        Ok(Self { client })
    }

    /// 抓取资源的完整响应体
    /// HTTP错误状态视为失败
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// 下载资源并写入本地文件，返回写入的字节数
    pub async fn download_to(&self, url: &str, local_path: &Path) -> Result<usize> {
        let data = self.fetch(url).await?;

        if let Some(parent) = local_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                localize_error!(file_op, parent.display(), "创建目录", e)
            })?;
        }

        std::fs::write(local_path, &data)
            .map_err(|e| localize_error!(file_op, local_path.display(), "写入", e))?;

        Ok(data.len())
    }
}
