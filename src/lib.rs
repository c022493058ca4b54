//! Localize CLI - 网页资源本地化工具库
//!
//! 这个库提供了外部资源扫描、HTTP下载、DOM重写和统计报告等核心功能。

pub mod config;
pub mod error;
pub mod html_document;
pub mod resource_fetcher;
pub mod resource_localizer;
pub mod resource_scanner;
pub mod site_constants;
pub mod stats;
pub mod utils;

#[cfg(test)]
pub mod test_fixtures;
