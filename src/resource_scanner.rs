//! 外部资源扫描模块
//!
//! 用固定的正则模式在HTML文本中查找外部资源引用，
//! 按模式分组去重后输出。只读操作，不修改输入文件。

// 标准库导入
use std::collections::BTreeSet;
use std::path::Path;

// 第三方crate导入
use anyhow::Result;
use regex::Regex;

// 本地模块导入
use crate::utils::read_html_lossy;

/// 单个扫描模式：正则表达式加人类可读的标签
pub struct ScanPattern {
    /// 分组标签
    pub label: &'static str,
    regex: Regex,
}

/// 构建四个固定的外部资源扫描模式
///
/// 覆盖引号内的绝对URL（`http`/`https`）和协议相对URL（`//`开头）
/// 在`src`和`href`属性中的出现
pub fn external_resource_patterns() -> Vec<ScanPattern> {
    vec![
        ScanPattern {
            label: "SRC",
            regex: Regex::new(r#"src=["'](https?://[^"']+)"#).unwrap(),
        },
        ScanPattern {
            label: "HREF",
            regex: Regex::new(r#"href=["'](https?://[^"']+)"#).unwrap(),
        },
        ScanPattern {
            label: "SRC //",
            regex: Regex::new(r#"src=["']//([^"']+)"#).unwrap(),
        },
        ScanPattern {
            label: "HREF //",
            regex: Regex::new(r#"href=["']//([^"']+)"#).unwrap(),
        },
    ]
}

/// 扫描结果：按模式分组的去重URL集合
/// 组内使用有序集合，保证多次运行输出完全一致
pub struct ScanReport {
    pub groups: Vec<(&'static str, BTreeSet<String>)>,
}

impl ScanReport {
    /// 是否所有模式都没有匹配
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, urls)| urls.is_empty())
    }

    /// 渲染为人类可读的报告文本
    pub fn render(&self) -> String {
        if self.is_empty() {
            return "未发现任何外部资源！".to_string();
        }

        let mut output = String::from("=== 发现的外部资源 ===\n");
        for (label, urls) in &self.groups {
            if urls.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{}:\n", label));
            for url in urls {
                output.push_str(&format!("  - {}\n", url));
            }
        }
        output
    }

    /// 打印报告到控制台
    pub fn print(&self) {
        println!("{}", self.render());
    }
}

/// 扫描HTML文本中的外部资源引用
pub fn scan_html(content: &str) -> ScanReport {
    let groups = external_resource_patterns()
        .into_iter()
        .map(|pattern| {
            let urls: BTreeSet<String> = pattern
                .regex
                .captures_iter(content)
                .filter_map(|captures| captures.get(1))
                .map(|m| m.as_str().to_string())
                .collect();
            (pattern.label, urls)
        })
        .collect();

    ScanReport { groups }
}

/// 扫描HTML文件中的外部资源引用
/// 文件缺失或不可读时返回错误；无法解码的字节宽容处理
pub fn scan_file(path: &Path) -> Result<ScanReport> {
    let content = read_html_lossy(path)?;
    Ok(scan_html(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><head>
        <link rel="stylesheet" href="https://cdn.example.com/style.css">
        <link rel="stylesheet" href='https://cdn.example.com/style.css'>
        <link rel="stylesheet" href="//fonts.example.com/font.css">
        <script src="https://cdn.example.com/app.js"></script>
        <script src="//cdn.example.com/vendor.js"></script>
    </head><body>
        <img src="https://img.example.com/logo.png">
        <img src="local/photo.jpg">
        <a href="page.html">内部链接</a>
    </body></html>"#;

    fn group<'a>(report: &'a ScanReport, label: &str) -> &'a BTreeSet<String> {
        &report
            .groups
            .iter()
            .find(|(l, _)| *l == label)
            .expect("unknown group label")
            .1
    }

    #[test]
    fn test_scan_groups_and_dedup() {
        let report = scan_html(SAMPLE);

        let src = group(&report, "SRC");
        assert_eq!(src.len(), 2);
        assert!(src.contains("https://cdn.example.com/app.js"));
        assert!(src.contains("https://img.example.com/logo.png"));

        // 两种引号的重复引用只报告一次
        let href = group(&report, "HREF");
        assert_eq!(href.len(), 1);
        assert!(href.contains("https://cdn.example.com/style.css"));

        let src_rel = group(&report, "SRC //");
        assert_eq!(src_rel.len(), 1);
        assert!(src_rel.contains("cdn.example.com/vendor.js"));

        let href_rel = group(&report, "HREF //");
        assert_eq!(href_rel.len(), 1);
        assert!(href_rel.contains("fonts.example.com/font.css"));
    }

    #[test]
    fn test_relative_references_ignored() {
        let report = scan_html(r#"<img src="local/photo.jpg"><a href="page.html">x</a>"#);
        assert!(report.is_empty());
        assert_eq!(report.render(), "未发现任何外部资源！");
    }

    #[test]
    fn test_render_idempotent() {
        let first = scan_html(SAMPLE).render();
        let second = scan_html(SAMPLE).render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_skips_empty_groups() {
        let report = scan_html(r#"<img src="https://img.example.com/a.png">"#);
        let rendered = report.render();
        assert!(rendered.contains("SRC:"));
        assert!(!rendered.contains("HREF:"));
        assert!(!rendered.contains("SRC //:"));
    }

    #[test]
    fn test_scan_file_missing() {
        assert!(scan_file(Path::new("/nonexistent/index.html")).is_err());
    }

    #[test]
    fn test_scan_file_does_not_modify_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, SAMPLE).unwrap();

        let report = scan_file(&path).unwrap();
        assert!(!report.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE);
    }
}
