use std::time::Duration;

/// 本地化运行统计结构
#[derive(Debug, Default)]
pub struct LocalizeStats {
    pub file_read_time: Duration,
    pub parse_time: Duration,
    pub download_time: Duration,
    pub file_write_time: Duration,
    pub input_size: usize,
    pub output_size: usize,
    pub stylesheets_downloaded: usize,
    pub scripts_downloaded: usize,
    pub images_downloaded: usize,
    pub css_backgrounds_downloaded: usize,
    pub failed_downloads: usize,
}

impl LocalizeStats {
    /// 四类资源的成功下载总数
    pub fn total_downloaded(&self) -> usize {
        self.stylesheets_downloaded
            + self.scripts_downloaded
            + self.images_downloaded
            + self.css_backgrounds_downloaded
    }

    /// 本次运行尝试下载的资源总数
    pub fn total_attempted(&self) -> usize {
        self.total_downloaded() + self.failed_downloads
    }
}

/// 打印运行统计报告
pub fn print_localize_stats(stats: &LocalizeStats, total_duration: Duration) {
    println!("\n📊 本地化统计报告:");
    println!("═══════════════════════════════════════");

    // 时间分解
    println!("⏱️  时间分解:");
    println!("   文件读取: {}", format_duration(stats.file_read_time));
    println!("   HTML解析: {}", format_duration(stats.parse_time));
    println!("   资源下载: {}", format_duration(stats.download_time));
    println!("   文件写入: {}", format_duration(stats.file_write_time));
    println!("   总耗时: {}", format_duration(total_duration));

    // 资源统计
    println!("\n📦 资源统计:");
    println!("   CSS样式表: {} 个", stats.stylesheets_downloaded);
    println!("   JS脚本: {} 个", stats.scripts_downloaded);
    println!("   图片: {} 个", stats.images_downloaded);
    println!("   CSS背景图: {} 个", stats.css_backgrounds_downloaded);
    println!("   下载失败: {} 个", stats.failed_downloads);
    println!("   成功合计: {} 个", stats.total_downloaded());

    // 文件统计
    println!("\n📏 文件统计:");
    println!(
        "   输入大小: {} 字节 ({:.1} KB)",
        stats.input_size,
        stats.input_size as f64 / 1024.0
    );
    println!(
        "   输出大小: {} 字节 ({:.1} KB)",
        stats.output_size,
        stats.output_size as f64 / 1024.0
    );

    // 成功率
    if stats.total_attempted() > 0 {
        let success_rate =
            stats.total_downloaded() as f64 / stats.total_attempted() as f64 * 100.0;
        println!("\n🚀 下载成功率: {:.1}% ({}/{})",
            success_rate,
            stats.total_downloaded(),
            stats.total_attempted()
        );
    }
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
