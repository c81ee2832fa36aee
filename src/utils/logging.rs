/// 日志工具模块
///
/// 提供启动、进度和最终统计的日志辅助函数
use crate::config::Config;
use crate::models::{Batch, ResultRecord};
use tracing::info;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - ALT 文本批量生成模式");
    info!("📊 最大并发数: {}", config.max_workers);
    info!("🧠 模型: {} @ {}", config.model_name, config.ollama_base_url);
    info!(
        "⏭️ 跳过已有 ALT 文本: {}",
        if config.skip_existing_alt { "是" } else { "否" }
    );
    info!("{}", "=".repeat(60));
}

/// 记录输入加载信息
pub fn log_urls_loaded(found: usize, input_csv: &str) {
    info!("✓ 从 {} 中找到 {} 个图片 URL", input_csv, found);
    info!("💡 去重后开始并行处理\n");
}

/// 打印最终统计信息
pub fn print_final_stats(batch: &Batch, output_csv: &str, verbose: bool) {
    let generated = batch.iter().filter(|r| r.alt_text.is_generated()).count();
    let skipped = batch.iter().filter(|r| r.alt_text.is_skipped()).count();
    let failed = batch.iter().filter(|r| r.alt_text.is_error()).count();

    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 生成: {}/{}", generated, batch.len());
    info!("⏭️ 跳过: {}", skipped);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));

    if verbose {
        for record in batch {
            log_record(record);
        }
    }

    info!("\n结果已保存至: {}", output_csv);
}

fn log_record(record: &ResultRecord) {
    info!(
        "  {} → {}",
        truncate_text(&record.image_url, 60),
        truncate_text(record.alt_text.as_output(), 80)
    );
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
