/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::question::ImportSummary;

/// 初始化日志订阅器
///
/// 默认级别 info，可通过 RUST_LOG 环境变量覆盖；
/// `verbose_logging` 开启时默认级别降到 debug。
pub fn init(config: &Config) {
    let default_level = if config.verbose_logging {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 应用配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库导入模式");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📊 单次处理上限: {} 道题目", config.max_questions);
    info!("🤖 答案模型: {}", config.llm_answer_model);
    info!("🤖 分类模型: {}", config.llm_classify_model);
    info!("{}", "=".repeat(60));
}

/// 打印导入完成统计
///
/// # 参数
/// - `summary`: 导入结果汇总
pub fn print_final_stats(summary: &ImportSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 导入完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 入库: {}/{}", summary.succeeded_count, summary.processed_count);
    info!("📋 表格中共发现: {} 道题目", summary.total_found);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("这是一段很长的题目内容需要截断", 5), "这是一段很...");
    }
}
