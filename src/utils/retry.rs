//! 固定间隔重试工具
//!
//! 下载和推理共用同一套重试语义：最多 `max_retries` 次尝试，
//! 每次失败后等待固定的 `backoff` 再试，耗尽后返回最后一次错误。

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// 以固定间隔重试一个异步操作
///
/// # 参数
/// - `max_retries`: 最大尝试次数（0 视为 1）
/// - `backoff`: 两次尝试之间的间隔
/// - `label`: 日志中显示的操作名称
/// - `op`: 单次尝试
pub async fn with_retry<T, E, F, Fut>(
    max_retries: usize,
    backoff: Duration,
    label: &str,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = max_retries.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                warn!("⚠️ {} 第 {}/{} 次尝试失败: {}", label, attempt, attempts, e);
                sleep(backoff).await;
            }
            Err(e) => {
                warn!("❌ {} 已尝试 {} 次，放弃: {}", label, attempts, e);
                return Err(e);
            }
        }
    }
}
