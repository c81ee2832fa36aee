//! 批量调度器 - 编排层
//!
//! ## 职责
//!
//! 1. **去重清洗**：丢弃空 URL，按首次出现去重
//! 2. **并发控制**：Semaphore 限制同时在处理的图片数为 min(max_workers, 总数)
//! 3. **结果收集**：worker 通过 mpsc 把结果按完成顺序送回（不保证输入顺序）
//! 4. **进度上报**：每完成一张图发出一次 (completed, total) 事件
//!
//! 单张图片的失败已在流程层降级为错误哨兵，这里看到的永远是
//! 一条完整的 ResultRecord —— 批次总会收齐每个去重后的输入。

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::info;

use crate::models::Batch;
use crate::workflow::{ImageCtx, ImageFlow};

/// 进度事件：已完成数 / 总数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// 批量调度器
pub struct BatchProcessor {
    flow: Arc<ImageFlow>,
    max_workers: usize,
    progress_tx: Option<mpsc::UnboundedSender<Progress>>,
}

impl BatchProcessor {
    pub fn new(flow: Arc<ImageFlow>, max_workers: usize) -> Self {
        Self {
            flow,
            max_workers,
            progress_tx: None,
        }
    }

    /// 订阅进度事件（每完成一张图发送一次）
    pub fn with_progress(mut self, tx: mpsc::UnboundedSender<Progress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// 处理整个批次，返回按完成顺序排列的结果
    pub async fn run(&self, image_urls: Vec<String>) -> Batch {
        let unique_urls = dedup_image_urls(&image_urls);
        let total = unique_urls.len();

        if total == 0 {
            return Vec::new();
        }

        let workers = self.max_workers.min(total).max(1);
        info!("📦 批次开始: {} 张图片，{} 个并发 worker", total, workers);

        let semaphore = Arc::new(Semaphore::new(workers));
        let (result_tx, mut result_rx) = mpsc::unbounded_channel();

        // 一次性全部提交；worker 槽位空出来时下一张图自然开始
        for (idx, url) in unique_urls.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let flow = Arc::clone(&self.flow);
            let result_tx = result_tx.clone();
            let ctx = ImageCtx::new(idx + 1, total);

            tokio::spawn(async move {
                // semaphore 在整个运行期间不关闭，acquire 失败只可能发生在关闭后
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                let record = flow.run(&ctx, &url).await;
                let _ = result_tx.send(record);
            });
        }
        drop(result_tx);

        // 按完成顺序收集；发送端全部释放后循环自然结束
        let mut batch: Batch = Vec::with_capacity(total);
        while let Some(record) = result_rx.recv().await {
            batch.push(record);

            let progress = Progress {
                completed: batch.len(),
                total,
            };
            info!("📊 进度: {}/{}", progress.completed, progress.total);
            if let Some(tx) = &self.progress_tx {
                let _ = tx.send(progress);
            }
        }

        batch
    }
}

/// 清洗输入：去掉首尾空白，丢弃空值，按首次出现去重
pub fn dedup_image_urls(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .filter(|url| seen.insert(url.to_string()))
        .map(|url| url.to_string())
        .collect()
}
