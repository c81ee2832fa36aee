//! 流水线集成测试
//!
//! 用替身能力实现（不碰网络）验证批处理的关键性质：
//! 批次完整性、跳过行为、单图失败隔离、并发上限、进度单调、
//! 确定性替身下的幂等输出，以及导出往返。

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use alt_text_generator::error::{ApiError, FetchError};
use alt_text_generator::export;
use alt_text_generator::models::AltText;
use alt_text_generator::orchestrator::BatchProcessor;
use alt_text_generator::services::{AltTextChecker, CaptionGenerator, ImageFetcher};
use alt_text_generator::workflow::ImageFlow;

/// 替身下载器：返回 URL 的字节，便于生成器做确定性输出
struct StubFetcher {
    /// 这些 URL 永远下载失败
    fail_for: HashSet<String>,
    /// 总调用次数
    calls: AtomicUsize,
    /// 当前并发数与历史最大并发数
    active: AtomicUsize,
    max_active: AtomicUsize,
    /// 模拟网络耗时
    delay: Duration,
}

impl StubFetcher {
    fn new() -> Self {
        Self {
            fail_for: HashSet::new(),
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    fn failing_for(urls: &[&str]) -> Self {
        let mut fetcher = Self::new();
        fetcher.fail_for = urls.iter().map(|u| u.to_string()).collect();
        fetcher
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);

        if self.fail_for.contains(url) {
            Err(FetchError::BadStatus { status: 500 })
        } else {
            Ok(url.as_bytes().to_vec())
        }
    }
}

/// 替身生成器：对下载到的 URL 字节做确定性映射
struct StubGenerator {
    /// 这些图片（按 URL 内容匹配）推理失败
    fail_for: HashSet<String>,
    calls: AtomicUsize,
}

impl StubGenerator {
    fn new() -> Self {
        Self {
            fail_for: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing_for(urls: &[&str]) -> Self {
        let mut generator = Self::new();
        generator.fail_for = urls.iter().map(|u| u.to_string()).collect();
        generator
    }
}

#[async_trait]
impl CaptionGenerator for StubGenerator {
    async fn generate(&self, image_bytes: &[u8]) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let url = String::from_utf8_lossy(image_bytes).to_string();
        if self.fail_for.contains(&url) {
            Err(ApiError::EmptyResponse)
        } else if url == "a.jpg" {
            Ok("A cat sits on a mat.".to_string())
        } else {
            Ok(format!("A photo of {}", url))
        }
    }
}

/// 替身探测器：固定集合内的 URL 视为已有 ALT 文本
struct StubChecker {
    existing: HashSet<String>,
    calls: AtomicUsize,
}

impl StubChecker {
    fn none() -> Self {
        Self {
            existing: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn existing_for(urls: &[&str]) -> Self {
        let mut checker = Self::none();
        checker.existing = urls.iter().map(|u| u.to_string()).collect();
        checker
    }
}

#[async_trait]
impl AltTextChecker for StubChecker {
    async fn has_existing_alt_text(&self, image_url: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.existing.contains(image_url)
    }
}

fn flow_with(
    checker: Arc<StubChecker>,
    fetcher: Arc<StubFetcher>,
    generator: Arc<StubGenerator>,
    skip_existing_alt: bool,
) -> Arc<ImageFlow> {
    Arc::new(ImageFlow::new(checker, fetcher, generator, skip_existing_alt))
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

#[tokio::test]
async fn test_batch_has_one_record_per_unique_url() {
    let flow = flow_with(
        Arc::new(StubChecker::none()),
        Arc::new(StubFetcher::new()),
        Arc::new(StubGenerator::new()),
        false,
    );

    let input = urls(&["a.jpg", "b.jpg", "a.jpg", "", "  ", "c.jpg", "b.jpg"]);
    let batch = BatchProcessor::new(flow, 4).run(input).await;

    assert_eq!(batch.len(), 3);

    let result_urls: HashSet<&str> = batch.iter().map(|r| r.image_url.as_str()).collect();
    assert_eq!(
        result_urls,
        HashSet::from(["a.jpg", "b.jpg", "c.jpg"])
    );
}

#[tokio::test]
async fn test_skip_existing_alt_never_touches_fetcher_or_generator() {
    let checker = Arc::new(StubChecker::existing_for(&["x.jpg"]));
    let fetcher = Arc::new(StubFetcher::new());
    let generator = Arc::new(StubGenerator::new());

    let flow = flow_with(checker.clone(), fetcher.clone(), generator.clone(), true);
    let batch = BatchProcessor::new(flow, 2).run(urls(&["x.jpg"])).await;

    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].alt_text, AltText::Skipped);
    assert_eq!(
        batch[0].alt_text.as_output(),
        "[Skipped: existing ALT text found]"
    );

    // 跳过路径上不允许触发任何下载或推理
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_checker_disabled_is_never_invoked() {
    let checker = Arc::new(StubChecker::existing_for(&["x.jpg"]));
    let flow = flow_with(
        checker.clone(),
        Arc::new(StubFetcher::new()),
        Arc::new(StubGenerator::new()),
        false,
    );

    let batch = BatchProcessor::new(flow, 2).run(urls(&["x.jpg"])).await;

    // 检查被禁用时即便页面有 ALT 也照常生成
    assert!(batch[0].alt_text.is_generated());
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_one_failing_url_does_not_affect_others() {
    let fetcher = Arc::new(StubFetcher::failing_for(&["bad.jpg"]));
    let flow = flow_with(
        Arc::new(StubChecker::none()),
        fetcher,
        Arc::new(StubGenerator::new()),
        false,
    );

    let batch = BatchProcessor::new(flow, 3)
        .run(urls(&["ok1.jpg", "bad.jpg", "ok2.jpg"]))
        .await;

    assert_eq!(batch.len(), 3);
    for record in &batch {
        if record.image_url == "bad.jpg" {
            assert_eq!(
                record.alt_text,
                AltText::Error("[Error: Could not fetch image]".to_string())
            );
        } else {
            assert!(record.alt_text.is_generated(), "{} 应该成功", record.image_url);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_never_exceeds_worker_cap() {
    let fetcher =
        Arc::new(StubFetcher::new().with_delay(Duration::from_millis(30)));
    let flow = flow_with(
        Arc::new(StubChecker::none()),
        fetcher.clone(),
        Arc::new(StubGenerator::new()),
        false,
    );

    let input = urls(&[
        "1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg", "7.jpg", "8.jpg",
    ]);
    let batch = BatchProcessor::new(flow, 3).run(input).await;

    assert_eq!(batch.len(), 8);
    assert!(
        fetcher.max_active.load(Ordering::SeqCst) <= 3,
        "同时在处理的图片数不得超过 worker 上限"
    );
}

#[tokio::test]
async fn test_progress_events_are_monotonic_and_complete() {
    let flow = flow_with(
        Arc::new(StubChecker::none()),
        Arc::new(StubFetcher::new()),
        Arc::new(StubGenerator::new()),
        false,
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let batch = BatchProcessor::new(flow, 2)
        .with_progress(tx)
        .run(urls(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"]))
        .await;

    assert_eq!(batch.len(), 4);

    let mut events = Vec::new();
    while let Ok(progress) = rx.try_recv() {
        events.push(progress);
    }

    assert_eq!(events.len(), 4);
    for (idx, progress) in events.iter().enumerate() {
        assert_eq!(progress.completed, idx + 1);
        assert_eq!(progress.total, 4);
    }
}

#[tokio::test]
async fn test_example_scenario_exact_output_rows() {
    // 输入 {a.jpg, b.jpg, a.jpg}，检查禁用，a 生成成功，b 推理耗尽
    let flow = flow_with(
        Arc::new(StubChecker::none()),
        Arc::new(StubFetcher::new()),
        Arc::new(StubGenerator::failing_for(&["b.jpg"])),
        false,
    );

    let batch = BatchProcessor::new(flow, 2)
        .run(urls(&["a.jpg", "b.jpg", "a.jpg"]))
        .await;

    assert_eq!(batch.len(), 2);

    let mut pairs: Vec<(String, String)> = batch
        .iter()
        .map(|r| (r.image_url.clone(), r.alt_text.as_output().to_string()))
        .collect();
    pairs.sort();

    assert_eq!(
        pairs,
        vec![
            ("a.jpg".to_string(), "A cat sits on a mat.".to_string()),
            (
                "b.jpg".to_string(),
                "[Error: Failed to generate ALT text after retries]".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn test_idempotent_output_with_deterministic_stubs() {
    let input = urls(&["a.jpg", "b.jpg", "c.jpg"]);

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let flow = flow_with(
            Arc::new(StubChecker::none()),
            Arc::new(StubFetcher::new()),
            Arc::new(StubGenerator::new()),
            false,
        );
        let mut batch = BatchProcessor::new(flow, 3).run(input.clone()).await;
        // 完成顺序不保证，按 URL 排序后输出必须逐字节一致
        batch.sort_by(|a, b| a.image_url.cmp(&b.image_url));
        outputs.push(export::to_csv_string(&batch));
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[tokio::test]
async fn test_exported_batch_roundtrips_through_csv() {
    let flow = flow_with(
        Arc::new(StubChecker::existing_for(&["skip.jpg"])),
        Arc::new(StubFetcher::failing_for(&["bad.jpg"])),
        Arc::new(StubGenerator::new()),
        true,
    );

    let batch = BatchProcessor::new(flow, 2)
        .run(urls(&["skip.jpg", "bad.jpg", "ok.jpg"]))
        .await;

    let text = export::to_csv_string(&batch);
    let pairs = export::parse_csv_string(&text).unwrap();

    assert_eq!(pairs.len(), batch.len());
    for (record, (url, alt)) in batch.iter().zip(&pairs) {
        assert_eq!(&record.image_url, url);
        assert_eq!(record.alt_text.as_output(), alt);
    }
}

#[tokio::test]
async fn test_empty_input_yields_empty_batch() {
    let flow = flow_with(
        Arc::new(StubChecker::none()),
        Arc::new(StubFetcher::new()),
        Arc::new(StubGenerator::new()),
        false,
    );

    let batch = BatchProcessor::new(flow, 6)
        .run(urls(&["", "   "]))
        .await;
    assert!(batch.is_empty());
}
