//! 单张图片处理流程 - 流程层
//!
//! 核心职责：定义"一张图"的完整处理流程
//!
//! 流程顺序：
//! 1. 已有 ALT 检查（可选）→ 跳过
//! 2. 下载图片 → 失败则记错误哨兵
//! 3. 推理生成 ALT 文本 → 失败则记错误哨兵
//!
//! 每条路径都终止于一条 ResultRecord，本层自己不做任何重试
//! （重试在能力层内部），也绝不向上抛出单图失败。

use std::sync::Arc;
use tracing::{error, info};

use crate::models::{AltText, ResultRecord};
use crate::services::{AltTextChecker, CaptionGenerator, ImageFetcher};
use crate::utils::truncate_text;
use crate::workflow::image_ctx::ImageCtx;

/// 图片处理流程
///
/// 职责：
/// - 编排 检查 → 下载 → 生成 三步
/// - 只处理单张图片，不出现 Vec<ResultRecord>
/// - 不持有并发资源，依赖全部通过能力 trait 注入
pub struct ImageFlow {
    checker: Arc<dyn AltTextChecker>,
    fetcher: Arc<dyn ImageFetcher>,
    generator: Arc<dyn CaptionGenerator>,
    skip_existing_alt: bool,
}

impl ImageFlow {
    /// 创建新的图片处理流程（测试时可注入替身实现）
    pub fn new(
        checker: Arc<dyn AltTextChecker>,
        fetcher: Arc<dyn ImageFetcher>,
        generator: Arc<dyn CaptionGenerator>,
        skip_existing_alt: bool,
    ) -> Self {
        Self {
            checker,
            fetcher,
            generator,
            skip_existing_alt,
        }
    }

    /// 处理单张图片，总是产出一条结果
    pub async fn run(&self, ctx: &ImageCtx, image_url: &str) -> ResultRecord {
        info!("{} 开始处理: {}", ctx, truncate_text(image_url, 80));

        // 1. 已有 ALT 检查（禁用时完全不调用）
        if self.skip_existing_alt && self.checker.has_existing_alt_text(image_url).await {
            info!("{} ⏭️ 页面已有 ALT 文本，跳过", ctx);
            return ResultRecord::new(image_url, AltText::Skipped);
        }

        // 2. 下载图片
        let image_bytes = match self.fetcher.fetch(image_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("{} ❌ 图片下载失败: {}", ctx, e);
                return ResultRecord::new(
                    image_url,
                    AltText::Error(AltText::FETCH_ERROR_SENTINEL.to_string()),
                );
            }
        };

        // 3. 生成 ALT 文本
        match self.generator.generate(&image_bytes).await {
            Ok(text) => {
                info!("{} ✅ 生成成功: {}", ctx, truncate_text(&text, 60));
                ResultRecord::new(image_url, AltText::Generated(text))
            }
            Err(e) => {
                error!("{} ❌ ALT 文本生成失败: {}", ctx, e);
                ResultRecord::new(
                    image_url,
                    AltText::Error(AltText::GENERATE_ERROR_SENTINEL.to_string()),
                )
            }
        }
    }
}
