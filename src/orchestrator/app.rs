//! 应用生命周期 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：构造 HTTP 客户端和处理流程，输出启动信息
//! 2. **诊断检查**：列出 Ollama 已安装模型（失败不致命）
//! 3. **输入加载**：读取并校验输入 CSV（缺列直接失败，不派发任何任务）
//! 4. **批次运行**：委托 BatchProcessor
//! 5. **结果导出**：写出两列 CSV，输出全局统计

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::export;
use crate::models::load_image_urls;
use crate::orchestrator::batch_processor::BatchProcessor;
use crate::services::{HttpImageFetcher, OllamaClient, PageAltTextChecker};
use crate::utils::logging::{log_startup, log_urls_loaded, print_final_stats};
use crate::workflow::ImageFlow;

/// 应用主结构
pub struct App {
    config: Config,
    flow: Arc<ImageFlow>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let ollama = OllamaClient::new(&config)?;

        // 诊断：确认本地服务可达并列出模型，失败只警告
        match ollama.list_models().await {
            Ok(models) if models.is_empty() => {
                warn!("⚠️ Ollama 可达，但没有任何已安装模型");
            }
            Ok(models) => {
                info!("🧠 Ollama 已安装模型: {}", models.join(", "));
            }
            Err(e) => {
                warn!("⚠️ 无法获取 Ollama 模型列表（诊断信息）: {}", e);
            }
        }

        let flow = Arc::new(ImageFlow::new(
            Arc::new(PageAltTextChecker::new(&config)?),
            Arc::new(HttpImageFetcher::new(&config)?),
            Arc::new(ollama),
            config.skip_existing_alt,
        ));

        Ok(Self { config, flow })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 输入校验错误（缺少 image_url 列）在这里直接失败
        let urls = load_image_urls(&self.config.input_csv)?;

        if urls.is_empty() {
            warn!("⚠️ 输入中没有图片 URL，程序结束");
            return Ok(());
        }

        log_urls_loaded(urls.len(), &self.config.input_csv);

        let processor = BatchProcessor::new(Arc::clone(&self.flow), self.config.max_workers);
        let batch = processor.run(urls).await;

        export::write_csv(&self.config.output_csv, &batch)?;

        print_final_stats(&batch, &self.config.output_csv, self.config.verbose_logging);

        Ok(())
    }
}
