//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量调度和应用生命周期，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 初始化 HTTP 客户端与处理流程
//! - 加载并校验输入 CSV
//! - 导出结果、输出全局统计
//!
//! ### `batch_processor` - 批量调度器
//! - 去重清洗输入 URL
//! - 控制并发数量（Semaphore）
//! - 按完成顺序收集结果（mpsc）
//! - 上报进度事件
//!
//! ## 层次关系
//!
//! ```text
//! app (一次运行)
//!     ↓
//! batch_processor (处理 Vec<ImageRef>)
//!     ↓
//! workflow::ImageFlow (处理单张图片)
//!     ↓
//! services (能力层：check / fetch / generate)
//! ```

pub mod app;
pub mod batch_processor;

pub use app::App;
pub use batch_processor::{dedup_image_urls, BatchProcessor, Progress};
