//! # ALT Text Generator
//!
//! 批量为图片 URL 生成 ALT 文本的 Rust 应用程序，
//! 推理走本地 Ollama 的视觉模型（默认 llava）。
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单张图片
//! - `ImageFetcher` - 图片下载能力（带超时与重试）
//! - `AltTextChecker` - 已有 ALT 文本探测能力（尽力而为）
//! - `CaptionGenerator` - ALT 文本生成能力（Ollama 推理）
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一张图"的完整处理流程
//! - `ImageCtx` - 上下文封装（批内序号，用于日志）
//! - `ImageFlow` - 流程编排（check → fetch → generate），
//!   每条路径都终止于一条结果记录
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量调度器，去重、并发控制、进度上报
//! - `orchestrator/app` - 应用生命周期（初始化、输入加载、导出、统计）
//!
//! ### ④ 数据与导出
//! - `models/` - 结果数据模型与输入 CSV 加载
//! - `export` - 两列结果表格的无损 CSV 导出与回读
//!
//! ## 失败语义
//!
//! 单张图片的下载/推理失败在重试耗尽后降级为结果行中的错误哨兵，
//! 绝不中断批次；只有输入校验错误（缺少 image_url 列）是运行级致命的。

pub mod config;
pub mod error;
pub mod export;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, FetchError, InputError};
pub use models::{AltText, Batch, ResultRecord};
pub use orchestrator::{App, BatchProcessor, Progress};
pub use services::{AltTextChecker, CaptionGenerator, ImageFetcher};
pub use workflow::{ImageCtx, ImageFlow};
