//! 错误类型定义
//!
//! 错误分两类：
//! - 结构性错误（输入校验、文件写入）：整个运行直接失败
//! - 单图错误（下载、推理）：降级为结果行中的错误哨兵，绝不中断批次

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验错误（运行级致命）
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 文件读写错误
    #[error("文件错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 输入校验错误
#[derive(Debug, Error)]
pub enum InputError {
    /// CSV 缺少必需列
    #[error("CSV 缺少必需列: {column}")]
    MissingColumn { column: String },
    /// CSV 格式非法
    #[error("CSV 解析失败: {reason}")]
    Malformed { reason: String },
    /// 读取输入文件失败
    #[error("读取输入文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
}

/// 图片下载错误（重试耗尽后的最终失败）
#[derive(Debug, Error)]
pub enum FetchError {
    /// 网络请求失败（连接失败、超时等）
    #[error("图片请求失败: {reason}")]
    Request { reason: String },
    /// HTTP 状态码非成功
    #[error("图片请求返回异常状态: {status}")]
    BadStatus { status: u16 },
}

/// 推理接口调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {reason}")]
    RequestFailed { endpoint: String, reason: String },
    /// 接口返回异常状态
    #[error("接口返回异常状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 响应 JSON 解析失败
    #[error("响应解析失败 ({endpoint}): {reason}")]
    JsonParseFailed { endpoint: String, reason: String },
    /// 响应缺少生成文本（response 字段为空）
    #[error("模型返回内容为空")]
    EmptyResponse,
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
