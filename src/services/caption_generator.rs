//! ALT 文本生成服务 - 业务能力层
//!
//! 只负责"字节进、描述文本出"能力，不关心流程。
//! 走本地 Ollama 的 `/api/generate` 接口，图片以 base64 随请求体上传。

use crate::config::Config;
use crate::error::ApiError;
use crate::utils::with_retry;
use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// 固定的生成提示词
///
/// 要求客观、约 30 词以内、尽量按"对象-动作-场景"结构描述，
/// 并转写图片中可见的文字。
pub const ALT_TEXT_PROMPT: &str = "Please provide a functional, objective description of the provided image in no more than around 30 words so that someone who could not see it would be able to imagine it. If possible, follow an \u{201c}object-action-context\u{201d} framework. If the image contains any visible text, transcribe it.";

/// ALT 文本生成能力
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// 为图片字节生成描述文本；重试耗尽后以 `ApiError` 返回
    async fn generate(&self, image_bytes: &[u8]) -> Result<String, ApiError>;
}

/// Ollama 推理请求体
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    images: Vec<&'a str>,
}

/// Ollama 推理响应体（只关心生成文本）
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Ollama 客户端
#[derive(Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    max_retries: usize,
    retry_backoff: Duration,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Result<Self> {
        // 推理超时远大于下载超时
        let client = reqwest::Client::builder()
            .timeout(config.inference_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.ollama_base_url.trim_end_matches('/').to_string(),
            model: config.model_name.clone(),
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
        })
    }

    /// 列出已安装的模型名称（诊断用，不参与核心流程）
    pub async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        let endpoint = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        let tags: TagsResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::JsonParseFailed {
                    endpoint,
                    reason: e.to_string(),
                })?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// 单次推理尝试
    async fn generate_once(&self, image_b64: &str) -> Result<String, ApiError> {
        let endpoint = format!("{}/api/generate", self.base_url);

        let payload = GenerateRequest {
            model: &self.model,
            prompt: ALT_TEXT_PROMPT,
            stream: false,
            images: vec![image_b64],
        };

        let response = self
            .client
            .post(&endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::JsonParseFailed {
                    endpoint,
                    reason: e.to_string(),
                })?;

        // response 字段缺失或为空都算一次失败，进入重试
        let text = body.response.trim().to_string();
        if text.is_empty() {
            return Err(ApiError::EmptyResponse);
        }

        debug!("推理成功，生成 {} 字符", text.len());

        Ok(text)
    }
}

#[async_trait]
impl CaptionGenerator for OllamaClient {
    async fn generate(&self, image_bytes: &[u8]) -> Result<String, ApiError> {
        let image_b64 = general_purpose::STANDARD.encode(image_bytes);
        debug!(
            "开始推理: 图片 {} 字节，base64 {} 字符",
            image_bytes.len(),
            image_b64.len()
        );

        with_retry(self.max_retries, self.retry_backoff, "ALT 文本生成", || {
            self.generate_once(&image_b64)
        })
        .await
    }
}
