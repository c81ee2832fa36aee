//! 图片下载服务 - 业务能力层
//!
//! 只负责"把 URL 变成字节"能力，不关心流程。
//! 超时按单次请求计算，重试耗尽后返回类型化错误，绝不 panic。

use crate::config::Config;
use crate::error::FetchError;
use crate::utils::with_retry;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// 图片获取能力
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// 获取图片原始字节；所有失败（含重试耗尽）都以 `FetchError` 返回
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// 基于 reqwest 的图片下载实现
pub struct HttpImageFetcher {
    client: reqwest::Client,
    max_retries: usize,
    retry_backoff: Duration,
}

impl HttpImageFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
        })
    }

    /// 单次下载尝试
    async fn fetch_once(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Request {
            reason: e.to_string(),
        })?;

        debug!("图片下载成功: {} ({} 字节)", url, bytes.len());

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        with_retry(self.max_retries, self.retry_backoff, "图片下载", || {
            self.fetch_once(url)
        })
        .await
    }
}
