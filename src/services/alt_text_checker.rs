//! 已有 ALT 文本探测服务 - 业务能力层
//!
//! 尽力而为地判断图片所在页面是否已有人工 ALT 文本。
//! 父页面 URL 通过截掉最后一个路径段推导，这是一个启发式，
//! 只假设平铺目录式托管；任何失败（页面不可达、解析失败、
//! 推导不出父页面）都返回 false，只是放弃跳过优化，绝不报错。

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

/// 已有 ALT 文本探测能力
#[async_trait]
pub trait AltTextChecker: Send + Sync {
    /// 页面上是否已存在该图片的非空 ALT 文本（任何歧义或错误都视为否）
    async fn has_existing_alt_text(&self, image_url: &str) -> bool;
}

/// 基于父页面 HTML 的探测实现
pub struct PageAltTextChecker {
    client: reqwest::Client,
}

impl PageAltTextChecker {
    pub fn new(config: &Config) -> Result<Self> {
        // 与图片下载相同的超时；单次尝试，不重试
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl AltTextChecker for PageAltTextChecker {
    async fn has_existing_alt_text(&self, image_url: &str) -> bool {
        let Some(page_url) = parent_page_url(image_url) else {
            debug!("无法推导父页面，跳过 ALT 检查: {}", image_url);
            return false;
        };

        let Some(tail) = path_tail(image_url) else {
            return false;
        };

        let html = match self.fetch_page(&page_url).await {
            Ok(html) => html,
            Err(e) => {
                debug!("父页面获取失败 ({}): {}", page_url, e);
                return false;
            }
        };

        html_has_alt_for(&html, &tail)
    }
}

impl PageAltTextChecker {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// 推导父页面 URL：截掉 URL 的最后一个路径段
///
/// 例如 `https://a.com/products/shoe.jpg` → `https://a.com/products/`。
/// scheme 之后没有路径分隔符时无法推导，返回 None。
pub fn parent_page_url(image_url: &str) -> Option<String> {
    let without_query = strip_query(image_url);

    // 跳过 scheme 部分，避免把 "https://" 里的斜杠当成路径
    let path_start = match without_query.find("://") {
        Some(idx) => idx + 3,
        None => 0,
    };

    let last_slash = without_query[path_start..].rfind('/')?;
    Some(without_query[..path_start + last_slash + 1].to_string())
}

/// URL 的最后一个路径段（去掉查询参数）
pub fn path_tail(url: &str) -> Option<String> {
    let without_query = strip_query(url);
    let tail = without_query.rsplit('/').next()?;
    if tail.is_empty() {
        None
    } else {
        Some(tail.to_string())
    }
}

fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

/// 页面 HTML 中是否存在指向 `image_tail` 且带非空 alt 的 `<img>`
pub fn html_has_alt_for(html: &str, image_tail: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("img") else {
        return false;
    };

    for element in document.select(&selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        let Some(src_tail) = path_tail(src) else {
            continue;
        };
        if src_tail != image_tail {
            continue;
        }
        if let Some(alt) = element.value().attr("alt") {
            if !alt.trim().is_empty() {
                debug!("页面已有 ALT 文本: {} → {:?}", image_tail, alt);
                return true;
            }
        }
    }

    false
}
