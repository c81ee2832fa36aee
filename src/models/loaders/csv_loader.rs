//! 输入 CSV 加载器
//!
//! 输入文件必须包含名为 `image_url` 的列；缺列是运行级致命错误，
//! 在派发任何任务之前直接报告。空值在这里丢弃，去重由编排层负责。

use crate::error::{AppError, InputError};
use crate::utils::csv;
use std::fs;
use tracing::debug;

/// 必需的输入列名
pub const IMAGE_URL_COLUMN: &str = "image_url";

/// 从 CSV 文件加载图片 URL 列表
pub fn load_image_urls(path: &str) -> Result<Vec<String>, AppError> {
    let content = fs::read_to_string(path).map_err(|source| {
        AppError::Input(InputError::ReadFailed {
            path: path.to_string(),
            source,
        })
    })?;
    parse_image_urls(&content)
}

/// 从 CSV 文本解析图片 URL 列表
///
/// 保留重复值（去重是编排层的职责），丢弃空白单元格。
pub fn parse_image_urls(content: &str) -> Result<Vec<String>, AppError> {
    let records = csv::parse(content).map_err(|e| {
        AppError::Input(InputError::Malformed {
            reason: e.to_string(),
        })
    })?;

    let header = records.first().ok_or_else(|| missing_column())?;

    let column_index = header
        .iter()
        .position(|h| normalize_header(h) == IMAGE_URL_COLUMN)
        .ok_or_else(missing_column)?;

    let urls: Vec<String> = records
        .iter()
        .skip(1)
        .filter_map(|row| row.get(column_index))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();

    debug!("输入共 {} 行，提取到 {} 个非空 URL", records.len().saturating_sub(1), urls.len());

    Ok(urls)
}

fn missing_column() -> AppError {
    AppError::Input(InputError::MissingColumn {
        column: IMAGE_URL_COLUMN.to_string(),
    })
}

/// 去掉 BOM 和首尾空白后的列名
fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}
