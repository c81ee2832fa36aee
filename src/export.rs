//! 结果导出 - 把一个批次汇成两列表格
//!
//! 输出列固定为 `image_url,alt_text`，UTF-8 编码，RFC 4180 引号规则。
//! 写出与回读互为逆操作，任何字段都不截断。

use crate::error::{AppResult, InputError};
use crate::models::Batch;
use crate::utils::csv;
use anyhow::{bail, Result};
use std::fs;
use tracing::info;

/// 输出表头
pub const OUTPUT_HEADER: [&str; 2] = ["image_url", "alt_text"];

/// 将批次格式化为 CSV 文本
pub fn to_csv_string(batch: &Batch) -> String {
    let mut out = csv::format_record(&OUTPUT_HEADER);
    for record in batch {
        out.push_str(&csv::format_record(&[
            record.image_url.as_str(),
            record.alt_text.as_output(),
        ]));
    }
    out
}

/// 将批次写入 CSV 文件
pub fn write_csv(path: &str, batch: &Batch) -> AppResult<()> {
    fs::write(path, to_csv_string(batch))?;
    info!("💾 已写出 {} 行结果到 {}", batch.len(), path);
    Ok(())
}

/// 回读导出的 CSV 为 (image_url, alt_text) 对
///
/// 用于往返校验和下游消费。
pub fn parse_csv_string(text: &str) -> Result<Vec<(String, String)>> {
    let records = csv::parse(text).map_err(|e| InputError::Malformed {
        reason: e.to_string(),
    })?;

    let Some((header, rows)) = records.split_first() else {
        bail!("导出文件为空，缺少表头");
    };

    if header.len() < 2 || header[0] != OUTPUT_HEADER[0] || header[1] != OUTPUT_HEADER[1] {
        bail!("导出文件表头不符: {:?}", header);
    }

    let mut pairs = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        if row.len() < 2 {
            bail!("第 {} 行字段不足: {:?}", idx + 2, row);
        }
        pairs.push((row[0].clone(), row[1].clone()));
    }

    Ok(pairs)
}
