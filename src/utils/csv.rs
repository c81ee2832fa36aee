//! 极简 CSV 读写工具
//!
//! 遵循 RFC 4180 引号规则：字段包含逗号、引号或换行时整体加引号，
//! 字段内的引号写成两个引号。读写互为逆操作，不截断任何字段。

use thiserror::Error;

/// CSV 解析错误
#[derive(Debug, Error)]
pub enum CsvError {
    /// 引号未闭合
    #[error("CSV 引号未闭合（记录 {record}）")]
    UnclosedQuote { record: usize },
}

/// 转义单个字段
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// 将一条记录格式化为一行 CSV（含结尾换行）
pub fn format_record(fields: &[&str]) -> String {
    let mut line = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// 解析整个 CSV 文本为记录列表
///
/// 支持引号字段内的逗号、转义引号和换行；空行忽略。
pub fn parse(text: &str) -> Result<Vec<Vec<String>>, CsvError> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            // 只有位于字段开头的引号才开启引用模式
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_record(&mut records, &mut record, &mut field);
            }
            '\n' => end_record(&mut records, &mut record, &mut field),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CsvError::UnclosedQuote {
            record: records.len() + 1,
        });
    }

    end_record(&mut records, &mut record, &mut field);

    Ok(records)
}

fn end_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    // 空行（没有任何字段和分隔符）不产生记录
    if record.is_empty() && field.is_empty() {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}
