//! 结果数据模型
//!
//! 每个输入 URL 最终对应且仅对应一条 `ResultRecord`，
//! 三种结局（生成 / 跳过 / 失败）用带标签的枚举表达，
//! 哨兵字符串只在输出边界出现。

/// 单张图片的 ALT 文本结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AltText {
    /// 模型生成的描述文本
    Generated(String),
    /// 页面上已有人工 ALT 文本，跳过生成
    Skipped,
    /// 处理失败（携带可读的失败原因）
    Error(String),
}

impl AltText {
    /// 跳过哨兵（页面已有 ALT 文本）
    pub const SKIPPED_SENTINEL: &'static str = "[Skipped: existing ALT text found]";
    /// 图片下载失败哨兵
    pub const FETCH_ERROR_SENTINEL: &'static str = "[Error: Could not fetch image]";
    /// 推理失败哨兵（重试耗尽）
    pub const GENERATE_ERROR_SENTINEL: &'static str =
        "[Error: Failed to generate ALT text after retries]";

    /// 写入结果表格的文本
    pub fn as_output(&self) -> &str {
        match self {
            AltText::Generated(text) => text,
            AltText::Skipped => Self::SKIPPED_SENTINEL,
            AltText::Error(reason) => reason,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, AltText::Generated(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, AltText::Skipped)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AltText::Error(_))
    }
}

/// 一张图片的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// 图片 URL（输入标识，创建后不可变）
    pub image_url: String,
    /// ALT 文本结果
    pub alt_text: AltText,
}

impl ResultRecord {
    pub fn new(image_url: impl Into<String>, alt_text: AltText) -> Self {
        Self {
            image_url: image_url.into(),
            alt_text,
        }
    }
}

/// 一次运行的全部结果（按完成顺序，而非输入顺序）
pub type Batch = Vec<ResultRecord>;
