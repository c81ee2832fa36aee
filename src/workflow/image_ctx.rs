//! 图片处理上下文
//!
//! 封装"我正在处理这一批里的第几张图"这一信息，仅用于日志显示

use std::fmt::Display;

/// 图片处理上下文
#[derive(Debug, Clone)]
pub struct ImageCtx {
    /// 图片在批次中的序号（从1开始）
    pub image_index: usize,

    /// 批次总数
    pub total: usize,
}

impl ImageCtx {
    pub fn new(image_index: usize, total: usize) -> Self {
        Self { image_index, total }
    }
}

impl Display for ImageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[图片 {}/{}]", self.image_index, self.total)
    }
}
