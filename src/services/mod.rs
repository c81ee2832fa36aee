pub mod alt_text_checker;
pub mod caption_generator;
pub mod image_fetcher;

pub use alt_text_checker::{AltTextChecker, PageAltTextChecker};
pub use caption_generator::{CaptionGenerator, OllamaClient, ALT_TEXT_PROMPT};
pub use image_fetcher::{HttpImageFetcher, ImageFetcher};
