pub mod loaders;
pub mod record;

pub use loaders::{load_image_urls, parse_image_urls, IMAGE_URL_COLUMN};
pub use record::{AltText, Batch, ResultRecord};
