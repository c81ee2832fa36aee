pub mod csv_loader;

pub use csv_loader::{load_image_urls, parse_image_urls, IMAGE_URL_COLUMN};
