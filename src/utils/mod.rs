pub mod csv;
pub mod logging;
pub mod retry;

pub use logging::truncate_text;
pub use retry::with_retry;
