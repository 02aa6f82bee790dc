pub mod error;
pub(crate) mod extractor;
pub mod loader;
pub mod render_cache;
pub mod source;
