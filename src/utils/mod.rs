pub mod text_sanitizer;

pub use text_sanitizer::sanitize;
