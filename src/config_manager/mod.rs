pub mod secrets;
pub mod utils;

pub use secrets::{resolve_api_key, ApiKey};
