pub mod http;
pub mod provider;

pub use http::HttpBackend;
pub use provider::{BackendError, SearchBackend};
