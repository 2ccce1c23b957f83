//! County health statistics lookup service.

pub mod config;
pub mod http;
pub mod ingest;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod storage;
pub mod validation;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use lookup::{LookupEngine, LookupError};
