//! County lookup subsystem.
//!
//! Ties the validator to the store: payload in, rows or a [`LookupError`]
//! out. HTTP status mapping lives in `http::response`.

pub mod engine;
pub mod error;

pub use engine::LookupEngine;
pub use error::{LookupError, LookupResult};
