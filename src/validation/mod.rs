//! Request validation subsystem.
//!
//! # Data Flow
//! ```text
//! JSON object
//!     → request.rs (ordered rules, first failure wins)
//!         uses zip.rs (5-digit shape) and catalog.rs (closed measure set)
//!     → Verdict (Teapot | BadRequest | MeasureNotFound | Valid)
//! ```
//!
//! # Design Decisions
//! - Pure functions only: nothing here touches storage
//! - Unknown measures are rejected by set membership, not by a query

pub mod catalog;
pub mod request;
pub mod zip;

pub use catalog::{MeasureCatalog, MEASURE_NAMES};
pub use request::{validate_payload, Verdict};
pub use zip::ZipCode;
