//! # Host Validation Library
//!
//! Validation predicates for host names, URIs, bare paths and base64 blobs,
//! plus a constraint-table schema for request payloads.
//!
//! ## Features
//!
//! - Domain format checks with an explicit subdomain expectation
//! - URI policy checks (http/https scheme, host names only, port range, path)
//! - Label-count subdomain classification
//! - Bare path and padded standard base64 checks
//! - Ordered field -> constraint tables over JSON values
//! - Fixture loading and per-record evaluation for batch runs
//!
//! Every predicate is pure: it reads its input and returns, with no shared
//! mutable state, so all of them are safe to call from any thread.

mod builder;
mod errors;
pub mod fixture;
pub mod report;
pub mod schema;
pub mod validators;

pub use builder::ValidationBuilder;
pub use errors::{ValidationError, ValidationResult};
pub use fixture::{load_records, FixtureError, ValidationRecord};
pub use report::{evaluate, RecordReport};
pub use schema::{Constraint, FieldError, Schema, SchemaError};
pub use validators::{
    is_subdomain, is_subdomain_with_scheme, is_subdomain_without_scheme, is_valid_base64,
    is_valid_domain, is_valid_path, is_valid_uri,
};

/// Re-export commonly used items for convenience
pub mod prelude {
    pub use crate::builder::ValidationBuilder;
    pub use crate::errors::{ValidationError, ValidationResult};
    pub use crate::schema::{Constraint, Schema};
    pub use crate::validators;
}

/// Version of the validation library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
