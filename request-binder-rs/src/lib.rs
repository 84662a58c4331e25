//! Request binding for axum handlers
//!
//! Decodes JSON request bodies, validates them against the constraint table
//! each request type declares, and turns the first failure into a 4xx
//! response with a client-facing message.

mod extractor;
pub mod messages;
pub mod requests;

pub use extractor::{
    bind_and_validate, validate_content_type, BindError, ErrorResponse, RequestSchema,
    ValidatedJson,
};
pub use requests::{CertificateRequest, TrafficTypeRequest};
