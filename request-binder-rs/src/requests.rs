//! Request payloads bound through [`ValidatedJson`](crate::ValidatedJson)

use crate::extractor::RequestSchema;
use host_validation::{Constraint, Schema};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref TRAFFIC_TYPE_SCHEMA: Schema = Schema::new()
        .field("type", [Constraint::one_of("traffic bps visit threat cache")])
        .field("stime", [Constraint::Required, Constraint::Min(1.0)])
        .field(
            "etime",
            [Constraint::Required, Constraint::GtField("stime".to_string())],
        );

    static ref CERTIFICATE_SCHEMA: Schema = Schema::new()
        .field("cert", [Constraint::Required, Constraint::Base64])
        .field("pkey", [Constraint::Required, Constraint::Base64]);
}

/// Traffic statistics query over a time window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficTypeRequest {
    /// Statistic kind: traffic, bps, visit, threat or cache
    #[serde(rename = "type")]
    pub kind: String,
    /// Window start (unix seconds)
    pub stime: i64,
    /// Window end (unix seconds), after `stime`
    pub etime: i64,
}

impl RequestSchema for TrafficTypeRequest {
    fn schema() -> &'static Schema {
        &TRAFFIC_TYPE_SCHEMA
    }
}

/// Certificate and private key upload, both base64 encoded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateRequest {
    pub cert: String,
    pub pkey: String,
}

impl RequestSchema for CertificateRequest {
    fn schema() -> &'static Schema {
        &CERTIFICATE_SCHEMA
    }
}
