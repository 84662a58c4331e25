//! JSON binding with constraint-table validation
//!
//! [`ValidatedJson`] runs three stages and rejects on the first failure:
//! content-type check, JSON decoding into `T`, then the schema `T` declares
//! through [`RequestSchema`]. Only the first failing constraint is reported.

use crate::messages::{
    format_field_error, MSG_CONTENT_TYPE_MISSING, MSG_INTERNAL_ERROR, MSG_INVALID_PARAM,
    MSG_UNSUPPORTED_CONTENT_TYPE,
};
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use host_validation::{FieldError, Schema, SchemaError};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::Value;

/// Request types that carry a constraint table
pub trait RequestSchema {
    /// The table applied to the decoded JSON body
    fn schema() -> &'static Schema;
}

/// Error body returned to clients
#[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Rejection raised while binding a request
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("{}: '{}'", MSG_UNSUPPORTED_CONTENT_TYPE, MSG_CONTENT_TYPE_MISSING)]
    MissingContentType,

    #[error("{}: '{}'", MSG_UNSUPPORTED_CONTENT_TYPE, .0)]
    UnsupportedContentType(String),

    #[error("{}: {}", MSG_INTERNAL_ERROR, .message)]
    Body { status: StatusCode, message: String },

    #[error("invalid json syntax: {0}")]
    Syntax(String),

    #[error("{}: '{}'", MSG_INVALID_PARAM, .0)]
    InvalidParam(String),

    #[error("{}", format_field_error(.0))]
    Validation(FieldError),
}

impl BindError {
    /// HTTP status for this rejection
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingContentType | Self::UnsupportedContentType(_) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            Self::Body { status, .. } => *status,
            Self::Syntax(_) | Self::InvalidParam(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Convert to HTTP status code and error response
    pub fn to_response(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                code: status.as_u16(),
            }),
        )
    }

    fn from_json(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Syntax | Category::Eof => {
                log::debug!("json syntax error: {}", err);
                Self::Syntax(err.to_string())
            }
            Category::Data => {
                log::debug!("type error: {}", err);
                Self::InvalidParam(err.to_string())
            }
            Category::Io => {
                log::error!("other binding error: {}", err);
                Self::Body {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for BindError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

/// Validate the Content-Type header (media type parameters are ignored)
pub fn validate_content_type(headers: &HeaderMap) -> Result<(), BindError> {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        log::debug!("Content-Type header missing");
        return Err(BindError::MissingContentType);
    };

    let content_type = String::from_utf8_lossy(value.as_bytes()).into_owned();
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case("application/json") {
        Ok(())
    } else {
        log::debug!("Unsupported Content-Type: {}", content_type);
        Err(BindError::UnsupportedContentType(content_type))
    }
}

/// Decode `body` into `T` and check it against `T`'s schema
pub fn bind_and_validate<T>(body: &[u8]) -> Result<T, BindError>
where
    T: DeserializeOwned + RequestSchema,
{
    let value: Value = serde_json::from_slice(body).map_err(BindError::from_json)?;
    let request: T = serde_path_to_error::deserialize(&value).map_err(|err| {
        log::debug!("type error: field[{}], {}", err.path(), err.inner());
        BindError::InvalidParam(err.path().to_string())
    })?;

    match T::schema().validate(&value) {
        Ok(()) => Ok(request),
        Err(SchemaError::Field(err)) => {
            log::debug!("validation failed on '{}' ({})", err.field, err.tag);
            Err(BindError::Validation(err))
        }
        Err(err @ SchemaError::NotAnObject(_)) => Err(BindError::InvalidParam(err.to_string())),
    }
}

/// JSON body extractor that only yields requests passing their schema
///
/// ```ignore
/// async fn traffic(ValidatedJson(req): ValidatedJson<TrafficTypeRequest>) -> impl IntoResponse {
///     // req.stime >= 1 and req.etime > req.stime here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + RequestSchema,
    S: Send + Sync,
{
    type Rejection = BindError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        validate_content_type(req.headers())?;

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| BindError::Body {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        bind_and_validate(&body).map(ValidatedJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::TrafficTypeRequest;
    use axum::http::HeaderValue;

    #[test]
    fn test_validate_content_type() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            validate_content_type(&headers),
            Err(BindError::MissingContentType)
        ));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(validate_content_type(&headers).is_ok());

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("Application/JSON; charset=utf-8"),
        );
        assert!(validate_content_type(&headers).is_ok());

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let err = validate_content_type(&headers).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.to_string(), "unsupported content type: 'text/plain'");
    }

    #[test]
    fn test_bind_and_validate() {
        let req: TrafficTypeRequest =
            bind_and_validate(br#"{"stime": 1721192000, "etime": 1733420270, "type": "traffic"}"#)
                .unwrap();
        assert_eq!(req.kind, "traffic");
        assert_eq!(req.stime, 1721192000);
        assert_eq!(req.etime, 1733420270);
    }

    #[test]
    fn test_bind_errors() {
        let err = bind_and_validate::<TrafficTypeRequest>(br#"{"stime": 1,"#).unwrap_err();
        assert!(matches!(err, BindError::Syntax(_)));
        assert!(err.to_string().starts_with("invalid json syntax: "));

        let err = bind_and_validate::<TrafficTypeRequest>(br#"{"stime": "soon"}"#).unwrap_err();
        assert!(matches!(err, BindError::InvalidParam(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid parameter: 'stime'");

        let err = bind_and_validate::<TrafficTypeRequest>(br#"{"type": 7, "stime": 1, "etime": 2}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter: 'type'");

        let err = bind_and_validate::<TrafficTypeRequest>(br#"{"stime": 0, "etime": 5, "type": "bps"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter: 'stime' is required");

        let err = bind_and_validate::<TrafficTypeRequest>(br#"["traffic", 1, 2]"#).unwrap_err();
        assert!(matches!(err, BindError::InvalidParam(_)));
    }

    #[test]
    fn test_error_response() {
        let (status, Json(body)) = BindError::MissingContentType.to_response();
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            body,
            ErrorResponse {
                error: "unsupported content type: 'content type missing'".to_string(),
                code: 415,
            }
        );
    }
}
