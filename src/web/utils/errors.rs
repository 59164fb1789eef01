use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::common::identity::IdentityError;
use crate::varsel::FetchError;

pub const CODE_MISSING_HEADER: &str = "TMS-API-400-MISSING-FNR";
pub const CODE_INVALID_HEADER: &str = "TMS-API-400-INVALID-FNR";
pub const CODE_UNKNOWN_CATEGORY: &str = "TMS-API-400-VARSELTYPE";
pub const CODE_UPSTREAM_AUTH: &str = "TMS-UPS-502-AUTH";
pub const CODE_UPSTREAM_HTTP: &str = "TMS-UPS-502-HTTP";
pub const CODE_UPSTREAM_DECODE: &str = "TMS-UPS-502-DECODE";
pub const CODE_UPSTREAM_UNAVAILABLE: &str = "TMS-UPS-503";

const UPSTREAM_MESSAGE: &str = "Failed to fetch varsler from event handler";

pub fn error_json(code: &str, message: &str) -> Value {
    serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// 请求级错误，每种错误都对应一个明确的 HTTP 状态
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error("Unknown varseltype '{0}' in url")]
    UnknownCategory(String),
    #[error(transparent)]
    Upstream(#[from] FetchError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Identity(_) | ApiError::UnknownCategory(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(FetchError::UpstreamUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Identity(IdentityError::MissingHeader) => CODE_MISSING_HEADER,
            ApiError::Identity(IdentityError::InvalidFormat) => CODE_INVALID_HEADER,
            ApiError::UnknownCategory(_) => CODE_UNKNOWN_CATEGORY,
            ApiError::Upstream(FetchError::UpstreamAuth(_)) => CODE_UPSTREAM_AUTH,
            ApiError::Upstream(FetchError::UpstreamHttp { .. }) => CODE_UPSTREAM_HTTP,
            ApiError::Upstream(FetchError::UpstreamDecode(_)) => CODE_UPSTREAM_DECODE,
            ApiError::Upstream(FetchError::UpstreamUnavailable(_)) => CODE_UPSTREAM_UNAVAILABLE,
        }
    }

    /// 返回给调用方的消息；上游错误只给出通用描述
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Upstream(_) => UPSTREAM_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Upstream(err) => tracing::error!("[Varsel] Upstream failure: {}", err),
            other => tracing::debug!("[Varsel] Rejected request: {}", other),
        }
        (status, Json(error_json(self.code(), &self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        for err in [
            ApiError::from(IdentityError::MissingHeader),
            ApiError::from(IdentityError::InvalidFormat),
            ApiError::UnknownCategory("ukjent".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn upstream_errors_map_to_gateway_statuses() {
        let cases = [
            (FetchError::UpstreamAuth("x".into()), StatusCode::BAD_GATEWAY),
            (FetchError::UpstreamHttp { status: 404 }, StatusCode::BAD_GATEWAY),
            (FetchError::UpstreamDecode("x".into()), StatusCode::BAD_GATEWAY),
            (
                FetchError::UpstreamUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn upstream_details_are_not_exposed() {
        let err = ApiError::from(FetchError::UpstreamDecode("secret body".into()));
        assert!(!err.public_message().contains("secret body"));
    }

    #[test]
    fn header_messages_are_distinguishable() {
        let missing = ApiError::from(IdentityError::MissingHeader).public_message();
        let invalid = ApiError::from(IdentityError::InvalidFormat).public_message();
        assert_ne!(missing, invalid);
    }
}
