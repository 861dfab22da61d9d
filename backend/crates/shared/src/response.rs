//! API Response Envelope
//!
//! Every endpoint returns `{success, message, data}` with an HTTP status
//! mirroring the outcome. Failures are produced by [`AppError`]'s
//! `IntoResponse`; successes go through [`ApiResponse`].
//!
//! [`AppError`]: crate::error::app_error::AppError

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Success envelope for API responses.
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let resp = ApiResponse::ok(vec![1, 2, 3]);
/// let resp = ApiResponse::ok_with_message("Record updated", 42);
/// let resp: ApiResponse<()> = ApiResponse::empty("Saved");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with data and a default message.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: "OK".to_string(),
            data: Some(data),
        }
    }

    /// 200 with data and an explicit message.
    pub fn ok_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// 200 with no data payload.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let resp = ApiResponse::ok(7);
        assert!(resp.success);
        assert_eq!(resp.message, "OK");
        assert_eq!(resp.data, Some(7));
    }

    #[test]
    fn test_empty_envelope_serializes_null_data() {
        let resp: ApiResponse<()> = ApiResponse::empty("Saved");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Saved");
        assert!(json["data"].is_null());
    }
}
