//! JSON response envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// Standard `{success, message?, data?}` envelope for every JSON response.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// 200 with data.
    pub fn ok(data: T) -> Response {
        Json(Envelope {
            success: true,
            message: None,
            data: Some(data),
        })
        .into_response()
    }

    /// 201 with a message and data.
    pub fn created(message: impl Into<String>, data: T) -> Response {
        (
            StatusCode::CREATED,
            Json(Envelope {
                success: true,
                message: Some(message.into()),
                data: Some(data),
            }),
        )
            .into_response()
    }
}

/// Success envelope with a message and no data.
pub fn message(message: impl Into<String>) -> Response {
    Json(json!({ "success": true, "message": message.into() })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_empty_fields() {
        let envelope = Envelope {
            success: true,
            message: None,
            data: Some(1),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"success":true,"data":1}"#);
    }
}
