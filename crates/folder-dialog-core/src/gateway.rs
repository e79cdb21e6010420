//! Creation gateway boundary
//!
//! The gateway is the only persistence collaborator. It is assumed to detect
//! name collisions itself and is not assumed to be idempotent.
//!
//! Transports that receive loosely-shaped error payloads convert them with
//! [`GatewayError::from_payload`] so the rest of the crate only ever sees the
//! closed [`GatewayError`] enum.

use crate::error::{AppError, AppErrorCode, GatewayError};
use crate::types::{CreateFolderRequest, FolderRecord};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Remote folder creation
#[async_trait]
pub trait CreationGateway: Send + Sync {
    /// Create a folder
    ///
    /// # Errors
    /// Any failure, unformatted; callers classify it before display.
    async fn create(&self, request: CreateFolderRequest) -> Result<FolderRecord, GatewayError>;
}

impl GatewayError {
    /// Interpret a raw error payload
    ///
    /// Recognised shapes, checked in this order:
    /// - `{ "data": { "appError": { "code": .. } } }` (object or JSON-encoded string)
    /// - `{ "code": "..", "message": .. }`
    /// - `{ "data": { "code": "..", "message": .. } }`
    ///
    /// Anything else becomes [`GatewayError::Opaque`] carrying the payload text.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        match parse_app_error(payload) {
            Some(err) => Self::Structured(err),
            None => Self::Opaque(payload.to_string()),
        }
    }
}

fn parse_app_error(payload: &Value) -> Option<AppError> {
    let object = payload.as_object()?;
    let data = object.get("data").and_then(Value::as_object);

    if let Some(app_error) = data.and_then(|d| d.get("appError")) {
        let nested = match app_error {
            Value::Object(inner) => app_error_from_object(inner),
            Value::String(raw) => serde_json::from_str::<Value>(raw)
                .ok()
                .as_ref()
                .and_then(Value::as_object)
                .and_then(app_error_from_object),
            _ => None,
        };
        if nested.is_some() {
            return nested;
        }
    }

    app_error_from_object(object).or_else(|| data.and_then(app_error_from_object))
}

fn app_error_from_object(object: &Map<String, Value>) -> Option<AppError> {
    let code = object.get("code")?.as_str()?;
    Some(AppError {
        code: AppErrorCode::from(code),
        message: object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_flat_app_error() {
        let err = GatewayError::from_payload(&json!({
            "code": "ALREADY_EXISTS",
            "message": "Folder exists"
        }));
        assert_eq!(
            err,
            GatewayError::Structured(
                AppError::new(AppErrorCode::AlreadyExists).with_message("Folder exists")
            )
        );
    }

    #[test]
    fn parses_nested_app_error_string() {
        let err = GatewayError::from_payload(&json!({
            "code": -32600,
            "message": "Bad request",
            "data": {
                "code": "BAD_REQUEST",
                "appError": "{\"code\":\"ALREADY_EXISTS\",\"message\":\"dup\"}"
            }
        }));
        assert_eq!(err.code(), Some(&AppErrorCode::AlreadyExists));
    }

    #[test]
    fn parses_nested_app_error_object() {
        let err = GatewayError::from_payload(&json!({
            "data": { "appError": { "code": "NOT_FOUND" } }
        }));
        assert_eq!(err.code(), Some(&AppErrorCode::NotFound));
    }

    #[test]
    fn falls_back_to_data_code() {
        let err = GatewayError::from_payload(&json!({
            "code": 500,
            "data": { "code": "INTERNAL_SERVER_ERROR" }
        }));
        assert_eq!(
            err.code(),
            Some(&AppErrorCode::Unrecognized("INTERNAL_SERVER_ERROR".into()))
        );
    }

    #[test]
    fn unstructured_payloads_are_opaque() {
        for payload in [json!("socket hang up"), json!(null), json!({ "error": true }), json!([1])] {
            assert!(matches!(GatewayError::from_payload(&payload), GatewayError::Opaque(_)));
        }
    }

    #[test]
    fn malformed_app_error_string_is_opaque() {
        let err = GatewayError::from_payload(&json!({ "data": { "appError": "{not json" } }));
        assert!(matches!(err, GatewayError::Opaque(_)));
    }
}
