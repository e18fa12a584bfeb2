// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! Request-validation errors.
//!
//! A missing or invalid request field is answered with the fixed
//! `{"success": false, "message": "'<Field>' field is missing or Invalid in
//! the request"}` envelope. Downstream ledger/contract failures use the
//! `{result, error, errorData}` envelope instead (see
//! [`crate::models::TxEnvelope`]).

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::models::StatusEnvelope;

/// A required request field that is missing or invalid.
///
/// Carries the human-facing field label used in the response message
/// (e.g. `"'Unit Cost'"`), not the JSON key.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldError(pub &'static str);

impl FieldError {
    pub fn message(&self) -> String {
        format!("{} field is missing or Invalid in the request", self.0)
    }
}

impl IntoResponse for FieldError {
    fn into_response(self) -> Response {
        Json(StatusEnvelope::failure(self.message())).into_response()
    }
}

/// Require a request field, naming it in the error when absent.
pub fn require<T>(value: Option<T>, label: &'static str) -> Result<T, FieldError> {
    value.ok_or(FieldError(label))
}

/// Require a non-empty text field. Empty strings count as missing, matching
/// the gateway's original falsy-field validation.
pub fn require_text(value: Option<String>, label: &'static str) -> Result<String, FieldError> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(FieldError(label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[test]
    fn message_quotes_field_label() {
        assert_eq!(
            FieldError("'Unit Cost'").message(),
            "'Unit Cost' field is missing or Invalid in the request"
        );
    }

    #[test]
    fn require_passes_values_through() {
        assert_eq!(require(Some(5), "'x'").unwrap(), 5);
        assert_eq!(require::<u32>(None, "'x'").unwrap_err(), FieldError("'x'"));
    }

    #[test]
    fn require_text_rejects_empty_strings() {
        assert_eq!(
            require_text(Some("alice".to_string()), "'username'").unwrap(),
            "alice"
        );
        assert_eq!(
            require_text(Some(String::new()), "'username'").unwrap_err(),
            FieldError("'username'")
        );
        assert_eq!(
            require_text(None, "'username'").unwrap_err(),
            FieldError("'username'")
        );
    }

    #[tokio::test]
    async fn into_response_uses_status_envelope() {
        let response = FieldError("'username'").into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "'username' field is missing or Invalid in the request"
        );
    }
}
