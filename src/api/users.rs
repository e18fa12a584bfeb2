// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! Registration and login endpoints.
//!
//! Both mint a session token; /register additionally enrolls the user in the
//! wallet registry and returns the enrollment secret.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    auth::SessionClaims,
    error::{require_text, FieldError},
    models::{EnrollRequest, RegisterResponse, StatusEnvelope},
    state::AppState,
};

fn mint_token(state: &AppState, username: &str, org_name: &str) -> Result<String, Response> {
    SessionClaims::new(username, org_name, state.config.jwt_expire_secs)
        .sign(&state.config.jwt_secret)
        .map_err(|e| e.into_response())
}

/// Register and enroll a user, returning the enrollment secret and a
/// session token.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Registration outcome", body = RegisterResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<EnrollRequest>,
) -> Result<Response, FieldError> {
    let username = require_text(request.username, "'username'")?;
    let org_name = require_text(request.org_name, "'orgName'")?;
    tracing::debug!(%username, %org_name, "endpoint /register");

    let token = match mint_token(&state, &username, &org_name) {
        Ok(token) => token,
        Err(response) => return Ok(response),
    };

    match state.wallets.register(&username, &org_name).await {
        Ok(identity) => {
            tracing::debug!(%username, %org_name, "successfully registered user");
            Ok(Json(RegisterResponse {
                success: true,
                secret: identity.secret,
                message: format!("{username} enrolled Successfully"),
                token,
            })
            .into_response())
        }
        Err(e) => {
            tracing::debug!(%username, %org_name, error = %e, "failed to register user");
            Ok(Json(StatusEnvelope::failure(e.to_string())).into_response())
        }
    }
}

/// Log in an already-registered user and mint a session token.
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Users",
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Login outcome", body = StatusEnvelope),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<EnrollRequest>,
) -> Result<Response, FieldError> {
    let username = require_text(request.username, "'username'")?;
    let org_name = require_text(request.org_name, "'orgName'")?;
    tracing::debug!(%username, %org_name, "endpoint /users/login");

    if !state.wallets.is_registered(&username, &org_name).await {
        return Ok(Json(StatusEnvelope::failure(format!(
            "User with username {username} is not registered with {org_name}, \
             Please register first."
        )))
        .into_response());
    }

    let token = match mint_token(&state, &username, &org_name) {
        Ok(token) => token,
        Err(response) => return Ok(response),
    };

    Ok(Json(StatusEnvelope::success(json!({ "token": token }))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    fn enroll_body(username: Option<&str>, org: Option<&str>) -> EnrollRequest {
        EnrollRequest {
            username: username.map(str::to_string),
            org_name: org.map(str::to_string),
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn register_returns_secret_and_token() {
        let state = AppState::default();
        let response = register(
            State(state.clone()),
            Json(enroll_body(Some("alice"), Some("Org1"))),
        )
        .await
        .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "alice enrolled Successfully");
        assert!(!body["secret"].as_str().unwrap().is_empty());
        assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);

        assert!(state.wallets.is_registered("alice", "Org1").await);
    }

    #[tokio::test]
    async fn register_rejects_missing_username() {
        let state = AppState::default();
        let err = register(State(state), Json(enroll_body(None, Some("Org1"))))
            .await
            .unwrap_err();
        assert_eq!(err, FieldError("'username'"));
    }

    #[tokio::test]
    async fn register_rejects_missing_org_name() {
        let state = AppState::default();
        let err = register(State(state), Json(enroll_body(Some("alice"), None)))
            .await
            .unwrap_err();
        assert_eq!(err, FieldError("'orgName'"));
    }

    #[tokio::test]
    async fn duplicate_registration_fails_gracefully() {
        let state = AppState::default();
        state.wallets.register("alice", "Org1").await.unwrap();

        let response = register(
            State(state),
            Json(enroll_body(Some("alice"), Some("Org1"))),
        )
        .await
        .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User alice is already registered with Org1");
    }

    #[tokio::test]
    async fn login_returns_token_for_registered_user() {
        let state = AppState::default();
        state.wallets.register("alice", "Org1").await.unwrap();

        let response = login(
            State(state),
            Json(enroll_body(Some("alice"), Some("Org1"))),
        )
        .await
        .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(body["message"]["token"].is_string());
    }

    #[tokio::test]
    async fn login_fails_for_unregistered_user() {
        let state = AppState::default();
        let response = login(
            State(state),
            Json(enroll_body(Some("bob"), Some("Org1"))),
        )
        .await
        .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "User with username bob is not registered with Org1, Please register first."
        );
    }
}
