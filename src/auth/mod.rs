// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Tracking Network

//! # Authentication Module
//!
//! Session-token authentication for the gateway API.
//!
//! ## Auth Flow
//!
//! 1. Caller registers (POST /register) or logs in (POST /users/login)
//! 2. Gateway mints an HS256 JWT with `{username, orgName, exp}` claims
//! 3. Caller sends `Authorization: Bearer <token>` on every other request
//! 4. The [`Auth`] extractor verifies the signature and expiry against the
//!    configured secret and hands the handler a verified caller identity
//!
//! Any verification failure yields one fixed `{success: false, message}`
//! envelope without invoking downstream logic.

pub mod claims;
pub mod error;
pub mod extractor;

pub use claims::{AuthenticatedCaller, SessionClaims};
pub use error::{AuthError, AUTH_FAILED_MESSAGE};
pub use extractor::Auth;
