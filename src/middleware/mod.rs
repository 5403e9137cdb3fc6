// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Request middleware: authentication and security headers.

pub mod auth;
pub mod security;

pub use auth::{create_jwt, require_auth, AuthUser};
pub use security::security_headers;
