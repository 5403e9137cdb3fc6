// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! JWT session authentication.
//!
//! The token travels in the `volink_token` cookie (browser clients) or an
//! `Authorization: Bearer` header (tests, scripts). It carries only the
//! user id; role checks load the user document per request.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::AppError;
use crate::AppState;

pub const AUTH_COOKIE: &str = "volink_token";

const SESSION_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id (identity-provider subject)
    sub: String,
    exp: i64,
    iat: i64,
}

/// The authenticated caller, inserted as a request extension by
/// [`require_auth`] and extracted by handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Sign a session token for a user.
pub fn create_jwt(user_id: &str, signing_key: &[u8]) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + chrono::Duration::days(SESSION_DAYS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign session token: {}", e)))
}

/// Middleware guarding every `/api` route.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| bearer_token(&request))
        .ok_or(AppError::Unauthorized)?;

    let data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(&state.config.jwt_signing_key),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::InvalidToken
    })?;

    request.extensions_mut().insert(AuthUser {
        user_id: data.claims.sub,
    });

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(String::from)
}
