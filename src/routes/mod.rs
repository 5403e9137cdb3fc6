// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! HTTP routing: public health check plus the authenticated `/api` surface.

pub mod events;
pub mod ngo;
pub mod profile;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::{require_auth, security_headers};
use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let frontend_url = state.config.frontend_url.clone();

    // Allow the configured frontend plus localhost for development.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| {
                    o == frontend_url
                        || o.starts_with("http://localhost")
                        || o.starts_with("http://127.0.0.1")
                })
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let api = Router::new()
        // Profile
        .route("/api/register", post(profile::register))
        .route("/api/me", get(profile::me))
        .route("/api/profile", put(profile::update_profile))
        // Events (volunteer side)
        .route("/api/events", get(events::list_events))
        .route("/api/events/{id}", get(events::get_event))
        .route("/api/events/{id}/apply", post(events::apply))
        .route("/api/events/{id}/bookmark", post(events::toggle_bookmark))
        .route("/api/bookmarks", get(events::list_bookmarks))
        .route("/api/applications", get(events::list_applications))
        .route("/api/search", post(events::search))
        .route("/api/search/export", post(events::export))
        // Events (NGO side)
        .route("/api/events", post(events::create_event))
        .route("/api/events/{id}", put(events::update_event))
        .route("/api/events/{id}", delete(events::delete_event))
        .route("/api/ngo/events", get(ngo::list_own_events))
        .route("/api/ngo/stats", get(ngo::stats))
        .route("/api/ngo/events/{id}/applicants", get(ngo::list_applicants))
        .route("/api/ngo/applicants/recent", get(ngo::recent_applicants))
        .layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .layer(from_fn(security_headers))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
