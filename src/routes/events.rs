// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Volunteer-facing event handlers: listing, detail, apply, bookmarks,
//! search and export, plus the NGO-owned CRUD endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Application, User};
use crate::services::{
    export_csv, ApplyOutcome, BookmarkToggle, BookmarkedEvent, EventInput, ListedEvent,
    SearchFilters,
};
use crate::AppState;

async fn viewer(state: &AppState, auth: &AuthUser) -> Result<Option<User>> {
    state.db.get_user(&auth.user_id).await
}

/// GET /api/events — the shared active listing with per-viewer annotations.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<ListedEvent>>> {
    let viewer = viewer(&state, &auth).await?;
    let events = state.listings.list_active_events().await?;
    Ok(Json(state.listings.annotate(events, viewer.as_ref())))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> Result<Json<ListedEvent>> {
    let event = state
        .db
        .get_event(&event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

    let viewer = viewer(&state, &auth).await?;
    let mut annotated = state.listings.annotate(vec![event], viewer.as_ref());
    annotated
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Annotation produced no event")))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(input): Json<EventInput>,
) -> Result<(StatusCode, Json<ListedEvent>)> {
    let event = state.events.create(&auth.user_id, input).await?;
    let listed = state
        .listings
        .annotate(vec![event], None)
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Annotation produced no event")))?;
    Ok((StatusCode::CREATED, Json(listed)))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<String>,
    Json(input): Json<EventInput>,
) -> Result<Json<ListedEvent>> {
    let event = state.events.update(&auth.user_id, &event_id, input).await?;
    state
        .listings
        .annotate(vec![event], None)
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Annotation produced no event")))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> Result<StatusCode> {
    state.events.delete(&auth.user_id, &event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/events/{id}/apply
pub async fn apply(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> Result<Json<ApplyOutcome>> {
    let outcome = state.applications.apply(&auth.user_id, &event_id).await?;
    Ok(Json(outcome))
}

#[derive(Serialize)]
pub struct BookmarkToggleResponse {
    pub status: BookmarkToggle,
}

/// POST /api/events/{id}/bookmark
pub async fn toggle_bookmark(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> Result<Json<BookmarkToggleResponse>> {
    let status = state.bookmarks.toggle(&auth.user_id, &event_id).await?;
    Ok(Json(BookmarkToggleResponse { status }))
}

/// GET /api/bookmarks — saved events, hydrated, newest bookmark first.
pub async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<BookmarkedEvent>>> {
    Ok(Json(state.bookmarks.list(&auth.user_id).await?))
}

/// GET /api/applications — the caller's application history, newest first.
pub async fn list_applications(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<Application>>> {
    Ok(Json(state.applications.history(&auth.user_id).await?))
}

/// POST /api/search — filter and sort the active listing.
///
/// Search always re-fetches so it never serves a stale cache slot.
pub async fn search(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(filters): Json<SearchFilters>,
) -> Result<Json<Vec<ListedEvent>>> {
    let viewer = viewer(&state, &auth).await?;
    let events = state.listings.refresh().await?;
    let matched = filters.search(events);
    Ok(Json(state.listings.annotate(matched, viewer.as_ref())))
}

/// POST /api/search/export — the same search, rendered as a CSV download.
pub async fn export(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Json(filters): Json<SearchFilters>,
) -> Result<impl IntoResponse> {
    let events = state.listings.refresh().await?;
    let matched = filters.search(events);
    let csv = export_csv(&matched);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"volink_events.csv\"",
            ),
        ],
        csv,
    ))
}
