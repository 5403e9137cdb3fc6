// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! NGO dashboard handlers: own events, applicant lists, and summary stats.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{ApplicantView, Event, EventStatus};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OwnEventsQuery {
    #[serde(default)]
    pub status: Option<EventStatus>,
}

/// GET /api/ngo/events — the caller's own events, optionally by status.
pub async fn list_own_events(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<OwnEventsQuery>,
) -> Result<Json<Vec<Event>>> {
    let events = state
        .events
        .list_for_ngo(&auth.user_id, query.status)
        .await?;
    Ok(Json(events))
}

#[derive(Serialize)]
pub struct NgoStats {
    pub total_events: usize,
    pub active_events: usize,
    pub total_applications: usize,
}

/// GET /api/ngo/stats — dashboard counters, recomputed on every call.
pub async fn stats(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<NgoStats>> {
    let events = state.events.list_for_ngo(&auth.user_id, None).await?;
    let active_events = events
        .iter()
        .filter(|e| e.status == EventStatus::Active)
        .count();
    let total_applications = state.notifications.count_applicants(&auth.user_id).await?;

    Ok(Json(NgoStats {
        total_events: events.len(),
        active_events,
        total_applications,
    }))
}

/// GET /api/ngo/events/{id}/applicants — applicants for one owned event.
pub async fn list_applicants(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<ApplicantView>>> {
    let event = state
        .db
        .get_event(&event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

    if event.ngo_id != auth.user_id {
        return Err(AppError::Forbidden(
            "Only the event's organizer can view its applicants".to_string(),
        ));
    }

    let applicants = state
        .notifications
        .list_applicants(&auth.user_id, &event_id)
        .await?;
    Ok(Json(applicants))
}

/// GET /api/ngo/applicants/recent — latest applicants across all events.
pub async fn recent_applicants(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<ApplicantView>>> {
    let applicants = state.notifications.recent_applicants(&auth.user_id).await?;
    Ok(Json(applicants))
}
