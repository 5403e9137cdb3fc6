// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Bookmark toggling and the hydrated saved-events listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Bookmark, Event, User};
use crate::services::ListingService;

/// Which way a toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkToggle {
    Added,
    Removed,
}

/// A bookmarked event hydrated with its current store record, so the
/// saved list shows live status and date rather than the stale snapshot.
#[derive(Debug, Serialize)]
pub struct BookmarkedEvent {
    pub id: String,
    #[serde(flatten)]
    pub event: Event,
    pub bookmarked_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct BookmarkService {
    db: FirestoreDb,
    listings: ListingService,
}

impl BookmarkService {
    pub fn new(db: FirestoreDb, listings: ListingService) -> Self {
        Self { db, listings }
    }

    /// Add or remove a bookmark for the volunteer. The second call with
    /// the same event undoes the first.
    pub async fn toggle(
        &self,
        volunteer_id: &str,
        event_id: &str,
    ) -> Result<BookmarkToggle, AppError> {
        let user = self
            .db
            .get_user(volunteer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", volunteer_id)))?;

        let volunteer = match user {
            User::Volunteer(v) => v,
            User::Ngo(_) => {
                return Err(AppError::BadRequest(
                    "Only volunteer accounts can bookmark events".to_string(),
                ))
            }
        };

        if volunteer.bookmarks.iter().any(|b| b.event_id == event_id) {
            let remaining: Vec<Bookmark> = volunteer
                .bookmarks
                .into_iter()
                .filter(|b| b.event_id != event_id)
                .collect();
            self.db.replace_bookmarks(volunteer_id, remaining).await?;
            tracing::debug!(volunteer_id, event_id, "Removed bookmark");
            self.refresh_listing().await;
            return Ok(BookmarkToggle::Removed);
        }

        let event = self
            .db
            .get_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

        let bookmark = snapshot(&event, Utc::now());
        self.db.append_bookmark(volunteer_id, &bookmark).await?;
        tracing::debug!(volunteer_id, event_id, "Added bookmark");
        self.refresh_listing().await;
        Ok(BookmarkToggle::Added)
    }

    async fn refresh_listing(&self) {
        if let Err(e) = self.listings.refresh().await {
            tracing::warn!(error = %e, "Listing refresh after bookmark toggle failed");
        }
    }

    /// The volunteer's saved events, hydrated and annotated like the
    /// dashboard listing. Bookmarks pointing at deleted events are
    /// silently dropped from the response (the snapshot stays in the
    /// document until the next toggle).
    pub async fn list(&self, volunteer_id: &str) -> Result<Vec<BookmarkedEvent>, AppError> {
        let user = self
            .db
            .get_user(volunteer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", volunteer_id)))?;

        let bookmarks = match user {
            User::Volunteer(v) => v.bookmarks,
            User::Ngo(_) => {
                return Err(AppError::BadRequest(
                    "Only volunteer accounts have bookmarks".to_string(),
                ))
            }
        };

        let ids: Vec<String> = bookmarks.iter().map(|b| b.event_id.clone()).collect();
        let events = self.db.get_events_by_ids(&ids).await?;

        let mut hydrated: Vec<BookmarkedEvent> = events
            .into_iter()
            .filter_map(|event| {
                let bookmark = bookmarks.iter().find(|b| b.event_id == event.id)?;
                Some(BookmarkedEvent {
                    id: event.id.clone(),
                    event,
                    bookmarked_at: bookmark.bookmarked_at,
                })
            })
            .collect();

        hydrated.sort_by(|a, b| b.bookmarked_at.cmp(&a.bookmarked_at));
        Ok(hydrated)
    }
}

/// Point-in-time bookmark snapshot of an event.
fn snapshot(event: &Event, at: DateTime<Utc>) -> Bookmark {
    Bookmark {
        event_id: event.id.clone(),
        event_title: event.title.clone(),
        event_category: event.category,
        event_date: event.date,
        event_location: event.location.clone(),
        bookmarked_at: at,
    }
}
