// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! NGO-side event management: create, update, delete, and the owner's
//! own listing. All writes re-capture the organizer snapshot and refresh
//! the shared listing cache.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Event, EventStatus, OrganizerSnapshot, User};
use crate::services::ListingService;

const TITLE_MIN: usize = 5;
const DESCRIPTION_MIN: usize = 20;
const DESCRIPTION_MAX: usize = 500;
const VOLUNTEERS_MAX: u32 = 100;
const FORM_URL_PREFIX: &str = "https://forms.google.com/";

/// Incoming event payload for create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    pub title: String,
    pub category: crate::models::Category,
    pub description: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub location: String,
    #[serde(default)]
    pub duration: Option<String>,
    pub volunteers_needed: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub google_form_url: Option<String>,
    #[serde(default)]
    pub status: Option<EventStatus>,
    #[serde(default)]
    pub urgent: bool,
}

impl EventInput {
    /// Reject malformed input before anything touches the store.
    pub fn validate(&self, today: NaiveDate) -> Result<(), AppError> {
        if self.title.trim().len() < TITLE_MIN {
            return Err(AppError::BadRequest(format!(
                "Title must be at least {} characters",
                TITLE_MIN
            )));
        }

        let description_len = self.description.trim().len();
        if !(DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&description_len) {
            return Err(AppError::BadRequest(format!(
                "Description must be between {} and {} characters",
                DESCRIPTION_MIN, DESCRIPTION_MAX
            )));
        }

        if let Some(date) = self.date {
            if date < today {
                return Err(AppError::BadRequest(
                    "Event date cannot be in the past".to_string(),
                ));
            }
        }

        if self.location.trim().is_empty() {
            return Err(AppError::BadRequest("Location is required".to_string()));
        }

        if self.volunteers_needed == 0 || self.volunteers_needed > VOLUNTEERS_MAX {
            return Err(AppError::BadRequest(format!(
                "Volunteers needed must be between 1 and {}",
                VOLUNTEERS_MAX
            )));
        }

        if let Some(url) = &self.google_form_url {
            if !url.trim().is_empty() && !url.starts_with(FORM_URL_PREFIX) {
                return Err(AppError::BadRequest(format!(
                    "Application form URL must start with {}",
                    FORM_URL_PREFIX
                )));
            }
        }

        Ok(())
    }

    /// Empty or whitespace-only form URLs count as absent.
    fn normalized_form_url(&self) -> Option<String> {
        self.google_form_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from)
    }
}

#[derive(Clone)]
pub struct EventService {
    db: FirestoreDb,
    listings: ListingService,
}

impl EventService {
    pub fn new(db: FirestoreDb, listings: ListingService) -> Self {
        Self { db, listings }
    }

    /// Create an event owned by the calling NGO.
    pub async fn create(&self, ngo_id: &str, input: EventInput) -> Result<Event, AppError> {
        input.validate(Utc::now().date_naive())?;
        let ngo = self.require_ngo(ngo_id).await?;

        let now = Utc::now();
        let mut event = Event {
            id: String::new(),
            title: input.title.trim().to_string(),
            category: input.category,
            description: input.description.trim().to_string(),
            date: input.date,
            location: input.location.trim().to_string(),
            duration: input.duration.clone(),
            volunteers_needed: input.volunteers_needed,
            skills: input.skills.clone(),
            google_form_url: input.normalized_form_url(),
            status: input.status.unwrap_or(EventStatus::Active),
            urgent: input.urgent,
            ngo_id: ngo_id.to_string(),
            organizer: organizer_snapshot(&ngo),
            created_at: now,
            updated_at: None,
        };

        event.id = self.db.insert_event(&event).await?;
        tracing::info!(event_id = %event.id, ngo_id, "Created event");

        self.refresh_listing().await;
        Ok(event)
    }

    /// Update an event. Only the owning NGO may do this; the organizer
    /// snapshot is re-captured from the current profile.
    pub async fn update(
        &self,
        ngo_id: &str,
        event_id: &str,
        input: EventInput,
    ) -> Result<Event, AppError> {
        input.validate(Utc::now().date_naive())?;

        let existing = self
            .db
            .get_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

        if existing.ngo_id != ngo_id {
            return Err(AppError::Forbidden(
                "Only the event's organizer can modify it".to_string(),
            ));
        }

        let ngo = self.require_ngo(ngo_id).await?;

        let event = Event {
            id: existing.id.clone(),
            title: input.title.trim().to_string(),
            category: input.category,
            description: input.description.trim().to_string(),
            date: input.date,
            location: input.location.trim().to_string(),
            duration: input.duration.clone(),
            volunteers_needed: input.volunteers_needed,
            skills: input.skills.clone(),
            google_form_url: input.normalized_form_url(),
            status: input.status.unwrap_or(existing.status),
            urgent: input.urgent,
            ngo_id: existing.ngo_id.clone(),
            organizer: organizer_snapshot(&ngo),
            created_at: existing.created_at,
            updated_at: Some(Utc::now()),
        };

        self.db.update_event(event_id, &event).await?;
        tracing::info!(event_id, ngo_id, "Updated event");

        self.refresh_listing().await;
        Ok(event)
    }

    /// Delete an event. Only the owning NGO may do this.
    pub async fn delete(&self, ngo_id: &str, event_id: &str) -> Result<(), AppError> {
        let existing = self
            .db
            .get_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

        if existing.ngo_id != ngo_id {
            return Err(AppError::Forbidden(
                "Only the event's organizer can delete it".to_string(),
            ));
        }

        self.db.delete_event(event_id).await?;
        tracing::info!(event_id, ngo_id, "Deleted event");

        self.refresh_listing().await;
        Ok(())
    }

    /// The NGO's own events, optionally narrowed by status.
    pub async fn list_for_ngo(
        &self,
        ngo_id: &str,
        status: Option<EventStatus>,
    ) -> Result<Vec<Event>, AppError> {
        let mut events = self.db.query_events_for_ngo(ngo_id, status).await?;
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(events)
    }

    async fn require_ngo(&self, ngo_id: &str) -> Result<crate::models::NgoProfile, AppError> {
        let user = self
            .db
            .get_user(ngo_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", ngo_id)))?;

        match user {
            User::Ngo(n) => Ok(n),
            User::Volunteer(_) => Err(AppError::Forbidden(
                "Only NGO accounts can manage events".to_string(),
            )),
        }
    }

    async fn refresh_listing(&self) {
        if let Err(e) = self.listings.refresh().await {
            tracing::warn!(error = %e, "Listing refresh after event write failed");
        }
    }
}

fn organizer_snapshot(ngo: &crate::models::NgoProfile) -> OrganizerSnapshot {
    OrganizerSnapshot {
        name: ngo.name.clone(),
        email: ngo.email.clone(),
        mission: ngo.mission.clone(),
        location: ngo.location.clone(),
        phone: ngo.phone.clone(),
        captured_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn valid_input() -> EventInput {
        EventInput {
            title: "Beach Cleanup Drive".to_string(),
            category: Category::Environment,
            description: "Join us for a morning of coastal restoration work".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 1),
            location: "Santa Cruz".to_string(),
            duration: Some("3 hours".to_string()),
            volunteers_needed: 10,
            skills: vec![],
            google_form_url: None,
            status: None,
            urgent: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate(today()).is_ok());
    }

    #[test]
    fn test_title_too_short() {
        let mut input = valid_input();
        input.title = "Run".to_string();
        assert!(input.validate(today()).is_err());

        input.title = "  Run  ".to_string();
        assert!(input.validate(today()).is_err());
    }

    #[test]
    fn test_description_bounds() {
        let mut input = valid_input();
        input.description = "Too short".to_string();
        assert!(input.validate(today()).is_err());

        input.description = "x".repeat(501);
        assert!(input.validate(today()).is_err());

        input.description = "x".repeat(500);
        assert!(input.validate(today()).is_ok());

        input.description = "x".repeat(20);
        assert!(input.validate(today()).is_ok());
    }

    #[test]
    fn test_date_cannot_be_past() {
        let mut input = valid_input();
        input.date = NaiveDate::from_ymd_opt(2026, 8, 24);
        assert!(input.validate(today()).is_err());

        // Today itself is allowed
        input.date = Some(today());
        assert!(input.validate(today()).is_ok());

        // No date is allowed (TBD events)
        input.date = None;
        assert!(input.validate(today()).is_ok());
    }

    #[test]
    fn test_volunteer_bounds() {
        let mut input = valid_input();
        input.volunteers_needed = 0;
        assert!(input.validate(today()).is_err());

        input.volunteers_needed = 101;
        assert!(input.validate(today()).is_err());

        input.volunteers_needed = 100;
        assert!(input.validate(today()).is_ok());
    }

    #[test]
    fn test_form_url_prefix() {
        let mut input = valid_input();
        input.google_form_url = Some("https://example.com/form".to_string());
        assert!(input.validate(today()).is_err());

        input.google_form_url = Some("https://forms.google.com/d/abc".to_string());
        assert!(input.validate(today()).is_ok());

        // Blank URL is treated as absent
        input.google_form_url = Some("   ".to_string());
        assert!(input.validate(today()).is_ok());
        assert_eq!(input.normalized_form_url(), None);
    }
}
