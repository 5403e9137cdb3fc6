// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Application submission.
//!
//! Ordering matters here: the application is appended to the volunteer's
//! document first, then the NGO notification and the listing-cache refresh
//! run as best-effort follow-ups. A volunteer's successful application is
//! never rolled back because a side effect failed.

use chrono::Utc;
use serde::Serialize;

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{has_applied, Application, ApplicationStatus, User, VolunteerProfile};
use crate::services::{ListingService, NotificationService};

/// Result of an apply call, distinguished so the handler can return 200
/// for the idempotent repeat case instead of an error.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// A new application was recorded. Carries the event's external form
    /// URL, if the NGO configured one, so the client can offer it next.
    Submitted { form_url: Option<String> },
    /// The volunteer had already applied to this event. Nothing changed.
    AlreadyApplied,
}

#[derive(Clone)]
pub struct ApplicationService {
    db: FirestoreDb,
    notifications: NotificationService,
    listings: ListingService,
}

impl ApplicationService {
    pub fn new(
        db: FirestoreDb,
        notifications: NotificationService,
        listings: ListingService,
    ) -> Self {
        Self {
            db,
            notifications,
            listings,
        }
    }

    /// Apply the volunteer to an event. Idempotent per (volunteer, event).
    pub async fn apply(
        &self,
        volunteer_id: &str,
        event_id: &str,
    ) -> Result<ApplyOutcome, AppError> {
        let event = self
            .db
            .get_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

        let user = self
            .db
            .get_user(volunteer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", volunteer_id)))?;

        let volunteer = match user {
            User::Volunteer(v) => v,
            User::Ngo(_) => {
                return Err(AppError::BadRequest(
                    "Only volunteer accounts can apply to events".to_string(),
                ))
            }
        };

        if has_applied(&volunteer.applications, event_id) {
            tracing::debug!(
                volunteer_id,
                event_id,
                "Duplicate application attempt, returning existing state"
            );
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        let application = Application {
            event_id: event_id.to_string(),
            event_title: event.title.clone(),
            volunteer_id: volunteer.uid.clone(),
            volunteer_name: display_name(&volunteer),
            volunteer_email: volunteer.email.clone(),
            ngo_id: event.ngo_id.clone(),
            applied_at: Utc::now(),
            status: ApplicationStatus::Pending,
        };

        self.db
            .append_application(volunteer_id, &application)
            .await?;

        tracing::info!(volunteer_id, event_id, "Recorded application");

        // Best-effort follow-ups; the application above is already durable.
        self.notifications.notify_ngo(&event, &volunteer).await;
        if let Err(e) = self.listings.refresh().await {
            tracing::warn!(error = %e, "Listing refresh after application failed");
        }

        Ok(ApplyOutcome::Submitted {
            form_url: event.google_form_url,
        })
    }

    /// The volunteer's application history, newest first.
    pub async fn history(&self, volunteer_id: &str) -> Result<Vec<Application>, AppError> {
        let user = self
            .db
            .get_user(volunteer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", volunteer_id)))?;

        let mut applications = match user {
            User::Volunteer(v) => v.applications,
            User::Ngo(_) => {
                return Err(AppError::BadRequest(
                    "Only volunteer accounts have applications".to_string(),
                ))
            }
        };

        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(applications)
    }
}

/// Display name recorded on applications; falls back to the email when
/// the profile never got a name.
fn display_name(volunteer: &VolunteerProfile) -> String {
    if volunteer.name.trim().is_empty() {
        volunteer.email.clone()
    } else {
        volunteer.name.clone()
    }
}
