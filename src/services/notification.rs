// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Applicant notifications for NGOs.
//!
//! A notification is written as a side effect of a successful application
//! and is the only record the NGO can read about its applicants. Writing
//! one must never fail the application itself: `notify_ngo` returns `()`
//! and absorbs every error after logging it.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{ApplicantView, Event, Notification, NotificationKind, VolunteerProfile};

const RECENT_APPLICANTS_LIMIT: usize = 5;

#[derive(Clone)]
pub struct NotificationService {
    db: FirestoreDb,
}

impl NotificationService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Record a new-application notification for the event's NGO.
    ///
    /// Best effort by contract: the application has already been stored by
    /// the time this runs, so a failure here only degrades the NGO's
    /// applicant list. Errors are logged and swallowed.
    pub async fn notify_ngo(&self, event: &Event, volunteer: &VolunteerProfile) {
        if event.ngo_id.is_empty() || event.id.is_empty() || volunteer.uid.is_empty() {
            tracing::warn!(
                event_id = %event.id,
                ngo_id = %event.ngo_id,
                volunteer_id = %volunteer.uid,
                "Skipping applicant notification with missing ids"
            );
            return;
        }

        let notification = Notification {
            id: String::new(),
            kind: NotificationKind::NewApplication,
            event_id: event.id.clone(),
            event_title: event.title.clone(),
            volunteer_id: volunteer.uid.clone(),
            volunteer_name: volunteer.name.clone(),
            volunteer_email: volunteer.email.clone(),
            volunteer_bio: volunteer.bio.clone(),
            volunteer_skills: volunteer.skills.clone(),
            volunteer_location: volunteer.location.clone(),
            volunteer_phone: volunteer.phone.clone(),
            ngo_id: event.ngo_id.clone(),
            message: format!("{} applied to \"{}\"", volunteer.name, event.title),
            created_at: chrono::Utc::now(),
            read: false,
        };

        match self.db.insert_notification(&notification).await {
            Ok(id) => {
                tracing::info!(
                    notification_id = %id,
                    event_id = %event.id,
                    ngo_id = %event.ngo_id,
                    "Recorded applicant notification"
                );
            }
            Err(e) => {
                tracing::error!(
                    event_id = %event.id,
                    ngo_id = %event.ngo_id,
                    error = %e,
                    "Failed to record applicant notification"
                );
            }
        }
    }

    /// Applicants for one of the NGO's events, newest first.
    ///
    /// The per-event narrowing happens here rather than in the store query.
    pub async fn list_applicants(
        &self,
        ngo_id: &str,
        event_id: &str,
    ) -> Result<Vec<ApplicantView>, AppError> {
        let mut notifications = self.db.query_notifications_for_ngo(ngo_id).await?;
        notifications.retain(|n| n.event_id == event_id);
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications.into_iter().map(ApplicantView::from).collect())
    }

    /// The NGO's most recent applicants across all its events.
    pub async fn recent_applicants(&self, ngo_id: &str) -> Result<Vec<ApplicantView>, AppError> {
        let mut notifications = self.db.query_notifications_for_ngo(ngo_id).await?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications
            .into_iter()
            .take(RECENT_APPLICANTS_LIMIT)
            .map(ApplicantView::from)
            .collect())
    }

    /// Total applications received across all the NGO's events.
    pub async fn count_applicants(&self, ngo_id: &str) -> Result<usize, AppError> {
        let notifications = self.db.query_notifications_for_ngo(ngo_id).await?;
        Ok(notifications.len())
    }
}
