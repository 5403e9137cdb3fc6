// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Notification model and the applicant projection built from it.
//!
//! Notifications live in their own top-level collection so a volunteer can
//! create one without write access to the NGO's user document, and the NGO
//! can discover applicants without read access to volunteer documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Denormalized notification record, created as a side effect of an
/// application. Never updated in this scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub event_id: String,
    pub event_title: String,
    pub volunteer_id: String,
    pub volunteer_name: String,
    pub volunteer_email: String,
    /// Fuller volunteer snapshot so the NGO's applicant list renders
    /// without a cross-user read.
    #[serde(default)]
    pub volunteer_bio: Option<String>,
    #[serde(default)]
    pub volunteer_skills: Vec<String>,
    #[serde(default)]
    pub volunteer_location: Option<String>,
    #[serde(default)]
    pub volunteer_phone: Option<String>,
    pub ngo_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewApplication,
}

/// Projection of a notification used to render an NGO's applicant list.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ApplicantView {
    pub volunteer_id: String,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub event_id: String,
    pub event_title: String,
    pub applied_at: String,
}

impl From<Notification> for ApplicantView {
    fn from(n: Notification) -> Self {
        ApplicantView {
            volunteer_id: n.volunteer_id,
            name: n.volunteer_name,
            email: n.volunteer_email,
            bio: n.volunteer_bio,
            skills: n.volunteer_skills,
            location: n.volunteer_location,
            phone: n.volunteer_phone,
            event_id: n.event_id,
            event_title: n.event_title,
            applied_at: crate::time_utils::format_utc_rfc3339(n.created_at),
        }
    }
}
