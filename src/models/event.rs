// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Event model: categories, status, organizer snapshot, and the urgency
//! classification shared by listing, search, and the detail view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stored event record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned document ID, populated on reads.
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: String,
    pub title: String,
    pub category: Category,
    pub description: String,
    /// Calendar date, no time-of-day. Events without a date show as "TBD".
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Free text. A location containing "remote" or "online" flags the
    /// event as remote.
    pub location: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default = "default_volunteers_needed")]
    pub volunteers_needed: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Optional external form the volunteer is offered at apply time.
    #[serde(default)]
    pub google_form_url: Option<String>,
    pub status: EventStatus,
    #[serde(default)]
    pub urgent: bool,
    /// Owning NGO's user id.
    pub ngo_id: String,
    /// Point-in-time copy of the owning NGO's profile, re-captured on
    /// create and update. May go stale relative to the live profile.
    pub organizer: OrganizerSnapshot,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_volunteers_needed() -> u32 {
    1
}

impl Event {
    /// Whether the event's location marks it as remote.
    pub fn is_remote(&self) -> bool {
        let loc = self.location.to_lowercase();
        loc.contains("remote") || loc.contains("online")
    }
}

/// Event category. Unknown values fold to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Education,
    Environment,
    Health,
    Community,
    Animals,
    Disaster,
    Technology,
    Arts,
    Sports,
    #[serde(other)]
    Other,
}

impl Category {
    /// Human-readable name, used in exports and applicant-facing text.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Education => "Education",
            Category::Environment => "Environment",
            Category::Health => "Healthcare",
            Category::Community => "Community",
            Category::Animals => "Animal Welfare",
            Category::Disaster => "Disaster Relief",
            Category::Technology => "Technology",
            Category::Arts => "Arts & Culture",
            Category::Sports => "Sports",
            Category::Other => "Other",
        }
    }
}

/// Event lifecycle status. Only `active` events are listed to volunteers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Upcoming,
    #[serde(other)]
    Completed,
}

/// Denormalized copy of the owning NGO's profile, captured when the event
/// is created or updated. Not a live reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizerSnapshot {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub captured_at: DateTime<Utc>,
}

/// Derived urgency label for an event date relative to "today".
///
/// Purely presentational metadata attached to listed events; never a filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Urgency {
    pub class: UrgencyClass,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(ts_rs::TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum UrgencyClass {
    Past,
    Urgent,
    Soon,
    Upcoming,
}

/// Classify an event date against today's local calendar day.
///
/// `None` when the event has no date.
pub fn classify_urgency(date: Option<NaiveDate>, today: NaiveDate) -> Option<Urgency> {
    let date = date?;
    let diff_days = (date - today).num_days();

    let (class, label) = if diff_days < 0 {
        (UrgencyClass::Past, "Past event".to_string())
    } else if diff_days == 0 {
        (UrgencyClass::Urgent, "Today".to_string())
    } else if diff_days == 1 {
        (UrgencyClass::Urgent, "Tomorrow".to_string())
    } else if diff_days <= 3 {
        (UrgencyClass::Urgent, format!("{} days away", diff_days))
    } else if diff_days <= 7 {
        (UrgencyClass::Soon, format!("{} days away", diff_days))
    } else {
        (UrgencyClass::Upcoming, format!("{} days away", diff_days))
    };

    Some(Urgency { class, label })
}
