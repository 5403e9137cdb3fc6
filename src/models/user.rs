//! User model for storage and API.
//!
//! A user document is either a volunteer or an NGO; role-specific fields
//! only exist on the matching variant. Applications and bookmarks are
//! embedded in the volunteer's own document because that is the only
//! document the volunteer has write access to.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::Category;

/// User profile stored in Firestore, tagged by role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum User {
    #[serde(rename = "volunteer")]
    Volunteer(VolunteerProfile),
    #[serde(rename = "ngo")]
    Ngo(NgoProfile),
}

impl User {
    pub fn uid(&self) -> &str {
        match self {
            User::Volunteer(v) => &v.uid,
            User::Ngo(n) => &n.uid,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            User::Volunteer(v) => &v.name,
            User::Ngo(n) => &n.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            User::Volunteer(v) => &v.email,
            User::Ngo(n) => &n.email,
        }
    }
}

/// Volunteer profile (document ID = identity provider subject id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerProfile {
    pub uid: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Append-only list of applications (one per event, at most)
    #[serde(default)]
    pub applications: Vec<Application>,
    /// Bookmarked events (toggled on and off)
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// NGO profile (document ID = identity provider subject id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NgoProfile {
    pub uid: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One volunteer's intent to participate in one event.
///
/// Embedded in the volunteer's user document; appended, never mutated.
/// Event and NGO fields are denormalized snapshots taken at apply time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub event_id: String,
    pub event_title: String,
    pub volunteer_id: String,
    pub volunteer_name: String,
    pub volunteer_email: String,
    pub ngo_id: String,
    /// Client-generated timestamp
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ApplicationStatus,
}

/// Application status. Only `pending` is ever written in this scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Upcoming,
    Completed,
}

/// A saved event reference with a point-in-time snapshot for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub event_id: String,
    pub event_title: String,
    pub event_category: Category,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    pub event_location: String,
    pub bookmarked_at: DateTime<Utc>,
}

/// Check whether a volunteer already has an application for an event.
///
/// This check, not the store's append dedup, is what enforces the
/// one-application-per-event invariant (store dedup is by full structural
/// equality, which a fresh `applied_at` always defeats).
pub fn has_applied(applications: &[Application], event_id: &str) -> bool {
    applications.iter().any(|app| app.event_id == event_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_application(event_id: &str) -> Application {
        Application {
            event_id: event_id.to_string(),
            event_title: "Beach Cleanup".to_string(),
            volunteer_id: "vol-1".to_string(),
            volunteer_name: "Jordan".to_string(),
            volunteer_email: "jordan@example.com".to_string(),
            ngo_id: "ngo-1".to_string(),
            applied_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            status: ApplicationStatus::Pending,
        }
    }

    #[test]
    fn test_has_applied_matches_by_event_id() {
        let apps = vec![make_application("e1"), make_application("e2")];

        assert!(has_applied(&apps, "e1"));
        assert!(!has_applied(&apps, "e3"));
    }

    #[test]
    fn test_structural_equality_ignores_nothing() {
        // Two applications for the same event differing only in applied_at
        // are NOT equal, which is why the store-level dedup alone cannot
        // enforce the one-per-event invariant.
        let a = make_application("e1");
        let mut b = make_application("e1");
        b.applied_at = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 1).unwrap();

        assert_ne!(a, b);
        assert!(has_applied(&[a], "e1"));
    }

    #[test]
    fn test_user_role_tag_round_trip() {
        let user = User::Ngo(NgoProfile {
            uid: "ngo-1".to_string(),
            name: "Green Earth".to_string(),
            email: "contact@greenearth.org".to_string(),
            mission: Some("Restore local habitats".to_string()),
            location: None,
            phone: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        });

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "ngo");
        assert_eq!(json["mission"], "Restore local habitats");

        let back: User = serde_json::from_value(json).unwrap();
        assert!(matches!(back, User::Ngo(_)));
    }

    #[test]
    fn test_volunteer_defaults_for_missing_lists() {
        // Older volunteer documents may lack applications/bookmarks entirely
        let json = serde_json::json!({
            "role": "volunteer",
            "uid": "vol-1",
            "name": "Sam",
            "email": "sam@example.com",
            "created_at": "2026-01-01T00:00:00Z"
        });

        let user: User = serde_json::from_value(json).unwrap();
        match user {
            User::Volunteer(v) => {
                assert!(v.applications.is_empty());
                assert!(v.bookmarks.is_empty());
                assert!(v.skills.is_empty());
            }
            User::Ngo(_) => panic!("expected volunteer"),
        }
    }
}
