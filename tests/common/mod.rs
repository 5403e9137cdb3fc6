// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Shared test helpers.
//!
//! Integration tests that need a real store run against the Firestore
//! emulator and skip themselves when FIRESTORE_EMULATOR_HOST is unset.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use volink::{
    config::Config,
    db::FirestoreDb,
    middleware::create_jwt,
    routes::create_router,
    services::{
        ApplicationService, BookmarkService, EventCache, EventService, ListingService,
        NotificationService, SystemClock,
    },
    AppState,
};

/// Skip the current test when no emulator is configured.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_err() {
            eprintln!("Skipping test: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Wire the full service graph around one database handle, mirroring main.
pub fn build_state(db: FirestoreDb) -> Arc<AppState> {
    let cache = EventCache::new(Arc::new(SystemClock));
    let listings = ListingService::new(db.clone(), cache);
    let notifications = NotificationService::new(db.clone());
    let applications = ApplicationService::new(db.clone(), notifications.clone(), listings.clone());
    let bookmarks = BookmarkService::new(db.clone(), listings.clone());
    let events = EventService::new(db.clone(), listings.clone());

    Arc::new(AppState {
        config: Config::default(),
        db,
        listings,
        applications,
        notifications,
        bookmarks,
        events,
    })
}

/// App with no database connection; every store call errors. Used for
/// auth and validation tests that must not reach the store.
pub fn offline_app() -> Router {
    create_router(build_state(FirestoreDb::new_mock()))
}

/// State backed by the emulator, with a unique project per call so tests
/// do not see each other's documents.
pub async fn emulator_state() -> Arc<AppState> {
    let project = format!(
        "volink-test-{}",
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    );
    let db = FirestoreDb::new(&project)
        .await
        .expect("emulator connection");
    build_state(db)
}

/// Bearer header value for a signed test session.
pub fn auth_header(user_id: &str) -> String {
    let token = create_jwt(user_id, &Config::default().jwt_signing_key).expect("sign test token");
    format!("Bearer {}", token)
}

use volink::models::{Event, NgoProfile, User, VolunteerProfile};
use volink::services::EventInput;

pub async fn seed_volunteer(state: &AppState, uid: &str, name: &str) {
    let user = User::Volunteer(VolunteerProfile {
        uid: uid.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", uid),
        bio: Some("Weekend volunteer".to_string()),
        skills: vec!["First Aid".to_string()],
        interests: vec![],
        phone: None,
        location: Some("Santa Cruz".to_string()),
        applications: vec![],
        bookmarks: vec![],
        created_at: chrono::Utc::now(),
        updated_at: None,
    });
    state.db.upsert_user(&user).await.expect("seed volunteer");
}

pub async fn seed_ngo(state: &AppState, uid: &str, name: &str) {
    let user = User::Ngo(NgoProfile {
        uid: uid.to_string(),
        name: name.to_string(),
        email: format!("{}@example.org", uid),
        mission: Some("Restore local habitats".to_string()),
        location: None,
        phone: None,
        created_at: chrono::Utc::now(),
        updated_at: None,
    });
    state.db.upsert_user(&user).await.expect("seed ngo");
}

/// Create an event through the service so it validates, snapshots the
/// organizer, and lands in the listing cache like production writes do.
pub async fn seed_event(state: &AppState, ngo_id: &str, title: &str, volunteers: u32) -> Event {
    let input = EventInput {
        title: title.to_string(),
        category: volink::models::Category::Environment,
        description: "Join us for a morning of coastal restoration work".to_string(),
        date: chrono::Utc::now().date_naive().succ_opt(),
        location: "Santa Cruz".to_string(),
        duration: Some("3 hours".to_string()),
        volunteers_needed: volunteers,
        skills: vec!["Gardening".to_string()],
        google_form_url: None,
        status: None,
        urgent: false,
    };
    state
        .events
        .create(ngo_id, input)
        .await
        .expect("seed event")
}
