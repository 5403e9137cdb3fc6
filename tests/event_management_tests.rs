// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! NGO event management against the Firestore emulator: ownership rules,
//! organizer snapshots, listing cache refresh, and dashboard stats.

mod common;

use volink::error::AppError;
use volink::models::EventStatus;
use volink::services::EventInput;

fn edit_input(title: &str) -> EventInput {
    EventInput {
        title: title.to_string(),
        category: volink::models::Category::Environment,
        description: "Join us for a morning of coastal restoration work".to_string(),
        date: chrono::Utc::now().date_naive().succ_opt(),
        location: "Santa Cruz".to_string(),
        duration: None,
        volunteers_needed: 10,
        skills: vec![],
        google_form_url: None,
        status: None,
        urgent: false,
    }
}

#[tokio::test]
async fn test_create_snapshots_organizer_and_refreshes_listing() {
    require_emulator!();
    let state = common::emulator_state().await;

    common::seed_ngo(&state, "ngo-1", "Green Earth").await;
    let event = common::seed_event(&state, "ngo-1", "Beach Cleanup Drive", 10).await;

    assert!(!event.id.is_empty());
    assert_eq!(event.organizer.name, "Green Earth");
    assert_eq!(event.organizer.mission.as_deref(), Some("Restore local habitats"));

    // The create refreshed the shared listing cache
    let listing = state.listings.list_active_events().await.unwrap();
    assert!(listing.iter().any(|e| e.id == event.id));
}

#[tokio::test]
async fn test_update_requires_ownership() {
    require_emulator!();
    let state = common::emulator_state().await;

    common::seed_ngo(&state, "ngo-1", "Green Earth").await;
    common::seed_ngo(&state, "ngo-2", "Red Rivers").await;
    let event = common::seed_event(&state, "ngo-1", "Beach Cleanup Drive", 10).await;

    let result = state
        .events
        .update("ngo-2", &event.id, edit_input("Hijacked Event Title"))
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    // The owner can update, and the edit sticks
    let updated = state
        .events
        .update("ngo-1", &event.id, edit_input("Beach Cleanup Weekend"))
        .await
        .unwrap();
    assert_eq!(updated.title, "Beach Cleanup Weekend");
    assert!(updated.updated_at.is_some());
    assert_eq!(updated.created_at, event.created_at);
}

#[tokio::test]
async fn test_delete_requires_ownership() {
    require_emulator!();
    let state = common::emulator_state().await;

    common::seed_ngo(&state, "ngo-1", "Green Earth").await;
    common::seed_ngo(&state, "ngo-2", "Red Rivers").await;
    let event = common::seed_event(&state, "ngo-1", "Beach Cleanup Drive", 10).await;

    let result = state.events.delete("ngo-2", &event.id).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    state.events.delete("ngo-1", &event.id).await.unwrap();
    assert!(state.db.get_event(&event.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_own_listing_and_status_filter() {
    require_emulator!();
    let state = common::emulator_state().await;

    common::seed_ngo(&state, "ngo-1", "Green Earth").await;
    common::seed_event(&state, "ngo-1", "Beach Cleanup Drive", 10).await;
    let second = common::seed_event(&state, "ngo-1", "River Restoration Day", 5).await;

    let mut input = edit_input("River Restoration Day");
    input.status = Some(EventStatus::Completed);
    state.events.update("ngo-1", &second.id, input).await.unwrap();

    let all = state.events.list_for_ngo("ngo-1", None).await.unwrap();
    assert_eq!(all.len(), 2);

    let active = state
        .events
        .list_for_ngo("ngo-1", Some(EventStatus::Active))
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].title, "Beach Cleanup Drive");
}

#[tokio::test]
async fn test_volunteer_cannot_create_events() {
    require_emulator!();
    let state = common::emulator_state().await;

    common::seed_volunteer(&state, "vol-1", "Sam").await;

    let result = state
        .events
        .create("vol-1", edit_input("Beach Cleanup Drive"))
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}
