// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Bookmark toggle and hydrated listing against the Firestore emulator.

mod common;

use volink::services::BookmarkToggle;

#[tokio::test]
async fn test_toggle_adds_then_removes() {
    require_emulator!();
    let state = common::emulator_state().await;

    common::seed_ngo(&state, "ngo-1", "Green Earth").await;
    common::seed_volunteer(&state, "vol-1", "Sam").await;
    let event = common::seed_event(&state, "ngo-1", "Beach Cleanup Drive", 10).await;

    let first = state.bookmarks.toggle("vol-1", &event.id).await.unwrap();
    assert_eq!(first, BookmarkToggle::Added);

    let saved = state.bookmarks.list("vol-1").await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, event.id);
    assert_eq!(saved[0].event.title, "Beach Cleanup Drive");

    let second = state.bookmarks.toggle("vol-1", &event.id).await.unwrap();
    assert_eq!(second, BookmarkToggle::Removed);

    assert!(state.bookmarks.list("vol-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bookmark_missing_event_is_not_found() {
    require_emulator!();
    let state = common::emulator_state().await;

    common::seed_volunteer(&state, "vol-1", "Sam").await;

    let result = state.bookmarks.toggle("vol-1", "no-such-event").await;
    assert!(matches!(
        result,
        Err(volink::error::AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_listing_drops_bookmarks_of_deleted_events() {
    require_emulator!();
    let state = common::emulator_state().await;

    common::seed_ngo(&state, "ngo-1", "Green Earth").await;
    common::seed_volunteer(&state, "vol-1", "Sam").await;
    let keep = common::seed_event(&state, "ngo-1", "Beach Cleanup Drive", 10).await;
    let gone = common::seed_event(&state, "ngo-1", "River Restoration Day", 10).await;

    state.bookmarks.toggle("vol-1", &keep.id).await.unwrap();
    state.bookmarks.toggle("vol-1", &gone.id).await.unwrap();

    state.events.delete("ngo-1", &gone.id).await.unwrap();

    let saved = state.bookmarks.list("vol-1").await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, keep.id);
}
