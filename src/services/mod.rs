// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Business logic, one service per concern.

pub mod application;
pub mod bookmark;
pub mod event;
pub mod listing;
pub mod notification;
pub mod search;

pub use application::{ApplicationService, ApplyOutcome};
pub use bookmark::{BookmarkService, BookmarkToggle, BookmarkedEvent};
pub use event::{EventInput, EventService};
pub use listing::{Clock, EventCache, ListedEvent, ListingService, SystemClock};
pub use notification::NotificationService;
pub use search::{export_csv, LocationFilter, SearchFilters, SortBy, VolunteerBucket};
