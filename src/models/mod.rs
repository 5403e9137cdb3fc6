// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Data models for the application.

pub mod event;
pub mod notification;
pub mod user;

pub use event::{
    classify_urgency, Category, Event, EventStatus, OrganizerSnapshot, Urgency, UrgencyClass,
};
pub use notification::{ApplicantView, Notification, NotificationKind};
pub use user::{
    has_applied, Application, ApplicationStatus, Bookmark, NgoProfile, User, VolunteerProfile,
};
