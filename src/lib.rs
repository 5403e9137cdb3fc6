// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Volink: connect volunteers with NGO-run events.
//!
//! This crate provides the backend API for event listing and search,
//! volunteer applications, bookmarks, and the notification channel that
//! lets NGOs discover their applicants.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{
    ApplicationService, BookmarkService, EventService, ListingService, NotificationService,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub listings: ListingService,
    pub applications: ApplicationService,
    pub notifications: NotificationService,
    pub bookmarks: BookmarkService,
    pub events: EventService,
}
