// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Volink API Server
//!
//! Serves the volunteer/NGO matching API: event CRUD, applications,
//! bookmarks, applicant notifications, and advanced search.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use volink::{
    config::Config,
    db::FirestoreDb,
    services::{
        ApplicationService, BookmarkService, EventCache, EventService, ListingService,
        NotificationService, SystemClock,
    },
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Volink API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Single-slot event cache shared by all requests in this instance
    let cache = EventCache::new(Arc::new(SystemClock));
    tracing::info!("Event cache initialized");

    let listings = ListingService::new(db.clone(), cache);
    let notifications = NotificationService::new(db.clone());
    let applications =
        ApplicationService::new(db.clone(), notifications.clone(), listings.clone());
    let bookmarks = BookmarkService::new(db.clone(), listings.clone());
    let events = EventService::new(db.clone(), listings.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        listings,
        applications,
        notifications,
        bookmarks,
        events,
    });

    // Build router
    let app = volink::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("volink=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
