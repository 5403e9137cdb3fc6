// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Event listing with a single-slot cache.
//!
//! The dashboard listing is the hottest read in the app, so the most
//! recent fetch is kept for a short TTL and shared across all users.
//! There is exactly one slot; any write replaces the whole thing.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{classify_urgency, has_applied, Event, Urgency, User};

/// How long a cached listing stays valid.
const CACHE_TTL: Duration = Duration::minutes(5);

/// Upper bound on events returned to the dashboard.
const LISTING_LIMIT: u32 = 20;

/// Time source, injected so cache expiry is testable without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CachedEvents {
    events: Vec<Event>,
    fetched_at: DateTime<Utc>,
}

/// Single-slot event cache with a 5-minute TTL.
#[derive(Clone)]
pub struct EventCache {
    clock: Arc<dyn Clock>,
    slot: Arc<RwLock<Option<CachedEvents>>>,
}

impl EventCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Return the cached listing if it is still within TTL.
    pub async fn get(&self) -> Option<Vec<Event>> {
        let slot = self.slot.read().await;
        let cached = slot.as_ref()?;
        if self.clock.now() - cached.fetched_at < CACHE_TTL {
            Some(cached.events.clone())
        } else {
            None
        }
    }

    /// Replace the slot with a fresh listing.
    pub async fn put(&self, events: Vec<Event>) {
        let mut slot = self.slot.write().await;
        *slot = Some(CachedEvents {
            events,
            fetched_at: self.clock.now(),
        });
    }

    /// Drop the slot so the next read goes to the store.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

/// An event as returned to the dashboard: the stored record plus
/// per-viewer annotations.
#[derive(Debug, Serialize)]
pub struct ListedEvent {
    pub id: String,
    #[serde(flatten)]
    pub event: Event,
    /// Whether the viewing volunteer has already applied.
    pub applied: bool,
    pub urgency: Option<Urgency>,
}

/// Serves the shared active-event listing.
#[derive(Clone)]
pub struct ListingService {
    db: FirestoreDb,
    cache: EventCache,
}

impl ListingService {
    pub fn new(db: FirestoreDb, cache: EventCache) -> Self {
        Self { db, cache }
    }

    /// Active events, from cache when fresh.
    pub async fn list_active_events(&self) -> Result<Vec<Event>, AppError> {
        if let Some(events) = self.cache.get().await {
            tracing::debug!(count = events.len(), "Serving event listing from cache");
            return Ok(events);
        }
        self.refresh().await
    }

    /// Fetch from the store and overwrite the cache slot.
    pub async fn refresh(&self) -> Result<Vec<Event>, AppError> {
        let events = self.db.query_active_events(LISTING_LIMIT).await?;
        tracing::debug!(count = events.len(), "Refreshed event listing cache");
        self.cache.put(events.clone()).await;
        Ok(events)
    }

    /// Drop the cached listing without re-fetching.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    /// Attach per-viewer annotations (applied flag, urgency) to a listing.
    ///
    /// The applied flag is only meaningful for volunteers; NGOs and
    /// anonymous viewers get `false`.
    pub fn annotate(&self, events: Vec<Event>, viewer: Option<&User>) -> Vec<ListedEvent> {
        let today = self.cache.now().date_naive();
        let applications = match viewer {
            Some(User::Volunteer(v)) => v.applications.as_slice(),
            _ => &[],
        };

        events
            .into_iter()
            .map(|event| {
                let applied = has_applied(applications, &event.id);
                let urgency = classify_urgency(event.date, today);
                ListedEvent {
                    id: event.id.clone(),
                    event,
                    applied,
                    urgency,
                }
            })
            .collect()
    }
}
