// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (volunteer/NGO profiles with embedded applications and bookmarks)
//! - Events (NGO-owned, store-assigned ids)
//! - Notifications (applicant side channel for NGOs)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Application, Bookmark, Event, EventStatus, Notification, User};
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Connect to Firestore. With FIRESTORE_EMULATOR_HOST set, connects
    /// to the emulator without credentials.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Firestore connection failed: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    async fn connect_emulator(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any token; hand the SDK a static unsigned
        // JWT so it never goes looking for real credentials.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Firestore emulator connection failed: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore emulator");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Offline handle for tests: every store operation errors.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Store not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by their identity-provider subject id.
    pub async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a user document (document ID = uid).
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(user.uid())
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Append an application to the volunteer's own document.
    ///
    /// Mirrors the store's array-union semantics: the element is added only
    /// if it is not already present by full structural equality. Uniqueness
    /// per event is enforced by the caller's event-id check, not here (a
    /// record differing only in `applied_at` would pass this dedup).
    pub async fn append_application(
        &self,
        uid: &str,
        application: &Application,
    ) -> Result<(), AppError> {
        let user = self
            .get_user(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;

        let mut volunteer = match user {
            User::Volunteer(v) => v,
            User::Ngo(_) => {
                return Err(AppError::BadRequest(
                    "Only volunteer accounts hold applications".to_string(),
                ))
            }
        };

        if !volunteer.applications.contains(application) {
            volunteer.applications.push(application.clone());
            self.upsert_user(&User::Volunteer(volunteer)).await?;
        }

        Ok(())
    }

    /// Append a bookmark to the volunteer's document (array-union semantics).
    pub async fn append_bookmark(&self, uid: &str, bookmark: &Bookmark) -> Result<(), AppError> {
        let user = self
            .get_user(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;

        let mut volunteer = match user {
            User::Volunteer(v) => v,
            User::Ngo(_) => {
                return Err(AppError::BadRequest(
                    "Only volunteer accounts hold bookmarks".to_string(),
                ))
            }
        };

        if !volunteer.bookmarks.contains(bookmark) {
            volunteer.bookmarks.push(bookmark.clone());
            self.upsert_user(&User::Volunteer(volunteer)).await?;
        }

        Ok(())
    }

    /// Replace the volunteer's bookmark list (used for removal).
    pub async fn replace_bookmarks(
        &self,
        uid: &str,
        bookmarks: Vec<Bookmark>,
    ) -> Result<(), AppError> {
        let user = self
            .get_user(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;

        let mut volunteer = match user {
            User::Volunteer(v) => v,
            User::Ngo(_) => {
                return Err(AppError::BadRequest(
                    "Only volunteer accounts hold bookmarks".to_string(),
                ))
            }
        };

        volunteer.bookmarks = bookmarks;
        self.upsert_user(&User::Volunteer(volunteer)).await
    }

    // ─── Event Operations ────────────────────────────────────────

    /// Get an event by its store-assigned ID.
    pub async fn get_event(&self, event_id: &str) -> Result<Option<Event>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::EVENTS)
            .obj()
            .one(event_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get active events, capped for dashboard performance.
    pub async fn query_active_events(&self, limit: u32) -> Result<Vec<Event>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::EVENTS)
            .filter(|q| q.for_all([q.field("status").eq("active")]))
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an NGO's events, optionally narrowed to one status.
    pub async fn query_events_for_ngo(
        &self,
        ngo_id: &str,
        status: Option<EventStatus>,
    ) -> Result<Vec<Event>, AppError> {
        let ngo_id = ngo_id.to_string();
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::EVENTS);

        let query = if let Some(status) = status {
            let status = serde_json::to_value(status)
                .ok()
                .and_then(|v| v.as_str().map(String::from))
                .unwrap_or_else(|| "active".to_string());
            query.filter(move |q| {
                q.for_all([
                    q.field("ngo_id").eq(ngo_id.clone()),
                    q.field("status").eq(status.clone()),
                ])
            })
        } else {
            query.filter(move |q| q.for_all([q.field("ngo_id").eq(ngo_id.clone())]))
        };

        query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert an event with a store-assigned document ID. Returns the ID.
    pub async fn insert_event(&self, event: &Event) -> Result<String, AppError> {
        let created: Event = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::EVENTS)
            .generate_document_id()
            .object(event)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(created.id)
    }

    /// Replace an event document.
    pub async fn update_event(&self, event_id: &str, event: &Event) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::EVENTS)
            .document_id(event_id)
            .object(event)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete an event document.
    pub async fn delete_event(&self, event_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::EVENTS)
            .document_id(event_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Fetch several events by ID, skipping ones that no longer exist.
    ///
    /// Uses concurrent reads with a limit to avoid overloading Firestore.
    pub async fn get_events_by_ids(&self, event_ids: &[String]) -> Result<Vec<Event>, AppError> {
        let results: Vec<Result<Option<Event>, AppError>> = stream::iter(event_ids.to_vec())
            .map(|id| async move { self.get_event(&id).await })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect()
            .await;

        let mut events = Vec::new();
        for result in results {
            if let Some(event) = result? {
                events.push(event);
            }
        }
        Ok(events)
    }

    // ─── Notification Operations ─────────────────────────────────

    /// Insert a notification with a store-assigned ID. Returns the ID.
    pub async fn insert_notification(
        &self,
        notification: &Notification,
    ) -> Result<String, AppError> {
        let created: Notification = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::NOTIFICATIONS)
            .generate_document_id()
            .object(notification)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(created.id)
    }

    /// Get all new-application notifications addressed to an NGO.
    ///
    /// Any further narrowing (e.g. per event) happens client-side; the
    /// store is only asked for the two equality filters it can serve
    /// without a composite index.
    pub async fn query_notifications_for_ngo(
        &self,
        ngo_id: &str,
    ) -> Result<Vec<Notification>, AppError> {
        let ngo_id = ngo_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::NOTIFICATIONS)
            .filter(move |q| {
                q.for_all([
                    q.field("ngo_id").eq(ngo_id.clone()),
                    q.field("type").eq("new_application"),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
