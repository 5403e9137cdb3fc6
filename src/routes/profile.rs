// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Registration and profile handlers.
//!
//! Identity comes from the session token; these handlers only manage the
//! profile document stored under that id.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{NgoProfile, User, VolunteerProfile};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Volunteer,
    Ngo,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub role: Role,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Create the caller's profile document. Idempotent: registering twice
/// returns the existing profile untouched (role changes are not allowed
/// this way).
pub async fn register(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    if let Some(existing) = state.db.get_user(&auth.user_id).await? {
        tracing::debug!(user_id = %auth.user_id, "Register called for existing profile");
        return Ok((StatusCode::OK, Json(existing)));
    }

    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and email are required".to_string(),
        ));
    }

    let now = Utc::now();
    let user = match request.role {
        Role::Volunteer => User::Volunteer(VolunteerProfile {
            uid: auth.user_id.clone(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            bio: request.bio,
            skills: vec![],
            interests: vec![],
            phone: request.phone,
            location: request.location,
            applications: vec![],
            bookmarks: vec![],
            created_at: now,
            updated_at: None,
        }),
        Role::Ngo => User::Ngo(NgoProfile {
            uid: auth.user_id.clone(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            mission: request.mission,
            location: request.location,
            phone: request.phone,
            created_at: now,
            updated_at: None,
        }),
    };

    state.db.upsert_user(&user).await?;
    tracing::info!(user_id = %auth.user_id, "Registered new profile");

    Ok((StatusCode::CREATED, Json(user)))
}

/// The caller's own profile.
pub async fn me(State(state): State<Arc<AppState>>, auth: AuthUser) -> Result<Json<User>> {
    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Merge-update the caller's profile. Only provided fields change;
/// fields that do not exist on the caller's role are ignored.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>> {
    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let now = Utc::now();
    let updated = match user {
        User::Volunteer(mut v) => {
            if let Some(name) = request.name {
                if name.trim().is_empty() {
                    return Err(AppError::BadRequest("Name cannot be empty".to_string()));
                }
                v.name = name.trim().to_string();
            }
            if let Some(bio) = request.bio {
                v.bio = Some(bio);
            }
            if let Some(skills) = request.skills {
                v.skills = skills;
            }
            if let Some(interests) = request.interests {
                v.interests = interests;
            }
            if let Some(location) = request.location {
                v.location = Some(location);
            }
            if let Some(phone) = request.phone {
                v.phone = Some(phone);
            }
            v.updated_at = Some(now);
            User::Volunteer(v)
        }
        User::Ngo(mut n) => {
            if let Some(name) = request.name {
                if name.trim().is_empty() {
                    return Err(AppError::BadRequest("Name cannot be empty".to_string()));
                }
                n.name = name.trim().to_string();
            }
            if let Some(mission) = request.mission {
                n.mission = Some(mission);
            }
            if let Some(location) = request.location {
                n.location = Some(location);
            }
            if let Some(phone) = request.phone {
                n.phone = Some(phone);
            }
            n.updated_at = Some(now);
            User::Ngo(n)
        }
    };

    state.db.upsert_user(&updated).await?;
    tracing::info!(user_id = %auth.user_id, "Updated profile");
    Ok(Json(updated))
}
