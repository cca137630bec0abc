// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current-user routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Role, User};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/user/role", post(set_role))
}

/// Current user response.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub ok: bool,
    pub user: User,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = state
        .db
        .get_user(&user.user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse { ok: true, user }))
}

#[derive(Deserialize)]
struct SetRoleRequest {
    role: String,
}

/// Pick the marketplace role. A role, once set, cannot change.
async fn set_role(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<UserResponse>> {
    let role = Role::parse(&request.role)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", request.role)))?;

    let updated = state.db.update_user(&user.user_id, |u| match u.role {
        None => {
            u.role = Some(role);
            Ok(())
        }
        Some(current) if current == role => Ok(()),
        Some(current) => Err(AppError::Conflict(format!(
            "Role is already set to {}",
            current.as_str()
        ))),
    })?;

    tracing::info!(user_id = %updated.id, role = role.as_str(), "User role set");
    Ok(Json(UserResponse {
        ok: true,
        user: updated,
    }))
}
