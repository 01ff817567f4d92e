use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use skylane_core::admin::{Admin, CreateUserParams, User};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Credentials arrive pre-hashed; this surface does no password handling
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<CreateAdminRequest> for CreateUserParams {
    fn from(req: CreateAdminRequest) -> Self {
        CreateUserParams {
            email: req.email,
            password_hash: req.password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            user_id: user.user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: Uuid,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        AdminResponse {
            id: admin.id,
            user_id: admin.user_id,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    pub id: Uuid,
    pub user_id: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/admins
pub async fn create_admin(
    State(state): State<AppState>,
    Json(req): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<CreateAdminResponse>), AppError> {
    let user = state.admin_repo.create_admin_tx(req.into()).await?;
    tracing::info!(user_id = user.user_id, "admin created");

    let response = CreateAdminResponse {
        message: "Admin created successfully.".to_string(),
        user: user.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /v1/admins
pub async fn list_admins(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminResponse>>, AppError> {
    let admins = state.admin_repo.list_admins().await?;
    Ok(Json(admins.into_iter().map(AdminResponse::from).collect()))
}

/// GET /v1/admins/{id}
pub async fn get_admin(
    State(state): State<AppState>,
    Path(admin_id): Path<Uuid>,
) -> Result<Json<AdminResponse>, AppError> {
    let admin = state.admin_repo.get_admin(admin_id).await?;
    Ok(Json(admin.into()))
}

/// GET /v1/admins/by-user/{user_id}
pub async fn get_admin_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<AdminResponse>, AppError> {
    let admin = state.admin_repo.get_admin_by_user(user_id).await?;
    Ok(Json(admin.into()))
}

/// PUT /v1/admins
pub async fn update_admin(
    State(state): State<AppState>,
    Json(req): Json<UpdateAdminRequest>,
) -> Result<Json<AdminResponse>, AppError> {
    let current = state.admin_repo.get_admin(req.id).await?;
    let updated = state
        .admin_repo
        .update_admin(Admin {
            user_id: req.user_id,
            ..current
        })
        .await?;

    Ok(Json(updated.into()))
}

/// DELETE /v1/admins/by-user/{user_id}
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.admin_repo.delete_admin(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
