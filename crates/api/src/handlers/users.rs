//! Handlers for the `/users` resource, login and token refresh.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use drawreg_core::error::CoreError;
use drawreg_core::roles::validate_role;
use drawreg_core::types::DbId;
use drawreg_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use drawreg_db::store::UserStore;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, validate_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{created, ok};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub department: Option<String>,
    /// Signature image as a data URL.
    pub signature: Option<String>,
}

/// Request body for `PATCH /users/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    /// New plaintext password; re-hashed before storage.
    pub password: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub signature: Option<String>,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /users/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Successful refresh response.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn hash_new_password(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    state
        .store()
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Create a user. The password is hashed with Argon2id before storage.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    let password_hash = hash_new_password(&input.password)?;

    let create = CreateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        password_hash,
        role: input.role,
        department: input.department,
        signature: input.signature,
    };
    let user = state.store().create_user(&create).await?;

    tracing::info!(user_id = user.id, role = %user.role, "User created");

    Ok(created(UserResponse::from(user)))
}

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users: Vec<UserResponse> = state
        .store()
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(ok(users))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = find_user(&state, id).await?;
    Ok(ok(UserResponse::from(user)))
}

/// GET /api/v1/users/me
///
/// The user the Bearer token was issued to.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = find_user(&state, auth.user_id).await?;
    Ok(ok(UserResponse::from(user)))
}

/// PATCH /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(role) = &input.role {
        validate_role(role)?;
    }
    let password_hash = input
        .password
        .as_deref()
        .map(hash_new_password)
        .transpose()?;

    let update = UpdateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        password_hash,
        role: input.role,
        department: input.department,
        signature: input.signature,
    };
    let user = state
        .store()
        .update_user(id, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;

    tracing::info!(
        user_id = id,
        password_changed = update.password_hash.is_some(),
        "User updated"
    );

    Ok(ok(UserResponse::from(user)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.store().delete_user(id).await? {
        return Err(AppError::Core(CoreError::not_found("User", id)));
    }
    tracing::info!(user_id = id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .store()
        .find_user_by_email(&input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh_token = generate_refresh_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    }))
}

/// POST /api/v1/users/refresh
///
/// Exchange a valid refresh token for a new access token. The role is
/// re-read so a role change takes effect on the next refresh.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let jwt = &state.config.jwt;
    let claims = validate_refresh_token(&input.refresh_token, jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    })?;

    let user = state
        .store()
        .find_user(claims.sub)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(RefreshResponse {
        access_token,
        expires_in: jwt.access_token_expiry_mins * 60,
    }))
}
