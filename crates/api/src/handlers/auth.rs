//! Handlers for the `/auth` resource (register, login, logout, session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cqms_core::error::CoreError;
use cqms_core::roles::Role;
use cqms_core::session::Session;
use cqms_db::models::user::{CreateUser, UserResponse};
use cqms_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_new_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum password length for self-registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Matches `users.username VARCHAR(50)`.
pub const MAX_USERNAME_LENGTH: usize = 50;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`. Self-registered accounts are
/// always clients.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Successful login: the bearer token plus the session it represents.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub session: Session,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a client account. Returns 201 with the new user, or 409 if the
/// username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() || input.confirm_password.is_empty() {
        return Err(CoreError::Validation("Please fill in all fields".into()).into());
    }
    validate_new_password(&input.password, &input.confirm_password, MIN_PASSWORD_LENGTH)?;
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters"
        ))
        .into());
    }

    if UserRepo::username_exists(&state.pool, username).await? {
        return Err(CoreError::Conflict("Username already exists".into()).into());
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still win the race; the unique
    // constraint then surfaces as 409 through `AppError::Database`.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: hashed,
            role: Role::Client.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password + role. Unknown user, wrong role
/// and wrong password all return the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    // Usernames are stored trimmed by `register`.
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err(CoreError::Validation(
            "Please enter both username and password".into(),
        )
        .into());
    }

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

    let user = UserRepo::find_by_username_and_role(&state.pool, username, input.role.as_str())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(username, "Login rejected");
        return Err(invalid());
    }

    let session = Session::default().login(user.username.clone(), input.role)?;
    let access_token = generate_token(user.user_id, &user.username, input.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.user_id, role = %input.role, "User logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            token_type: "Bearer",
            expires_in: state.config.jwt.expiry_mins * 60,
            session,
        },
    }))
}

/// POST /api/v1/auth/logout
///
/// Ends the session and returns the resulting logged-out session. Tokens are
/// not stored server-side, so the client discards its token.
pub async fn logout(auth_user: AuthUser) -> Json<DataResponse<Session>> {
    let session = auth_user.session().logout();
    tracing::info!(user_id = auth_user.user_id, "User logged out");
    Json(DataResponse { data: session })
}

/// GET /api/v1/auth/session
///
/// Current session: logged in with username and role when a valid token is
/// sent, logged out when no token is sent.
pub async fn current_session(auth_user: Option<AuthUser>) -> Json<DataResponse<Session>> {
    let session = auth_user.map(|u| u.session()).unwrap_or_default();
    Json(DataResponse { data: session })
}
