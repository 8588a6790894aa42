//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects sessions whose role does
//! not match. Role checks live here, at the service boundary, rather than in
//! the UI.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cqms_core::error::CoreError;
use cqms_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `client` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn submit(RequireClient(user): RequireClient) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireClient(pub AuthUser);

impl FromRequestParts<AppState> for RequireClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user =
            <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        if user.role != Role::Client {
            return Err(AppError::Core(CoreError::Forbidden(
                "Client role required".into(),
            )));
        }
        Ok(RequireClient(user))
    }
}

/// Requires the `support` role. Rejects with 403 Forbidden otherwise.
pub struct RequireSupport(pub AuthUser);

impl FromRequestParts<AppState> for RequireSupport {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user =
            <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        if user.role != Role::Support {
            return Err(AppError::Core(CoreError::Forbidden(
                "Support role required".into(),
            )));
        }
        Ok(RequireSupport(user))
    }
}
