//! Account-type access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests from the wrong
//! account type with 403, so handlers enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cfomatch_core::error::CoreError;
use cfomatch_core::roles::UserType;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require(
    parts: &mut Parts,
    state: &AppState,
    user_type: UserType,
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if user.user_type != user_type {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(user)
}

/// Requires an `admin` account. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, UserType::Admin, "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Requires a `company` account.
pub struct RequireCompany(pub AuthUser);

impl FromRequestParts<AppState> for RequireCompany {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, UserType::Company, "Company account required")
            .await
            .map(RequireCompany)
    }
}

/// Requires a `cfo` account.
pub struct RequireCfo(pub AuthUser);

impl FromRequestParts<AppState> for RequireCfo {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, UserType::Cfo, "CFO account required")
            .await
            .map(RequireCfo)
    }
}
