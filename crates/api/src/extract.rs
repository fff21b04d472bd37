//! Caller identity extraction.
//!
//! Authentication lives at the gateway; the API trusts the `x-user-id`
//! header it injects. Handlers take [`CurrentUser`] as an argument and get
//! a positive database id or a 401 rejection.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use storyforge_core::types::DbId;

use crate::error::AppError;

/// Header carrying the authenticated user's id.
const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, resolved from the gateway-injected header.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub DbId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing x-user-id header".to_string()))?;

        let id: DbId = header
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Unauthorized("Invalid x-user-id header".to_string()))?;

        Ok(Self(id))
    }
}
