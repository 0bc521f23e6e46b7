//! Family context extraction.
//!
//! Session handling lives outside this service. Whatever sits in front of it
//! resolves the session and forwards the family in the `x-family-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use shared_types::FamilyId;

pub const FAMILY_HEADER: &str = "x-family-id";

/// The family every request in this gateway acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyContext(pub FamilyId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for FamilyContext
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(FAMILY_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("[gateway] Request without family context");
                StatusCode::UNAUTHORIZED
            })?;

        FamilyId::parse(raw).map(FamilyContext).map_err(|e| {
            tracing::warn!(error = %e, "[gateway] Unreadable family context");
            StatusCode::UNAUTHORIZED
        })
    }
}
