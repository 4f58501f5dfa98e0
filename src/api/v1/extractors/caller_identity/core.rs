use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::identity::Identity;

/// Extractor giving handlers the caller's `Identity`.
/// Relies on `middleware::identity` having inserted it into request extensions;
/// without it (middleware not applied) the request is rejected with 401.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Identity);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CallerIdentity)
            .ok_or_else(|| {
                AppError::unauthorized("UNAUTHENTICATED", "caller identity not available")
            })
    }
}
