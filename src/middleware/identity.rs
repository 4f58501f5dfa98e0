//! Caller identity (Bearer JWT claims) -> `Identity` in request extensions.
//!
//! - The token is NOT signature-checked here. An upstream gateway is expected
//!   to have verified it already; this layer only reads who is calling.
//! - On failure the request is rejected with 401 and a JSON error body.
//! - Handlers receive the result through `api::v1::extractors::CallerIdentity`.

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::identity::extract_identity_from_headers;
use crate::state::AppState;

/// Require a caller identity on every route of `router`.
///
/// Applied as a route layer, so unmatched paths still fall through to 404.
pub fn apply(router: Router<AppState>) -> Router<AppState> {
    router.route_layer(middleware::from_fn(identity_middleware))
}

async fn identity_middleware(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let identity = match extract_identity_from_headers(req.headers()) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(error = %err, code = err.code(), "identity extraction failed");
            return Err(err.into());
        }
    };

    tracing::debug!(
        subject = %identity.subject,
        tenant = %identity.tenant,
        has_tenant = identity.has_tenant(),
        plan = %identity.plan,
        is_user = identity.is_user,
        is_device = identity.is_device,
        "caller identified"
    );

    // middleware -> extractor
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
