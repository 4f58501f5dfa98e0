/*
 * Responsibility
 * - GET /whoami: echo the identity the middleware extracted for this request
 */
use axum::Json;

use crate::api::v1::extractors::CallerIdentity;
use crate::identity::Identity;

pub async fn whoami(CallerIdentity(identity): CallerIdentity) -> Json<Identity> {
    Json(identity)
}
