/*
 * Responsibility
 * - v1 URL layout
 * - /health is open, /whoami sits behind the identity middleware
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{health::health, whoami::whoami};
use crate::middleware;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let identified = middleware::identity::apply(Router::new().route("/whoami", get(whoami)));

    Router::new()
        .route("/health", get(health))
        .merge(identified)
}
