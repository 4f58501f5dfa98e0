/*
 * Responsibility
 * - Library root: identity extraction plus the axum service wiring around it
 * - main.rs only calls app::run()
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod state;

pub use error::IdentityError;
pub use identity::{Identity, extract_identity, extract_identity_from_headers};
