/*!
 * Caller identity extraction
 *
 * Responsibility:
 * - Read "who is calling" from an already-authenticated JWT (no signature check)
 * - HTTP / axum dependence stays in extract (header lookup); types are plain data
 *
 * Public API:
 * - Identity, claim name constants
 * - RawClaims, decode_claims
 * - extract_identity, extract_identity_from_headers
 */
mod claims;
mod extract;
mod types;

pub use claims::{RawClaims, decode_claims};
pub use extract::{extract_identity, extract_identity_from_headers};
pub use types::*;
