/*!
 * Caller identity extractor
 *
 * Responsibility:
 * - Hand the Identity that middleware placed in request extensions to handlers
 *
 * Public API:
 * - CallerIdentity
 */

mod core;

pub use self::core::CallerIdentity;
