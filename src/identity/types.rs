/*
 * Responsibility
 * - Caller identity as seen by handlers / authorization code
 * - Claim names recognized in the token payload
 *
 * Notes
 * - Decoding and validation live in claims / extract; this file only holds the contract types
 */
use serde::Serialize;

/// Token field names
pub const SUBJECT_CLAIM: &str = "sub";
pub const TENANT_CLAIM: &str = "mender.tenant";
pub const DEVICE_CLAIM: &str = "mender.device";
pub const USER_CLAIM: &str = "mender.user";
pub const PLAN_CLAIM: &str = "mender.plan";

/// Identity of the caller, extracted from an already-authenticated token.
///
/// - `subject` is always non-empty
/// - `tenant` / `plan` are empty strings when the token does not carry them
/// - `is_user` / `is_device` default to `false`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub subject: String,
    pub tenant: String,
    pub plan: String,
    pub is_user: bool,
    pub is_device: bool,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    pub fn has_tenant(&self) -> bool {
        !self.tenant.is_empty()
    }
}
