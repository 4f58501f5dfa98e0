/*
 * Responsibility
 * - Split a compact token into header.payload.signature
 * - Decode the payload segment (URL-safe base64, padding corrected) into a raw claim set
 * - Typed, read-only lookups over the raw claim set
 *
 * Notes
 * - No signature verification happens here. Trust is decided upstream.
 */
use base64::{
    Engine as _, alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
};
use serde_json::{Map, Value};

use crate::error::IdentityError;

/// URL-safe alphabet, canonical padding, non-zero trailing bits tolerated.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Claims decoded from the token payload, untyped.
///
/// Never mutated after decoding; the typed getters only read from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawClaims(Map<String, Value>);

impl RawClaims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Absent claim reads as `""`. A claim of any other JSON type is an error.
    pub fn string_claim(&self, name: &str) -> Result<&str, IdentityError> {
        match self.get(name) {
            None => Ok(""),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(IdentityError::type_mismatch(name, "string", other)),
        }
    }

    /// Unlike [`RawClaims::string_claim`], absence is reported as an error.
    pub fn bool_claim(&self, name: &str) -> Result<bool, IdentityError> {
        match self.get(name) {
            None => Err(IdentityError::MissingClaim(name.to_owned())),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(IdentityError::type_mismatch(name, "boolean", other)),
        }
    }
}

/// Decode the claims of a `header.payload.signature` token.
///
/// Header and signature segments are not looked at.
pub fn decode_claims(token: &str) -> Result<RawClaims, IdentityError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(IdentityError::Format);
    }

    let mut b64claims = parts[1].to_owned();
    let rem = b64claims.len() % 4;
    if rem != 0 {
        b64claims.push_str(&"=".repeat(4 - rem));
    }
    // Line breaks are skipped by the decoder, after padding was sized.
    b64claims.retain(|c| c != '\r' && c != '\n');

    let raw = match CLAIMS_ENGINE.decode(&b64claims) {
        Ok(raw) => raw,
        Err(source) => {
            return Err(IdentityError::Decode {
                claims: b64claims,
                source,
            });
        }
    };

    // Anything but a top-level JSON object fails here too.
    let claims: Map<String, Value> = serde_json::from_slice(&raw).map_err(IdentityError::Parse)?;

    Ok(RawClaims(claims))
}
