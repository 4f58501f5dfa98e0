/*
 * Responsibility
 * - Build an Identity from the decoded claims
 * - Locate the bearer token in the Authorization header
 */
use axum::http::{HeaderMap, header};

use super::claims::decode_claims;
use super::types::{DEVICE_CLAIM, Identity, PLAN_CLAIM, SUBJECT_CLAIM, TENANT_CLAIM, USER_CLAIM};
use crate::error::IdentityError;

const BEARER_SCHEME: &str = "Bearer";

/// Generate identity information from a JWT by extracting its subject, tenant
/// and role claims.
///
/// This does not perform any form of token signature verification.
pub fn extract_identity(token: &str) -> Result<Identity, IdentityError> {
    let claims = decode_claims(token)?;

    let subject = claims.string_claim(SUBJECT_CLAIM)?;
    if subject.is_empty() {
        return Err(IdentityError::MissingSubject);
    }

    let tenant = claims.string_claim(TENANT_CLAIM)?;
    let plan = claims.string_claim(PLAN_CLAIM)?;

    let mut identity = Identity {
        subject: subject.to_owned(),
        tenant: tenant.to_owned(),
        plan: plan.to_owned(),
        ..Identity::default()
    };

    // Missing or non-boolean role flags are treated as unset. String claims
    // above reject a wrong type instead; kept as-is for compatibility.
    if let Ok(is_user) = claims.bool_claim(USER_CLAIM) {
        identity.is_user = is_user;
    }
    if let Ok(is_device) = claims.bool_claim(DEVICE_CLAIM) {
        identity.is_device = is_device;
    }

    Ok(identity)
}

/// Extract identity information from the HTTP `Authorization` header, which is
/// expected to hold exactly `Bearer <token>`.
pub fn extract_identity_from_headers(headers: &HeaderMap) -> Result<Identity, IdentityError> {
    let auth = match headers.get(header::AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| IdentityError::MalformedHeader)?,
        None => "",
    };

    let parts: Vec<&str> = auth.split(' ').collect();
    let [scheme, token] = parts.as_slice() else {
        return Err(IdentityError::MalformedHeader);
    };

    if *scheme != BEARER_SCHEME {
        return Err(IdentityError::UnsupportedScheme((*scheme).to_owned()));
    }

    extract_identity(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use base64::{
        Engine as _,
        engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
    };
    use serde_json::{Map, Value, json};

    use super::*;

    fn make_claims_full(sub: &str, tenant: &str, plan: &str, device: bool, user: bool) -> String {
        let mut claims = Map::new();
        for (name, value) in [(SUBJECT_CLAIM, sub), (TENANT_CLAIM, tenant), (PLAN_CLAIM, plan)] {
            if !value.is_empty() {
                claims.insert(name.into(), Value::from(value));
            }
        }
        if device {
            claims.insert(DEVICE_CLAIM.into(), Value::Bool(true));
        }
        if user {
            claims.insert(USER_CLAIM.into(), Value::Bool(true));
        }

        URL_SAFE.encode(Value::Object(claims).to_string())
    }

    fn make_claims_part(sub: &str) -> String {
        make_claims_full(sub, "", "", false, false)
    }

    fn token_for(payload: Value) -> String {
        format!("foo.{}.bar", URL_SAFE.encode(payload.to_string()))
    }

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(matches!(extract_identity("foo"), Err(IdentityError::Format)));
        assert!(matches!(extract_identity("foo.bar"), Err(IdentityError::Format)));
        assert!(extract_identity("foo.bar.baz").is_err());

        // payload alone, missing header & signature
        let rawclaims = make_claims_part("foobar");
        assert!(matches!(
            extract_identity(&rawclaims),
            Err(IdentityError::Format)
        ));
    }

    #[test]
    fn extracts_subject_only() {
        let rawclaims = make_claims_part("foobar");
        let identity = extract_identity(&format!("foo.{rawclaims}.bar")).unwrap();
        assert_eq!(identity, Identity::new("foobar"));
    }

    #[test]
    fn extracts_every_recognized_claim() {
        for (device, user) in [(false, false), (true, false), (false, true), (true, true)] {
            let rawclaims = make_claims_full("sub-1", "tenant-1", "enterprise", device, user);
            let identity = extract_identity(&format!("x.{rawclaims}.y")).unwrap();

            assert_eq!(
                identity,
                Identity {
                    subject: "sub-1".into(),
                    tenant: "tenant-1".into(),
                    plan: "enterprise".into(),
                    is_user: user,
                    is_device: device,
                }
            );
        }
    }

    #[test]
    fn explicit_empty_tenant_and_plan_are_kept_empty() {
        let token = token_for(json!({
            "sub": "123",
            "mender.tenant": "",
            "mender.plan": "",
            "mender.user": true,
        }));
        let identity = extract_identity(&token).unwrap();

        assert_eq!(
            identity,
            Identity {
                is_user: true,
                ..Identity::new("123")
            }
        );
        assert!(!identity.has_tenant());
    }

    #[test]
    fn explicit_false_flags_are_kept() {
        let token = token_for(json!({
            "sub": "123",
            "mender.device": false,
            "mender.user": false,
        }));
        assert_eq!(extract_identity(&token).unwrap(), Identity::new("123"));
    }

    #[test]
    fn unpadded_payload_is_accepted() {
        let payload = json!({"sub": "foobar", "mender.tenant": "t"}).to_string();
        let token = format!("x.{}.y", URL_SAFE_NO_PAD.encode(payload));

        let identity = extract_identity(&token).unwrap();
        assert_eq!(identity.subject, "foobar");
        assert_eq!(identity.tenant, "t");
    }

    #[test]
    fn missing_or_empty_subject_is_rejected() {
        for payload in [json!({"iss": "Mender"}), json!({"sub": ""})] {
            assert!(matches!(
                extract_identity(&token_for(payload)),
                Err(IdentityError::MissingSubject)
            ));
        }
    }

    #[test]
    fn non_string_subject_is_rejected() {
        assert!(matches!(
            extract_identity(&token_for(json!({"sub": 1}))),
            Err(IdentityError::TypeMismatch { ref claim, .. }) if claim == SUBJECT_CLAIM
        ));
    }

    #[test]
    fn non_string_tenant_or_plan_is_rejected() {
        for (claim, value) in [(TENANT_CLAIM, json!(12)), (PLAN_CLAIM, json!({"tier": 1}))] {
            let mut payload = json!({"sub": "123"});
            payload[claim] = value;

            let err = extract_identity(&token_for(payload)).unwrap_err();
            assert!(
                matches!(err, IdentityError::TypeMismatch { claim: ref c, .. } if c == claim),
                "{claim}: {err}"
            );
        }
    }

    #[test]
    fn role_flags_are_read() {
        let identity = extract_identity(&token_for(json!({"sub": "123", "mender.device": true})));
        assert_eq!(
            identity.unwrap(),
            Identity {
                is_device: true,
                ..Identity::new("123")
            }
        );

        let identity = extract_identity(&token_for(json!({"sub": "123", "mender.user": true})));
        assert_eq!(
            identity.unwrap(),
            Identity {
                is_user: true,
                ..Identity::new("123")
            }
        );
    }

    #[test]
    fn malformed_role_flags_default_to_false() {
        let token = token_for(json!({
            "sub": "123",
            "mender.user": {"garbage": 2},
            "mender.device": "true",
        }));
        assert_eq!(extract_identity(&token).unwrap(), Identity::new("123"));
    }

    #[test]
    fn unrecognized_claims_are_ignored() {
        let token = token_for(json!({"sub": "123", "iss": "Mender", "exp": 1700000000}));
        assert_eq!(extract_identity(&token).unwrap(), Identity::new("123"));
    }

    #[test]
    fn header_without_authorization_is_malformed() {
        assert!(matches!(
            extract_identity_from_headers(&HeaderMap::new()),
            Err(IdentityError::MalformedHeader)
        ));
    }

    #[test]
    fn header_with_wrong_scheme_is_rejected() {
        let err = extract_identity_from_headers(&headers_with("Basic foobar")).unwrap_err();
        assert!(matches!(err, IdentityError::UnsupportedScheme(ref s) if s == "Basic"));

        // scheme match is case-sensitive
        let token = format!("foo.{}.bar", make_claims_part("foobar"));
        assert!(matches!(
            extract_identity_from_headers(&headers_with(&format!("bearer {token}"))),
            Err(IdentityError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn header_split_must_yield_two_parts() {
        let token = format!("foo.{}.bar", make_claims_part("foobar"));
        for auth in [
            "Bearer".to_owned(),
            format!("Bearer  {token}"),
            format!("Bearer {token} extra"),
        ] {
            assert!(
                matches!(
                    extract_identity_from_headers(&headers_with(&auth)),
                    Err(IdentityError::MalformedHeader)
                ),
                "{auth:?}"
            );
        }
    }

    #[test]
    fn bearer_with_empty_token_reaches_token_decoding() {
        assert!(matches!(
            extract_identity_from_headers(&headers_with("Bearer ")),
            Err(IdentityError::Format)
        ));
    }

    #[test]
    fn header_extraction_matches_direct_extraction() {
        let token = format!(
            "foo.{}.bar",
            make_claims_full("foobar", "tenant", "os", true, false)
        );

        let from_header = extract_identity_from_headers(&headers_with(&format!("Bearer {token}")));
        assert_eq!(from_header.unwrap(), extract_identity(&token).unwrap());
    }
}
