//! Unit tests for bearer token verification

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::domain::entities::{Claims, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use crate::errors::TokenError;
use crate::services::token::{TokenAuthenticator, TokenConfig, TokenIssuer};

const SECRET: &str = "unit-test-signing-secret-0123456789abcdef";
const ISSUER: &str = "pase-auth-service";

fn config() -> TokenConfig {
    TokenConfig::new(SECRET, ISSUER)
}

fn authenticator() -> TokenAuthenticator {
    TokenAuthenticator::new(&config())
}

fn issuer() -> TokenIssuer {
    TokenIssuer::new(&config())
}

fn claims(lifetime_secs: i64) -> Claims {
    Claims::new("alice", TOKEN_TYPE_ACCESS, ISSUER, Utc::now().timestamp(), lifetime_secs)
        .with_authorities(["ROLE_ADMIN"])
}

fn sign(claims: &Claims) -> String {
    issuer().issue_with_claims(claims).unwrap()
}

/// Sign arbitrary JSON claims with the shared secret under `algorithm`
fn sign_json(algorithm: Algorithm, claims: &serde_json::Value) -> String {
    encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

/// Replace the first signature character so the signature no longer matches
fn tamper_signature(token: &str) -> String {
    let (head, signature) = token.rsplit_once('.').unwrap();
    let first = if signature.starts_with('A') { 'B' } else { 'A' };
    format!("{}.{}{}", head, first, &signature[1..])
}

#[test]
fn test_issued_access_token_round_trips_to_identity() {
    let token = issuer().issue_access_token("alice", ["ROLE_ADMIN"]).unwrap();
    let auth = authenticator();

    assert!(auth.validate_structure(&token));
    assert!(auth.is_access_token(&token));
    assert!(auth.is_valid(&token));

    let identity = auth.extract_identity(&token).unwrap();
    assert_eq!(identity.username, "alice");
    assert_eq!(identity.authorities.len(), 1);
    assert!(identity.has_authority("ROLE_ADMIN"));
}

#[test]
fn test_tampered_signature_is_invalid() {
    let token = tamper_signature(&sign(&claims(3600)));
    let auth = authenticator();

    assert!(!auth.is_valid(&token));
    assert!(!auth.validate_structure(&token));
    assert!(auth.authenticate(&token).is_none());
    assert_eq!(auth.check(&token), Err(TokenError::InvalidSignature));
}

#[test]
fn test_token_signed_with_other_secret_is_invalid() {
    let other = TokenIssuer::new(&TokenConfig::new("some-other-secret-value", ISSUER));
    let token = other.issue_access_token("alice", ["ROLE_USER"]).unwrap();

    assert_eq!(authenticator().check(&token), Err(TokenError::InvalidSignature));
}

#[test]
fn test_expired_token_is_invalid() {
    let token = sign(&claims(-10));
    let auth = authenticator();

    assert!(auth.validate_structure(&token));
    assert!(!auth.is_valid(&token));
    assert_eq!(auth.check(&token), Err(TokenError::Expired));
}

#[test]
fn test_expiry_equal_to_now_is_expired() {
    let mut c = claims(0);
    c.exp = Some(1_000);
    let token = sign(&c);
    let auth = authenticator();

    assert_eq!(auth.check_at(&token, 1_000), Err(TokenError::Expired));
    assert!(auth.check_at(&token, 999).is_ok());
}

#[test]
fn test_missing_expiry_is_invalid() {
    let mut c = claims(3600);
    c.exp = None;

    assert_eq!(authenticator().check(&sign(&c)), Err(TokenError::Expired));
}

#[test]
fn test_wrong_issuer_is_invalid() {
    let mut c = claims(3600);
    c.iss = Some("someone-else".to_string());
    let result = authenticator().check(&sign(&c));

    assert_eq!(
        result,
        Err(TokenError::WrongIssuer {
            expected: ISSUER.to_string(),
            actual: "someone-else".to_string(),
        })
    );
}

#[test]
fn test_refresh_token_is_not_an_access_token() {
    let token = issuer().issue_refresh_token("alice").unwrap();
    let auth = authenticator();

    assert!(auth.validate_structure(&token));
    assert!(!auth.is_access_token(&token));
    assert!(!auth.is_valid(&token));
    assert!(matches!(auth.check(&token), Err(TokenError::WrongType { .. })));
}

#[test]
fn test_any_non_access_type_is_rejected() {
    for token_type in [TOKEN_TYPE_REFRESH, "access", "ID", ""] {
        let mut c = claims(3600);
        c.token_type = Some(token_type.to_string());
        let token = sign(&c);

        assert!(!authenticator().is_access_token(&token), "type {:?}", token_type);
        assert!(!authenticator().is_valid(&token), "type {:?}", token_type);
    }

    let mut untyped = claims(3600);
    untyped.token_type = None;
    assert!(!authenticator().is_valid(&sign(&untyped)));
}

#[test]
fn test_blank_subject_is_invalid() {
    for subject in [None, Some(String::new()), Some("  ".to_string())] {
        let mut c = claims(3600);
        c.sub = subject;
        assert_eq!(authenticator().check(&sign(&c)), Err(TokenError::MissingSubject));
    }
}

#[test]
fn test_malformed_input_never_panics() {
    let auth = authenticator();
    for token in ["", "   ", "abc", "a.b", "a.b.c", "a.b.c.d", "...", "Bearer x.y.z"] {
        assert!(!auth.validate_structure(token), "{:?}", token);
        assert!(!auth.is_access_token(token), "{:?}", token);
        assert!(!auth.is_valid(token), "{:?}", token);
        assert!(auth.authenticate(token).is_none(), "{:?}", token);
        assert_eq!(auth.check(token), Err(TokenError::Malformed), "{:?}", token);
    }
}

#[test]
fn test_missing_authorities_claim_yields_empty_set() {
    let mut c = claims(3600);
    c.authorities = None;
    let token = sign(&c);

    let identity = authenticator().authenticate(&token).unwrap();
    assert_eq!(identity.username, "alice");
    assert!(identity.authorities.is_empty());
}

#[test]
fn test_authenticate_returns_identity_for_valid_token() {
    let token = issuer()
        .issue_access_token("bob", ["ROLE_USER", "ROLE_MODERATOR"])
        .unwrap();

    let identity = authenticator().authenticate(&token).unwrap();
    assert_eq!(identity.username, "bob");
    assert!(identity.has_any_authority(&["ROLE_MODERATOR"]));
}

#[test]
fn test_every_hmac_strength_is_accepted() {
    let auth = authenticator();
    let claims = serde_json::to_value(claims(3600)).unwrap();

    for algorithm in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
        let token = sign_json(algorithm, &claims);

        assert!(auth.is_valid(&token), "{:?}", algorithm);
        assert_eq!(auth.check(&token).unwrap().subject(), Some("alice"));
        assert_eq!(auth.authenticate(&token).unwrap().username, "alice");
    }
}

#[test]
fn test_hs512_token_with_wrong_secret_is_bad_signature() {
    let claims = serde_json::to_value(claims(3600)).unwrap();
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(b"another-secret-of-some-reasonable-length"),
    )
    .unwrap();

    assert!(matches!(authenticator().check(&token), Err(TokenError::InvalidSignature)));
}

#[test]
fn test_fractional_expiry_is_honoured() {
    let now = Utc::now().timestamp();
    let auth = authenticator();

    let live = sign_json(
        Algorithm::HS256,
        &json!({
            "sub": "alice",
            "iss": ISSUER,
            "type": TOKEN_TYPE_ACCESS,
            "iat": now as f64 + 0.25,
            "exp": now as f64 + 3600.5,
            "authorities": ["ROLE_USER"],
        }),
    );
    assert!(auth.is_valid(&live));

    let expired = sign_json(
        Algorithm::HS256,
        &json!({
            "sub": "alice",
            "iss": ISSUER,
            "type": TOKEN_TYPE_ACCESS,
            "exp": now as f64 - 10.5,
        }),
    );
    assert!(matches!(auth.check(&expired), Err(TokenError::Expired)));
}
