//! Bearer token verification

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::domain::entities::{AuthenticatedIdentity, Claims};
use crate::errors::TokenError;

use super::config::TokenConfig;

/// Upstream issuers pick the HMAC strength from the key length
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Verifies HMAC-signed (HS256/HS384/HS512) bearer tokens without touching
/// any store
///
/// The decoding key and expected issuer are fixed at construction, so one
/// instance is shared across all request workers.
pub struct TokenAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
    expected_issuer: String,
}

impl TokenAuthenticator {
    /// Creates an authenticator for the configured secret and issuer
    pub fn new(config: &TokenConfig) -> Self {
        // Only the signature is checked by the library; every claim is
        // checked explicitly so that each failure has its own reason.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expected_issuer: config.issuer.clone(),
        }
    }

    /// The issuer tokens must carry
    pub fn expected_issuer(&self) -> &str {
        &self.expected_issuer
    }

    /// Non-empty, three dot-separated segments, and a valid signature
    pub fn validate_structure(&self, token: &str) -> bool {
        self.decode_claims(token).is_ok()
    }

    /// True iff the token decodes and its `type` claim is `ACCESS`
    pub fn is_access_token(&self, token: &str) -> bool {
        self.decode_claims(token)
            .map(|claims| claims.is_access_token())
            .unwrap_or(false)
    }

    /// Signature, expiry, issuer, subject and type all check out
    pub fn is_valid(&self, token: &str) -> bool {
        self.check(token).is_ok()
    }

    /// Runs every check against the current time and returns the claims,
    /// or the first reason the token is unusable
    pub fn check(&self, token: &str) -> Result<Claims, TokenError> {
        self.check_at(token, Utc::now().timestamp())
    }

    /// Same as [`check`](Self::check) with an explicit clock
    pub fn check_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let claims = self.decode_claims(token)?;

        if !claims.is_live_at(now) {
            return Err(TokenError::Expired);
        }

        let issuer = claims.iss.as_deref().unwrap_or_default();
        if issuer != self.expected_issuer {
            return Err(TokenError::WrongIssuer {
                expected: self.expected_issuer.clone(),
                actual: issuer.to_string(),
            });
        }

        if claims.subject().is_none() {
            return Err(TokenError::MissingSubject);
        }

        if !claims.is_access_token() {
            return Err(TokenError::WrongType {
                actual: claims.token_type.clone().unwrap_or_default(),
            });
        }

        Ok(claims)
    }

    /// Reads the username and authorities out of a token
    ///
    /// Callers are expected to have confirmed [`is_valid`](Self::is_valid);
    /// only the signature is re-checked here. A missing `authorities` claim
    /// yields an empty set.
    pub fn extract_identity(&self, token: &str) -> Result<AuthenticatedIdentity, TokenError> {
        let claims = self.decode_claims(token)?;
        Ok(Self::identity_from(claims))
    }

    /// The whole verification pipeline as an optional result
    ///
    /// Any failure means "no identity"; the reason is only logged.
    pub fn authenticate(&self, token: &str) -> Option<AuthenticatedIdentity> {
        match self.check(token) {
            Ok(claims) => Some(Self::identity_from(claims)),
            Err(err) => {
                tracing::warn!(reason = %err, "Rejected bearer token");
                None
            }
        }
    }

    fn identity_from(claims: Claims) -> AuthenticatedIdentity {
        AuthenticatedIdentity::new(
            claims.sub.unwrap_or_default(),
            claims.authorities.unwrap_or_default(),
        )
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let token = token.trim();
        if token.is_empty() || token.split('.').count() != 3 {
            return Err(TokenError::Malformed);
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}
