//! Token issuance with the claim layout the authenticator expects

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::domain::entities::{Claims, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use crate::errors::TokenError;

use super::config::TokenConfig;

/// Mints HS256-signed tokens
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    access_token_expiry_secs: i64,
    refresh_token_expiry_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            access_token_expiry_secs: config.access_token_expiry_secs,
            refresh_token_expiry_secs: config.refresh_token_expiry_secs,
        }
    }

    /// Issues an access token for `username` carrying `authorities`
    ///
    /// # Arguments
    ///
    /// * `username` - Written to the `sub` claim
    /// * `authorities` - Written to the `authorities` claim, e.g. `ROLE_ADMIN`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact token
    /// * `Err(TokenError::GenerationFailed)` - Signing failed
    pub fn issue_access_token<I, S>(&self, username: &str, authorities: I) -> Result<String, TokenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let claims = Claims::new(
            username,
            TOKEN_TYPE_ACCESS,
            self.issuer.as_str(),
            Utc::now().timestamp(),
            self.access_token_expiry_secs,
        )
        .with_authorities(authorities);

        self.issue_with_claims(&claims)
    }

    /// Issues a refresh token; it is never accepted for authentication
    pub fn issue_refresh_token(&self, username: &str) -> Result<String, TokenError> {
        let claims = Claims::new(
            username,
            TOKEN_TYPE_REFRESH,
            self.issuer.as_str(),
            Utc::now().timestamp(),
            self.refresh_token_expiry_secs,
        );

        self.issue_with_claims(&claims)
    }

    /// Signs arbitrary claims as-is
    pub fn issue_with_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::GenerationFailed
        })
    }
}
