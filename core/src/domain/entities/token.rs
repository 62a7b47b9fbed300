//! Token claims for JWT-based authentication.

use serde::{Deserialize, Deserializer, Serialize};

/// Token type tag accepted for authentication
pub const TOKEN_TYPE_ACCESS: &str = "ACCESS";

/// Token type tag for refresh tokens; never accepted for authentication
pub const TOKEN_TYPE_REFRESH: &str = "REFRESH";

/// Claims structure for JWT payload
///
/// Every claim is optional on the wire so that a token missing one of them
/// still decodes and is then rejected by the individual claim checks rather
/// than by a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at timestamp (seconds since epoch)
    #[serde(default, deserialize_with = "numeric_date", skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration timestamp (seconds since epoch)
    #[serde(default, deserialize_with = "numeric_date", skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Token type tag (`ACCESS`, `REFRESH`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Granted authorities, e.g. `ROLE_ADMIN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorities: Option<Vec<String>>,
}

/// Reads a NumericDate, which may carry fractional seconds
///
/// Fractions round up, so `exp > now` holds exactly when the unrounded
/// instant is still in the future.
fn numeric_date<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(|secs| secs.ceil() as i64))
}

impl Claims {
    /// Creates claims for a token of the given type
    ///
    /// # Arguments
    ///
    /// * `subject` - The username the token is issued to
    /// * `token_type` - Type tag written into the `type` claim
    /// * `issuer` - Value of the `iss` claim
    /// * `issued_at` - Issue instant in seconds since epoch
    /// * `lifetime_secs` - Seconds until expiration
    pub fn new(
        subject: impl Into<String>,
        token_type: impl Into<String>,
        issuer: impl Into<String>,
        issued_at: i64,
        lifetime_secs: i64,
    ) -> Self {
        Self {
            sub: Some(subject.into()),
            iat: Some(issued_at),
            exp: Some(issued_at + lifetime_secs),
            iss: Some(issuer.into()),
            token_type: Some(token_type.into()),
            authorities: None,
        }
    }

    /// Attaches an authorities claim
    pub fn with_authorities<I, S>(mut self, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authorities = Some(authorities.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the `type` claim marks an access token
    pub fn is_access_token(&self) -> bool {
        self.token_type.as_deref() == Some(TOKEN_TYPE_ACCESS)
    }

    /// Whether the token expires strictly after `now`
    ///
    /// A missing `exp` claim counts as expired.
    pub fn is_live_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp > now)
    }

    /// The subject, if present and non-blank
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|sub| !sub.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_claim_is_serialized_as_type() {
        let claims = Claims::new("alice", TOKEN_TYPE_ACCESS, "pase-auth-service", 1_000, 60);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["type"], "ACCESS");
        assert_eq!(json["exp"], 1_060);
        assert!(json.get("authorities").is_none());
    }

    #[test]
    fn test_missing_claims_deserialize_as_none() {
        let claims: Claims = serde_json::from_str(r#"{"sub":"bob"}"#).unwrap();

        assert_eq!(claims.subject(), Some("bob"));
        assert!(claims.exp.is_none());
        assert!(!claims.is_access_token());
        assert!(!claims.is_live_at(0));
    }

    #[test]
    fn test_fractional_numeric_dates_round_up() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":"bob","iat":1000.25,"exp":1060.5}"#).unwrap();

        assert_eq!(claims.iat, Some(1_001));
        assert_eq!(claims.exp, Some(1_061));
        assert!(claims.is_live_at(1_060));
        assert!(!claims.is_live_at(1_061));
    }

    #[test]
    fn test_integer_numeric_dates_are_exact() {
        let claims: Claims = serde_json::from_str(r#"{"exp":1760000000}"#).unwrap();
        assert_eq!(claims.exp, Some(1_760_000_000));
    }

    #[test]
    fn test_expiry_is_strict() {
        let claims = Claims::new("alice", TOKEN_TYPE_ACCESS, "iss", 100, 50);
        assert!(claims.is_live_at(149));
        assert!(!claims.is_live_at(150));
    }

    #[test]
    fn test_blank_subject_is_absent() {
        let claims = Claims {
            sub: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_refresh_type_is_not_access() {
        let claims = Claims::new("alice", TOKEN_TYPE_REFRESH, "iss", 0, 10);
        assert!(!claims.is_access_token());
    }
}
