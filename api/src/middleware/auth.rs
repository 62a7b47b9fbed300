//! Bearer-token authentication middleware.
//!
//! Runs ahead of every handler and only decides whether an
//! [`AuthenticatedIdentity`] is attached to the request extensions. It never
//! rejects a request itself: a missing or invalid token simply leaves the
//! request unauthenticated, and [`RouteAuthorization`](super::RouteAuthorization)
//! answers 401/403 where a route needs an identity.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::{header::AUTHORIZATION, Method},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use om_core::domain::entities::AuthenticatedIdentity;
use om_core::services::TokenAuthenticator;

use super::public_paths::is_public_path;

const BEARER_PREFIX: &str = "Bearer ";
const LOGGED_TOKEN_PREFIX: usize = 20;

/// Authentication middleware factory
#[derive(Clone)]
pub struct JwtAuthentication {
    authenticator: Arc<TokenAuthenticator>,
}

impl JwtAuthentication {
    pub fn new(authenticator: Arc<TokenAuthenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthenticationMiddleware {
            service: Rc::new(service),
            authenticator: Arc::clone(&self.authenticator),
        }))
    }
}

/// Authentication middleware service
pub struct JwtAuthenticationMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<TokenAuthenticator>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        authenticate_request(&req, &self.authenticator);

        let service = Rc::clone(&self.service);
        Box::pin(async move { service.call(req).await })
    }
}

/// Attach an identity to `req` when it carries a valid access token
///
/// Skips public paths, preflight requests and requests that already carry
/// an identity. Returns whether an identity is attached afterwards.
pub fn authenticate_request(req: &ServiceRequest, authenticator: &TokenAuthenticator) -> bool {
    let path = req.path();

    if req.method() == Method::OPTIONS || is_public_path(path) {
        log::debug!("Skipping authentication for {} {}", req.method(), path);
        return false;
    }

    if req.extensions().contains::<AuthenticatedIdentity>() {
        log::debug!("Request to {} is already authenticated", path);
        return true;
    }

    let Some(token) = extract_bearer_token(req) else {
        log::debug!("No bearer token on request to {}", path);
        return false;
    };

    log::debug!("Bearer token received: {}...", token_prefix(&token));

    match authenticator.authenticate(&token) {
        Some(identity) => {
            log::info!(
                "User {} authenticated with authorities: {:?}",
                identity.username,
                identity.authorities
            );
            req.extensions_mut().insert(identity);
            true
        }
        None => {
            log::warn!("Invalid bearer token on request to {}", path);
            req.extensions_mut().remove::<AuthenticatedIdentity>();
            false
        }
    }
}

/// Token after the `Bearer ` prefix, trimmed; `None` when absent or blank
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn token_prefix(token: &str) -> &str {
    match token.char_indices().nth(LOGGED_TOKEN_PREFIX) {
        Some((index, _)) => &token[..index],
        None => token,
    }
}

/// Extractor for required authentication; answers 401 when no identity is attached
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedIdentity);

impl CurrentUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn into_inner(self) -> AuthenticatedIdentity {
        self.0
    }
}

impl std::ops::Deref for CurrentUser {
    type Target = AuthenticatedIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use om_core::services::{TokenConfig, TokenIssuer};

    fn config() -> TokenConfig {
        TokenConfig::new("unit-test-secret", "pase-auth-service")
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer  test_token_123 "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_token_prefix_is_bounded() {
        assert_eq!(token_prefix("short"), "short");
        assert_eq!(token_prefix("abcdefghijklmnopqrstuvwxyz").len(), LOGGED_TOKEN_PREFIX);
    }

    #[test]
    fn test_valid_token_attaches_identity() {
        let token = TokenIssuer::new(&config())
            .issue_access_token("alice", ["ROLE_ADMIN"])
            .unwrap();
        let authenticator = TokenAuthenticator::new(&config());
        let req = TestRequest::get()
            .uri("/api/v1/drivers/active")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_srv_request();

        assert!(authenticate_request(&req, &authenticator));

        let extensions = req.extensions();
        let identity = extensions.get::<AuthenticatedIdentity>().unwrap();
        assert_eq!(identity.username, "alice");
        assert!(identity.has_authority("ROLE_ADMIN"));
    }

    #[test]
    fn test_existing_identity_is_not_rederived() {
        let token = TokenIssuer::new(&config())
            .issue_access_token("alice", ["ROLE_ADMIN"])
            .unwrap();
        let authenticator = TokenAuthenticator::new(&config());
        let req = TestRequest::get()
            .uri("/api/v1/drivers/active")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_srv_request();
        req.extensions_mut()
            .insert(AuthenticatedIdentity::new("bob", ["ROLE_USER"]));

        assert!(authenticate_request(&req, &authenticator));
        assert!(authenticate_request(&req, &authenticator));

        let extensions = req.extensions();
        let identity = extensions.get::<AuthenticatedIdentity>().unwrap();
        assert_eq!(identity.username, "bob");
    }

    #[test]
    fn test_refresh_token_is_ignored() {
        let token = TokenIssuer::new(&config()).issue_refresh_token("alice").unwrap();
        let authenticator = TokenAuthenticator::new(&config());
        let req = TestRequest::get()
            .uri("/api/v1/users/profile")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_srv_request();

        assert!(!authenticate_request(&req, &authenticator));
        assert!(req.extensions().get::<AuthenticatedIdentity>().is_none());
    }

    #[test]
    fn test_public_path_and_preflight_are_skipped() {
        let token = TokenIssuer::new(&config())
            .issue_access_token("alice", ["ROLE_ADMIN"])
            .unwrap();
        let authenticator = TokenAuthenticator::new(&config());

        let public = TestRequest::get()
            .uri("/api/v1/test/public")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_srv_request();
        assert!(!authenticate_request(&public, &authenticator));

        let preflight = TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/v1/drivers")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_srv_request();
        assert!(!authenticate_request(&preflight, &authenticator));
    }
}
