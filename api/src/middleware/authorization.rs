//! Per-route authorization.
//!
//! Every non-public request needs an identity attached by
//! [`JwtAuthentication`](super::JwtAuthentication). Routes listed in the
//! [`RouteTable`] additionally need at least one of their authorities.
//! Missing identity answers 401, a missing authority answers 403.

use actix_web::{
    body::EitherBody,
    dev::{ResourceDef, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use om_core::domain::entities::authorities::{ROLE_ADMIN, ROLE_MODERATOR, ROLE_USER};
use om_core::domain::entities::AuthenticatedIdentity;
use om_shared::{error_codes, ErrorResponse};

use super::public_paths::is_public_path;

const ANY_ROLE: &[&str] = &[ROLE_USER, ROLE_ADMIN, ROLE_MODERATOR];
const STAFF: &[&str] = &[ROLE_ADMIN, ROLE_MODERATOR];
const ADMIN_ONLY: &[&str] = &[ROLE_ADMIN];

/// (method, path pattern, any-of authorities)
const ROUTE_RULES: &[(&str, &str, &[&str])] = &[
    ("POST", "/api/v1/order-management/orders", ANY_ROLE),
    ("GET", "/api/v1/order-management/orders/number/{number}", ANY_ROLE),
    ("POST", "/api/v1/order-management/orders/list", ANY_ROLE),
    ("GET", "/api/v1/order-management/orders/{id}", ANY_ROLE),
    ("PATCH", "/api/v1/order-management/orders/{id}/status", STAFF),
    ("POST", "/api/v1/order-management/orders/{id}/assign-driver", STAFF),
    ("GET", "/api/v1/order-management/drivers/{id}/orders", ANY_ROLE),
    ("GET", "/api/v1/order-statuses", ANY_ROLE),
    ("POST", "/api/v1/drivers", STAFF),
    ("GET", "/api/v1/drivers/active", ANY_ROLE),
    ("GET", "/api/v1/drivers/search", ANY_ROLE),
    ("GET", "/api/v1/drivers/name/{name}", ANY_ROLE),
    ("GET", "/api/v1/drivers/{id}", ANY_ROLE),
    ("PATCH", "/api/v1/drivers/{id}/status", STAFF),
    ("POST", "/api/v1/attachments/upload/order/{id}", STAFF),
    ("GET", "/api/v1/attachments/types", ANY_ROLE),
    ("GET", "/api/v1/users/profile", ANY_ROLE),
    ("GET", "/api/v1/test/auth", ANY_ROLE),
    ("GET", "/api/v1/management/system/info", ADMIN_ONLY),
];

struct RouteRule {
    method: Method,
    resource: ResourceDef,
    required: &'static [&'static str],
}

/// Required authorities per (method, route)
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl Default for RouteTable {
    fn default() -> Self {
        let rules = ROUTE_RULES
            .iter()
            .filter_map(|(method, pattern, required)| {
                Method::from_bytes(method.as_bytes()).ok().map(|method| RouteRule {
                    method,
                    resource: ResourceDef::new(*pattern),
                    required: *required,
                })
            })
            .collect();
        Self { rules }
    }
}

impl RouteTable {
    /// Authorities of the first rule matching the request, if any
    pub fn required_authorities(&self, method: &Method, path: &str) -> Option<&'static [&'static str]> {
        self.rules
            .iter()
            .find(|rule| rule.method == *method && rule.resource.is_match(path))
            .map(|rule| rule.required)
    }
}

/// Outcome of checking one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Unauthenticated,
    Forbidden,
}

impl RouteTable {
    pub fn decide(
        &self,
        method: &Method,
        path: &str,
        identity: Option<&AuthenticatedIdentity>,
    ) -> AccessDecision {
        if *method == Method::OPTIONS || is_public_path(path) {
            return AccessDecision::Allow;
        }

        let Some(identity) = identity else {
            return AccessDecision::Unauthenticated;
        };

        match self.required_authorities(method, path) {
            Some(required) if !identity.has_any_authority(required) => AccessDecision::Forbidden,
            _ => AccessDecision::Allow,
        }
    }
}

/// Authorization middleware factory
#[derive(Clone)]
pub struct RouteAuthorization {
    table: Arc<RouteTable>,
}

impl RouteAuthorization {
    pub fn new() -> Self {
        Self::with_table(RouteTable::default())
    }

    pub fn with_table(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

impl Default for RouteAuthorization {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteAuthorization
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteAuthorizationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteAuthorizationMiddleware {
            service: Rc::new(service),
            table: Arc::clone(&self.table),
        }))
    }
}

/// Authorization middleware service
pub struct RouteAuthorizationMiddleware<S> {
    service: Rc<S>,
    table: Arc<RouteTable>,
}

impl<S, B> Service<ServiceRequest> for RouteAuthorizationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = {
            let extensions = req.extensions();
            self.table
                .decide(req.method(), req.path(), extensions.get::<AuthenticatedIdentity>())
        };

        let rejection = match decision {
            AccessDecision::Allow => None,
            AccessDecision::Unauthenticated => {
                log::warn!("Unauthenticated request to {} {}", req.method(), req.path());
                Some(HttpResponse::Unauthorized().json(
                    ErrorResponse::new(error_codes::UNAUTHORIZED, "Authentication required")
                        .add_detail("path", req.path()),
                ))
            }
            AccessDecision::Forbidden => {
                log::warn!("Access denied for {} {}", req.method(), req.path());
                Some(HttpResponse::Forbidden().json(
                    ErrorResponse::new(error_codes::FORBIDDEN, "Insufficient permissions")
                        .add_detail("path", req.path()),
                ))
            }
        };

        if let Some(response) = rejection {
            let (request, _) = req.into_parts();
            let response = ServiceResponse::new(request, response).map_into_right_body();
            return Box::pin(async move { Ok(response) });
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move { service.call(req).await.map(|res| res.map_into_left_body()) })
    }
}
