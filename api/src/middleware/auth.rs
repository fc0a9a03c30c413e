//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware reads the Authorization header, runs it through the
//! revocation-aware token validator, and injects the caller's identity into
//! the request extensions. It never rejects a request on its own: handlers
//! that need an identity take an [`AuthContext`], which answers 401 when none
//! was established. The one exception is an unavailable revocation store,
//! which is answered with 503 straight away.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use inno_core::{
    domain::entities::token::Principal,
    errors::{AuthError, DomainError, DomainResult},
    repositories::{RevocationStore, UserRepository},
    services::token::{extract_bearer_token, TokenValidator},
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use tracing::debug;

use crate::handlers::error::{handle_domain_error, ApiError};

/// Identity of an authenticated caller, injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Token subject (user email)
    pub subject: String,
    /// Role carried by the access token
    pub role: Option<String>,
    /// The raw access token the caller presented
    pub token: String,
}

impl AuthContext {
    pub fn new(principal: Principal, token: impl Into<String>) -> Self {
        Self {
            subject: principal.subject,
            role: principal.role,
            token: token.into(),
        }
    }
}

/// Object-safe view of the token validator used by the middleware
///
/// Registered in app data as `web::Data<dyn RequestAuthenticator>` so the
/// middleware does not need to know the revocation store type.
#[async_trait]
pub trait RequestAuthenticator: Send + Sync {
    /// Validates the access token in an Authorization header value
    async fn authenticate(&self, header: Option<&str>) -> DomainResult<Principal>;
}

#[async_trait]
impl<R, U> RequestAuthenticator for TokenValidator<R, U>
where
    R: RevocationStore + 'static,
    U: UserRepository + 'static,
{
    async fn authenticate(&self, header: Option<&str>) -> DomainResult<Principal> {
        TokenValidator::authenticate(self, header).await
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            // A header that is not valid ASCII is treated as malformed
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .map(|value| value.to_str().unwrap_or_default().to_owned());

            if let Some(header) = header {
                let authenticator = req
                    .app_data::<web::Data<dyn RequestAuthenticator>>()
                    .cloned();

                match authenticator {
                    Some(authenticator) => {
                        match authenticator.authenticate(Some(header.as_str())).await {
                            Ok(principal) => {
                                let token = extract_bearer_token(Some(header.as_str()))
                                    .unwrap_or_default()
                                    .to_owned();
                                req.extensions_mut()
                                    .insert(AuthContext::new(principal, token));
                            }
                            Err(error @ DomainError::StoreUnavailable { .. }) => {
                                let response = handle_domain_error(&error);
                                return Ok(req.into_response(response).map_into_right_body());
                            }
                            Err(error) => {
                                debug!(error = %error, "Request continues without identity");
                            }
                        }
                    }
                    None => {
                        let response = handle_domain_error(&DomainError::Internal {
                            message: "Request authenticator is not configured".to_string(),
                        });
                        return Ok(req.into_response(response).map_into_right_body());
                    }
                }
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| Error::from(ApiError::from(DomainError::from(AuthError::Unauthenticated))));

        ready(result)
    }
}
