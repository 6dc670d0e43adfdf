use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;

use crate::models::CurrentUser;
use crate::services::auth_service::{verify_token, JwtSettings};
use crate::utils::AppError;

/// Resolves the bearer token into a `CurrentUser` request extension.
/// Requests without a token pass through anonymously; a malformed or
/// invalid token is rejected with 401.
pub struct AuthMiddleware {
    settings: Rc<JwtSettings>,
}

impl AuthMiddleware {
    pub fn new(settings: JwtSettings) -> Self {
        AuthMiddleware {
            settings: Rc::new(settings),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            settings: self.settings.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    settings: Rc<JwtSettings>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = req
            .headers()
            .get("Authorization")
            .map(|value| value.to_str().unwrap_or_default().to_string());

        if let Some(header) = header {
            let Some(token) = header.strip_prefix("Bearer ") else {
                return Box::pin(async move {
                    Err(AppError::Unauthorized("Invalid token format".into()).into())
                });
            };
            match verify_token(token, &self.settings) {
                Ok(user) => {
                    log::debug!("🔐 Authenticated {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                Err(e) => {
                    log::warn!("⚠️ Rejected token on {}: {}", req.path(), e);
                    return Box::pin(async move { Err(e.into()) });
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}

/// Unwraps the caller resolved by `AuthMiddleware`; anonymous callers are
/// rejected.
pub fn require_user(user: Option<web::ReqData<CurrentUser>>) -> Result<CurrentUser, AppError> {
    user.map(|u| u.into_inner())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".into()))
}
