use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{error::ErrorUnauthorized, http::header, Error, HttpMessage};
use futures::future::LocalBoxFuture;

use crate::auth::admin_jwt::verify_admin_jwt;
use crate::auth::config::{AdminJwtConfig, FirebaseAuthConfig};
use crate::auth::firebase::verify_firebase_token;
use crate::auth::jwks::JwksCache;
use crate::auth::Principal;
use crate::db::UserOperations;

const PUBLIC_PATHS: &[&str] = &["/", "/health", "/admin-login", "/api-docs/openapi.json"];
const PUBLIC_READS: &[&str] = &["/menu", "/dish-votes"];

fn is_public(method: &Method, path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || (method == Method::GET && PUBLIC_READS.contains(&path))
}

/// Reads `?as=user-{id}` / `?as=admin-{id}`. Anything else falls back to user 1.
fn dev_principal(query: &str) -> Principal {
    let as_param = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == "as")
        .map(|(_, v)| v);

    if let Some(admin_id) = as_param.and_then(|v| v.strip_prefix("admin-")) {
        if !admin_id.is_empty() {
            return Principal::Admin {
                admin_id: admin_id.to_string(),
            };
        }
    }
    let user_id = as_param
        .and_then(|v| v.strip_prefix("user-"))
        .and_then(|id| id.parse::<i32>().ok())
        .unwrap_or(1);
    Principal::User {
        user_id,
        firebase_uid: format!("dev-{user_id}"),
        email: None,
    }
}

#[derive(Clone)]
pub struct AuthLayer {
    firebase_cfg: FirebaseAuthConfig,
    admin_cfg: AdminJwtConfig,
    jwks: JwksCache,
    user_ops: UserOperations,
    dev_bypass_token: Option<String>,
}

impl AuthLayer {
    pub fn new(
        firebase_cfg: FirebaseAuthConfig,
        admin_cfg: AdminJwtConfig,
        jwks: JwksCache,
        user_ops: UserOperations,
        dev_bypass_token: Option<String>,
    ) -> Self {
        if dev_bypass_token.is_some() {
            warn!("DEV_BYPASS_TOKEN is set; `?as=` impersonation is enabled");
        }
        Self {
            firebase_cfg,
            admin_cfg,
            jwks,
            user_ops,
            dev_bypass_token,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public(req.method(), req.path()) {
            let fut = self.service.call(req);
            #[allow(clippy::redundant_async_block)]
            return Box::pin(async move { fut.await });
        }

        let token = match req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(t) => t.to_string(),
            None => {
                return Box::pin(async { Err(ErrorUnauthorized("missing or invalid auth header")) })
            }
        };

        if self.inner.dev_bypass_token.as_deref() == Some(token.as_str()) {
            let principal = dev_principal(req.query_string());
            debug!("dev bypass as {:?}", principal);
            req.extensions_mut().insert(principal);
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await });
        }

        let inner = self.inner.clone();
        let srv = self.service.clone();
        Box::pin(async move {
            // 1) Try admin JWT
            if let Ok(admin_id) = verify_admin_jwt(&token, &inner.admin_cfg) {
                req.extensions_mut().insert(Principal::Admin { admin_id });
                return srv.call(req).await;
            }

            // 2) Try Firebase token
            match verify_firebase_token(&token, &inner.firebase_cfg, &inner.jwks).await {
                Ok(v) => {
                    let uid = v.uid.clone();
                    let email = v.email.clone();
                    let display = v.display_name.clone();

                    let user_ops = inner.user_ops.clone();
                    let uid_for_principal = uid.clone();
                    let email_for_principal = email.clone();
                    let upsert_res = actix_web::web::block(move || {
                        user_ops.upsert_firebase_user(uid, email, display)
                    })
                    .await;

                    match upsert_res {
                        Ok(Ok(user)) => {
                            req.extensions_mut().insert(Principal::User {
                                user_id: user.user_id,
                                firebase_uid: uid_for_principal,
                                email: email_for_principal,
                            });
                            srv.call(req).await
                        }
                        Ok(Err(e)) => {
                            error!("auth: user upsert failed: {}", e);
                            Err(ErrorUnauthorized("user upsert failed"))
                        }
                        Err(e) => {
                            error!("auth: blocking upsert task failed: {}", e);
                            Err(ErrorUnauthorized("user upsert failed"))
                        }
                    }
                }
                Err(e) => {
                    debug!("auth: token rejected: {}", e);
                    Err(ErrorUnauthorized("unauthorized"))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_principal_parses_roles() {
        match dev_principal("as=admin-cafe") {
            Principal::Admin { admin_id } => assert_eq!(admin_id, "cafe"),
            other => panic!("expected admin, got {other:?}"),
        }
        match dev_principal("status=Pending&as=user-7") {
            Principal::User { user_id, .. } => assert_eq!(user_id, 7),
            other => panic!("expected user, got {other:?}"),
        }
        match dev_principal("as=garbage") {
            Principal::User { user_id, .. } => assert_eq!(user_id, 1),
            other => panic!("expected user, got {other:?}"),
        }
    }

    #[test]
    fn public_routes() {
        assert!(is_public(&Method::GET, "/menu"));
        assert!(is_public(&Method::POST, "/admin-login"));
        assert!(!is_public(&Method::POST, "/menu"));
        assert!(!is_public(&Method::GET, "/orders/mine"));
    }
}
