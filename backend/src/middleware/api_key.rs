//! Shared-secret API key check.
//!
//! Wrapped around the record scopes only; the welcome and health endpoints
//! stay public. Requests must carry the configured key in `X-API-Key`.
//! Without a configured key the guard lets everything through.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error as ActixError, ResponseError};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::Error;
use crate::settings::ApiKey;

/// Request header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Message returned when the key is absent or wrong.
pub const INVALID_API_KEY: &str = "Invalid or missing API key";

/// Middleware rejecting requests without the expected API key.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use carlot::middleware::ApiKeyGuard;
/// use carlot::settings::ApiKey;
///
/// let app = App::new().service(
///     web::scope("/api/cars").wrap(ApiKeyGuard::new(Some(ApiKey::new("s3cret")))),
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct ApiKeyGuard {
    key: Option<Rc<ApiKey>>,
}

impl ApiKeyGuard {
    /// Guard checking against `key`; `None` disables the check.
    pub fn new(key: Option<ApiKey>) -> Self {
        Self {
            key: key.map(Rc::new),
        }
    }

    /// Whether requests are being checked.
    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = ApiKeyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddleware {
            service,
            key: self.key.clone(),
        }))
    }
}

/// Service wrapper produced by [`ApiKeyGuard`].
pub struct ApiKeyMiddleware<S> {
    service: S,
    key: Option<Rc<ApiKey>>,
}

impl<S> ApiKeyMiddleware<S> {
    fn admits(&self, req: &ServiceRequest) -> bool {
        let Some(key) = self.key.as_deref() else {
            return true;
        };
        req.headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|candidate| key.matches(candidate))
    }
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !self.admits(&req) {
            debug!(path = req.path(), "rejected request without valid API key");
            let response = Error::unauthorized(INVALID_API_KEY).error_response();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;
    use serde_json::Value;

    async fn status_for(guard: ApiKeyGuard, header: Option<&str>) -> (StatusCode, Option<Value>) {
        let app = test::init_service(
            App::new().service(
                web::scope("/api/cars")
                    .wrap(guard)
                    .route("", web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;
        let mut req = test::TestRequest::get().uri("/api/cars");
        if let Some(value) = header {
            req = req.insert_header((API_KEY_HEADER, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        (status, serde_json::from_slice(&body).ok())
    }

    #[rstest]
    #[case(Some("s3cret"), StatusCode::OK)]
    #[case(Some("wrong"), StatusCode::UNAUTHORIZED)]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn enforces_configured_key(#[case] header: Option<&str>, #[case] expected: StatusCode) {
        let (status, _) = status_for(ApiKeyGuard::new(Some(ApiKey::new("s3cret"))), header).await;
        assert_eq!(status, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn rejection_uses_error_envelope() {
        let (_, body) = status_for(ApiKeyGuard::new(Some(ApiKey::new("s3cret"))), None).await;
        let body = body.expect("json envelope");
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["message"], INVALID_API_KEY);
    }

    #[rstest]
    #[actix_web::test]
    async fn disabled_guard_admits_everything() {
        let guard = ApiKeyGuard::new(None);
        assert!(!guard.is_enabled());
        let (status, _) = status_for(guard, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
