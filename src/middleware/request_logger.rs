//! Access log middleware.
//!
//! Every request gets a fresh id, returned in the `x-request-id` header and attached to a
//! tracing span so the service logs emitted while handling it can be correlated. The
//! completion line is logged at a level chosen by the response status.

use std::future::{Ready, ready};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use futures_util::future::LocalBoxFuture;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

/// Whether the caller presented a bearer token. The token itself never reaches the logs.
fn auth_kind(req: &ServiceRequest) -> &'static str {
    let has_bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    if has_bearer { "bearer" } else { "none" }
}

fn log_completion(status: StatusCode, elapsed_ms: u128, error: Option<String>) {
    let code = status.as_u16();
    if status.is_server_error() {
        error!(target: "api", status = code, duration_ms = elapsed_ms, error = ?error, "request failed");
    } else if status.is_client_error() {
        warn!(target: "api", status = code, duration_ms = elapsed_ms, error = ?error, "request rejected");
    } else {
        info!(target: "api", status = code, duration_ms = elapsed_ms, "request completed");
    }
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
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
        let started = Instant::now();
        let request_id = Uuid::new_v4().to_string();

        let span = info_span!(
            target: "api",
            "http",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );
        span.in_scope(|| {
            info!(
                target: "api",
                remote_addr = req.connection_info().realip_remote_addr().unwrap_or("unknown"),
                auth = auth_kind(&req),
                "request received"
            );
        });

        let fut = self.service.call(req);

        Box::pin(
            async move {
                let mut res = fut.await?;

                let error = res.response().error().map(|e| e.to_string());
                log_completion(res.status(), started.elapsed().as_millis(), error);

                if let Ok(value) = HeaderValue::from_str(&request_id) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}
