use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metrics::{counter, histogram};
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::auth::AdminPrincipal;
use crate::application::error::ErrorReport;

use super::error::{ApiError, auth_to_api};
use super::state::HttpState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
const SHARED_CLIENT_KEY: &str = "shared";

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let ctx = RequestContext {
        request_id: request_id.clone(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response.extensions_mut().insert(ctx);
    response
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();
    histogram!("kabar_http_request_duration_ms").record(elapsed_ms as f64);

    if status.is_client_error() || status.is_server_error() {
        let report = response.extensions_mut().remove::<ErrorReport>();
        let (source, messages) = match report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "no diagnostic available".to_string());

        if status.is_server_error() {
            error!(
                target = "kabar::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "request failed",
            );
        } else {
            warn!(
                target = "kabar::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "client request error",
            );
        }
    }

    response
}

/// Reject requests without a valid admin bearer token and expose the
/// [`AdminPrincipal`] to handlers.
pub async fn require_admin(
    State(state): State<HttpState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let principal = match state.auth.authenticate(header) {
        Ok(principal) => principal,
        Err(err) => {
            warn!(
                target = "kabar::http::admin",
                path = %request.uri().path(),
                reason = %err,
                "admin request rejected"
            );
            return auth_to_api(err).into_response();
        }
    };

    request.extensions_mut().insert::<AdminPrincipal>(principal);
    next.run(request).await
}

pub async fn rate_limit_public(
    State(state): State<HttpState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let scope = request.uri().path().to_string();
    let client = client_key(request.headers());

    if !state.rate_limiter.allow(&client, &scope) {
        counter!("kabar_rate_limited_total", "scope" => scope.clone()).increment(1);
        warn!(
            target = "kabar::http::rate_limit",
            client = %client,
            scope = %scope,
            "rate limit exceeded"
        );
        return ApiError::rate_limited(state.rate_limiter.retry_after_secs());
    }

    next.run(request).await
}

/// First `x-forwarded-for` hop, or one bucket shared by every client that
/// sends none.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(SHARED_CLIENT_KEY)
        .to_string()
}
