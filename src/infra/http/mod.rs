pub mod error;
mod extract;
mod handlers;
pub mod middleware;
pub mod models;
pub mod rate_limit;
mod state;

pub use rate_limit::PublicRateLimiter;
pub use state::HttpState;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware as axum_middleware};

use crate::application::error::ErrorReport;
use crate::application::repos::RepoError;

use handlers::{admin, public};
use middleware::{log_responses, rate_limit_public, require_admin, set_request_context};
use models::HealthResponse;

pub fn build_router(state: HttpState) -> Router {
    let rate_limited = Router::new()
        .route("/api/admin/login", post(public::admin_login))
        .route("/api/newsletter/subscribe", post(public::subscribe))
        .route("/api/contact", post(public::contact))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit_public,
        ));

    let admin_routes = Router::new()
        .route("/api/admin/posts", get(admin::list_posts))
        .route(
            "/api/admin/posts/{id}",
            get(admin::get_post)
                .put(admin::update_post)
                .delete(admin::delete_post),
        )
        .route("/api/upload/mdx", post(admin::import_posts))
        .route("/api/admin/messages", get(admin::list_messages))
        .route(
            "/api/admin/messages/{id}/read",
            post(admin::mark_message_read),
        )
        .route("/api/admin/subscribers", get(admin::list_subscribers))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    // `POST /api/posts` shares its path with the public listing, so the
    // admin gate is attached to that method only.
    let posts = get(public::list_posts).merge(post(admin::create_post).route_layer(
        axum_middleware::from_fn_with_state(state.clone(), require_admin),
    ));

    Router::new()
        .route("/api/categories", get(public::list_categories))
        .route("/api/posts", posts)
        .route("/api/posts/featured", get(public::featured_posts))
        .route("/api/posts/recent", get(public::recent_posts))
        .route("/api/posts/related", get(public::related_posts))
        .route("/api/posts/slug/{slug}", get(public::post_by_slug))
        .route("/api/search-suggestions", get(public::search_suggestions))
        .route("/_health", get(health))
        .merge(rate_limited)
        .merge(admin_routes)
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn health(State(state): State<HttpState>) -> Response {
    health_response(state.health.ping().await)
}

fn health_response(result: Result<(), RepoError>) -> Response {
    match result {
        Ok(()) => Json(HealthResponse { status: "ok" }).into_response(),
        Err(err) => {
            let mut response = (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                }),
            )
                .into_response();
            ErrorReport::from_error("infra::http::health", StatusCode::SERVICE_UNAVAILABLE, &err)
                .attach(&mut response);
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_failure_is_service_unavailable_with_report() {
        let response = health_response(Err(RepoError::Timeout));

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.extensions().get::<ErrorReport>().is_some());
    }
}
