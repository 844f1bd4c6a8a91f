use std::error::Error as StdError;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::admin::inbox::AdminInboxError;
use crate::application::admin::posts::AdminPostError;
use crate::application::auth::AdminAuthError;
use crate::application::blog::BlogError;
use crate::application::contact::ContactError;
use crate::application::error::ErrorReport;
use crate::application::newsletter::NewsletterError;
use crate::application::repos::RepoError;
use crate::domain::error::DomainError;

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const NOT_FOUND: &str = "not_found";
    pub const CONFLICT: &str = "conflict";
    pub const RATE_LIMITED: &str = "rate_limited";
    pub const INTERNAL: &str = "internal_error";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
    /// Diagnostic chain for the logs. Never sent to the client.
    chain: Vec<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
            chain: Vec::new(),
        }
    }

    pub fn bad_request(message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, hint)
    }

    pub fn unauthorized(message: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, codes::UNAUTHORIZED, message, None)
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn conflict(message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::CONFLICT, codes::CONFLICT, message, hint)
    }

    pub fn internal(err: &dyn StdError) -> Self {
        let mut error = Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL,
            "Internal server error",
            None,
        );
        error.chain = ErrorReport::from_error("infra::http", error.status, err).messages;
        error
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn rate_limited(retry_after: u64) -> Response {
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: codes::RATE_LIMITED.to_string(),
                message: "Rate limit exceeded".to_string(),
                hint: Some(format!("Retry after {retry_after} seconds")),
            },
        };
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        ErrorReport::from_message(
            "infra::http::rate_limit",
            StatusCode::TOO_MANY_REQUESTS,
            format!("rate_limited: retry_after={retry_after}"),
        )
        .attach(&mut response);
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let report = if self.chain.is_empty() {
            ErrorReport::from_message(
                "infra::http",
                self.status,
                format!(
                    "{}: {}",
                    self.code,
                    self.hint.as_deref().unwrap_or(self.message)
                ),
            )
        } else {
            ErrorReport {
                source: "infra::http",
                status: self.status,
                messages: self.chain,
            }
        };

        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        report.attach(&mut response);
        response
    }
}

pub fn domain_to_api(err: DomainError) -> ApiError {
    ApiError::bad_request("Invalid input", Some(err.to_string()))
}

pub fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::NotFound => ApiError::not_found("Resource not found"),
        RepoError::Duplicate { constraint } => {
            ApiError::conflict("Duplicate record", Some(constraint))
        }
        RepoError::InvalidInput { message } => ApiError::bad_request("Invalid input", Some(message)),
        RepoError::Integrity { message } => {
            ApiError::conflict("Integrity constraint violated", Some(message))
        }
        other => ApiError::internal(&other),
    }
}

pub fn blog_to_api(err: BlogError) -> ApiError {
    match err {
        BlogError::Repo(err) => repo_to_api(err),
    }
}

pub fn admin_post_to_api(err: AdminPostError) -> ApiError {
    match err {
        AdminPostError::Invalid(err) => domain_to_api(err),
        err @ AdminPostError::InvalidDocument { .. } => {
            ApiError::bad_request("Invalid import document", Some(err.to_string()))
        }
        err @ AdminPostError::TooManyDocuments { .. } => {
            ApiError::bad_request("Too many documents", Some(err.to_string()))
        }
        AdminPostError::NotFound => ApiError::not_found("Post not found"),
        AdminPostError::Repo(err) => repo_to_api(err),
    }
}

pub fn inbox_to_api(err: AdminInboxError) -> ApiError {
    match err {
        AdminInboxError::NotFound => ApiError::not_found("Message not found"),
        AdminInboxError::Repo(err) => repo_to_api(err),
    }
}

pub fn newsletter_to_api(err: NewsletterError) -> ApiError {
    match err {
        NewsletterError::Invalid(err) => domain_to_api(err),
        NewsletterError::Repo(err) => repo_to_api(err),
    }
}

pub fn contact_to_api(err: ContactError) -> ApiError {
    match err {
        ContactError::Invalid(err) => domain_to_api(err),
        ContactError::Repo(err) => repo_to_api(err),
    }
}

pub fn auth_to_api(err: AdminAuthError) -> ApiError {
    match err {
        AdminAuthError::Disabled => ApiError::unauthorized("Admin access is disabled"),
        AdminAuthError::Missing => ApiError::unauthorized("Admin token required"),
        AdminAuthError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
        AdminAuthError::InvalidToken => ApiError::unauthorized("Invalid admin token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_map_to_client_or_server_status() {
        assert_eq!(
            repo_to_api(RepoError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            repo_to_api(RepoError::duplicate("posts_slug_key")).code(),
            codes::CONFLICT
        );
        assert_eq!(
            repo_to_api(RepoError::Timeout).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_keep_chain_in_report() {
        let response =
            ApiError::internal(&RepoError::from_persistence("pool closed")).into_response();

        let report = response
            .extensions()
            .get::<ErrorReport>()
            .expect("report attached");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(report.messages, vec!["persistence error: pool closed"]);
    }

    #[test]
    fn rate_limited_sets_retry_after() {
        let response = ApiError::rate_limited(30);

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response
                .headers()
                .get(header::RETRY_AFTER)
                .map(|v| v.as_bytes()),
            Some(&b"30"[..])
        );
    }
}
