//! Public read and write handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::contact::ContactCommand;
use crate::application::newsletter::{SubscribeCommand, SubscribeOutcome};

use crate::infra::http::error::{
    ApiError, auth_to_api, blog_to_api, contact_to_api, newsletter_to_api,
};
use crate::infra::http::extract::{ApiJson, ApiQuery};
use crate::infra::http::models::*;
use crate::infra::http::state::HttpState;

pub async fn list_categories(
    State(state): State<HttpState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.blog.list_categories().await.map_err(blog_to_api)?;
    Ok(Json(categories))
}

pub async fn list_posts(
    State(state): State<HttpState>,
    ApiQuery(query): ApiQuery<PostListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state
        .blog
        .list_posts(query.into())
        .await
        .map_err(blog_to_api)?;
    Ok(Json(PostListResponse::from(listing)))
}

pub async fn featured_posts(
    State(state): State<HttpState>,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state
        .blog
        .featured_posts(query.limit)
        .await
        .map_err(blog_to_api)?;
    Ok(Json(posts))
}

pub async fn recent_posts(
    State(state): State<HttpState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let recent = state
        .blog
        .recent_posts(query.page, query.limit)
        .await
        .map_err(blog_to_api)?;
    Ok(Json(RecentPostsResponse::from(recent)))
}

pub async fn related_posts(
    State(state): State<HttpState>,
    ApiQuery(query): ApiQuery<RelatedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(category_id), Some(post_id)) = (query.category_id, query.post_id) else {
        return Err(ApiError::bad_request(
            "Invalid categoryId or postId",
            Some("both categoryId and postId are required".to_string()),
        ));
    };

    let posts = state
        .blog
        .related_posts(category_id, post_id, query.limit)
        .await
        .map_err(blog_to_api)?;
    Ok(Json(posts))
}

pub async fn post_by_slug(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state.blog.post_by_slug(&slug).await.map_err(blog_to_api)? {
        Some(post) => Ok(Json(post)),
        None => Err(ApiError::not_found("Post not found")),
    }
}

pub async fn search_suggestions(
    State(state): State<HttpState>,
    ApiQuery(query): ApiQuery<SuggestionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let suggestions = state
        .blog
        .search_suggestions(query.q.as_deref().unwrap_or(""), query.limit)
        .await
        .map_err(blog_to_api)?;
    Ok(Json(suggestions))
}

pub async fn subscribe(
    State(state): State<HttpState>,
    ApiJson(payload): ApiJson<SubscribeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .newsletter
        .subscribe(SubscribeCommand {
            name: payload.name,
            email: payload.email,
        })
        .await
        .map_err(newsletter_to_api)?;

    let (status, message) = match &outcome {
        SubscribeOutcome::Subscribed(_) | SubscribeOutcome::Reactivated(_) => (
            StatusCode::CREATED,
            "Successfully subscribed to newsletter",
        ),
        SubscribeOutcome::AlreadySubscribed(_) => (
            StatusCode::OK,
            "You are already subscribed to our newsletter",
        ),
    };

    Ok((
        status,
        Json(SubscribeResponse {
            message,
            subscriber: outcome.subscriber().clone(),
        }),
    ))
}

pub async fn contact(
    State(state): State<HttpState>,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .contact
        .submit(ContactCommand {
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
        })
        .await
        .map_err(contact_to_api)?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Message sent successfully",
            contact_message: record,
        }),
    ))
}

pub async fn admin_login(
    State(state): State<HttpState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .auth
        .login(&payload.username, &payload.password)
        .map_err(auth_to_api)?;

    Ok(Json(LoginResponse {
        token: session.token,
        username: session.username,
    }))
}
