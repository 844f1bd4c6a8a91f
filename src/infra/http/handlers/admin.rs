//! Handlers behind the admin bearer token.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::admin::posts::ImportDocument;
use crate::application::auth::AdminPrincipal;
use crate::domain::entities::PostRecord;

use crate::infra::http::error::{ApiError, admin_post_to_api, domain_to_api, inbox_to_api};
use crate::infra::http::extract::{ApiJson, ApiQuery};
use crate::infra::http::models::*;
use crate::infra::http::state::HttpState;

pub async fn create_post(
    State(state): State<HttpState>,
    Extension(principal): Extension<AdminPrincipal>,
    ApiJson(payload): ApiJson<PostWriteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = payload.into_command().map_err(domain_to_api)?;
    let post = state
        .admin_posts
        .create_post(&principal.username, command)
        .await
        .map_err(admin_post_to_api)?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn list_posts(
    State(state): State<HttpState>,
    ApiQuery(query): ApiQuery<AdminPostListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state
        .admin_posts
        .list_posts(query.into())
        .await
        .map_err(admin_post_to_api)?;
    Ok(Json(PostListResponse::from(listing)))
}

pub async fn get_post(
    State(state): State<HttpState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .admin_posts
        .load_post(id)
        .await
        .map_err(admin_post_to_api)?;
    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<HttpState>,
    Extension(principal): Extension<AdminPrincipal>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<PostWriteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = payload.into_command().map_err(domain_to_api)?;
    let post = state
        .admin_posts
        .update_post(&principal.username, id, command)
        .await
        .map_err(admin_post_to_api)?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<HttpState>,
    Extension(principal): Extension<AdminPrincipal>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .admin_posts
        .delete_post(&principal.username, id)
        .await
        .map_err(admin_post_to_api)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create or update posts from documents with YAML front matter. Responds
/// with the written posts in input order.
pub async fn import_posts(
    State(state): State<HttpState>,
    Extension(principal): Extension<AdminPrincipal>,
    ApiJson(payload): ApiJson<ImportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let documents: Vec<ImportDocument> = payload.files.into_iter().map(Into::into).collect();
    let imported = state
        .admin_posts
        .import_documents(&principal.username, documents)
        .await
        .map_err(admin_post_to_api)?;

    let posts: Vec<PostRecord> = imported.into_iter().map(|entry| entry.post).collect();
    Ok((StatusCode::CREATED, Json(posts)))
}

pub async fn list_messages(
    State(state): State<HttpState>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state.inbox.list_messages().await.map_err(inbox_to_api)?;
    Ok(Json(messages))
}

pub async fn mark_message_read(
    State(state): State<HttpState>,
    Extension(principal): Extension<AdminPrincipal>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state
        .inbox
        .mark_read(&principal.username, id)
        .await
        .map_err(inbox_to_api)?;
    Ok(Json(message))
}

pub async fn list_subscribers(
    State(state): State<HttpState>,
) -> Result<impl IntoResponse, ApiError> {
    let subscribers = state.inbox.list_subscribers().await.map_err(inbox_to_api)?;
    Ok(Json(subscribers))
}
