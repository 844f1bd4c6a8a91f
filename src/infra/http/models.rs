use serde::{Deserialize, Serialize};

use crate::application::admin::posts::{AdminListPostsRequest, ImportDocument, PostCommand};
use crate::application::blog::{ListPostsRequest, PostListing, RecentPosts};
use crate::application::query::PostSort;
use crate::domain::entities::{ContactMessageRecord, PostWithAuthor, SubscriberRecord};
use crate::domain::error::DomainError;

// ----- Query strings -----

#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub tag: Option<String>,
}

impl From<PostListQuery> for ListPostsRequest {
    fn from(query: PostListQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            category: query.category,
            search: query.search,
            tag: query.tag,
            sort: parse_sort(query.sort.as_deref()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminPostListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub tag: Option<String>,
    pub published: Option<bool>,
}

impl From<AdminPostListQuery> for AdminListPostsRequest {
    fn from(query: AdminPostListQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            category: query.category,
            search: query.search,
            tag: query.tag,
            sort: parse_sort(query.sort.as_deref()),
            published: query.published,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedQuery {
    pub category_id: Option<i32>,
    pub post_id: Option<i32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

fn parse_sort(value: Option<&str>) -> PostSort {
    value.map(PostSort::parse).unwrap_or_default()
}

// ----- Request bodies -----

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubscribeRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostWriteRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    pub reading_time: Option<i32>,
    pub published: Option<bool>,
    pub featured: bool,
    pub tags: Vec<String>,
    pub category_id: Option<i32>,
    pub author_id: Option<i32>,
}

impl PostWriteRequest {
    pub fn into_command(self) -> Result<PostCommand, DomainError> {
        let category_id = self
            .category_id
            .ok_or_else(|| DomainError::validation("categoryId", "is required"))?;

        Ok(PostCommand {
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            thumbnail: self.thumbnail,
            reading_time: self.reading_time,
            published: self.published,
            featured: self.featured,
            tags: self.tags,
            category_id,
            author_id: self.author_id,
        })
    }
}

/// Body of the batch document import. `files` is required.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub files: Vec<ImportFileRequest>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImportFileRequest {
    pub filename: String,
    pub content: String,
}

impl From<ImportFileRequest> for ImportDocument {
    fn from(file: ImportFileRequest) -> Self {
        Self {
            filename: file.filename,
            content: file.content,
        }
    }
}

// ----- Responses -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<PostWithAuthor>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

impl From<PostListing> for PostListResponse {
    fn from(listing: PostListing) -> Self {
        Self {
            posts: listing.posts,
            total: listing.total,
            total_pages: listing.total_pages,
            current_page: listing.current_page,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPostsResponse {
    pub main_post: Option<PostWithAuthor>,
    pub recent_posts: Vec<PostWithAuthor>,
    pub total_pages: usize,
    pub current_page: usize,
}

impl From<RecentPosts> for RecentPostsResponse {
    fn from(recent: RecentPosts) -> Self {
        Self {
            main_post: recent.main_post,
            recent_posts: recent.recent_posts,
            total_pages: recent.total_pages,
            current_page: recent.current_page,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: &'static str,
    pub subscriber: SubscriberRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub message: &'static str,
    pub contact_message: ContactMessageRecord,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
