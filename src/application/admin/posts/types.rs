use thiserror::Error;

use crate::application::query::PostSort;
use crate::application::repos::RepoError;
use crate::domain::entities::PostRecord;
use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum AdminPostError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("document `{filename}` is invalid: {source}")]
    InvalidDocument {
        filename: String,
        #[source]
        source: DomainError,
    },
    #[error("an import accepts at most {max} documents, got {count}")]
    TooManyDocuments { max: usize, count: usize },
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for AdminPostError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            other => Self::Repo(other),
        }
    }
}

/// Authoring input shared by create and update. The slug is always derived
/// from `title`.
#[derive(Debug, Clone, Default)]
pub struct PostCommand {
    pub title: String,
    pub content: String,
    /// Derived from `content` when absent or blank.
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    pub reading_time: Option<i32>,
    /// Defaults to `true`.
    pub published: Option<bool>,
    pub featured: bool,
    pub tags: Vec<String>,
    pub category_id: i32,
    /// Defaults to the configured author.
    pub author_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct AdminListPostsRequest {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: PostSort,
    /// `None` lists drafts and published posts together.
    pub published: Option<bool>,
}

/// One file of a batch import: YAML front matter followed by the post body.
#[derive(Debug, Clone, Default)]
pub struct ImportDocument {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedPost {
    pub outcome: ImportOutcome,
    pub post: PostRecord,
}
