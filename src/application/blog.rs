//! Read side of the public blog.

use std::collections::HashMap;
use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::debug;

use crate::application::query::{
    self, DEFAULT_SUGGESTION_LIMIT, PageWindow, PostQuery, PostSort, QueryPage,
};
use crate::application::repos::{
    AuthorsRepo, CategoriesRepo, PostsRepo, PostsWriteRepo, RepoError,
};
use crate::domain::entities::{
    AuthorRecord, CategoryRecord, PostRecord, PostWithAuthor, PostWithRelations,
};

pub const LIST_DEFAULT_LIMIT: usize = 10;
pub const RECENT_DEFAULT_LIMIT: usize = 4;
pub const FEATURED_DEFAULT_LIMIT: usize = 3;
pub const RELATED_DEFAULT_LIMIT: usize = 3;
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Parsed listing request as it arrives from the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct ListPostsRequest {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    /// Category slug or display name.
    pub category: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: PostSort,
}

#[derive(Debug, Clone)]
pub struct PostListing {
    pub posts: Vec<PostWithAuthor>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

impl PostListing {
    pub(crate) fn from_page(page: QueryPage<PostWithAuthor>, window: PageWindow) -> Self {
        Self {
            total_pages: window.total_pages(page.total),
            current_page: window.page,
            total: page.total,
            posts: page.items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecentPosts {
    pub main_post: Option<PostWithAuthor>,
    pub recent_posts: Vec<PostWithAuthor>,
    pub total_pages: usize,
    pub current_page: usize,
}

#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostsRepo>,
    writer: Arc<dyn PostsWriteRepo>,
    authors: Arc<dyn AuthorsRepo>,
    categories: Arc<dyn CategoriesRepo>,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        writer: Arc<dyn PostsWriteRepo>,
        authors: Arc<dyn AuthorsRepo>,
        categories: Arc<dyn CategoriesRepo>,
    ) -> Self {
        Self {
            posts,
            writer,
            authors,
            categories,
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryRecord>, BlogError> {
        Ok(self.categories.list_categories().await?)
    }

    pub async fn list_posts(&self, request: ListPostsRequest) -> Result<PostListing, BlogError> {
        let window = PageWindow::new(request.page, request.limit, LIST_DEFAULT_LIMIT, MAX_LIMIT);
        let categories = self.categories.list_categories().await?;

        let category_id = match non_blank(request.category.as_deref()) {
            Some(value) => match resolve_category_in(categories.clone(), value) {
                Some(category) => Some(category.id),
                None => {
                    debug!(
                        target = "kabar::application::blog",
                        category = value,
                        "unknown category filter"
                    );
                    return Ok(PostListing::from_page(QueryPage::empty(), window));
                }
            },
            None => None,
        };

        let query = window.apply(PostQuery {
            category_id,
            search: request.search,
            tag: request.tag,
            sort: request.sort,
            ..PostQuery::published()
        });

        let posts = self.posts.list_posts().await?;
        let joiner = Joiner::new(self.authors.list_authors().await?, categories);
        let page = query::query_posts(&posts, &query).map(|post| joiner.join(post));

        Ok(PostListing::from_page(page, window))
    }

    pub async fn featured_posts(&self, limit: Option<usize>) -> Result<Vec<PostWithAuthor>, BlogError> {
        let limit = clamp_limit(limit, FEATURED_DEFAULT_LIMIT);
        let posts = self.posts.list_posts().await?;
        let featured = query::featured_posts(&posts, &PostQuery::published(), limit);

        let joiner = self.joiner().await?;
        Ok(featured.into_iter().map(|post| joiner.join(post)).collect())
    }

    pub async fn recent_posts(
        &self,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> Result<RecentPosts, BlogError> {
        let window = PageWindow::new(page, limit, RECENT_DEFAULT_LIMIT, MAX_LIMIT);
        let posts = self.posts.list_posts().await?;
        let recent = query::recent_posts(&posts, &PostQuery::published(), window);

        let joiner = self.joiner().await?;
        Ok(RecentPosts {
            main_post: recent.main_post.map(|post| joiner.join(post)),
            recent_posts: recent
                .recent_posts
                .into_iter()
                .map(|post| joiner.join(post))
                .collect(),
            total_pages: recent.total_pages,
            current_page: recent.current_page,
        })
    }

    pub async fn related_posts(
        &self,
        category_id: i32,
        post_id: i32,
        limit: Option<usize>,
    ) -> Result<Vec<PostWithAuthor>, BlogError> {
        let limit = clamp_limit(limit, RELATED_DEFAULT_LIMIT);
        let posts = self.posts.list_posts().await?;
        let joiner = self.joiner().await?;
        Ok(related_in(&posts, &joiner, category_id, post_id, limit))
    }

    /// Published post by slug with its related posts. Each successful lookup
    /// counts as one view.
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<PostWithRelations>, BlogError> {
        let Some(mut post) = self.posts.find_post_by_slug(slug).await? else {
            return Ok(None);
        };
        if !post.published {
            return Ok(None);
        }

        post.views = self.writer.increment_views(post.id).await?;
        counter!("kabar_post_views_total").increment(1);

        let posts = self.posts.list_posts().await?;
        let joiner = self.joiner().await?;
        let related_posts = related_in(
            &posts,
            &joiner,
            post.category_id,
            post.id,
            RELATED_DEFAULT_LIMIT,
        );

        Ok(Some(PostWithRelations {
            post: joiner.join(&post),
            related_posts,
        }))
    }

    pub async fn search_suggestions(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<String>, BlogError> {
        if query.trim().chars().count() < query::MIN_SUGGESTION_QUERY_CHARS {
            return Ok(Vec::new());
        }
        let limit = clamp_limit(limit, DEFAULT_SUGGESTION_LIMIT);
        let posts = self.posts.list_posts().await?;
        let published = PostQuery::published();
        let visible: Vec<&PostRecord> = posts.iter().filter(|post| published.matches(post)).collect();

        Ok(query::search_suggestions(visible.iter().copied(), query, limit))
    }

    async fn joiner(&self) -> Result<Joiner, BlogError> {
        let authors = self.authors.list_authors().await?;
        let categories = self.categories.list_categories().await?;
        Ok(Joiner::new(authors, categories))
    }
}

fn related_in(
    posts: &[PostRecord],
    joiner: &Joiner,
    category_id: i32,
    post_id: i32,
    limit: usize,
) -> Vec<PostWithAuthor> {
    query::related_posts(posts, &PostQuery::published(), category_id, post_id, limit)
        .into_iter()
        .map(|post| joiner.join(post))
        .collect()
}

/// Find a category by slug first, then by display name; both compare
/// case-insensitively.
pub(crate) fn resolve_category_in(
    categories: Vec<CategoryRecord>,
    value: &str,
) -> Option<CategoryRecord> {
    let needle = value.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let by_slug = categories
        .iter()
        .position(|category| category.slug.to_lowercase() == needle);
    let index = by_slug.or_else(|| {
        categories
            .iter()
            .position(|category| category.name.to_lowercase() == needle)
    })?;
    categories.into_iter().nth(index)
}

pub(crate) fn clamp_limit(limit: Option<usize>, default: usize) -> usize {
    limit
        .filter(|limit| *limit > 0)
        .unwrap_or(default)
        .min(MAX_LIMIT)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Lookup tables for enriching posts with their author and category.
pub(crate) struct Joiner {
    authors: HashMap<i32, AuthorRecord>,
    categories: HashMap<i32, CategoryRecord>,
}

impl Joiner {
    pub(crate) fn new(authors: Vec<AuthorRecord>, categories: Vec<CategoryRecord>) -> Self {
        Self {
            authors: authors.into_iter().map(|author| (author.id, author)).collect(),
            categories: categories
                .into_iter()
                .map(|category| (category.id, category))
                .collect(),
        }
    }

    pub(crate) fn join(&self, post: &PostRecord) -> PostWithAuthor {
        PostWithAuthor {
            author: self.authors.get(&post.author_id).cloned(),
            category: self.categories.get(&post.category_id).cloned(),
            post: post.clone(),
        }
    }
}
