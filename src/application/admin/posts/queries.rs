use crate::application::blog::{Joiner, MAX_LIMIT, PostListing, resolve_category_in};
use crate::application::query::{self, PageWindow, PostQuery, QueryPage};
use crate::domain::entities::PostRecord;

use super::service::AdminPostService;
use super::types::{AdminListPostsRequest, AdminPostError};

pub const ADMIN_DEFAULT_LIMIT: usize = 20;

impl AdminPostService {
    pub async fn list_posts(
        &self,
        request: AdminListPostsRequest,
    ) -> Result<PostListing, AdminPostError> {
        let window = PageWindow::new(request.page, request.limit, ADMIN_DEFAULT_LIMIT, MAX_LIMIT);
        let categories = self.categories.list_categories().await?;

        let category_id = match request.category.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => {
                match resolve_category_in(categories.clone(), value) {
                    Some(category) => Some(category.id),
                    None => return Ok(PostListing::from_page(QueryPage::empty(), window)),
                }
            }
            _ => None,
        };

        let query = window.apply(PostQuery {
            published: request.published,
            category_id,
            search: request.search,
            tag: request.tag,
            sort: request.sort,
            ..PostQuery::default()
        });

        let posts = self.reader.list_posts().await?;
        let joiner = Joiner::new(self.authors.list_authors().await?, categories);
        let page = query::query_posts(&posts, &query).map(|post| joiner.join(post));

        Ok(PostListing::from_page(page, window))
    }

    pub async fn load_post(&self, id: i32) -> Result<PostRecord, AdminPostError> {
        self.reader
            .find_post_by_id(id)
            .await?
            .ok_or(AdminPostError::NotFound)
    }
}
