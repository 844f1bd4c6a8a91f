use std::sync::Arc;

use crate::application::repos::{AuthorsRepo, CategoriesRepo, PostsRepo, PostsWriteRepo};

#[derive(Clone)]
pub struct AdminPostService {
    pub(crate) reader: Arc<dyn PostsRepo>,
    pub(crate) writer: Arc<dyn PostsWriteRepo>,
    pub(crate) authors: Arc<dyn AuthorsRepo>,
    pub(crate) categories: Arc<dyn CategoriesRepo>,
    pub(crate) default_author_id: i32,
}

impl AdminPostService {
    pub fn new(
        reader: Arc<dyn PostsRepo>,
        writer: Arc<dyn PostsWriteRepo>,
        authors: Arc<dyn AuthorsRepo>,
        categories: Arc<dyn CategoriesRepo>,
        default_author_id: i32,
    ) -> Self {
        Self {
            reader,
            writer,
            authors,
            categories,
            default_author_id,
        }
    }
}
