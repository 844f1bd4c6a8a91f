use std::sync::Arc;

use crate::application::admin::inbox::AdminInboxService;
use crate::application::admin::posts::AdminPostService;
use crate::application::auth::AdminAuthService;
use crate::application::blog::BlogService;
use crate::application::contact::ContactService;
use crate::application::newsletter::NewsletterService;
use crate::application::repos::{
    AuthorsRepo, CategoriesRepo, ContactMessagesRepo, HealthRepo, PostsRepo, PostsWriteRepo,
    SubscribersRepo,
};
use crate::config::{AdminSettings, RateLimitSettings};

use super::rate_limit::PublicRateLimiter;

#[derive(Clone)]
pub struct HttpState {
    pub blog: Arc<BlogService>,
    pub admin_posts: Arc<AdminPostService>,
    pub inbox: Arc<AdminInboxService>,
    pub auth: Arc<AdminAuthService>,
    pub newsletter: Arc<NewsletterService>,
    pub contact: Arc<ContactService>,
    pub health: Arc<dyn HealthRepo>,
    pub rate_limiter: Arc<PublicRateLimiter>,
}

impl HttpState {
    /// Wire every service against one backend that implements all
    /// repository traits.
    pub fn from_repositories<R>(
        repos: Arc<R>,
        admin: &AdminSettings,
        rate_limit: &RateLimitSettings,
    ) -> Self
    where
        R: PostsRepo
            + PostsWriteRepo
            + AuthorsRepo
            + CategoriesRepo
            + SubscribersRepo
            + ContactMessagesRepo
            + HealthRepo
            + 'static,
    {
        let blog = BlogService::new(
            repos.clone(),
            repos.clone(),
            repos.clone(),
            repos.clone(),
        );
        let admin_posts = AdminPostService::new(
            repos.clone(),
            repos.clone(),
            repos.clone(),
            repos.clone(),
            admin.default_author_id,
        );
        let inbox = AdminInboxService::new(repos.clone(), repos.clone());

        Self {
            blog: Arc::new(blog),
            admin_posts: Arc::new(admin_posts),
            inbox: Arc::new(inbox),
            auth: Arc::new(AdminAuthService::new(admin)),
            newsletter: Arc::new(NewsletterService::new(repos.clone())),
            contact: Arc::new(ContactService::new(repos.clone())),
            health: repos,
            rate_limiter: Arc::new(PublicRateLimiter::from_settings(rate_limit)),
        }
    }
}
