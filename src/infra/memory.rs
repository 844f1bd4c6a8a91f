//! Process-local repositories backed by ordered maps.
//!
//! All collections live behind one `RwLock`, so every read returns a
//! consistent snapshot and writes are serialised. Ids are assigned from
//! per-collection counters starting at 1 and are never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::application::repos::{
    AuthorsRepo, CategoriesRepo, ContactMessagesRepo, CreateAuthorParams, CreateCategoryParams,
    CreateContactMessageParams, CreatePostParams, CreateSubscriberParams, HealthRepo, PostsRepo,
    PostsWriteRepo, RepoError, SubscribersRepo, UpdatePostParams,
};
use crate::domain::entities::{
    AuthorRecord, CategoryRecord, ContactMessageRecord, PostRecord, SubscriberRecord,
};

#[derive(Debug, Default)]
pub struct InMemoryRepositories {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    posts: BTreeMap<i32, PostRecord>,
    authors: BTreeMap<i32, AuthorRecord>,
    categories: BTreeMap<i32, CategoryRecord>,
    subscribers: BTreeMap<i32, SubscriberRecord>,
    messages: BTreeMap<i32, ContactMessageRecord>,
    counters: Counters,
}

#[derive(Debug, Default)]
struct Counters {
    post: i32,
    author: i32,
    category: i32,
    subscriber: i32,
    message: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

impl MemoryState {
    fn slug_taken(&self, slug: &str, except: Option<i32>) -> bool {
        self.posts
            .values()
            .any(|post| post.slug == slug && Some(post.id) != except)
    }
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostsRepo for InMemoryRepositories {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.state.read().await.posts.values().cloned().collect())
    }

    async fn find_post_by_id(&self, id: i32) -> Result<Option<PostRecord>, RepoError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        Ok(self
            .state
            .read()
            .await
            .posts
            .values()
            .find(|post| post.slug == slug)
            .cloned())
    }
}

#[async_trait]
impl PostsWriteRepo for InMemoryRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let mut state = self.state.write().await;
        if state.slug_taken(&params.slug, None) {
            return Err(RepoError::duplicate("posts_slug_key"));
        }

        let id = next_id(&mut state.counters.post);
        let post = PostRecord {
            id,
            title: params.title,
            slug: params.slug,
            excerpt: params.excerpt,
            content: params.content,
            thumbnail: params.thumbnail,
            reading_time: params.reading_time,
            published: params.published,
            featured: params.featured,
            views: 0,
            tags: params.tags,
            author_id: params.author_id,
            category_id: params.category_id,
            created_at: params.created_at,
            updated_at: params.created_at,
        };
        state.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&params.id) {
            return Err(RepoError::NotFound);
        }
        if state.slug_taken(&params.slug, Some(params.id)) {
            return Err(RepoError::duplicate("posts_slug_key"));
        }

        let post = state.posts.get_mut(&params.id).ok_or(RepoError::NotFound)?;
        post.title = params.title;
        post.slug = params.slug;
        post.excerpt = params.excerpt;
        post.content = params.content;
        post.thumbnail = params.thumbnail;
        post.reading_time = params.reading_time;
        post.published = params.published;
        post.featured = params.featured;
        post.tags = params.tags;
        post.author_id = params.author_id;
        post.category_id = params.category_id;
        post.updated_at = params.updated_at;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i32) -> Result<(), RepoError> {
        self.state
            .write()
            .await
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn increment_views(&self, id: i32) -> Result<i64, RepoError> {
        let mut state = self.state.write().await;
        let post = state.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.views = post.views.saturating_add(1);
        Ok(post.views)
    }
}

#[async_trait]
impl AuthorsRepo for InMemoryRepositories {
    async fn list_authors(&self) -> Result<Vec<AuthorRecord>, RepoError> {
        Ok(self.state.read().await.authors.values().cloned().collect())
    }

    async fn find_author(&self, id: i32) -> Result<Option<AuthorRecord>, RepoError> {
        Ok(self.state.read().await.authors.get(&id).cloned())
    }

    async fn create_author(&self, params: CreateAuthorParams) -> Result<AuthorRecord, RepoError> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.counters.author);
        let now = OffsetDateTime::now_utc();
        let author = AuthorRecord {
            id,
            name: params.name,
            bio: params.bio,
            avatar: params.avatar,
            email: params.email,
            twitter: params.twitter,
            facebook: params.facebook,
            linkedin: params.linkedin,
            created_at: now,
            updated_at: now,
        };
        state.authors.insert(id, author.clone());
        Ok(author)
    }
}

#[async_trait]
impl CategoriesRepo for InMemoryRepositories {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        Ok(self.state.read().await.categories.values().cloned().collect())
    }

    async fn find_category(&self, id: i32) -> Result<Option<CategoryRecord>, RepoError> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn create_category(
        &self,
        params: CreateCategoryParams,
    ) -> Result<CategoryRecord, RepoError> {
        let mut state = self.state.write().await;
        if state
            .categories
            .values()
            .any(|category| category.name == params.name)
        {
            return Err(RepoError::duplicate("categories_name_key"));
        }
        if state
            .categories
            .values()
            .any(|category| category.slug == params.slug)
        {
            return Err(RepoError::duplicate("categories_slug_key"));
        }

        let id = next_id(&mut state.counters.category);
        let now = OffsetDateTime::now_utc();
        let category = CategoryRecord {
            id,
            name: params.name,
            description: params.description,
            slug: params.slug,
            created_at: now,
            updated_at: now,
        };
        state.categories.insert(id, category.clone());
        Ok(category)
    }
}

#[async_trait]
impl SubscribersRepo for InMemoryRepositories {
    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<SubscriberRecord>, RepoError> {
        let needle = email.to_lowercase();
        Ok(self
            .state
            .read()
            .await
            .subscribers
            .values()
            .find(|subscriber| subscriber.email.to_lowercase() == needle)
            .cloned())
    }

    async fn create_subscriber(
        &self,
        params: CreateSubscriberParams,
    ) -> Result<SubscriberRecord, RepoError> {
        let mut state = self.state.write().await;
        let needle = params.email.to_lowercase();
        if state
            .subscribers
            .values()
            .any(|subscriber| subscriber.email.to_lowercase() == needle)
        {
            return Err(RepoError::duplicate("subscribers_email_key"));
        }

        let id = next_id(&mut state.counters.subscriber);
        let subscriber = SubscriberRecord {
            id,
            name: params.name,
            email: params.email,
            active: true,
            created_at: OffsetDateTime::now_utc(),
        };
        state.subscribers.insert(id, subscriber.clone());
        Ok(subscriber)
    }

    async fn set_subscriber_active(
        &self,
        id: i32,
        active: bool,
    ) -> Result<SubscriberRecord, RepoError> {
        let mut state = self.state.write().await;
        let subscriber = state.subscribers.get_mut(&id).ok_or(RepoError::NotFound)?;
        subscriber.active = active;
        Ok(subscriber.clone())
    }

    async fn list_subscribers(&self) -> Result<Vec<SubscriberRecord>, RepoError> {
        Ok(self.state.read().await.subscribers.values().cloned().collect())
    }
}

#[async_trait]
impl ContactMessagesRepo for InMemoryRepositories {
    async fn create_contact_message(
        &self,
        params: CreateContactMessageParams,
    ) -> Result<ContactMessageRecord, RepoError> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.counters.message);
        let message = ContactMessageRecord {
            id,
            name: params.name,
            email: params.email,
            subject: params.subject,
            message: params.message,
            read: false,
            created_at: OffsetDateTime::now_utc(),
        };
        state.messages.insert(id, message.clone());
        Ok(message)
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessageRecord>, RepoError> {
        // Ids grow with insertion, so reverse id order is newest first.
        Ok(self
            .state
            .read()
            .await
            .messages
            .values()
            .rev()
            .cloned()
            .collect())
    }

    async fn mark_contact_message_read(
        &self,
        id: i32,
    ) -> Result<ContactMessageRecord, RepoError> {
        let mut state = self.state.write().await;
        let message = state.messages.get_mut(&id).ok_or(RepoError::NotFound)?;
        message.read = true;
        Ok(message.clone())
    }
}

#[async_trait]
impl HealthRepo for InMemoryRepositories {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
