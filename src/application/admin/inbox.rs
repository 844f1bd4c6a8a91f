//! Admin view over contact messages and newsletter subscribers.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::repos::{ContactMessagesRepo, RepoError, SubscribersRepo};
use crate::domain::entities::{ContactMessageRecord, SubscriberRecord};

#[derive(Debug, Error)]
pub enum AdminInboxError {
    #[error("contact message not found")]
    NotFound,
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for AdminInboxError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            other => Self::Repo(other),
        }
    }
}

#[derive(Clone)]
pub struct AdminInboxService {
    messages: Arc<dyn ContactMessagesRepo>,
    subscribers: Arc<dyn SubscribersRepo>,
}

impl AdminInboxService {
    pub fn new(
        messages: Arc<dyn ContactMessagesRepo>,
        subscribers: Arc<dyn SubscribersRepo>,
    ) -> Self {
        Self {
            messages,
            subscribers,
        }
    }

    pub async fn list_messages(&self) -> Result<Vec<ContactMessageRecord>, AdminInboxError> {
        Ok(self.messages.list_contact_messages().await?)
    }

    pub async fn mark_read(
        &self,
        actor: &str,
        id: i32,
    ) -> Result<ContactMessageRecord, AdminInboxError> {
        let message = self.messages.mark_contact_message_read(id).await?;
        info!(
            target = "kabar::application::admin::inbox",
            actor = actor,
            message_id = id,
            "contact message marked read"
        );
        Ok(message)
    }

    pub async fn list_subscribers(&self) -> Result<Vec<SubscriberRecord>, AdminInboxError> {
        Ok(self.subscribers.list_subscribers().await?)
    }
}
