//! Contact form submissions.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::info;

use crate::application::repos::{ContactMessagesRepo, CreateContactMessageParams, RepoError};
use crate::domain::entities::ContactMessageRecord;
use crate::domain::error::DomainError;
use crate::domain::validation::{normalize_email, require_text};

const MAX_MESSAGE_CHARS: usize = 5_000;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct ContactCommand {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Clone)]
pub struct ContactService {
    messages: Arc<dyn ContactMessagesRepo>,
}

impl ContactService {
    pub fn new(messages: Arc<dyn ContactMessagesRepo>) -> Self {
        Self { messages }
    }

    pub async fn submit(&self, command: ContactCommand) -> Result<ContactMessageRecord, ContactError> {
        let name = require_text(&command.name, "name")?;
        let email = normalize_email(&command.email)?;
        let subject = require_text(&command.subject, "subject")?;
        let message = require_text(&command.message, "message")?;
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(DomainError::validation(
                "message",
                format!("must be at most {MAX_MESSAGE_CHARS} characters"),
            )
            .into());
        }

        let record = self
            .messages
            .create_contact_message(CreateContactMessageParams {
                name,
                email,
                subject,
                message,
            })
            .await?;

        counter!("kabar_contact_messages_total").increment(1);
        info!(
            target = "kabar::application::contact",
            message_id = record.id,
            "contact message received"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::infra::memory::InMemoryRepositories;

    fn command() -> ContactCommand {
        ContactCommand {
            name: " Gita ".to_string(),
            email: "gita@example.com".to_string(),
            subject: "Kerja sama".to_string(),
            message: "Halo, saya tertarik.".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_stores_unread_message() {
        let service = ContactService::new(Arc::new(InMemoryRepositories::new()));

        let record = service.submit(command()).await.expect("submit");

        assert_eq!(record.name, "Gita");
        assert!(!record.read);
    }

    #[tokio::test]
    async fn submit_rejects_blank_fields_and_long_messages() {
        let service = ContactService::new(Arc::new(InMemoryRepositories::new()));

        let err = service
            .submit(ContactCommand {
                subject: "  ".to_string(),
                ..command()
            })
            .await
            .expect_err("blank subject");
        assert!(matches!(err, ContactError::Invalid(ref e) if e.field() == "subject"));

        let err = service
            .submit(ContactCommand {
                message: "a".repeat(MAX_MESSAGE_CHARS + 1),
                ..command()
            })
            .await
            .expect_err("long message");
        assert!(matches!(err, ContactError::Invalid(ref e) if e.field() == "message"));
    }
}
