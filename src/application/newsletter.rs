//! Newsletter sign-up.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::info;

use crate::application::repos::{CreateSubscriberParams, RepoError, SubscribersRepo};
use crate::domain::entities::SubscriberRecord;
use crate::domain::error::DomainError;
use crate::domain::validation::{normalize_email, require_text};

#[derive(Debug, Error)]
pub enum NewsletterError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct SubscribeCommand {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubscribeOutcome {
    Subscribed(SubscriberRecord),
    Reactivated(SubscriberRecord),
    AlreadySubscribed(SubscriberRecord),
}

impl SubscribeOutcome {
    pub fn subscriber(&self) -> &SubscriberRecord {
        match self {
            Self::Subscribed(record) | Self::Reactivated(record) | Self::AlreadySubscribed(record) => {
                record
            }
        }
    }
}

#[derive(Clone)]
pub struct NewsletterService {
    subscribers: Arc<dyn SubscribersRepo>,
}

impl NewsletterService {
    pub fn new(subscribers: Arc<dyn SubscribersRepo>) -> Self {
        Self { subscribers }
    }

    pub async fn subscribe(
        &self,
        command: SubscribeCommand,
    ) -> Result<SubscribeOutcome, NewsletterError> {
        let name = require_text(&command.name, "name")?;
        let email = normalize_email(&command.email)?;

        if let Some(existing) = self.subscribers.find_subscriber_by_email(&email).await? {
            if existing.active {
                return Ok(SubscribeOutcome::AlreadySubscribed(existing));
            }
            let record = self
                .subscribers
                .set_subscriber_active(existing.id, true)
                .await?;
            counter!("kabar_newsletter_subscriptions_total", "outcome" => "reactivated")
                .increment(1);
            info!(
                target = "kabar::application::newsletter",
                subscriber_id = record.id,
                "subscriber reactivated"
            );
            return Ok(SubscribeOutcome::Reactivated(record));
        }

        let record = match self
            .subscribers
            .create_subscriber(CreateSubscriberParams { name, email: email.clone() })
            .await
        {
            Ok(record) => record,
            // Lost a race with a concurrent sign-up for the same address.
            Err(RepoError::Duplicate { .. }) => {
                let existing = self
                    .subscribers
                    .find_subscriber_by_email(&email)
                    .await?
                    .ok_or(RepoError::NotFound)?;
                return Ok(SubscribeOutcome::AlreadySubscribed(existing));
            }
            Err(err) => return Err(err.into()),
        };

        counter!("kabar_newsletter_subscriptions_total", "outcome" => "subscribed").increment(1);
        info!(
            target = "kabar::application::newsletter",
            subscriber_id = record.id,
            "subscriber created"
        );
        Ok(SubscribeOutcome::Subscribed(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::infra::memory::InMemoryRepositories;

    fn command(name: &str, email: &str) -> SubscribeCommand {
        SubscribeCommand {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn subscribe_creates_then_reports_existing() {
        let repos = Arc::new(InMemoryRepositories::new());
        let service = NewsletterService::new(repos.clone());

        let first = service
            .subscribe(command("Dewi", "Dewi@Example.com"))
            .await
            .expect("subscribe");
        let SubscribeOutcome::Subscribed(record) = first else {
            panic!("expected a new subscriber, got {first:?}");
        };
        assert_eq!(record.email, "dewi@example.com");
        assert!(record.active);

        let second = service
            .subscribe(command("Dewi", " DEWI@example.com "))
            .await
            .expect("subscribe again");
        assert!(matches!(second, SubscribeOutcome::AlreadySubscribed(ref r) if r.id == record.id));
    }

    #[tokio::test]
    async fn subscribe_reactivates_inactive_subscriber() {
        let repos = Arc::new(InMemoryRepositories::new());
        let service = NewsletterService::new(repos.clone());
        let created = service
            .subscribe(command("Eko", "eko@example.com"))
            .await
            .expect("subscribe");
        repos
            .set_subscriber_active(created.subscriber().id, false)
            .await
            .expect("deactivate");

        let outcome = service
            .subscribe(command("Eko", "eko@example.com"))
            .await
            .expect("resubscribe");

        assert!(matches!(outcome, SubscribeOutcome::Reactivated(ref r) if r.active));
    }

    #[tokio::test]
    async fn subscribe_validates_input() {
        let service = NewsletterService::new(Arc::new(InMemoryRepositories::new()));

        let err = service
            .subscribe(command("", "a@example.com"))
            .await
            .expect_err("blank name");
        assert!(matches!(err, NewsletterError::Invalid(ref e) if e.field() == "name"));

        let err = service
            .subscribe(command("Fajar", "bukan-email"))
            .await
            .expect_err("bad email");
        assert!(matches!(err, NewsletterError::Invalid(ref e) if e.field() == "email"));
    }
}
