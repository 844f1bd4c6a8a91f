//! Batch import of posts from documents with YAML front matter.

use time::OffsetDateTime;
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::front_matter::parse_front_matter;
use crate::domain::slug::derive_slug;

use super::commands::PreparedPost;
use super::service::AdminPostService;
use super::types::{AdminPostError, ImportDocument, ImportOutcome, ImportedPost, PostCommand};

pub const MAX_IMPORT_DOCUMENTS: usize = 100;
const DEFAULT_IMPORT_CATEGORY_ID: i32 = 1;
const DOCUMENT_EXTENSIONS: &[&str] = &[".mdx", ".md"];

impl AdminPostService {
    /// Create or update one post per document, matching existing posts by
    /// slug. Every document is validated before the first write, so an
    /// invalid document leaves the store untouched.
    pub async fn import_documents(
        &self,
        actor: &str,
        documents: Vec<ImportDocument>,
    ) -> Result<Vec<ImportedPost>, AdminPostError> {
        if documents.len() > MAX_IMPORT_DOCUMENTS {
            return Err(AdminPostError::TooManyDocuments {
                max: MAX_IMPORT_DOCUMENTS,
                count: documents.len(),
            });
        }

        let mut staged = Vec::with_capacity(documents.len());
        for document in &documents {
            let entry = self
                .stage_document(document)
                .await
                .map_err(|err| match err {
                    AdminPostError::Invalid(source) => AdminPostError::InvalidDocument {
                        filename: document.filename.clone(),
                        source,
                    },
                    other => other,
                })?;
            staged.push(entry);
        }

        let mut imported = Vec::with_capacity(staged.len());
        for (slug, prepared) in staged {
            let now = OffsetDateTime::now_utc();
            // Looked up per write so repeated slugs within a batch update the
            // post created earlier in the same batch.
            let entry = match self.reader.find_post_by_slug(&slug).await? {
                Some(existing) => ImportedPost {
                    outcome: ImportOutcome::Updated,
                    post: self
                        .writer
                        .update_post(prepared.into_update(existing.id, slug, now))
                        .await?,
                },
                None => ImportedPost {
                    outcome: ImportOutcome::Created,
                    post: self
                        .writer
                        .create_post(prepared.into_create(slug, now))
                        .await?,
                },
            };
            imported.push(entry);
        }

        let created = imported
            .iter()
            .filter(|entry| entry.outcome == ImportOutcome::Created)
            .count();
        info!(
            target = "kabar::application::admin::posts",
            actor = actor,
            documents = imported.len(),
            created = created,
            updated = imported.len() - created,
            "posts imported"
        );

        Ok(imported)
    }

    async fn stage_document(
        &self,
        document: &ImportDocument,
    ) -> Result<(String, PreparedPost), AdminPostError> {
        let (front_matter, body) = parse_front_matter(&document.content)?;
        let stem = document_stem(&document.filename);

        let title = front_matter
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| stem.to_string());
        let slug_source = front_matter
            .slug
            .as_deref()
            .filter(|slug| !slug.trim().is_empty())
            .unwrap_or(stem);
        let slug = derive_slug(slug_source).map_err(|_| {
            DomainError::validation("slug", "cannot be derived from the front matter or filename")
        })?;

        let command = PostCommand {
            title,
            content: body.trim().to_string(),
            excerpt: front_matter.excerpt,
            thumbnail: front_matter.thumbnail,
            reading_time: front_matter.reading_time,
            published: Some(front_matter.published.unwrap_or(true)),
            featured: front_matter.featured.unwrap_or(false),
            tags: front_matter.tags,
            category_id: front_matter
                .category_id
                .unwrap_or(DEFAULT_IMPORT_CATEGORY_ID),
            author_id: None,
        };

        let prepared = self.prepare(command).await?;
        Ok((slug, prepared))
    }
}

/// Filename without its directory or a document extension.
fn document_stem(filename: &str) -> &str {
    let name = filename.trim();
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);

    DOCUMENT_EXTENSIONS
        .iter()
        .find_map(|extension| {
            let split = name.len().checked_sub(extension.len())?;
            let tail = name.get(split..)?;
            tail.eq_ignore_ascii_case(extension)
                .then(|| &name[..split])
        })
        .unwrap_or(name)
}
