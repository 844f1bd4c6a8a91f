use std::sync::Arc;

use crate::application::query::PostSort;
use crate::application::repos::{
    AuthorsRepo, CategoriesRepo, CreateAuthorParams, CreateCategoryParams, PostsRepo,
};
use crate::domain::error::DomainError;
use crate::infra::memory::InMemoryRepositories;

use super::{
    AdminListPostsRequest, AdminPostError, AdminPostService, ImportDocument, ImportOutcome,
    MAX_IMPORT_DOCUMENTS, PostCommand,
};

const ACTOR: &str = "admin";

async fn fixture() -> (AdminPostService, Arc<InMemoryRepositories>) {
    let repos = Arc::new(InMemoryRepositories::new());
    repos
        .create_author(CreateAuthorParams {
            name: "Rina".to_string(),
            bio: None,
            avatar: None,
            email: None,
            twitter: None,
            facebook: None,
            linkedin: None,
        })
        .await
        .expect("author");
    repos
        .create_category(CreateCategoryParams {
            name: "Teknologi".to_string(),
            slug: "teknologi".to_string(),
            description: None,
        })
        .await
        .expect("category");

    let service = AdminPostService::new(
        repos.clone(),
        repos.clone(),
        repos.clone(),
        repos.clone(),
        1,
    );
    (service, repos)
}

fn command(title: &str) -> PostCommand {
    PostCommand {
        title: title.to_string(),
        content: "<p>Isi <em>tulisan</em> yang cukup panjang.</p>".to_string(),
        category_id: 1,
        tags: vec![" rust ".to_string(), String::new()],
        ..PostCommand::default()
    }
}

#[tokio::test]
async fn create_derives_slug_excerpt_and_defaults() {
    let (service, _) = fixture().await;

    let post = service
        .create_post(ACTOR, command("Panduan Rust Pertama"))
        .await
        .expect("create");

    assert_eq!(post.slug, "panduan-rust-pertama");
    assert_eq!(post.excerpt.as_deref(), Some("Isi tulisan yang cukup panjang."));
    assert!(post.published);
    assert!(!post.featured);
    assert_eq!(post.reading_time, 5);
    assert_eq!(post.author_id, 1);
    assert_eq!(post.tags, vec!["rust"]);
    assert_eq!(post.views, 0);
}

#[tokio::test]
async fn create_suffixes_colliding_slugs() {
    let (service, _) = fixture().await;

    let first = service
        .create_post(ACTOR, command("Sama Saja"))
        .await
        .expect("first");
    let second = service
        .create_post(ACTOR, command("Sama saja!"))
        .await
        .expect("second");

    assert_eq!(first.slug, "sama-saja");
    assert_eq!(second.slug, "sama-saja-2");
}

#[tokio::test]
async fn create_keeps_explicit_excerpt() {
    let (service, _) = fixture().await;

    let post = service
        .create_post(
            ACTOR,
            PostCommand {
                excerpt: Some("  Ringkasan khusus ".to_string()),
                ..command("Dengan Ringkasan")
            },
        )
        .await
        .expect("create");

    assert_eq!(post.excerpt.as_deref(), Some("Ringkasan khusus"));
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let (service, _) = fixture().await;

    let cases = [
        (command("   "), "title"),
        (
            PostCommand {
                content: " ".to_string(),
                ..command("Tanpa Isi")
            },
            "content",
        ),
        (
            PostCommand {
                category_id: 42,
                ..command("Kategori Salah")
            },
            "categoryId",
        ),
        (
            PostCommand {
                author_id: Some(9),
                ..command("Penulis Salah")
            },
            "authorId",
        ),
        (
            PostCommand {
                reading_time: Some(0),
                ..command("Waktu Baca")
            },
            "readingTime",
        ),
        (command("???"), "title"),
    ];

    for (input, field) in cases {
        match service.create_post(ACTOR, input).await {
            Err(AdminPostError::Invalid(err)) => assert_eq!(err.field(), field),
            other => panic!("expected validation error on {field}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn update_keeps_slug_when_title_is_unchanged() {
    let (service, _) = fixture().await;
    let post = service
        .create_post(ACTOR, command("Judul Tetap"))
        .await
        .expect("create");

    let updated = service
        .update_post(
            ACTOR,
            post.id,
            PostCommand {
                featured: true,
                published: Some(false),
                ..command("Judul Tetap")
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.slug, "judul-tetap");
    assert!(updated.featured);
    assert!(!updated.published);
    assert!(updated.updated_at >= post.updated_at);
    assert_eq!(updated.created_at, post.created_at);
}

#[tokio::test]
async fn update_regenerates_slug_for_new_title() {
    let (service, _) = fixture().await;
    service
        .create_post(ACTOR, command("Judul Baru"))
        .await
        .expect("occupy slug");
    let post = service
        .create_post(ACTOR, command("Judul Lama"))
        .await
        .expect("create");

    let updated = service
        .update_post(ACTOR, post.id, command("Judul Baru"))
        .await
        .expect("update");

    assert_eq!(updated.slug, "judul-baru-2");
}

#[tokio::test]
async fn update_and_delete_missing_post() {
    let (service, _) = fixture().await;

    assert!(matches!(
        service.update_post(ACTOR, 77, command("Apa Saja")).await,
        Err(AdminPostError::NotFound)
    ));
    assert!(matches!(
        service.delete_post(ACTOR, 77).await,
        Err(AdminPostError::NotFound)
    ));
}

#[tokio::test]
async fn delete_removes_post() {
    let (service, repos) = fixture().await;
    let post = service
        .create_post(ACTOR, command("Hapus Saya"))
        .await
        .expect("create");

    service.delete_post(ACTOR, post.id).await.expect("delete");

    assert!(repos.find_post_by_id(post.id).await.expect("lookup").is_none());
}

#[tokio::test]
async fn list_posts_includes_drafts_unless_filtered() {
    let (service, _) = fixture().await;
    service
        .create_post(ACTOR, command("Terbit"))
        .await
        .expect("published");
    service
        .create_post(
            ACTOR,
            PostCommand {
                published: Some(false),
                ..command("Draf")
            },
        )
        .await
        .expect("draft");

    let all = service
        .list_posts(AdminListPostsRequest {
            sort: PostSort::Title,
            ..Default::default()
        })
        .await
        .expect("list");
    let titles: Vec<&str> = all.posts.iter().map(|p| p.post.title.as_str()).collect();
    assert_eq!(titles, vec!["Draf", "Terbit"]);
    assert_eq!(all.posts[0].category.as_ref().map(|c| c.id), Some(1));

    let drafts = service
        .list_posts(AdminListPostsRequest {
            published: Some(false),
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(drafts.total, 1);
    assert_eq!(drafts.posts[0].post.title, "Draf");
}

#[test]
fn repo_not_found_maps_to_not_found() {
    let err: AdminPostError = crate::application::repos::RepoError::NotFound.into();
    assert!(matches!(err, AdminPostError::NotFound));

    let err: AdminPostError = DomainError::validation("title", "x").into();
    assert!(matches!(err, AdminPostError::Invalid(_)));
}

fn document(filename: &str, content: &str) -> ImportDocument {
    ImportDocument {
        filename: filename.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
async fn import_creates_then_updates_by_slug() {
    let (service, repos) = fixture().await;
    let first = document(
        "draf.mdx",
        "---\ntitle: Panduan Tokio\nslug: panduan-tokio\ncategoryId: 1\ntags: [rust, async]\n---\n\nRuntime async untuk Rust.\n",
    );

    let imported = service
        .import_documents(ACTOR, vec![first])
        .await
        .expect("import");
    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].outcome, ImportOutcome::Created);
    let created = &imported[0].post;
    assert_eq!(created.slug, "panduan-tokio");
    assert_eq!(created.title, "Panduan Tokio");
    assert_eq!(created.content, "Runtime async untuk Rust.");
    assert_eq!(created.excerpt.as_deref(), Some("Runtime async untuk Rust."));
    assert_eq!(created.tags, vec!["rust", "async"]);
    assert!(created.published);

    let revised = document(
        "panduan.mdx",
        "---\ntitle: Panduan Tokio Lengkap\nslug: panduan-tokio\nexcerpt: Versi kedua\n---\nIsi baru.",
    );
    let imported = service
        .import_documents(ACTOR, vec![revised])
        .await
        .expect("import again");

    assert_eq!(imported[0].outcome, ImportOutcome::Updated);
    assert_eq!(imported[0].post.id, created.id);
    assert_eq!(imported[0].post.title, "Panduan Tokio Lengkap");
    assert_eq!(imported[0].post.excerpt.as_deref(), Some("Versi kedua"));
    assert_eq!(repos.list_posts().await.expect("posts").len(), 1);
}

#[tokio::test]
async fn import_falls_back_to_filename_and_defaults() {
    let (service, _) = fixture().await;

    let imported = service
        .import_documents(
            ACTOR,
            vec![document("catatan/Catatan Harian.mdx", "<p>Hari ini cerah.</p>")],
        )
        .await
        .expect("import");

    let post = &imported[0].post;
    assert_eq!(post.title, "Catatan Harian");
    assert_eq!(post.slug, "catatan-harian");
    assert_eq!(post.excerpt.as_deref(), Some("Hari ini cerah."));
    assert_eq!(post.category_id, 1);
    assert_eq!(post.author_id, 1);
    assert!(post.published);
}

#[tokio::test]
async fn repeated_slug_in_one_batch_updates_the_earlier_post() {
    let (service, repos) = fixture().await;

    let imported = service
        .import_documents(
            ACTOR,
            vec![
                document("ulang.mdx", "Versi pertama"),
                document("ulang.md", "Versi kedua"),
            ],
        )
        .await
        .expect("import");

    let outcomes: Vec<ImportOutcome> = imported.iter().map(|entry| entry.outcome).collect();
    assert_eq!(outcomes, vec![ImportOutcome::Created, ImportOutcome::Updated]);
    let posts = repos.list_posts().await.expect("posts");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].content, "Versi kedua");
}

#[tokio::test]
async fn invalid_document_aborts_the_whole_import() {
    let (service, repos) = fixture().await;

    let result = service
        .import_documents(
            ACTOR,
            vec![
                document("baik.mdx", "Isi yang valid"),
                document("buruk.mdx", "---\ncategoryId: 99\n---\nIsi"),
            ],
        )
        .await;

    match result {
        Err(AdminPostError::InvalidDocument { filename, source }) => {
            assert_eq!(filename, "buruk.mdx");
            assert_eq!(source.field(), "categoryId");
        }
        other => panic!("expected invalid document, got {other:?}"),
    }
    assert!(repos.list_posts().await.expect("posts").is_empty());
}

#[tokio::test]
async fn import_rejects_broken_front_matter_and_oversized_batches() {
    let (service, _) = fixture().await;

    match service
        .import_documents(ACTOR, vec![document("a.mdx", "---\ntitle: Tanpa Penutup\n")])
        .await
    {
        Err(AdminPostError::InvalidDocument { source, .. }) => {
            assert_eq!(source.field(), "frontMatter");
        }
        other => panic!("expected front matter error, got {other:?}"),
    }

    let batch = vec![document("x.mdx", "Isi"); MAX_IMPORT_DOCUMENTS + 1];
    assert!(matches!(
        service.import_documents(ACTOR, batch).await,
        Err(AdminPostError::TooManyDocuments { .. })
    ));
}
