//! Sample content loaded into an empty store so a fresh instance has
//! something to show.

use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::application::repos::{
    AuthorsRepo, CategoriesRepo, CreateAuthorParams, CreateCategoryParams, CreatePostParams,
    PostsWriteRepo,
};
use crate::domain::excerpt::derive_excerpt;

use super::error::InfraError;

struct SampleCategory {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
}

struct SamplePost {
    title: &'static str,
    slug: &'static str,
    excerpt: Option<&'static str>,
    content: &'static str,
    thumbnail: &'static str,
    reading_time: i32,
    featured: bool,
    tags: &'static [&'static str],
    category: &'static str,
    days_ago: i64,
}

const CATEGORIES: &[SampleCategory] = &[
    SampleCategory {
        name: "Kehidupan",
        slug: "kehidupan",
        description: "Pertumbuhan pribadi dan refleksi sehari-hari",
    },
    SampleCategory {
        name: "Agama",
        slug: "agama",
        description: "Iman, spiritualitas dan tujuan hidup",
    },
    SampleCategory {
        name: "Marketing",
        slug: "marketing",
        description: "Strategi digital dan tren terkini",
    },
    SampleCategory {
        name: "Teknologi",
        slug: "teknologi",
        description: "Wawasan dan produktivitas teknologi",
    },
    SampleCategory {
        name: "Buku",
        slug: "buku",
        description: "Ulasan dan rekomendasi buku",
    },
    SampleCategory {
        name: "Karier",
        slug: "karier",
        description: "Tips pengembangan profesional",
    },
];

const POSTS: &[SamplePost] = &[
    SamplePost {
        title: "Strategi Pemasaran Digital yang Efektif di Tahun 2023",
        slug: "strategi-pemasaran-digital-2023",
        excerpt: Some(
            "Taktik pemasaran yang terbukti memberi hasil nyata di lanskap digital saat ini.",
        ),
        content: "<p>Pemasaran digital terus berubah. Beberapa strategi kini menonjol karena \
                  memberi hasil yang terukur.</p><h2>Konten dengan tujuan</h2><p>Riset audiens, \
                  jawab pertanyaan mereka secara tuntas, dan utamakan kualitas.</p>\
                  <h2>Data first-party</h2><p>Bangun hubungan langsung dengan pelanggan dan \
                  kelola data secara transparan.</p>",
        thumbnail: "https://images.unsplash.com/photo-1664575196644-808978af9b1f?auto=format&fit=crop&w=800&q=80",
        reading_time: 5,
        featured: true,
        tags: &["digital marketing", "content strategy", "marketing trends"],
        category: "marketing",
        days_ago: 2,
    },
    SamplePost {
        title: "Menemukan Keseimbangan: Praktik Mindfulness untuk Profesional Sibuk",
        slug: "praktik-mindfulness-profesional-sibuk",
        excerpt: Some(
            "Teknik mindfulness singkat yang muat di jadwal tersibuk untuk menjaga fokus.",
        ),
        content: "<p>Tenggat waktu, rapat, dan notifikasi membuat perhatian kita terpecah.</p>\
                  <h2>Pernapasan sadar</h2><p>Duduk tegak, perhatikan napas selama lima menit, \
                  dan kembalikan fokus setiap kali pikiran mengembara.</p>\
                  <h2>Teknik 3-3-3</h2><p>Sebutkan tiga hal yang terlihat, tiga yang terdengar, \
                  lalu gerakkan tiga bagian tubuh.</p>",
        thumbnail: "https://images.unsplash.com/photo-1552581234-26160f608093?auto=format&fit=crop&w=800&q=80",
        reading_time: 8,
        featured: true,
        tags: &["mindfulness", "productivity", "work-life balance"],
        category: "kehidupan",
        days_ago: 5,
    },
    SamplePost {
        title: "Iman di Era Digital: Menjelajahi Spiritualitas di Zaman Modern",
        slug: "iman-era-digital-spiritualitas",
        excerpt: None,
        content: "<p>Teknologi mengubah cara kita belajar, beribadah, dan berkomunitas.</p>\
                  <h2>Komunitas daring</h2><p>Kajian virtual membuka akses bagi mereka yang \
                  jauh dari tempat ibadah.</p><h2>Menjaga jeda</h2><p>Sisihkan waktu tanpa \
                  layar untuk refleksi dan doa.</p>",
        thumbnail: "https://images.unsplash.com/photo-1586158291800-2665f07bba79?auto=format&fit=crop&w=800&q=80",
        reading_time: 6,
        featured: true,
        tags: &["faith", "spirituality", "digital life"],
        category: "agama",
        days_ago: 9,
    },
    SamplePost {
        title: "Seni Networking: Membangun Hubungan Profesional yang Bermakna",
        slug: "seni-networking-hubungan-profesional",
        excerpt: None,
        content: "<p>Networking yang baik bukan soal jumlah kartu nama, melainkan kualitas \
                  hubungan.</p><h2>Memberi lebih dulu</h2><p>Tawarkan bantuan sebelum meminta \
                  sesuatu.</p><h2>Tindak lanjut</h2><p>Kirim pesan singkat setelah bertemu dan \
                  jaga komunikasi secara berkala.</p>",
        thumbnail: "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?auto=format&fit=crop&w=800&q=80",
        reading_time: 10,
        featured: false,
        tags: &["networking", "professional development", "career growth"],
        category: "karier",
        days_ago: 14,
    },
    SamplePost {
        title: "5 Alat yang Meningkatkan Produktivitas Saya Tahun Ini",
        slug: "ulasan-alat-produktivitas",
        excerpt: None,
        content: "<p>Lima aplikasi yang benar-benar saya pakai setiap hari.</p><h2>Pencatat \
                  ide</h2><p>Satu tempat untuk semua catatan membuat ide tidak hilang.</p>\
                  <h2>Pengelola tugas</h2><p>Daftar prioritas harian menjaga fokus pada \
                  pekerjaan penting.</p>",
        thumbnail: "https://images.unsplash.com/photo-1499951360447-b19be8fe80f5?auto=format&fit=crop&w=400&q=80",
        reading_time: 4,
        featured: false,
        tags: &["productivity", "tools", "technology"],
        category: "teknologi",
        days_ago: 20,
    },
    SamplePost {
        title: "Rutinitas Pagi yang Mengubah Hidup Saya",
        slug: "rutinitas-pagi-pengubah-hidup",
        excerpt: None,
        content: "<p>Pagi yang tenang menentukan arah sepanjang hari.</p><h2>Bangun lebih \
                  awal</h2><p>Tiga puluh menit tambahan memberi ruang untuk membaca dan \
                  bergerak.</p><h2>Tanpa ponsel</h2><p>Tunda memeriksa notifikasi sampai \
                  rutinitas selesai.</p>",
        thumbnail: "https://images.unsplash.com/photo-1475721027785-f74eccf877e2?auto=format&fit=crop&w=400&q=80",
        reading_time: 6,
        featured: false,
        tags: &["morning routine", "habits", "wellness"],
        category: "kehidupan",
        days_ago: 27,
    },
    SamplePost {
        title: "Strategi Pembuatan Konten untuk Bisnis Kecil",
        slug: "strategi-pembuatan-konten-bisnis-kecil",
        excerpt: None,
        content: "<p>Bisnis kecil tidak perlu anggaran besar untuk konten yang efektif.</p>\
                  <h2>Kenali pelanggan</h2><p>Tulis untuk pertanyaan yang benar-benar mereka \
                  ajukan.</p><h2>Jadwal realistis</h2><p>Satu tulisan bermutu per minggu lebih \
                  baik daripada lima yang terburu-buru.</p>",
        thumbnail: "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?auto=format&fit=crop&w=400&q=80",
        reading_time: 5,
        featured: false,
        tags: &["content marketing", "small business", "marketing strategy"],
        category: "marketing",
        days_ago: 33,
    },
];

/// Insert the sample author, categories and posts unless the store already
/// has categories. Returns whether anything was written.
pub async fn seed_sample_content<R>(repos: &R) -> Result<bool, InfraError>
where
    R: AuthorsRepo + CategoriesRepo + PostsWriteRepo + ?Sized,
{
    let existing = repos.list_categories().await.map_err(seed_error)?;
    if !existing.is_empty() {
        info!(
            target = "kabar::infra::seed",
            categories = existing.len(),
            "store already has content, skipping sample data"
        );
        return Ok(false);
    }

    let author = repos
        .create_author(CreateAuthorParams {
            name: "Joko Riyadi".to_string(),
            bio: Some(
                "Penulis dan marketer yang menjelajahi persilangan teknologi, iman, dan \
                 pertumbuhan pribadi."
                    .to_string(),
            ),
            avatar: Some(
                "https://images.unsplash.com/photo-1580489944761-15a19d654956?auto=format&fit=crop&w=100&h=100&q=80"
                    .to_string(),
            ),
            email: Some("joko@jokoris.com".to_string()),
            twitter: Some("jokoris".to_string()),
            facebook: Some("jokoris".to_string()),
            linkedin: Some("jokoris".to_string()),
        })
        .await
        .map_err(seed_error)?;

    let mut categories = Vec::with_capacity(CATEGORIES.len());
    for sample in CATEGORIES {
        let category = repos
            .create_category(CreateCategoryParams {
                name: sample.name.to_string(),
                slug: sample.slug.to_string(),
                description: Some(sample.description.to_string()),
            })
            .await
            .map_err(seed_error)?;
        categories.push(category);
    }

    let now = OffsetDateTime::now_utc();
    for sample in POSTS {
        let category = categories
            .iter()
            .find(|category| category.slug == sample.category)
            .ok_or_else(|| {
                InfraError::Seed(format!("sample category `{}` is missing", sample.category))
            })?;

        repos
            .create_post(CreatePostParams {
                title: sample.title.to_string(),
                slug: sample.slug.to_string(),
                excerpt: Some(
                    sample
                        .excerpt
                        .map(str::to_string)
                        .unwrap_or_else(|| derive_excerpt(sample.content)),
                ),
                content: sample.content.to_string(),
                thumbnail: Some(sample.thumbnail.to_string()),
                reading_time: sample.reading_time,
                published: true,
                featured: sample.featured,
                tags: sample.tags.iter().map(|tag| tag.to_string()).collect(),
                author_id: author.id,
                category_id: category.id,
                created_at: now - Duration::days(sample.days_ago),
            })
            .await
            .map_err(seed_error)?;
    }

    info!(
        target = "kabar::infra::seed",
        categories = categories.len(),
        posts = POSTS.len(),
        "sample content loaded"
    );
    Ok(true)
}

fn seed_error(err: impl std::fmt::Display) -> InfraError {
    InfraError::Seed(err.to_string())
}
