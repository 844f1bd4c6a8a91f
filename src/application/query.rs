//! In-memory post query engine.
//!
//! Every function here is a pure computation over an already fetched slice of
//! posts: filters are ANDed, ordering is a stable sort keyed by the requested
//! [`PostSort`], and pagination slices after the total has been counted.

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::PostRecord;

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

/// Ordering applied after filtering. Names match exactly; anything else,
/// including a differently cased name, falls back to [`PostSort::Latest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    #[default]
    Latest,
    Oldest,
    Popular,
    Title,
}

impl PostSort {
    pub fn parse(value: &str) -> Self {
        match value {
            "oldest" => Self::Oldest,
            "popular" => Self::Popular,
            "title" => Self::Title,
            _ => Self::Latest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::Popular => "popular",
            Self::Title => "title",
        }
    }
}

impl FromStr for PostSort {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

impl fmt::Display for PostSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`query_posts`]. `None` means "no constraint" for every filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// Maximum number of items; `None` or zero uses [`DEFAULT_LIMIT`].
    pub limit: Option<usize>,
    pub offset: usize,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub category_id: Option<i32>,
    pub author_id: Option<i32>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: PostSort,
}

impl PostQuery {
    /// Query restricted to published posts, the policy every public caller applies.
    pub fn published() -> Self {
        Self {
            published: Some(true),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_sort(mut self, sort: PostSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn effective_limit(&self) -> usize {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_LIMIT,
        }
    }

    /// Whether `post` passes every supplied filter.
    pub fn matches(&self, post: &PostRecord) -> bool {
        self.matcher().matches(post)
    }

    fn matcher(&self) -> Matcher {
        Matcher {
            published: self.published,
            featured: self.featured,
            category_id: self.category_id,
            author_id: self.author_id,
            search: lowercase_non_blank(self.search.as_deref()),
            tag: lowercase_non_blank(self.tag.as_deref()),
        }
    }
}

/// Filters with the text needles lowercased once per query.
struct Matcher {
    published: Option<bool>,
    featured: Option<bool>,
    category_id: Option<i32>,
    author_id: Option<i32>,
    search: Option<String>,
    tag: Option<String>,
}

impl Matcher {
    fn matches(&self, post: &PostRecord) -> bool {
        if self.published.is_some_and(|value| post.published != value) {
            return false;
        }
        if self.featured.is_some_and(|value| post.featured != value) {
            return false;
        }
        if self.category_id.is_some_and(|id| post.category_id != id) {
            return false;
        }
        if self.author_id.is_some_and(|id| post.author_id != id) {
            return false;
        }
        if let Some(needle) = self.search.as_deref() {
            let hit = contains_lowercase(&post.title, needle)
                || post
                    .excerpt
                    .as_deref()
                    .is_some_and(|excerpt| contains_lowercase(excerpt, needle))
                || contains_lowercase(&post.content, needle);
            if !hit {
                return false;
            }
        }
        if let Some(tag) = self.tag.as_deref()
            && !post.tags.iter().any(|candidate| candidate.to_lowercase() == tag)
        {
            return false;
        }
        true
    }
}

/// One page of results plus the pre-pagination match count.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> QueryPage<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> QueryPage<U> {
        QueryPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Filter, sort and paginate `posts` according to `query`.
pub fn query_posts<'a>(posts: &'a [PostRecord], query: &PostQuery) -> QueryPage<&'a PostRecord> {
    let matcher = query.matcher();
    let mut matched: Vec<&PostRecord> = posts.iter().filter(|post| matcher.matches(post)).collect();
    let total = matched.len();

    sort_posts(&mut matched, query.sort);

    let items = matched
        .into_iter()
        .skip(query.offset)
        .take(query.effective_limit())
        .collect();

    QueryPage { items, total }
}

fn sort_posts(posts: &mut [&PostRecord], sort: PostSort) {
    // `sort_by` is stable, so equal keys keep collection order.
    match sort {
        PostSort::Latest => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        PostSort::Oldest => posts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        PostSort::Popular => posts.sort_by(|a, b| b.views.cmp(&a.views)),
        PostSort::Title => posts.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

/// Newest featured posts within `base`.
pub fn featured_posts<'a>(
    posts: &'a [PostRecord],
    base: &PostQuery,
    limit: usize,
) -> Vec<&'a PostRecord> {
    let query = PostQuery {
        featured: Some(true),
        ..base.clone()
    }
    .with_sort(PostSort::Latest)
    .with_offset(0)
    .with_limit(limit);

    query_posts(posts, &query).items
}

/// 1-based page window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub limit: usize,
}

impl PageWindow {
    /// Normalise raw request values: page `0` becomes `1` and a zero limit
    /// becomes `default_limit`; `max_limit` caps the result.
    pub fn new(
        page: Option<usize>,
        limit: Option<usize>,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        let page = page.filter(|page| *page > 0).unwrap_or(1);
        let limit = limit
            .filter(|limit| *limit > 0)
            .unwrap_or(default_limit)
            .clamp(1, max_limit.max(1));
        Self { page, limit }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit)
    }

    pub fn apply(&self, query: PostQuery) -> PostQuery {
        query.with_offset(self.offset()).with_limit(self.limit)
    }
}

/// Result of [`recent_posts`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecentPage<T> {
    pub main_post: Option<T>,
    pub recent_posts: Vec<T>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Latest posts for `window`. On page 1 the newest post is pulled out as the
/// main post; pages past the end come back empty with no main post.
pub fn recent_posts<'a>(
    posts: &'a [PostRecord],
    base: &PostQuery,
    window: PageWindow,
) -> RecentPage<&'a PostRecord> {
    let query = window.apply(base.clone().with_sort(PostSort::Latest));
    let QueryPage { mut items, total } = query_posts(posts, &query);

    let main_post = if window.page == 1 && !items.is_empty() {
        Some(items.remove(0))
    } else {
        None
    };

    RecentPage {
        main_post,
        recent_posts: items,
        total,
        total_pages: window.total_pages(total),
        current_page: window.page,
    }
}

/// Up to `limit` newest posts sharing `category_id`, excluding `exclude_id`.
pub fn related_posts<'a>(
    posts: &'a [PostRecord],
    base: &PostQuery,
    category_id: i32,
    exclude_id: i32,
    limit: usize,
) -> Vec<&'a PostRecord> {
    if limit == 0 {
        return Vec::new();
    }

    let query = PostQuery {
        category_id: Some(category_id),
        ..base.clone()
    }
    .with_sort(PostSort::Latest)
    .with_offset(0)
    .with_limit(limit.saturating_add(1));

    let mut items = query_posts(posts, &query).items;
    items.retain(|post| post.id != exclude_id);
    items.truncate(limit);
    items
}

/// Autocomplete candidates for `query`: matching titles first, then matching
/// tags, deduplicated in first-seen order.
pub fn search_suggestions<'a, I>(posts: I, query: &str, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a PostRecord>,
    I::IntoIter: Clone,
{
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_SUGGESTION_QUERY_CHARS || limit == 0 {
        return Vec::new();
    }
    let needle = trimmed.to_lowercase();
    let posts = posts.into_iter();

    let titles = posts.clone().map(|post| post.title.as_str());
    let tags = posts.flat_map(|post| post.tags.iter().map(String::as_str));

    let mut seen = HashSet::new();
    titles
        .chain(tags)
        .filter(|candidate| contains_lowercase(candidate, &needle))
        .filter(|candidate| seen.insert(*candidate))
        .take(limit)
        .map(str::to_string)
        .collect()
}

fn lowercase_non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

fn contains_lowercase(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    use time::{Duration, OffsetDateTime, macros::datetime};

    const EPOCH: OffsetDateTime = datetime!(2024-01-01 00:00 UTC);

    fn post(id: i32, title: &str) -> PostRecord {
        let created_at = EPOCH + Duration::days(i64::from(id));
        PostRecord {
            id,
            title: title.to_string(),
            slug: format!("post-{id}"),
            excerpt: None,
            content: String::new(),
            thumbnail: None,
            reading_time: 5,
            published: true,
            featured: false,
            views: 0,
            tags: Vec::new(),
            author_id: 1,
            category_id: 1,
            created_at,
            updated_at: created_at,
        }
    }

    fn ids(items: &[&PostRecord]) -> Vec<i32> {
        items.iter().map(|post| post.id).collect()
    }

    fn numbered(count: i32) -> Vec<PostRecord> {
        (1..=count).map(|id| post(id, &format!("Post {id}"))).collect()
    }

    #[test]
    fn latest_orders_newest_first() {
        let mut first = post(1, "A");
        first.views = 5;
        let mut second = post(2, "B");
        second.views = 10;
        let posts = vec![first, second];

        let page = query_posts(&posts, &PostQuery::default());

        assert_eq!(ids(&page.items), vec![2, 1]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn search_matches_case_insensitively() {
        let posts = vec![post(1, "Marketing 101"), post(2, "Cooking Tips")];
        let query = PostQuery {
            search: Some("mark".to_string()),
            ..PostQuery::default()
        };

        let page = query_posts(&posts, &query);

        assert_eq!(ids(&page.items), vec![1]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn search_covers_excerpt_and_content() {
        let mut from_excerpt = post(1, "One");
        from_excerpt.excerpt = Some("A short NOTE".to_string());
        let mut from_content = post(2, "Two");
        from_content.content = "<p>longer note here</p>".to_string();
        let posts = vec![from_excerpt, from_content, post(3, "Three")];
        let query = PostQuery {
            search: Some("  Note ".to_string()),
            sort: PostSort::Oldest,
            ..PostQuery::default()
        };

        assert_eq!(ids(&query_posts(&posts, &query).items), vec![1, 2]);
    }

    #[test]
    fn blank_search_and_tag_are_ignored() {
        let posts = numbered(3);
        let query = PostQuery {
            search: Some("   ".to_string()),
            tag: Some(String::new()),
            ..PostQuery::default()
        };

        assert_eq!(query_posts(&posts, &query).total, 3);
    }

    #[test]
    fn offset_and_limit_slice_after_sorting() {
        let posts = numbered(5);
        let query = PostQuery::default().with_limit(2).with_offset(3);

        let page = query_posts(&posts, &query);

        assert_eq!(ids(&page.items), vec![2, 1]);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn offset_past_end_keeps_total() {
        let posts = numbered(3);
        let page = query_posts(&posts, &PostQuery::default().with_offset(3));

        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn zero_limit_uses_default() {
        let posts = numbered(12);
        let page = query_posts(&posts, &PostQuery::default().with_limit(0));

        assert_eq!(page.items.len(), DEFAULT_LIMIT);
        assert_eq!(page.total, 12);
    }

    #[test]
    fn empty_collection_yields_empty_page() {
        let query = PostQuery {
            featured: Some(true),
            category_id: Some(3),
            search: Some("x".to_string()),
            ..PostQuery::default()
        };

        assert_eq!(query_posts(&[], &query), QueryPage::empty());
    }

    #[test]
    fn unknown_ids_match_nothing() {
        let posts = numbered(3);
        let query = PostQuery {
            category_id: Some(99),
            ..PostQuery::default()
        };
        assert_eq!(query_posts(&posts, &query).total, 0);

        let query = PostQuery {
            author_id: Some(99),
            ..PostQuery::default()
        };
        assert_eq!(query_posts(&posts, &query).total, 0);
    }

    #[test]
    fn boolean_filters_combine_with_and() {
        let mut posts = numbered(4);
        posts[0].featured = true;
        posts[1].featured = true;
        posts[1].published = false;
        posts[2].category_id = 2;
        posts[3].featured = true;
        posts[3].category_id = 2;

        let query = PostQuery {
            featured: Some(true),
            category_id: Some(2),
            ..PostQuery::published()
        };
        assert_eq!(ids(&query_posts(&posts, &query).items), vec![4]);

        let drafts = PostQuery {
            published: Some(false),
            ..PostQuery::default()
        };
        assert_eq!(ids(&query_posts(&posts, &drafts).items), vec![2]);
    }

    #[test]
    fn category_and_search_yield_their_intersection() {
        let titles = ["Rust async", "Rust macros", "Go channels", "Async Python", "Rust ffi"];
        let mut posts: Vec<PostRecord> = titles
            .iter()
            .zip(1..)
            .map(|(title, id)| post(id, title))
            .collect();
        for id in [1, 3, 4] {
            posts[id - 1].category_id = 2;
        }

        let by_category = PostQuery {
            category_id: Some(2),
            ..PostQuery::default()
        };
        let by_search = PostQuery {
            search: Some("async".to_string()),
            ..PostQuery::default()
        };
        let combined = PostQuery {
            category_id: Some(2),
            search: Some("async".to_string()),
            ..PostQuery::default()
        };

        let category_ids: HashSet<i32> = ids(&query_posts(&posts, &by_category).items)
            .into_iter()
            .collect();
        let search_ids: HashSet<i32> = ids(&query_posts(&posts, &by_search).items)
            .into_iter()
            .collect();
        let combined_page = query_posts(&posts, &combined);
        let combined_ids: HashSet<i32> = ids(&combined_page.items).into_iter().collect();

        assert_eq!(category_ids, HashSet::from([1, 3, 4]));
        assert_eq!(search_ids, HashSet::from([1, 4]));
        assert_eq!(combined_ids, &category_ids & &search_ids);
        assert_eq!(combined_page.total, 2);

        // Filtering the category result by search gives the same set.
        let staged: Vec<PostRecord> = query_posts(&posts, &by_category)
            .items
            .into_iter()
            .cloned()
            .collect();
        let staged_ids: HashSet<i32> = ids(&query_posts(&staged, &by_search).items)
            .into_iter()
            .collect();
        assert_eq!(staged_ids, combined_ids);
    }

    #[test]
    fn category_and_tag_combine_with_and() {
        let mut posts = numbered(4);
        posts[0].tags = vec!["rust".to_string()];
        posts[1].tags = vec!["rust".to_string()];
        posts[1].category_id = 2;
        posts[2].category_id = 2;

        let query = PostQuery {
            category_id: Some(2),
            tag: Some("Rust".to_string()),
            ..PostQuery::default()
        };

        assert_eq!(ids(&query_posts(&posts, &query).items), vec![2]);
    }

    #[test]
    fn related_posts_accepts_unbounded_limit() {
        let mut posts = numbered(4);
        posts[3].category_id = 2;

        let related = related_posts(&posts, &PostQuery::default(), 1, 2, usize::MAX);

        assert_eq!(ids(&related), vec![3, 1]);
    }

    #[test]
    fn tag_filter_is_exact_but_case_insensitive() {
        let mut posts = numbered(3);
        posts[0].tags = vec!["Rust".to_string()];
        posts[1].tags = vec!["rustacean".to_string()];
        posts[2].tags = vec!["go".to_string(), "RUST".to_string()];

        let query = PostQuery {
            tag: Some("rust".to_string()),
            sort: PostSort::Oldest,
            ..PostQuery::default()
        };

        assert_eq!(ids(&query_posts(&posts, &query).items), vec![1, 3]);
    }

    #[test]
    fn latest_and_oldest_are_reversed() {
        let posts = numbered(6);
        let latest = query_posts(&posts, &PostQuery::default());
        let oldest = query_posts(&posts, &PostQuery::default().with_sort(PostSort::Oldest));

        let mut reversed = ids(&oldest.items);
        reversed.reverse();
        assert_eq!(ids(&latest.items), reversed);
    }

    #[test]
    fn popular_is_non_increasing_and_stable() {
        let mut posts = numbered(5);
        for (post, views) in posts.iter_mut().zip([3, 9, 3, 1, 9]) {
            post.views = views;
        }

        let page = query_posts(&posts, &PostQuery::default().with_sort(PostSort::Popular));

        assert_eq!(ids(&page.items), vec![2, 5, 1, 3, 4]);
        assert!(page.items.windows(2).all(|pair| pair[0].views >= pair[1].views));
    }

    #[test]
    fn equal_timestamps_keep_collection_order() {
        let mut posts = numbered(3);
        for post in &mut posts {
            post.created_at = EPOCH;
        }

        let latest = query_posts(&posts, &PostQuery::default());
        let oldest = query_posts(&posts, &PostQuery::default().with_sort(PostSort::Oldest));

        assert_eq!(ids(&latest.items), vec![1, 2, 3]);
        assert_eq!(ids(&oldest.items), vec![1, 2, 3]);
    }

    #[test]
    fn title_sort_is_ordinal() {
        let posts = vec![post(1, "beta"), post(2, "Alpha"), post(3, "alpha")];
        let page = query_posts(&posts, &PostQuery::default().with_sort(PostSort::Title));

        assert_eq!(ids(&page.items), vec![2, 3, 1]);
    }

    #[test]
    fn sort_parse_falls_back_to_latest() {
        assert_eq!(PostSort::parse("popular"), PostSort::Popular);
        assert_eq!(PostSort::parse("title"), PostSort::Title);
        assert_eq!(PostSort::parse("oldest"), PostSort::Oldest);
        assert_eq!(PostSort::parse("random"), PostSort::Latest);
        assert_eq!(PostSort::parse("POPULAR"), PostSort::Latest);
        assert_eq!(PostSort::parse(" title "), PostSort::Latest);
        assert_eq!("".parse::<PostSort>(), Ok(PostSort::Latest));
    }

    #[test]
    fn query_is_idempotent_and_leaves_input_untouched() {
        let posts = numbered(4);
        let snapshot = posts.clone();
        let query = PostQuery::default().with_sort(PostSort::Title).with_limit(3);

        let first = query_posts(&posts, &query);
        let second = query_posts(&posts, &query);

        assert_eq!(first, second);
        assert_eq!(posts, snapshot);
    }

    #[test]
    fn page_length_matches_window_arithmetic() {
        let posts = numbered(7);
        for limit in 1..=8 {
            for offset in 0..=9 {
                let query = PostQuery::default().with_limit(limit).with_offset(offset);
                let page = query_posts(&posts, &query);
                let expected = limit.min(page.total.saturating_sub(offset));
                assert_eq!(page.items.len(), expected, "limit={limit} offset={offset}");
                assert_eq!(page.total, 7);
            }
        }
    }

    #[test]
    fn featured_posts_returns_newest_featured() {
        let mut posts = numbered(5);
        for id in [1, 3, 4] {
            posts[id - 1].featured = true;
        }
        posts[3].published = false;

        let featured = featured_posts(&posts, &PostQuery::published(), 3);

        assert_eq!(ids(&featured), vec![3, 1]);
    }

    #[test]
    fn recent_posts_extracts_main_post_on_first_page() {
        let posts = numbered(6);
        let window = PageWindow::new(Some(1), Some(4), 4, 100);

        let page = recent_posts(&posts, &PostQuery::published(), window);

        assert_eq!(page.main_post.map(|post| post.id), Some(6));
        assert_eq!(ids(&page.recent_posts), vec![5, 4, 3]);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn recent_posts_later_pages_have_no_main_post() {
        let posts = numbered(6);
        let window = PageWindow::new(Some(2), Some(4), 4, 100);

        let page = recent_posts(&posts, &PostQuery::published(), window);

        assert!(page.main_post.is_none());
        assert_eq!(ids(&page.recent_posts), vec![2, 1]);
    }

    #[test]
    fn recent_posts_past_last_page_is_empty() {
        let posts = numbered(6);
        let window = PageWindow::new(Some(9), Some(4), 4, 100);

        let page = recent_posts(&posts, &PostQuery::published(), window);

        assert!(page.main_post.is_none());
        assert!(page.recent_posts.is_empty());
        assert_eq!(page.total, 6);
        assert_eq!(page.current_page, 9);
    }

    #[test]
    fn recent_posts_on_empty_store() {
        let window = PageWindow::new(None, None, 4, 100);
        let page = recent_posts(&[], &PostQuery::published(), window);

        assert!(page.main_post.is_none());
        assert!(page.recent_posts.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn related_posts_excludes_seed_without_padding() {
        let mut posts = numbered(5);
        posts[3].category_id = 2;
        posts[4].category_id = 2;
        // Category 1 now holds posts 1, 2 and 3.
        let related = related_posts(&posts, &PostQuery::published(), 1, 2, 3);

        assert_eq!(ids(&related), vec![3, 1]);
    }

    #[test]
    fn related_posts_truncates_when_seed_is_not_in_window() {
        let posts = numbered(6);
        let related = related_posts(&posts, &PostQuery::published(), 1, 1, 3);

        assert_eq!(ids(&related), vec![6, 5, 4]);
    }

    #[test]
    fn suggestions_need_two_characters() {
        let posts = vec![post(1, "Marketing")];

        assert!(search_suggestions(&posts, "m", 5).is_empty());
        assert!(search_suggestions(&posts, " m  ", 5).is_empty());
        assert_eq!(search_suggestions(&posts, "ma", 5), vec!["Marketing"]);
    }

    #[test]
    fn suggestions_list_titles_then_tags_without_duplicates() {
        let mut first = post(1, "Belajar Rust");
        first.tags = vec!["rust".to_string(), "Belajar Rust".to_string()];
        let mut second = post(2, "Rust untuk Pemula");
        second.tags = vec!["rust".to_string(), "trust".to_string()];
        let posts = vec![first, second, post(3, "Python")];

        let suggestions = search_suggestions(&posts, "RUST", DEFAULT_SUGGESTION_LIMIT);

        assert_eq!(
            suggestions,
            vec!["Belajar Rust", "Rust untuk Pemula", "rust", "trust"]
        );
    }

    #[test]
    fn suggestions_respect_limit() {
        let posts: Vec<PostRecord> = (1..=8).map(|id| post(id, &format!("Tips {id}"))).collect();

        let suggestions = search_suggestions(&posts, "tips", DEFAULT_SUGGESTION_LIMIT);

        assert_eq!(suggestions.len(), DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(suggestions[0], "Tips 1");
    }

    #[test]
    fn page_window_normalises_inputs() {
        let window = PageWindow::new(Some(0), Some(0), 10, 100);
        assert_eq!(window, PageWindow { page: 1, limit: 10 });

        let window = PageWindow::new(Some(3), Some(500), 10, 100);
        assert_eq!(window.limit, 100);
        assert_eq!(window.offset(), 200);

        assert_eq!(PageWindow::new(None, Some(4), 10, 100).total_pages(9), 3);
        assert_eq!(PageWindow::new(None, Some(4), 10, 100).total_pages(8), 2);
    }
}
