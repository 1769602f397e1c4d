use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::article::{Article, PublishedAt, RawArticle, TimestampPolicy};
use crate::constants::{MS_PER_DAY, RECENT_WINDOW_DAYS};
use crate::time::now_unix_millis;

/// Content-authoring mistakes caught when the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    InvalidId { title: String },
    DuplicateId(u32),
    EmptyTitle { id: u32 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::InvalidId { title } => {
                write!(f, "article '{title}' has id 0; ids must be positive")
            }
            CatalogError::DuplicateId(id) => write!(f, "duplicate article id {id}"),
            CatalogError::EmptyTitle { id } => write!(f, "article {id} has an empty title"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Outcome of a catalog lookup. Absence is a value, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a Article),
    NotFound,
}

impl<'a> Lookup<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<&'a Article> {
        match self {
            Lookup::Found(article) => Some(article),
            Lookup::NotFound => None,
        }
    }
}

/// The full article collection, sorted most recent first.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    articles: Vec<Article>,
}

/// Build the catalog with the current instant and an OS-seeded RNG.
pub fn build_catalog(raw: Vec<RawArticle>) -> Result<Catalog, CatalogError> {
    let mut rng = SmallRng::from_os_rng();
    Catalog::build(raw, now_unix_millis(), &mut rng)
}

impl Catalog {
    /// Derive slugs, fix generated timestamps against `now_ms`, and sort by
    /// `published_at` descending. Equal timestamps keep authoring order.
    pub fn build(
        raw: Vec<RawArticle>,
        now_ms: i64,
        rng: &mut impl Rng,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(raw.len());
        let mut articles = Vec::with_capacity(raw.len());

        for entry in raw {
            if entry.id == 0 {
                return Err(CatalogError::InvalidId { title: entry.title });
            }
            if entry.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { id: entry.id });
            }
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }

            let published_at = match entry.published {
                PublishedAt::Fixed(ms) => ms,
                PublishedAt::Generated(TimestampPolicy::Now) => now_ms,
                PublishedAt::Generated(TimestampPolicy::RandomRecent) => {
                    let window = RECENT_WINDOW_DAYS * MS_PER_DAY;
                    now_ms - rng.random_range(0..=window)
                }
            };
            articles.push(entry.into_article(published_at));
        }

        // Vec::sort_by is stable
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Ok(Self { articles })
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Look up by an id taken from external input (URL segment, CLI argument).
    ///
    /// Only a plain run of ASCII digits naming a positive `u32` is accepted;
    /// signs, whitespace, and overflow all yield `NotFound`.
    pub fn find_by_id(&self, raw_id: &str) -> Lookup<'_> {
        if raw_id.is_empty() || !raw_id.bytes().all(|b| b.is_ascii_digit()) {
            return Lookup::NotFound;
        }
        match raw_id.parse::<u32>() {
            Ok(id) => self.find_by_numeric_id(id),
            Err(_) => Lookup::NotFound,
        }
    }

    pub fn find_by_numeric_id(&self, id: u32) -> Lookup<'_> {
        if id == 0 {
            return Lookup::NotFound;
        }
        match self.articles.iter().find(|a| a.id == id) {
            Some(article) => Lookup::Found(article),
            None => Lookup::NotFound,
        }
    }

    /// Exact, case-sensitive slug match. On a collision the more recent record wins.
    pub fn find_by_slug(&self, slug: &str) -> Lookup<'_> {
        match self.articles.iter().find(|a| a.slug == slug) {
            Some(article) => Lookup::Found(article),
            None => Lookup::NotFound,
        }
    }

    /// The `n` most recent articles.
    pub fn latest(&self, n: usize) -> &[Article] {
        &self.articles[..n.min(self.articles.len())]
    }

    /// Up to `n` most recent articles other than the one at `slug`.
    pub fn related(&self, slug: &str, n: usize) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| a.slug != slug)
            .take(n)
            .collect()
    }

    /// Slugs shared by more than one record, with the ids involved in catalog order.
    /// Only the first id of each group is reachable through `find_by_slug`.
    pub fn slug_collisions(&self) -> Vec<(String, Vec<u32>)> {
        let mut groups: HashMap<&str, Vec<u32>> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for article in &self.articles {
            let ids = groups.entry(article.slug.as_str()).or_default();
            if ids.is_empty() {
                order.push(article.slug.as_str());
            }
            ids.push(article.id);
        }

        order
            .into_iter()
            .filter_map(|slug| {
                let ids = &groups[slug];
                (ids.len() > 1).then(|| (slug.to_string(), ids.clone()))
            })
            .collect()
    }

    /// Ids whose title slugs to the empty string. No URL can reach them.
    pub fn unreachable_ids(&self) -> Vec<u32> {
        self.articles
            .iter()
            .filter(|a| a.slug.is_empty())
            .map(|a| a.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::PublishedAt::{Fixed, Generated};
    use proptest::prelude::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    const NOW: i64 = 1_771_632_000_000;

    fn build(raw: Vec<RawArticle>) -> Catalog {
        Catalog::build(raw, NOW, &mut rng()).unwrap()
    }

    fn titles(catalog: &Catalog) -> Vec<&str> {
        catalog.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_sorted_most_recent_first() {
        let catalog = build(vec![
            RawArticle::new(1, "Hello World", Fixed(100)),
            RawArticle::new(2, "Second Post", Fixed(200)),
        ]);
        assert_eq!(titles(&catalog), vec!["Second Post", "Hello World"]);
        assert_eq!(catalog.articles()[0].slug, "second-post");
        assert_eq!(catalog.articles()[1].slug, "hello-world");
    }

    #[test]
    fn test_ties_keep_authoring_order() {
        let catalog = build(vec![
            RawArticle::new(1, "Alpha", Fixed(50)),
            RawArticle::new(2, "Bravo", Fixed(70)),
            RawArticle::new(3, "Charlie", Fixed(50)),
            RawArticle::new(4, "Delta", Fixed(50)),
        ]);
        assert_eq!(titles(&catalog), vec!["Bravo", "Alpha", "Charlie", "Delta"]);
    }

    #[test]
    fn test_now_policy_uses_build_instant() {
        let catalog = build(vec![RawArticle::new(1, "Fresh", Generated(TimestampPolicy::Now))]);
        assert_eq!(catalog.articles()[0].published_at, NOW);
    }

    #[test]
    fn test_random_recent_within_window() {
        let raw: Vec<RawArticle> = (1..=50)
            .map(|i| RawArticle::new(i, &format!("Post {i}"), Generated(TimestampPolicy::RandomRecent)))
            .collect();
        let catalog = build(raw);
        let oldest_allowed = NOW - RECENT_WINDOW_DAYS * MS_PER_DAY;
        for article in catalog.iter() {
            assert!(
                (oldest_allowed..=NOW).contains(&article.published_at),
                "{} out of window: {}",
                article.title,
                article.published_at
            );
        }
    }

    #[test]
    fn test_random_recent_fixed_after_build() {
        let catalog = build(vec![RawArticle::new(1, "Once", Generated(TimestampPolicy::RandomRecent))]);
        let first = catalog.articles()[0].published_at;
        let copy = catalog.clone();
        assert_eq!(copy.articles()[0].published_at, first);
    }

    #[test]
    fn test_find_by_id_rejects_garbage() {
        let catalog = build(vec![RawArticle::new(1, "Only", Fixed(1))]);
        for input in ["abc", "-1", "999999", "", " 1", "+1", "1.0", "0", "99999999999999999999"] {
            assert_eq!(catalog.find_by_id(input), Lookup::NotFound, "input {input:?}");
        }
        assert!(catalog.find_by_id("1").is_found());
    }

    #[test]
    fn test_find_by_id_leading_zero() {
        let catalog = build(vec![RawArticle::new(7, "Seven", Fixed(1))]);
        assert_eq!(catalog.find_by_id("007").found().map(|a| a.id), Some(7));
    }

    #[test]
    fn test_find_by_slug_roundtrip() {
        let catalog = build(vec![
            RawArticle::new(1, "Designing for Motion", Fixed(3)),
            RawArticle::new(2, "SEO Myths, Debunked", Fixed(2)),
        ]);
        for article in catalog.iter() {
            let found = catalog.find_by_slug(&crate::slugify(&article.title)).found();
            assert_eq!(found.map(|a| a.id), Some(article.id));
        }
    }

    #[test]
    fn test_find_by_slug_case_sensitive() {
        let catalog = build(vec![RawArticle::new(1, "Hello World", Fixed(1))]);
        assert_eq!(catalog.find_by_slug("Hello-World"), Lookup::NotFound);
        assert_eq!(catalog.find_by_slug("hello-worl"), Lookup::NotFound);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::build(
            vec![RawArticle::new(1, "A", Fixed(1)), RawArticle::new(1, "B", Fixed(2))],
            NOW,
            &mut rng(),
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(1));
    }

    #[test]
    fn test_zero_id_and_empty_title_rejected() {
        let zero = Catalog::build(vec![RawArticle::new(0, "Zero", Fixed(1))], NOW, &mut rng());
        assert!(matches!(zero, Err(CatalogError::InvalidId { .. })));

        let blank = Catalog::build(vec![RawArticle::new(4, "   ", Fixed(1))], NOW, &mut rng());
        assert_eq!(blank.unwrap_err(), CatalogError::EmptyTitle { id: 4 });
    }

    #[test]
    fn test_slug_collisions_reported() {
        let catalog = build(vec![
            RawArticle::new(1, "Hello, World", Fixed(1)),
            RawArticle::new(2, "Hello World!", Fixed(2)),
            RawArticle::new(3, "Unique", Fixed(3)),
        ]);
        assert_eq!(
            catalog.slug_collisions(),
            vec![("hello-world".to_string(), vec![2, 1])]
        );
        // most recent wins
        assert_eq!(catalog.find_by_slug("hello-world").found().map(|a| a.id), Some(2));
    }

    #[test]
    fn test_latest_and_related() {
        let catalog = build(vec![
            RawArticle::new(1, "One", Fixed(1)),
            RawArticle::new(2, "Two", Fixed(2)),
            RawArticle::new(3, "Three", Fixed(3)),
        ]);
        assert_eq!(catalog.latest(2).len(), 2);
        assert_eq!(catalog.latest(10).len(), 3);

        let related: Vec<u32> = catalog.related("three", 5).iter().map(|a| a.id).collect();
        assert_eq!(related, vec![2, 1]);
    }

    #[test]
    fn test_unreachable_ids() {
        let catalog = build(vec![
            RawArticle::new(1, "!!!", Fixed(1)),
            RawArticle::new(2, "Fine Title", Fixed(2)),
            RawArticle::new(3, "¿¡", Fixed(3)),
        ]);
        assert_eq!(catalog.unreachable_ids(), vec![3, 1]);
    }

    proptest! {
        #[test]
        fn prop_sorted_descending_with_stable_ties(stamps in prop::collection::vec(0i64..6, 0..40)) {
            let raw: Vec<RawArticle> = stamps
                .iter()
                .enumerate()
                .map(|(i, &ms)| RawArticle::new(i as u32 + 1, &format!("Post {i}"), Fixed(ms)))
                .collect();
            let catalog = build(raw);
            prop_assert_eq!(catalog.len(), stamps.len());
            for pair in catalog.articles().windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.published_at >= b.published_at);
                if a.published_at == b.published_at {
                    prop_assert!(a.id < b.id, "tie reordered: {} before {}", a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = build(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.find_by_slug("anything"), Lookup::NotFound);
        assert!(catalog.latest(3).is_empty());
    }
}
