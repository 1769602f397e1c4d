use serde::{Deserialize, Serialize};

use crate::slug::slugify;

/// How a raw article gets its publication instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublishedAt {
    /// Authored literal, epoch milliseconds.
    Fixed(i64),
    /// Generated once at catalog build time.
    Generated(TimestampPolicy),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampPolicy {
    /// The build instant.
    Now,
    /// A pseudo-random instant within the recent window before the build instant.
    RandomRecent,
}

/// An article entry as written by content authors, before slugging and timestamping.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub id: u32,
    pub title: String,
    pub published: PublishedAt,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "hero_image_url")]
    pub hero_image_url: String,
    #[serde(default, alias = "cover_image_url")]
    pub cover_image_url: Option<String>,
    #[serde(default, alias = "estimated_read_minutes")]
    pub estimated_read_minutes: Option<u32>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RawArticle {
    /// Minimal entry; used by the bundled content and tests.
    pub fn new(id: u32, title: &str, published: PublishedAt) -> Self {
        Self {
            id,
            title: title.to_string(),
            published,
            summary: String::new(),
            content: String::new(),
            hero_image_url: String::new(),
            cover_image_url: None,
            estimated_read_minutes: None,
            author: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    pub fn with_images(mut self, hero: &str, cover: Option<&str>) -> Self {
        self.hero_image_url = hero.to_string();
        self.cover_image_url = cover.map(str::to_string);
        self
    }

    pub fn with_read_minutes(mut self, minutes: u32) -> Self {
        self.estimated_read_minutes = Some(minutes);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Finalize into a catalog record once the timestamp has been fixed.
    pub(crate) fn into_article(self, published_at: i64) -> Article {
        Article {
            slug: slugify(&self.title),
            id: self.id,
            title: self.title,
            published_at,
            summary: self.summary,
            content: self.content,
            hero_image_url: self.hero_image_url,
            cover_image_url: self.cover_image_url,
            estimated_read_minutes: self.estimated_read_minutes,
            author: self.author,
            tags: self.tags,
        }
    }
}

/// A catalog record. Immutable once the catalog is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub slug: String,
    /// Epoch milliseconds.
    pub published_at: i64,
    pub summary: String,
    pub content: String,
    pub hero_image_url: String,
    pub cover_image_url: Option<String>,
    pub estimated_read_minutes: Option<u32>,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    /// Cover image for cards, falling back to the hero image.
    pub fn card_image_url(&self) -> &str {
        self.cover_image_url
            .as_deref()
            .unwrap_or(&self.hero_image_url)
    }
}
