//! Authored article files and catalog export.
//!
//! Accepted formats, chosen by extension:
//! - `.toml`: `[[articles]]` tables
//! - `.json`: a top-level array of article objects

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use site_core::{Article, Catalog, RawArticle};

use crate::error::{Result, StoreError};

#[derive(Debug, Deserialize)]
struct ArticleFile {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentFormat {
    Toml,
    Json,
}

impl ContentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(ContentFormat::Toml),
            Some("json") => Some(ContentFormat::Json),
            _ => None,
        }
    }
}

/// Read raw articles from an authored content file.
pub fn load_articles_file(path: &Path) -> Result<Vec<RawArticle>> {
    let format = ContentFormat::from_path(path).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "unsupported content file {} (expected .toml or .json)",
            path.display()
        ))
    })?;
    let text = fs::read_to_string(path)?;
    let articles = load_articles_str(&text, format)?;
    tracing::info!("loaded {} articles from {}", articles.len(), path.display());
    Ok(articles)
}

pub fn load_articles_str(text: &str, format: ContentFormat) -> Result<Vec<RawArticle>> {
    match format {
        ContentFormat::Toml => toml::from_str::<ArticleFile>(text)
            .map(|file| file.articles)
            .map_err(|e| StoreError::Parse(format!("invalid article TOML: {e}"))),
        ContentFormat::Json => serde_json::from_str(text)
            .map_err(|e| StoreError::Parse(format!("invalid article JSON: {e}"))),
    }
}

#[derive(Serialize)]
struct CatalogExport<'a> {
    articles: &'a [Article],
}

/// Serialize the built catalog, in catalog order, as pretty JSON.
pub fn export_catalog_json(catalog: &Catalog) -> Result<String> {
    serde_json::to_string_pretty(&CatalogExport {
        articles: catalog.articles(),
    })
    .map_err(|e| StoreError::InvalidData(format!("JSON export failed: {e}")))
}

pub fn export_catalog_file(catalog: &Catalog, path: &Path) -> Result<()> {
    let json = export_catalog_json(catalog)?;
    fs::write(path, json).map_err(|e| {
        StoreError::InvalidData(format!("failed to write {}: {e}", path.display()))
    })
}
