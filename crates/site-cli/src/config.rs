//! Layered site configuration: defaults, then `<data-dir>/site.toml`, then CLI flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use site_core::SETTLE_DELAY_MS;

pub const CONFIG_FILE: &str = "site.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Listen address for `site serve`
    pub bind: String,
    /// Fallback wait before a cross-route section scroll
    pub settle_delay_ms: u64,
    /// Authored articles file; bundled content when unset
    pub articles: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
            settle_delay_ms: SETTLE_DELAY_MS,
            articles: None,
        }
    }
}

impl SiteConfig {
    /// Read `site.toml` from `base_dir` if present. Relative `articles` paths
    /// resolve against `base_dir`.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: SiteConfig =
            toml::from_str(&text).with_context(|| format!("invalid {}", path.display()))?;
        if let Some(articles) = config.articles.as_mut()
            && articles.is_relative()
        {
            *articles = base_dir.join(&*articles);
        }
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
