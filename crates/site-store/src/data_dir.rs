use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::error::{Result, StoreError};
use crate::store::Store;

pub const DB_FILE: &str = "site.db";

/// Default base directory for all site state.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".agency-site")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Open `<base>/site.db`, creating the directory as needed.
/// `base_dir`: override the base directory (tests, `SITE_DATA_DIR`).
pub fn open_store(base_dir: Option<&Path>) -> Result<Store> {
    let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
    fs::create_dir_all(&base).map_err(|e| {
        StoreError::InvalidData(format!("failed to create {}: {e}", base.display()))
    })?;
    let path = base.join(DB_FILE);
    tracing::debug!("opening preference store at {}", path.display());
    Store::open(&path)
}
