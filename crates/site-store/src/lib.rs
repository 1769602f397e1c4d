pub mod content;
pub mod data_dir;
pub mod error;
pub mod schema;
pub mod store;

pub use content::{
    ContentFormat, export_catalog_file, export_catalog_json, load_articles_file,
    load_articles_str,
};
pub use data_dir::{DB_FILE, default_base_dir, open_store};
pub use error::{Result, StoreError};
pub use store::Store;
