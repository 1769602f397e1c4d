//! Content core for the agency website.
//!
//! Article catalog (slugging, recency sort, id/slug lookup), the remembered
//! grid/list view preference, cross-route section navigation, and the
//! article route controller that ties them together.
//!
//! Zero I/O: storage, routing and scrolling are reached through traits.

pub mod article;
pub mod catalog;
pub mod constants;
pub mod content;
pub mod controller;
pub mod navigator;
pub mod preference;
pub mod slug;
pub mod time;

pub use article::{Article, PublishedAt, RawArticle, TimestampPolicy};
pub use catalog::{Catalog, CatalogError, Lookup, build_catalog};
pub use constants::{
    ARTICLES_ROUTE, HOME_ROUTE, PREFERENCE_KEY, RECENT_WINDOW_DAYS, SECTION_SERVICES,
    SECTION_TESTIMONIALS, SETTLE_DELAY_MS,
};
pub use content::default_articles;
pub use controller::{ArticleRouteController, ViewState, article_path, resolve_view, slug_param};
pub use navigator::{
    IntentKind, NavigationIntent, NavigationOutcome, PendingScroll, RouteReady, Router,
    ScrollAttempt, ScrollTrigger, SectionNavigator, Viewport, is_home_route, route_path,
};
pub use preference::{
    BackendError, MemoryBackend, PreferenceBackend, PreferenceStore, ViewPreference,
};
pub use slug::slugify;
pub use time::{millis_to_date, now_unix_millis};
