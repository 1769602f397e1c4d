/// Route that hosts every in-page anchor section
pub const HOME_ROUTE: &str = "/";

/// Route prefix for the article catalog; detail pages live at `/articles/{slug}`
pub const ARTICLES_ROUTE: &str = "/articles";

/// Anchor id of the services section on the home route
pub const SECTION_SERVICES: &str = "services";

/// Anchor id of the testimonials section on the home route
pub const SECTION_TESTIMONIALS: &str = "testimonials";

/// Durable storage key for the article view preference
pub const PREFERENCE_KEY: &str = "articleViewPreference";

/// Fallback wait before a cross-route scroll when no route-ready signal arrives (ms)
pub const SETTLE_DELAY_MS: u64 = 450;

/// Window for the random-recent timestamp policy (days before build time)
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Milliseconds per day
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
