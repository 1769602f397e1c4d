//! Scrolling to named in-page sections, across routes when needed.
//!
//! Every anchor section lives on the home route. From any other route the
//! navigator first asks the router for home, then waits for the page layer to
//! report that home finished mounting ([`RouteReady`]). The settle delay only
//! bounds that wait, so slow mounts still get a scroll attempt.
//!
//! A newer navigation never cancels an older pending scroll; both run.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::constants::{HOME_ROUTE, SETTLE_DELAY_MS};

/// Route-change capability provided by the routing layer.
pub trait Router: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Scroll capability provided by the rendering layer.
pub trait Viewport: Send + Sync {
    /// Smoothly scroll to the element with `id`. Returns `false` when no such
    /// element is currently mounted.
    fn scroll_to_element(&self, id: &str) -> bool;

    /// Smoothly scroll to the top of the page.
    fn scroll_to_top(&self);
}

impl<T: Router + ?Sized> Router for Arc<T> {
    fn navigate(&self, route: &str) {
        (**self).navigate(route)
    }
}

impl<T: Viewport + ?Sized> Viewport for &T {
    fn scroll_to_element(&self, id: &str) -> bool {
        (**self).scroll_to_element(id)
    }

    fn scroll_to_top(&self) {
        (**self).scroll_to_top()
    }
}

impl<T: Viewport + ?Sized> Viewport for Arc<T> {
    fn scroll_to_element(&self, id: &str) -> bool {
        (**self).scroll_to_element(id)
    }

    fn scroll_to_top(&self) {
        (**self).scroll_to_top()
    }
}

/// Path portion of a route, without query or fragment and without a trailing slash.
pub fn route_path(route: &str) -> &str {
    let end = route.find(['?', '#']).unwrap_or(route.len());
    let path = route[..end].trim_end_matches('/');
    if path.is_empty() { HOME_ROUTE } else { path }
}

pub fn is_home_route(route: &str) -> bool {
    route_path(route) == HOME_ROUTE
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntentKind {
    /// The section is on the current route.
    Local,
    /// The home route must be loaded before scrolling.
    CrossRoute { from: String },
}

/// A requested scroll target, alive for one user action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationIntent {
    pub section_id: String,
    pub kind: IntentKind,
}

impl NavigationIntent {
    pub fn resolve(section_id: &str, current_route: &str) -> Self {
        let kind = if is_home_route(current_route) {
            IntentKind::Local
        } else {
            IntentKind::CrossRoute {
                from: route_path(current_route).to_string(),
            }
        };
        Self {
            section_id: section_id.to_string(),
            kind,
        }
    }

    /// Interpret a header/footer link such as `/#services` or `#testimonials`.
    /// Links without a fragment, or pointing at a fragment on another page,
    /// are ordinary route changes and yield `None`.
    pub fn from_href(href: &str, current_route: &str) -> Option<Self> {
        let (path, fragment) = href.split_once('#')?;
        if fragment.is_empty() {
            return None;
        }
        if !path.is_empty() && !is_home_route(path) {
            return None;
        }
        Some(Self::resolve(fragment, current_route))
    }

    pub fn needs_route_change(&self) -> bool {
        matches!(self.kind, IntentKind::CrossRoute { .. })
    }
}

/// One-shot "route finished mounting" notifications from the page layer.
///
/// Cloning shares the same signal.
#[derive(Clone, Debug)]
pub struct RouteReady {
    tx: Arc<watch::Sender<Option<String>>>,
}

impl Default for RouteReady {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteReady {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Report that `route` completed its initial mount.
    pub fn mounted(&self, route: &str) {
        self.tx.send_replace(Some(route_path(route).to_string()));
    }

    /// Last route reported as mounted, if any.
    pub fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    fn clear(&self) {
        self.tx.send_replace(None);
    }

    fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollTrigger {
    /// The destination reported it was mounted.
    RouteReady,
    /// The settle delay ran out first.
    SettleDelay,
    /// The deferred task did not complete.
    Aborted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollAttempt {
    pub scrolled: bool,
    pub trigger: ScrollTrigger,
}

/// A deferred cross-route scroll. Dropping it does not cancel the scroll.
#[derive(Debug)]
pub struct PendingScroll {
    handle: JoinHandle<ScrollAttempt>,
}

impl PendingScroll {
    pub async fn wait(self) -> ScrollAttempt {
        self.handle.await.unwrap_or(ScrollAttempt {
            scrolled: false,
            trigger: ScrollTrigger::Aborted,
        })
    }
}

#[derive(Debug)]
pub enum NavigationOutcome {
    /// Scrolled on the current route.
    Scrolled,
    /// On the current route, but the section is not mounted. Nothing happened.
    Missing,
    /// Navigated home; the scroll follows once home is ready.
    Deferred(PendingScroll),
}

pub struct SectionNavigator<R, V> {
    router: Arc<R>,
    viewport: Arc<V>,
    ready: RouteReady,
    settle_delay: Duration,
}

impl<R, V> SectionNavigator<R, V>
where
    R: Router + 'static,
    V: Viewport + 'static,
{
    pub fn new(router: Arc<R>, viewport: Arc<V>, ready: RouteReady) -> Self {
        Self {
            router,
            viewport,
            ready,
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Scroll to `section_id`, loading the home route first when
    /// `current_route` is elsewhere. Must run inside a Tokio runtime.
    pub fn go_to_section(&self, section_id: &str, current_route: &str) -> NavigationOutcome {
        self.follow(NavigationIntent::resolve(section_id, current_route))
    }

    pub fn follow(&self, intent: NavigationIntent) -> NavigationOutcome {
        match intent.kind {
            IntentKind::Local => {
                if self.viewport.scroll_to_element(&intent.section_id) {
                    NavigationOutcome::Scrolled
                } else {
                    NavigationOutcome::Missing
                }
            }
            IntentKind::CrossRoute { .. } => {
                // Forget any earlier mount so only a fresh home mount counts.
                self.ready.clear();
                let mut rx = self.ready.subscribe();
                self.router.navigate(HOME_ROUTE);

                let viewport = Arc::clone(&self.viewport);
                let settle_delay = self.settle_delay;
                let section_id = intent.section_id;
                let handle = tokio::spawn(async move {
                    // Release the watch borrow before scrolling; the viewport may report mounts.
                    let ready = tokio::time::timeout(settle_delay, async {
                        rx.wait_for(|mounted| mounted.as_deref() == Some(HOME_ROUTE))
                            .await
                            .is_ok()
                    })
                    .await;
                    let trigger = match ready {
                        Ok(true) => ScrollTrigger::RouteReady,
                        _ => ScrollTrigger::SettleDelay,
                    };
                    ScrollAttempt {
                        scrolled: viewport.scroll_to_element(&section_id),
                        trigger,
                    }
                });
                NavigationOutcome::Deferred(PendingScroll { handle })
            }
        }
    }
}
