//! Decides between the article list and a single article from the URL slug.
//!
//! An unresolvable slug is never an error page; it degrades to the list.

use std::sync::Arc;

use crate::article::Article;
use crate::catalog::{Catalog, Lookup};
use crate::constants::ARTICLES_ROUTE;
use crate::navigator::{Viewport, route_path};
use crate::preference::{PreferenceBackend, PreferenceStore, ViewPreference};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    ListView,
    DetailView(Article),
}

impl ViewState {
    pub fn is_list(&self) -> bool {
        matches!(self, ViewState::ListView)
    }

    pub fn article(&self) -> Option<&Article> {
        match self {
            ViewState::ListView => None,
            ViewState::DetailView(article) => Some(article),
        }
    }
}

/// `DetailView` iff `slug` is present and names a catalog article.
pub fn resolve_view(catalog: &Catalog, slug: Option<&str>) -> ViewState {
    match slug.map(|s| catalog.find_by_slug(s)) {
        Some(Lookup::Found(article)) => ViewState::DetailView(article.clone()),
        _ => ViewState::ListView,
    }
}

/// Extract the slug parameter from an `/articles/{slug}` path.
/// The bare articles route, other routes, and nested paths carry no slug.
pub fn slug_param(path: &str) -> Option<&str> {
    let rest = route_path(path).strip_prefix(ARTICLES_ROUTE)?.strip_prefix('/')?;
    if rest.is_empty() || rest.contains('/') {
        None
    } else {
        Some(rest)
    }
}

pub fn article_path(slug: &str) -> String {
    format!("{ARTICLES_ROUTE}/{slug}")
}

pub struct ArticleRouteController<B, V> {
    catalog: Arc<Catalog>,
    preferences: PreferenceStore<B>,
    viewport: V,
    state: ViewState,
}

impl<B: PreferenceBackend, V: Viewport> ArticleRouteController<B, V> {
    /// Resolve the initial state from the URL slug and reset scroll.
    pub fn mount(
        catalog: Arc<Catalog>,
        preferences: PreferenceStore<B>,
        viewport: V,
        slug: Option<&str>,
    ) -> Self {
        let state = resolve_view(&catalog, slug);
        viewport.scroll_to_top();
        Self {
            catalog,
            preferences,
            viewport,
            state,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view_mode(&self) -> ViewPreference {
        self.preferences.current()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// User picked an article from the list. Returns whether it resolved.
    pub fn select_article(&mut self, slug: &str) -> bool {
        match resolve_view(&self.catalog, Some(slug)) {
            ViewState::ListView => false,
            detail => {
                self.transition(detail);
                true
            }
        }
    }

    /// Leave the detail view.
    pub fn back(&mut self) {
        if !self.state.is_list() {
            self.transition(ViewState::ListView);
        }
    }

    /// The URL slug changed (link, back/forward). Always resets scroll.
    pub fn on_route_change(&mut self, slug: Option<&str>) -> &ViewState {
        let next = resolve_view(&self.catalog, slug);
        self.transition(next);
        &self.state
    }

    /// Flip grid/list. Only meaningful in the list view; `None` otherwise.
    pub fn toggle_view_mode(&mut self) -> Option<ViewPreference> {
        if !self.state.is_list() {
            return None;
        }
        let (mode, _persisted) = self.preferences.toggle();
        Some(mode)
    }

    pub fn set_view_mode(&mut self, mode: ViewPreference) -> Option<ViewPreference> {
        if !self.state.is_list() {
            return None;
        }
        self.preferences.save_preference(mode);
        Some(mode)
    }

    fn transition(&mut self, next: ViewState) {
        self.state = next;
        self.viewport.scroll_to_top();
    }
}
