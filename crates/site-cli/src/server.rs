//! JSON API consumed by the browser front end.
//!
//! Unknown slugs and ids are not errors here either: they answer with the
//! list view, exactly like the in-page route controller.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use site_core::{
    Article, Catalog, HOME_ROUTE, Lookup, NavigationIntent, PreferenceStore, SECTION_SERVICES,
    SECTION_TESTIMONIALS, ViewPreference, ViewState, millis_to_date, resolve_view,
};
use site_store::Store;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::render::markdown_to_html;

const RELATED_COUNT: usize = 3;
const TEASER_COUNT: usize = 3;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    preferences: Arc<Mutex<PreferenceStore<Store>>>,
    settle_delay_ms: u64,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, store: Store, settle_delay_ms: u64) -> Self {
        Self {
            catalog,
            preferences: Arc::new(Mutex::new(PreferenceStore::open(store))),
            settle_delay_ms,
        }
    }

    /// Flush the preference database WAL before exit.
    pub async fn checkpoint_wal(&self) {
        let prefs = self.preferences.lock().await;
        if let Err(e) = prefs.backend().checkpoint_truncate() {
            tracing::warn!("WAL checkpoint failed: {e}");
            return;
        }
        tracing::info!("WAL checkpoint complete");
    }
}

// --- Response types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArticleCard {
    id: u32,
    title: String,
    slug: String,
    published_at: i64,
    date: String,
    summary: String,
    image_url: String,
    estimated_read_minutes: Option<u32>,
    author: String,
    tags: Vec<String>,
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            slug: article.slug.clone(),
            published_at: article.published_at,
            date: millis_to_date(article.published_at),
            summary: article.summary.clone(),
            image_url: article.card_image_url().to_string(),
            estimated_read_minutes: article.estimated_read_minutes,
            author: article.author.clone(),
            tags: article.tags.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
enum ViewResponse {
    List {
        mode: ViewPreference,
        articles: Vec<ArticleCard>,
    },
    Detail {
        article: Article,
        #[serde(rename = "contentHtml")]
        content_html: String,
        related: Vec<ArticleCard>,
    },
}

/// Home page payload: the latest-articles teaser and the anchor sections.
#[derive(Debug, Serialize)]
struct HomeResponse {
    latest: Vec<ArticleCard>,
    sections: [&'static str; 2],
}

#[derive(Debug, Serialize)]
struct PreferenceResponse {
    mode: ViewPreference,
    persisted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionPlan {
    section: String,
    /// Route to load first; `None` when already on the home route.
    navigate: Option<&'static str>,
    settle_delay_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

// --- Request types ---

#[derive(Debug, Deserialize)]
struct ListQuery {
    view: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PreferenceRequest {
    mode: String,
}

#[derive(Debug, Deserialize)]
struct SectionQuery {
    from: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/home", get(home))
        .route("/api/articles", get(list_articles))
        .route("/api/articles/{slug}", get(get_article))
        .route("/api/articles/by-id/{id}", get(get_article_by_id))
        .route("/api/preference", get(get_preference).put(put_preference))
        .route("/api/preference/toggle", post(toggle_preference))
        .route("/api/sections/{id}", get(section_plan))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until Ctrl-C, then checkpoint the preference store.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let app = router(state.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    state.checkpoint_wal().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

async fn health() -> &'static str {
    "ok"
}

async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        latest: state
            .catalog
            .latest(TEASER_COUNT)
            .iter()
            .map(ArticleCard::from)
            .collect(),
        sections: [SECTION_SERVICES, SECTION_TESTIMONIALS],
    })
}

async fn list_view(state: &AppState, mode_override: Option<ViewPreference>) -> ViewResponse {
    let mode = match mode_override {
        Some(mode) => mode,
        None => state.preferences.lock().await.current(),
    };
    ViewResponse::List {
        mode,
        articles: state.catalog.iter().map(ArticleCard::from).collect(),
    }
}

fn detail_view(catalog: &Catalog, article: Article) -> ViewResponse {
    let related = catalog
        .related(&article.slug, RELATED_COUNT)
        .into_iter()
        .map(ArticleCard::from)
        .collect();
    ViewResponse::Detail {
        content_html: markdown_to_html(&article.content),
        article,
        related,
    }
}

async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ViewResponse> {
    let mode = query.view.as_deref().and_then(ViewPreference::parse);
    Json(list_view(&state, mode).await)
}

async fn get_article(State(state): State<AppState>, Path(slug): Path<String>) -> Json<ViewResponse> {
    match resolve_view(&state.catalog, Some(&slug)) {
        ViewState::DetailView(article) => Json(detail_view(&state.catalog, article)),
        ViewState::ListView => {
            tracing::debug!("unknown slug '{slug}', serving list view");
            Json(list_view(&state, None).await)
        }
    }
}

async fn get_article_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ViewResponse> {
    match state.catalog.find_by_id(&id) {
        Lookup::Found(article) => Json(detail_view(&state.catalog, article.clone())),
        Lookup::NotFound => {
            tracing::debug!("unknown article id '{id}', serving list view");
            Json(list_view(&state, None).await)
        }
    }
}

async fn get_preference(State(state): State<AppState>) -> Json<PreferenceResponse> {
    let prefs = state.preferences.lock().await;
    Json(PreferenceResponse {
        mode: prefs.current(),
        persisted: prefs.persisted(),
    })
}

async fn put_preference(
    State(state): State<AppState>,
    Json(req): Json<PreferenceRequest>,
) -> Response {
    let Some(mode) = ViewPreference::parse(&req.mode) else {
        let body = ErrorBody {
            error: format!("unknown view mode '{}' (expected grid or list)", req.mode),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };
    let mut prefs = state.preferences.lock().await;
    let persisted = prefs.save_preference(mode);
    if !persisted {
        tracing::warn!("view preference kept in memory only");
    }
    Json(PreferenceResponse { mode, persisted }).into_response()
}

async fn toggle_preference(State(state): State<AppState>) -> Json<PreferenceResponse> {
    let mut prefs = state.preferences.lock().await;
    let (mode, persisted) = prefs.toggle();
    if !persisted {
        tracing::warn!("view preference kept in memory only");
    }
    Json(PreferenceResponse { mode, persisted })
}

async fn section_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SectionQuery>,
) -> Json<SectionPlan> {
    let from = query.from.as_deref().unwrap_or(HOME_ROUTE);
    let intent = NavigationIntent::resolve(&id, from);
    Json(SectionPlan {
        navigate: intent.needs_route_change().then_some(HOME_ROUTE),
        section: intent.section_id,
        settle_delay_ms: state.settle_delay_ms,
    })
}
