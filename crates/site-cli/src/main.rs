mod config;
mod console;
mod render;
mod server;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use site_core::{
    ArticleRouteController, Catalog, Lookup, NavigationOutcome, PreferenceStore, RouteReady,
    ScrollTrigger, SectionNavigator, ViewPreference, ViewState, build_catalog, default_articles,
    slug_param,
};
use site_store::Store;

use crate::config::SiteConfig;
use crate::console::ConsolePage;

const RELATED_COUNT: usize = 3;

#[derive(Parser)]
#[command(name = "site", about = "Agency site content catalog, view preference and navigation")]
struct Cli {
    /// Authored articles file (.toml or .json); overrides site.toml
    #[arg(long, global = true)]
    articles: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Listen address (default from site.toml, else 127.0.0.1:8787)
        #[arg(long)]
        bind: Option<String>,
    },

    /// List articles, most recent first
    List {
        /// Render as grid or list for this call only (default: saved preference)
        #[arg(long)]
        view: Option<String>,
    },

    /// Show one article by slug; unknown slugs fall back to the list
    Show {
        slug: String,
    },

    /// Show one article by numeric id
    FindId {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },

    /// Resolve a URL path the way the article page does
    Route {
        /// e.g. /articles/hello-world
        path: String,
    },

    /// Print or change the saved view preference
    View {
        /// grid, list or toggle
        mode: Option<String>,
    },

    /// Scroll to a home-page section from the given route
    Goto {
        /// Section id, e.g. services or testimonials
        section: String,

        /// Route the navigation starts from
        #[arg(long, default_value = "/")]
        from: String,
    },

    /// Export the built catalog to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },
}

fn data_dir() -> PathBuf {
    std::env::var("SITE_DATA_DIR")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(site_store::default_base_dir)
}

fn load_config() -> Result<SiteConfig> {
    SiteConfig::load(&data_dir())
}

fn open_store() -> Result<Store> {
    site_store::open_store(Some(&data_dir())).context("failed to open preference store")
}

fn load_catalog(cli: &Cli, config: &SiteConfig) -> Result<Arc<Catalog>> {
    let raw = match cli.articles.as_ref().or(config.articles.as_ref()) {
        Some(path) => site_store::load_articles_file(path)
            .with_context(|| format!("failed to load articles from {}", path.display()))?,
        None => default_articles(),
    };
    let catalog = build_catalog(raw).context("invalid article content")?;
    for (slug, ids) in catalog.slug_collisions() {
        tracing::warn!("slug '{slug}' shared by articles {ids:?}; only {} is reachable", ids[0]);
    }
    for id in catalog.unreachable_ids() {
        tracing::warn!("article {id} has a title with no slug characters; no URL reaches it");
    }
    tracing::debug!("catalog built with {} articles", catalog.len());
    Ok(Arc::new(catalog))
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config()?;

    match &cli.command {
        Commands::Serve { bind } => cmd_serve(&cli, &config, bind.as_deref()).await,
        Commands::List { view } => cmd_list(&cli, &config, view.as_deref()),
        Commands::Show { slug } => cmd_show(&cli, &config, slug),
        Commands::FindId { id } => cmd_find_id(&cli, &config, id),
        Commands::Route { path } => cmd_route(&cli, &config, path),
        Commands::View { mode } => cmd_view(mode.as_deref()),
        Commands::Goto { section, from } => cmd_goto(&config, section, from).await,
        Commands::Export { path } => cmd_export(&cli, &config, path),
    }
}

async fn cmd_serve(cli: &Cli, config: &SiteConfig, bind: Option<&str>) -> Result<()> {
    let catalog = load_catalog(cli, config)?;
    let store = open_store()?;
    let addr = bind.unwrap_or(&config.bind);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        "serving {} articles on http://{}",
        catalog.len(),
        listener.local_addr().context("listener has no local address")?
    );

    let state = server::AppState::new(catalog, store, config.settle_delay_ms);
    server::serve(listener, state)
        .await
        .context("server error")
}

fn cmd_list(cli: &Cli, config: &SiteConfig, view: Option<&str>) -> Result<()> {
    let catalog = load_catalog(cli, config)?;
    let mode = match view {
        Some(raw) => parse_mode(raw)?,
        None => {
            let store = open_store()?;
            PreferenceStore::open(&store).current()
        }
    };
    print!("{}", render::render_list(catalog.iter(), mode));
    Ok(())
}

fn cmd_show(cli: &Cli, config: &SiteConfig, slug: &str) -> Result<()> {
    let catalog = load_catalog(cli, config)?;
    let store = open_store()?;
    let page = ConsolePage::new(&site_core::article_path(slug), RouteReady::new(), false);
    let ctl = ArticleRouteController::mount(
        Arc::clone(&catalog),
        PreferenceStore::open(&store),
        &page,
        Some(slug),
    );
    print_view(&ctl)
}

fn cmd_find_id(cli: &Cli, config: &SiteConfig, id: &str) -> Result<()> {
    let catalog = load_catalog(cli, config)?;
    match catalog.find_by_id(id) {
        Lookup::Found(article) => {
            print!(
                "{}",
                render::render_detail(article, catalog.related(&article.slug, RELATED_COUNT))
            );
        }
        Lookup::NotFound => {
            eprintln!("no article with id '{id}'; showing all articles");
            let store = open_store()?;
            let mode = PreferenceStore::open(&store).current();
            print!("{}", render::render_list(catalog.iter(), mode));
        }
    }
    Ok(())
}

fn cmd_route(cli: &Cli, config: &SiteConfig, path: &str) -> Result<()> {
    let catalog = load_catalog(cli, config)?;
    let store = open_store()?;
    let page = ConsolePage::new(path, RouteReady::new(), false);
    let ctl = ArticleRouteController::mount(
        catalog,
        PreferenceStore::open(&store),
        &page,
        slug_param(path),
    );
    match ctl.state() {
        ViewState::DetailView(article) => println!("detail {} (#{})", article.slug, article.id),
        ViewState::ListView => println!("list ({})", ctl.view_mode()),
    }
    Ok(())
}

fn print_view<B, V>(ctl: &ArticleRouteController<B, V>) -> Result<()>
where
    B: site_core::PreferenceBackend,
    V: site_core::Viewport,
{
    match ctl.state() {
        ViewState::DetailView(article) => {
            let related = ctl.catalog().related(&article.slug, RELATED_COUNT);
            print!("{}", render::render_detail(article, related));
        }
        ViewState::ListView => {
            eprintln!("article not found; showing all articles");
            print!("{}", render::render_list(ctl.catalog().iter(), ctl.view_mode()));
        }
    }
    Ok(())
}

fn cmd_view(mode: Option<&str>) -> Result<()> {
    let store = open_store()?;
    let mut prefs = PreferenceStore::open(&store);

    let persisted = match mode {
        None => {
            println!("{}", prefs.current());
            return Ok(());
        }
        Some("toggle") => prefs.toggle().1,
        Some(raw) => prefs.save_preference(parse_mode(raw)?),
    };
    if !persisted {
        tracing::warn!("view preference could not be saved; using it for this run only");
    }
    println!("{}", prefs.current());
    Ok(())
}

async fn cmd_goto(config: &SiteConfig, section: &str, from: &str) -> Result<()> {
    let ready = RouteReady::new();
    let page = Arc::new(ConsolePage::new(from, ready.clone(), true));
    let navigator = SectionNavigator::new(Arc::clone(&page), Arc::clone(&page), ready)
        .with_settle_delay(Duration::from_millis(config.settle_delay_ms));

    match navigator.go_to_section(section, from) {
        NavigationOutcome::Scrolled => {}
        NavigationOutcome::Missing => println!("section #{section} not on this page; nothing to do"),
        NavigationOutcome::Deferred(pending) => {
            let attempt = pending.wait().await;
            let trigger = match attempt.trigger {
                ScrollTrigger::RouteReady => "route ready",
                ScrollTrigger::SettleDelay => "settle delay",
                ScrollTrigger::Aborted => "aborted",
            };
            if !attempt.scrolled {
                println!("section #{section} not found after {trigger}; nothing to do");
            } else {
                tracing::debug!("scrolled after {trigger}");
            }
        }
    }
    Ok(())
}

fn cmd_export(cli: &Cli, config: &SiteConfig, path: &Path) -> Result<()> {
    let catalog = load_catalog(cli, config)?;
    site_store::export_catalog_file(&catalog, path).context("failed to export catalog")?;
    println!("exported {} articles to {}", catalog.len(), path.display());
    Ok(())
}

fn parse_mode(raw: &str) -> Result<ViewPreference> {
    match ViewPreference::parse(raw) {
        Some(mode) => Ok(mode),
        None => bail!("unknown view mode '{raw}' (expected grid or list)"),
    }
}
