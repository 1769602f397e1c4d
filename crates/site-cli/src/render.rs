//! Terminal and HTML rendering of catalog views.

use std::fmt::Write;

use pulldown_cmark::{Options, Parser, html};
use site_core::{Article, ViewPreference, millis_to_date};

const GRID_COLUMNS: usize = 3;
const GRID_CELL_WIDTH: usize = 30;

/// Render an article body (Markdown) to HTML for the detail view.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

pub fn render_list<'a>(articles: impl IntoIterator<Item = &'a Article>, mode: ViewPreference) -> String {
    let articles: Vec<&Article> = articles.into_iter().collect();
    if articles.is_empty() {
        return "(no articles)\n".to_string();
    }
    match mode {
        ViewPreference::Grid => render_grid(&articles),
        ViewPreference::List => render_rows(&articles),
    }
}

fn render_grid(articles: &[&Article]) -> String {
    let mut out = String::new();
    for row in articles.chunks(GRID_COLUMNS) {
        let titles: Vec<String> = row.iter().map(|a| cell(&a.title)).collect();
        let dates: Vec<String> = row
            .iter()
            .map(|a| cell(&format!("{} · #{}", millis_to_date(a.published_at), a.id)))
            .collect();
        let _ = writeln!(out, "{}", titles.join("  ").trim_end());
        let _ = writeln!(out, "{}", dates.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn render_rows(articles: &[&Article]) -> String {
    let mut out = String::new();
    for article in articles {
        let _ = writeln!(
            out,
            "{}  {:<4} {}",
            millis_to_date(article.published_at),
            format!("#{}", article.id),
            article.title
        );
        let _ = writeln!(out, "                 {}", meta_line(article));
        if !article.summary.is_empty() {
            let _ = writeln!(out, "                 {}", article.summary);
        }
    }
    out
}

pub fn render_detail<'a>(article: &Article, related: impl IntoIterator<Item = &'a Article>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", article.title);
    let _ = writeln!(out, "{}", "=".repeat(article.title.chars().count()));
    let _ = writeln!(
        out,
        "{} · {}",
        millis_to_date(article.published_at),
        meta_line(article)
    );
    let _ = writeln!(out, "/articles/{}", article.slug);
    if !article.summary.is_empty() {
        let _ = writeln!(out, "\n{}", article.summary);
    }
    if !article.content.is_empty() {
        let _ = writeln!(out, "\n{}", article.content.trim_end());
    }

    let related: Vec<&Article> = related.into_iter().collect();
    if !related.is_empty() {
        let _ = writeln!(out, "\nMore articles:");
        for other in related {
            let _ = writeln!(out, "  - {} (/articles/{})", other.title, other.slug);
        }
    }
    out
}

fn meta_line(article: &Article) -> String {
    let author = if article.author.is_empty() {
        "Studio"
    } else {
        article.author.as_str()
    };
    match article.estimated_read_minutes {
        Some(minutes) => format!("{author} · {minutes} min read"),
        None => author.to_string(),
    }
}

fn cell(text: &str) -> String {
    let count = text.chars().count();
    if count > GRID_CELL_WIDTH {
        let truncated: String = text.chars().take(GRID_CELL_WIDTH - 1).collect();
        format!("{truncated}…")
    } else {
        format!("{text:<GRID_CELL_WIDTH$}")
    }
}
