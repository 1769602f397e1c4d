//! Articles bundled with the site. Content authors edit this list, or point
//! the CLI at a TOML/JSON file with the same shape.

use crate::article::PublishedAt::{Fixed, Generated};
use crate::article::RawArticle;
use crate::article::TimestampPolicy::{Now, RandomRecent};

pub fn default_articles() -> Vec<RawArticle> {
    vec![
        RawArticle::new(1, "Designing Websites That Convert", Fixed(1_735_689_600_000))
            .with_summary("Five layout decisions that turn visitors into qualified leads.")
            .with_content(
                "## Start with the promise\n\n\
                 Visitors decide in seconds. The hero block should state what you do, \
                 for whom, and what happens next.\n\n\
                 ## Reduce the choices\n\n\
                 One primary call to action per screen. Secondary links live in the footer.",
            )
            .with_author("Maya Okafor")
            .with_images("/images/articles/convert-hero.jpg", Some("/images/articles/convert-cover.jpg"))
            .with_read_minutes(6)
            .with_tags(&["design", "conversion"]),
        RawArticle::new(2, "Motion Design Without the Motion Sickness", Fixed(1_738_368_000_000))
            .with_summary("Scroll-driven animation that supports content instead of fighting it.")
            .with_content(
                "Animation should explain hierarchy. Parallax layers move slower than \
                 content, entrances are short, and everything respects \
                 `prefers-reduced-motion`.\n\n\
                 - Keep durations under 400 ms\n\
                 - Animate opacity and transform only\n\
                 - Never block reading while something animates",
            )
            .with_author("Jonas Lind")
            .with_images("/images/articles/motion-hero.jpg", None)
            .with_read_minutes(5)
            .with_tags(&["design", "animation"]),
        RawArticle::new(3, "SEO Basics for Service Businesses", Fixed(1_740_787_200_000))
            .with_summary("The handful of technical fixes that matter before any content strategy.")
            .with_content(
                "Fast pages, descriptive titles, one `h1` per page, and a sitemap get you \
                 most of the way. **Local** businesses should claim their map listings first.",
            )
            .with_author("Priya Raman")
            .with_images("/images/articles/seo-hero.jpg", Some("/images/articles/seo-cover.jpg"))
            .with_read_minutes(7)
            .with_tags(&["seo", "marketing"]),
        RawArticle::new(4, "How We Run a Brand Sprint", Generated(RandomRecent))
            .with_summary("A five-day format for aligning founders on voice, values and visuals.")
            .with_content(
                "Day one is listening. Day two is positioning. Days three to five turn \
                 words into a mood board, a type scale and a first landing page.",
            )
            .with_author("Maya Okafor")
            .with_images("/images/articles/sprint-hero.jpg", None)
            .with_read_minutes(4)
            .with_tags(&["branding", "process"]),
        RawArticle::new(5, "Why Your Site Needs a Content Calendar", Generated(RandomRecent))
            .with_summary("Consistency beats volume. A calendar keeps both honest.")
            .with_content(
                "Plan themes per quarter, topics per month, and posts per week. \
                 Review what performed and feed it back into the next quarter.",
            )
            .with_author("Priya Raman")
            .with_images("/images/articles/calendar-hero.jpg", None)
            .with_read_minutes(3)
            .with_tags(&["marketing", "content"]),
        RawArticle::new(6, "Studio Notes: What We Shipped This Month", Generated(Now))
            .with_summary("Launches, experiments and lessons from the studio floor.")
            .with_content(
                "We launched two e-commerce rebuilds, a booking flow for a clinic, and \
                 a WebGL hero that degrades gracefully on low-power devices.",
            )
            .with_author("Studio Team")
            .with_images("/images/articles/notes-hero.jpg", Some("/images/articles/notes-cover.jpg"))
            .with_read_minutes(2)
            .with_tags(&["studio"]),
    ]
}
