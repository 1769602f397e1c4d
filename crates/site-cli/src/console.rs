//! Terminal stand-in for the browser page: routing, mount notifications and scrolling.

use std::sync::Mutex;

use site_core::{
    HOME_ROUTE, RouteReady, Router, SECTION_SERVICES, SECTION_TESTIMONIALS, Viewport,
    is_home_route, route_path,
};

/// Sections mounted by the home route.
pub const HOME_SECTIONS: [&str; 2] = [SECTION_SERVICES, SECTION_TESTIMONIALS];

/// A page whose route changes mount synchronously and report readiness.
pub struct ConsolePage {
    route: Mutex<String>,
    ready: RouteReady,
    echo: bool,
}

impl ConsolePage {
    pub fn new(route: &str, ready: RouteReady, echo: bool) -> Self {
        let route = route_path(route).to_string();
        ready.mounted(&route);
        Self {
            route: Mutex::new(route),
            ready,
            echo,
        }
    }

    pub fn current_route(&self) -> String {
        self.route
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|_| HOME_ROUTE.to_string())
    }

    fn say(&self, line: &str) {
        if self.echo {
            println!("{line}");
        }
        tracing::debug!("{line}");
    }
}

impl Router for ConsolePage {
    fn navigate(&self, route: &str) {
        let path = route_path(route).to_string();
        self.say(&format!("navigate {path}"));
        if let Ok(mut current) = self.route.lock() {
            *current = path.clone();
        }
        self.ready.mounted(&path);
    }
}

impl Viewport for ConsolePage {
    fn scroll_to_element(&self, id: &str) -> bool {
        let mounted = is_home_route(&self.current_route()) && HOME_SECTIONS.contains(&id);
        if mounted {
            self.say(&format!("scroll #{id}"));
        }
        mounted
    }

    fn scroll_to_top(&self) {
        self.say("scroll top");
    }
}
