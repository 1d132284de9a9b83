//! Page addresses, back-navigation history, and the sitemap.

use std::fmt;

use bevy::prelude::*;
use serde::Serialize;
use url::Url;

use super::projects::{find_project, Project, PROJECTS};

const PROJECT_PREFIX: &str = "/project/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Project(&'static Project),
    NotFound(String),
}

impl Route {
    /// Resolve a path. Unknown projects and any other path are `NotFound`.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        if normalized == "/" {
            return Route::Home;
        }
        match normalized.strip_prefix(PROJECT_PREFIX) {
            Some(id) if !id.contains('/') => match find_project(id) {
                Ok(project) => Route::Project(project),
                Err(_) => Route::NotFound(trimmed.to_string()),
            },
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Project(project) => format!("{PROJECT_PREFIX}{}", project.id),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn project(&self) -> Option<&'static Project> {
        match self {
            Route::Project(project) => Some(project),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current route plus the stack of routes behind it.
#[derive(Resource, Debug)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }

    /// Pop one entry. A router opened deep falls back to Home. Returns
    /// whether the route changed.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None if self.current != Route::Home => {
                self.current = Route::Home;
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty() || self.current != Route::Home
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Home first, then one entry per project.
pub fn sitemap(base: &Url) -> Vec<SitemapEntry> {
    let root = base.as_str().trim_end_matches('/').to_string();
    let home = SitemapEntry {
        url: root.clone(),
        change_frequency: ChangeFrequency::Weekly,
        priority: 1.0,
    };
    std::iter::once(home)
        .chain(PROJECTS.iter().map(|project| SitemapEntry {
            url: format!("{root}{PROJECT_PREFIX}{}", project.id),
            change_frequency: ChangeFrequency::Monthly,
            priority: 0.8,
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_home_and_projects() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        let route = Route::parse("/project/laptop-stand/");
        assert_eq!(route.project().map(|p| p.id), Some("laptop-stand"));
        assert_eq!(route.path(), "/project/laptop-stand");
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(
            Route::parse("/project/warp-drive"),
            Route::NotFound("/project/warp-drive".into())
        );
        assert!(matches!(Route::parse("/about"), Route::NotFound(_)));
        assert!(matches!(
            Route::parse("/project/laptop-stand/extra"),
            Route::NotFound(_)
        ));
    }

    #[test]
    fn back_walks_history_then_falls_back_home() {
        let mut router = Router::new(Route::parse("/project/laptop-stand"));
        router.navigate(Route::parse("/project/cycloidal-actuator"));

        assert!(router.back());
        assert_eq!(router.current().path(), "/project/laptop-stand");
        assert!(router.back());
        assert_eq!(router.current(), &Route::Home);
        assert!(!router.back());
        assert!(!router.can_go_back());
    }

    #[test]
    fn navigating_to_current_route_keeps_history_flat() {
        let mut router = Router::default();
        router.navigate(Route::Home);
        assert!(!router.can_go_back());
    }

    #[test]
    fn sitemap_lists_home_then_projects() {
        let base = Url::parse("https://example.dev/").unwrap();
        let entries = sitemap(&base);
        assert_eq!(entries.len(), PROJECTS.len() + 1);
        assert_eq!(entries[0].url, "https://example.dev");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[1].url, "https://example.dev/project/laptop-stand");
        assert_eq!(entries[1].change_frequency, ChangeFrequency::Monthly);

        let json = serde_json::to_value(&entries[1]).unwrap();
        assert_eq!(json["changeFrequency"], "monthly");
    }
}
