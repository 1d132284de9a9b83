//! Minimal prelude for SDK consumers.

pub use crate::catalog::{find_project, sitemap, PresetKey, Project, Route, Router, PROJECTS};
pub use crate::config::{viewer_config, ViewerConfig};
pub use crate::navigation::{Direction, NavigateRequest, Navigator, View};
pub use crate::sdk::ViewerBuilder;
