//! Static catalog: projects, material presets, routes, and the sitemap.

mod materials;
mod projects;
mod routes;

use thiserror::Error;

pub use materials::{MaterialPreset, PresetKey, EnvPreset, MATERIAL_PRESETS};
pub use projects::{find_project, Project, PROJECTS};
pub use routes::{sitemap, ChangeFrequency, Route, Router, SitemapEntry};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no project with id {0:?}")]
    UnknownProject(String),
    #[error("no material preset named {0:?}")]
    UnknownPreset(String),
}
