//! Folio model viewer: project gallery and 3D CAD model pages.
//!
//! Library root: catalog, config, navigation state, and the SDK builder.

pub mod camera;
pub mod catalog;
pub mod config;
pub mod navigation;
pub mod pages;
pub mod scene;
mod ui;

pub mod prelude;
pub mod sdk;

pub use catalog::{sitemap, Route, Router, SitemapEntry};
pub use navigation::{Direction, Navigator, View};
