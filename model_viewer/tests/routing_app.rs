//! Headless app: routes driving the page state.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use model_viewer::catalog::{Route, Router};
use model_viewer::pages::{pages_plugin, OpenProject, Page};

fn headless_app(start: &str) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(Router::new(Route::parse(start)))
        .add_plugins(pages_plugin);
    // One frame to request the page, one to enter it.
    app.update();
    app.update();
    app
}

fn page(app: &App) -> Page {
    *app.world().resource::<State<Page>>().get()
}

fn open_project_id(app: &App) -> Option<&'static str> {
    app.world().get_resource::<OpenProject>().map(|p| p.0.id)
}

#[test]
fn home_shows_the_gallery() {
    let app = headless_app("/");
    assert_eq!(page(&app), Page::Gallery);
    assert_eq!(open_project_id(&app), None);
}

#[test]
fn deep_link_opens_the_project() {
    let app = headless_app("/project/laptop-stand/");
    assert_eq!(page(&app), Page::Project);
    assert_eq!(open_project_id(&app), Some("laptop-stand"));
}

#[test]
fn unknown_paths_show_not_found() {
    let app = headless_app("/project/perpetual-motion");
    assert_eq!(page(&app), Page::NotFound);
    assert_eq!(open_project_id(&app), None);
}

#[test]
fn switching_projects_keeps_the_project_page() {
    let mut app = headless_app("/project/laptop-stand");
    app.world_mut()
        .resource_mut::<Router>()
        .navigate(Route::parse("/project/cycloidal-actuator"));
    app.update();
    app.update();

    assert_eq!(page(&app), Page::Project);
    assert_eq!(open_project_id(&app), Some("cycloidal-actuator"));
}

#[test]
fn escape_from_a_deep_link_returns_home() {
    let mut app = headless_app("/project/cycloidal-actuator");

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Escape);
    app.update();
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(KeyCode::Escape);
        keys.clear();
    }
    app.update();

    assert_eq!(page(&app), Page::Gallery);
    assert_eq!(open_project_id(&app), None);
    assert!(!app.world().resource::<Router>().can_go_back());
}
