//! Page state driven by the [`Router`]: gallery, project view, or not found.

use bevy::prelude::*;

use crate::catalog::{Project, Route, Router};

#[derive(States, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Gallery,
    Project,
    NotFound,
}

impl Page {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Home => Page::Gallery,
            Route::Project(_) => Page::Project,
            Route::NotFound(_) => Page::NotFound,
        }
    }
}

/// The project on screen while in [`Page::Project`].
#[derive(Resource, Debug, Clone, Copy)]
pub struct OpenProject(pub &'static Project);

pub fn pages_plugin(app: &mut App) {
    app.init_state::<Page>()
        .init_resource::<Router>()
        .add_systems(Update, (escape_goes_back, sync_page_with_router).chain());
}

fn escape_goes_back(keys: Res<ButtonInput<KeyCode>>, mut router: ResMut<Router>) {
    if keys.just_pressed(KeyCode::Escape) && router.can_go_back() {
        router.back();
    }
}

fn sync_page_with_router(
    router: Res<Router>,
    mut commands: Commands,
    mut next_page: ResMut<NextState<Page>>,
) {
    if !router.is_changed() {
        return;
    }
    let route = router.current();
    info!("route {route}");

    match route.project() {
        Some(project) => {
            commands.insert_resource(OpenProject(project));
        }
        None => {
            commands.remove_resource::<OpenProject>();
        }
    }
    next_page.set(Page::for_route(route));
}
