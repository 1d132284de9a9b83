//! SDK entry points and builder for composing the viewer app.

use bevy::prelude::*;

use crate::camera::{orbit_input_plugin, orbit_rig_plugin, spawn_rig_camera};
use crate::catalog::{Route, Router};
use crate::config::{self, ViewerConfig};
use crate::navigation::{viewpoint_plugin, OvershootRng};
use crate::pages::pages_plugin;
use crate::scene::{model_scene_plugin, ActiveMaterial, DefaultMaterial};
use crate::ui::ui_plugin;

/// Builder for constructing the viewer app with customizable plugins.
pub struct ViewerBuilder {
    config: Option<ViewerConfig>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_orbit_input: bool,
    enable_viewpoints: bool,
    enable_material_selector: bool,
}

impl Default for ViewerBuilder {
    fn default() -> Self {
        Self {
            config: None,
            window_title: "Folio".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.05, 0.05, 0.08),
            enable_orbit_input: true,
            enable_viewpoints: true,
            enable_material_selector: true,
        }
    }
}

impl ViewerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration instead of reading the environment.
    pub fn config(mut self, config: ViewerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load `.env` if present, then read the configuration from the environment.
    pub fn from_env(mut self) -> Self {
        let _ = dotenvy::dotenv();
        self.config = Some(config::viewer_config());
        self
    }

    /// Open this path instead of the configured start route.
    pub fn start_route(mut self, path: impl Into<String>) -> Self {
        let mut config = self.config.take().unwrap_or_default();
        config.start_route = path.into();
        self.config = Some(config);
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_orbit_input(mut self) -> Self {
        self.enable_orbit_input = false;
        self
    }

    pub fn disable_viewpoints(mut self) -> Self {
        self.enable_viewpoints = false;
        self
    }

    pub fn disable_material_selector(mut self) -> Self {
        self.enable_material_selector = false;
        self
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(self) -> App {
        let config = self.config.unwrap_or_else(config::viewer_config);
        let start = Route::parse(&config.start_route);
        let rng = match config.cube_seed {
            Some(seed) => OvershootRng::seeded(seed),
            None => OvershootRng::from_entropy(),
        };

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(Router::new(start))
        .insert_resource(ActiveMaterial(config.material))
        .insert_resource(DefaultMaterial(config.material))
        .insert_resource(rng)
        .add_plugins((pages_plugin, orbit_rig_plugin, viewpoint_plugin, model_scene_plugin))
        .add_systems(Startup, setup_camera);

        ui_plugin(
            &mut app,
            self.enable_viewpoints,
            self.enable_material_selector,
        );
        if self.enable_orbit_input {
            app.add_plugins(orbit_input_plugin);
        }

        app
    }
}

fn setup_camera(mut commands: Commands) {
    spawn_rig_camera(&mut commands);
}
