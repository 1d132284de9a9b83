//! Model scene: lights, project model lifecycle, and material presets.

mod materials;
mod model;

use bevy::prelude::*;

use crate::camera::RigSet;
use crate::navigation::cancel_navigator;
use crate::pages::Page;

pub use materials::{apply_material_preset, ActiveMaterial, DefaultMaterial};
pub use model::{
    model_scene_path, reset_on_project_open, world_bounds, ModelRoot, ModelScene,
    PreloadedModels, SceneError, SceneStatus,
};

pub fn model_scene_plugin(app: &mut App) {
    app.init_resource::<ModelScene>()
        .init_resource::<PreloadedModels>()
        .init_resource::<ActiveMaterial>()
        .init_resource::<DefaultMaterial>()
        .add_systems(Startup, (model::spawn_lights, model::preload_models))
        .add_systems(
            Update,
            (
                reset_on_project_open,
                model::spawn_open_project,
                model::watch_model_load,
                model::finish_fit,
                model::refit_on_resize,
                apply_material_preset,
            )
                .chain()
                .after(RigSet)
                .run_if(in_state(Page::Project)),
        )
        .add_systems(OnExit(Page::Project), (model::despawn_model, cancel_navigator));
}
