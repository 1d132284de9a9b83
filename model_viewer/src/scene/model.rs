//! Project model lifecycle: load, center, fit the rig, refit on resize.

use bevy::asset::{AssetPath, LoadState};
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::window::WindowResized;
use thiserror::Error;

use crate::camera::{CameraCommand, RigSettled};
use crate::catalog::{Project, PROJECTS};
use crate::navigation::ViewpointsReset;
use crate::pages::OpenProject;
use crate::scene::materials::{ActiveMaterial, DefaultMaterial};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("failed to load {path}: {reason}")]
    AssetLoad { path: String, reason: String },
}

/// Marker on the entity that owns the spawned glTF scene.
#[derive(Component)]
pub struct ModelRoot;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SceneStatus {
    #[default]
    Idle,
    Loading,
    /// Bounds known and centered; waiting for the animated fit to settle.
    Fitting { half_extents: Vec3 },
    Fitted { half_extents: Vec3 },
    Failed(SceneError),
}

impl SceneStatus {
    pub fn half_extents(&self) -> Option<Vec3> {
        match self {
            SceneStatus::Fitting { half_extents } | SceneStatus::Fitted { half_extents } => {
                Some(*half_extents)
            }
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.half_extents().is_some()
    }
}

/// The model currently on screen, if any.
#[derive(Resource, Debug, Default)]
pub struct ModelScene {
    pub project: Option<&'static Project>,
    pub root: Option<Entity>,
    pub handle: Option<Handle<Scene>>,
    pub status: SceneStatus,
}

/// Every project's model, held from startup so opening a card finds it loaded.
#[derive(Resource, Debug, Default)]
pub struct PreloadedModels(pub Vec<Handle<Scene>>);

/// The scene asset the project page spawns for `project`.
pub fn model_scene_path(project: &Project) -> AssetPath<'static> {
    GltfAssetLabel::Scene(0).from_asset(project.model_path)
}

fn preload_paths() -> Vec<AssetPath<'static>> {
    PROJECTS.iter().map(model_scene_path).collect()
}

pub fn preload_models(asset_server: Res<AssetServer>, mut preloaded: ResMut<PreloadedModels>) {
    preloaded.0 = preload_paths()
        .into_iter()
        .map(|path| asset_server.load(path))
        .collect();
    debug!("preloading {} models", preloaded.0.len());
}

pub fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        PointLight {
            intensity: 1_500_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0),
    ));
    commands.spawn((
        SpotLight {
            intensity: 1_000_000.0,
            outer_angle: 0.15,
            inner_angle: 0.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 10.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Each time a project page opens, put the viewpoints and the material
/// selection back to where a fresh page starts.
pub fn reset_on_project_open(
    open: Res<OpenProject>,
    default_material: Res<DefaultMaterial>,
    mut active: ResMut<ActiveMaterial>,
    mut resets: EventWriter<ViewpointsReset>,
) {
    if !open.is_changed() {
        return;
    }
    active.0 = default_material.0;
    resets.send(ViewpointsReset);
}

/// Spawn the open project's model whenever it differs from what is on screen.
pub fn spawn_open_project(
    open: Res<OpenProject>,
    asset_server: Res<AssetServer>,
    mut scene: ResMut<ModelScene>,
    mut commands: Commands,
) {
    let project: &'static Project = open.0;
    if scene.project.is_some_and(|p| p.id == project.id) {
        return;
    }
    if let Some(root) = scene.root.take() {
        commands.entity(root).despawn_recursive();
    }

    let handle: Handle<Scene> = asset_server.load(model_scene_path(project));
    let root = commands
        .spawn((
            ModelRoot,
            Name::new(project.title),
            SceneRoot(handle.clone()),
            Transform::default(),
        ))
        .id();

    info!("loading {} from {}", project.id, project.model_path);
    *scene = ModelScene {
        project: Some(project),
        root: Some(root),
        handle: Some(handle),
        status: SceneStatus::Loading,
    };
}

/// Wait for the model, then center it and start the animated fit. Load
/// failures replace the model with the fallback message.
pub fn watch_model_load(
    asset_server: Res<AssetServer>,
    mut scene: ResMut<ModelScene>,
    children: Query<&Children>,
    bounds: Query<(&Aabb, &GlobalTransform)>,
    mut roots: Query<&mut Transform, With<ModelRoot>>,
    mut camera: EventWriter<CameraCommand>,
    mut commands: Commands,
) {
    if scene.status != SceneStatus::Loading {
        return;
    }
    let (Some(handle), Some(root)) = (scene.handle.clone(), scene.root) else {
        return;
    };

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&handle) {
        let error = SceneError::AssetLoad {
            path: scene
                .project
                .map_or_else(String::new, |p| p.model_path.to_string()),
            reason: err.to_string(),
        };
        error!("{error}");
        commands.entity(root).despawn_recursive();
        scene.root = None;
        scene.status = SceneStatus::Failed(error);
        return;
    }
    if !asset_server.is_loaded_with_dependencies(&handle) {
        return;
    }

    let corners = children.iter_descendants(root).filter_map(|entity| {
        let (aabb, transform) = bounds.get(entity).ok()?;
        Some(aabb_corners(aabb).map(|c| transform.transform_point(c)))
    });
    // Bounds appear a frame after the scene instance spawns.
    let Some((min, max)) = world_bounds(corners.flatten()) else {
        return;
    };

    let center = (min + max) * 0.5;
    let half_extents = (max - min) * 0.5;
    if let Ok(mut transform) = roots.get_mut(root) {
        transform.translation -= center;
    }
    camera.send(CameraCommand::FitToBox {
        min: -half_extents,
        max: half_extents,
        animate: true,
    });
    info!("model ready, half extents {half_extents}");
    scene.status = SceneStatus::Fitting { half_extents };
}

/// Once the first fit lands, pin the orbit target to the model center.
pub fn finish_fit(
    mut settled: EventReader<RigSettled>,
    mut scene: ResMut<ModelScene>,
    mut camera: EventWriter<CameraCommand>,
) {
    if settled.read().count() == 0 {
        return;
    }
    if let SceneStatus::Fitting { half_extents } = scene.status {
        camera.send(CameraCommand::SetTarget {
            target: Vec3::ZERO,
            animate: false,
        });
        scene.status = SceneStatus::Fitted { half_extents };
    }
}

pub fn refit_on_resize(
    mut resized: EventReader<WindowResized>,
    scene: Res<ModelScene>,
    mut camera: EventWriter<CameraCommand>,
) {
    if resized.read().count() == 0 {
        return;
    }
    if let SceneStatus::Fitted { half_extents } = scene.status {
        camera.send(CameraCommand::FitToBox {
            min: -half_extents,
            max: half_extents,
            animate: false,
        });
    }
}

pub fn despawn_model(mut scene: ResMut<ModelScene>, mut commands: Commands) {
    if let Some(root) = scene.root.take() {
        commands.entity(root).despawn_recursive();
    }
    *scene = ModelScene::default();
}

fn aabb_corners(aabb: &Aabb) -> [Vec3; 8] {
    let center = Vec3::from(aabb.center);
    let half = Vec3::from(aabb.half_extents);
    let mut corners = [Vec3::ZERO; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let sign = Vec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        *corner = center + half * sign;
    }
    corners
}

/// Min/max over a set of points, `None` when empty.
pub fn world_bounds(points: impl IntoIterator<Item = Vec3>) -> Option<(Vec3, Vec3)> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some((p, p)),
        Some((min, max)) => Some((min.min(p), max.max(p))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_nothing_is_none() {
        assert_eq!(world_bounds(std::iter::empty()), None);
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-3.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, 9.0),
        ];
        assert_eq!(
            world_bounds(points),
            Some((Vec3::new(-3.0, -2.0, 0.0), Vec3::new(1.0, 4.0, 9.0)))
        );
    }

    #[test]
    fn aabb_corners_span_the_box() {
        let aabb = Aabb::from_min_max(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 4.0, 3.0));
        let (min, max) = world_bounds(aabb_corners(&aabb)).unwrap();
        assert_eq!(min, Vec3::new(-1.0, 0.0, 2.0));
        assert_eq!(max, Vec3::new(1.0, 4.0, 3.0));
    }

    #[test]
    fn preload_covers_every_project_page_model() {
        let preloaded = preload_paths();
        assert_eq!(preloaded.len(), PROJECTS.len());
        for project in PROJECTS {
            let page_model = model_scene_path(project);
            assert_eq!(page_model.path(), std::path::Path::new(project.model_path));
            assert!(preloaded.contains(&page_model));
        }
    }

    #[test]
    fn only_fitting_and_fitted_expose_extents() {
        assert!(!SceneStatus::Loading.is_ready());
        let fitted = SceneStatus::Fitted {
            half_extents: Vec3::ONE,
        };
        assert_eq!(fitted.half_extents(), Some(Vec3::ONE));
    }
}
