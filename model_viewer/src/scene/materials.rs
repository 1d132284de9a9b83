//! Material preset swapping for the loaded model.

use bevy::prelude::*;

use crate::catalog::PresetKey;
use crate::scene::model::ModelScene;

/// Preset chosen in the material selector.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveMaterial(pub PresetKey);

/// Preset every project page opens with.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultMaterial(pub PresetKey);

/// Mesh names containing this take the preset's accent color.
const ACCENT_MARKER: &str = "accent";

/// Re-skin the model when the preset changes or the model finishes loading.
pub fn apply_material_preset(
    active: Res<ActiveMaterial>,
    scene: Res<ModelScene>,
    children: Query<&Children>,
    meshes: Query<(&MeshMaterial3d<StandardMaterial>, Option<&Name>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient: ResMut<AmbientLight>,
    mut applied: Local<Option<(PresetKey, Entity)>>,
) {
    let Some(root) = scene.root.filter(|_| scene.status.is_ready()) else {
        return;
    };
    let preset = active.0.preset();
    if *applied == Some((preset.key, root)) {
        return;
    }

    let mut count = 0usize;
    for entity in children.iter_descendants(root) {
        let Ok((handle, name)) = meshes.get(entity) else {
            continue;
        };
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        preset.apply_to(material, is_accent(name));
        count += 1;
    }
    *ambient = preset.ambient_light();
    *applied = Some((preset.key, root));
    debug!("applied {} to {count} materials", preset.label);
}

fn is_accent(name: Option<&Name>) -> bool {
    name.is_some_and(|n| n.as_str().to_ascii_lowercase().contains(ACCENT_MARKER))
}
