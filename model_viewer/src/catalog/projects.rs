//! Project table shown in the gallery and addressable at `/project/{id}`.

use super::CatalogError;

/// One portfolio entry. The model path is relative to the Bevy asset root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    /// glTF binary with geometry and materials, shown on the project page.
    pub model_path: &'static str,
    pub description: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "laptop-stand",
        title: "Laptop Stand",
        model_path: "models/laptop-stand.glb",
        description: "Precision-engineered laptop stand designed for thermal management.",
    },
    Project {
        id: "cycloidal-actuator",
        title: "Cycloidal Actuator",
        model_path: "models/cycloidal-actuator.glb",
        description: "High-reduction cycloidal drive mechanism for robotic joints.",
    },
];

pub fn find_project(id: &str) -> Result<&'static Project, CatalogError> {
    PROJECTS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CatalogError::UnknownProject(id.to_string()))
}
