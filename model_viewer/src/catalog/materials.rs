//! Material presets offered by the selector on the project page.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;

use super::CatalogError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresetKey {
    #[default]
    Steel,
    Copper,
    Obsidian,
    Matte,
    Gold,
}

/// Lighting environment a preset is meant to be shown in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvPreset {
    Studio,
    Night,
}

impl EnvPreset {
    /// Ambient light color and base brightness for this environment.
    pub fn ambient(self) -> (Color, f32) {
        match self {
            EnvPreset::Studio => (Color::srgb(1.0, 0.98, 0.95), 400.0),
            EnvPreset::Night => (Color::srgb(0.55, 0.6, 0.85), 180.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialPreset {
    pub key: PresetKey,
    pub label: &'static str,
    /// sRGB swatch shown in the selector.
    pub swatch: [u8; 3],
    /// Linear RGB.
    pub primary: [f32; 3],
    /// Linear RGB.
    pub accent: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub env_map_intensity: f32,
    pub env_preset: EnvPreset,
}

pub const MATERIAL_PRESETS: [MaterialPreset; 5] = [
    MaterialPreset {
        key: PresetKey::Steel,
        label: "Steel",
        swatch: [0x8a, 0x8d, 0x91],
        primary: [0.58, 0.59, 0.61],
        accent: [0.6, 0.62, 0.65],
        metalness: 0.85,
        roughness: 0.3,
        env_map_intensity: 1.0,
        env_preset: EnvPreset::Studio,
    },
    MaterialPreset {
        key: PresetKey::Copper,
        label: "Copper",
        swatch: [0xb8, 0x73, 0x33],
        primary: [0.72, 0.45, 0.2],
        accent: [0.85, 0.55, 0.3],
        metalness: 0.9,
        roughness: 0.25,
        env_map_intensity: 1.2,
        env_preset: EnvPreset::Studio,
    },
    MaterialPreset {
        key: PresetKey::Obsidian,
        label: "Obsidian",
        swatch: [0x1a, 0x1a, 0x2e],
        primary: [0.1, 0.1, 0.18],
        accent: [0.15, 0.15, 0.25],
        metalness: 0.6,
        roughness: 0.15,
        env_map_intensity: 1.5,
        env_preset: EnvPreset::Night,
    },
    MaterialPreset {
        key: PresetKey::Matte,
        label: "Matte",
        swatch: [0xd4, 0xd4, 0xd4],
        primary: [0.83, 0.83, 0.83],
        accent: [0.9, 0.9, 0.9],
        metalness: 0.05,
        roughness: 0.9,
        env_map_intensity: 0.3,
        env_preset: EnvPreset::Studio,
    },
    MaterialPreset {
        key: PresetKey::Gold,
        label: "Gold",
        swatch: [0xd4, 0xa8, 0x43],
        primary: [0.83, 0.66, 0.26],
        accent: [0.95, 0.75, 0.35],
        metalness: 0.95,
        roughness: 0.2,
        env_map_intensity: 1.3,
        env_preset: EnvPreset::Studio,
    },
];

impl PresetKey {
    pub fn preset(self) -> &'static MaterialPreset {
        &MATERIAL_PRESETS[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PresetKey::Steel => "steel",
            PresetKey::Copper => "copper",
            PresetKey::Obsidian => "obsidian",
            PresetKey::Matte => "matte",
            PresetKey::Gold => "gold",
        }
    }
}

impl FromStr for PresetKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MATERIAL_PRESETS
            .iter()
            .map(|p| p.key)
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for PresetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MaterialPreset {
    pub fn primary_color(&self) -> Color {
        let [r, g, b] = self.primary;
        Color::linear_rgb(r, g, b)
    }

    pub fn accent_color(&self) -> Color {
        let [r, g, b] = self.accent;
        Color::linear_rgb(r, g, b)
    }

    /// Rewrite a material in place; `accent` selects the secondary color.
    pub fn apply_to(&self, material: &mut StandardMaterial, accent: bool) {
        material.base_color = if accent {
            self.accent_color()
        } else {
            self.primary_color()
        };
        material.metallic = self.metalness;
        material.perceptual_roughness = self.roughness;
    }

    /// Ambient light for this preset, scaled by its environment intensity.
    pub fn ambient_light(&self) -> AmbientLight {
        let (color, brightness) = self.env_preset.ambient();
        AmbientLight {
            color,
            brightness: brightness * self.env_map_intensity,
        }
    }
}
