//! egui overlays: page chrome, viewpoints D-pad, material selector, tooltips.

mod easing;
mod materials;
mod pages;
mod tooltip;
mod viewpoints;

use bevy::prelude::*;
use bevy_egui::{egui, EguiPlugin};

use crate::navigation::NavigationSet;
use crate::pages::Page;

use tooltip::{TooltipClock, Tooltips};
use viewpoints::{ButtonGroup, CubeAnimation};

/// Overlays for every page. The D-pad and the swatches can be left out.
pub(crate) fn ui_plugin(app: &mut App, viewpoints: bool, materials: bool) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.init_resource::<Tooltips>()
        .init_resource::<TooltipClock>()
        .init_resource::<CubeAnimation>()
        .init_resource::<ButtonGroup>()
        .add_systems(
            Update,
            (
                tooltip::dismiss_tooltips,
                viewpoints::track_transitions.after(NavigationSet),
                pages::gallery_system.run_if(in_state(Page::Gallery)),
                pages::project_panel_system.run_if(in_state(Page::Project)),
                pages::not_found_system.run_if(in_state(Page::NotFound)),
            ),
        );

    if viewpoints {
        app.add_systems(
            Update,
            viewpoints::viewpoints_panel_system
                .after(viewpoints::track_transitions)
                .run_if(in_state(Page::Project)),
        );
    }
    if materials {
        app.add_systems(
            Update,
            materials::material_selector_system.run_if(in_state(Page::Project)),
        );
    }
}

/// Dark translucent panel shared by every overlay.
pub(crate) fn panel_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
        .inner_margin(egui::Margin::same(12))
        .corner_radius(egui::CornerRadius::same(6))
}

pub(crate) fn apply_text_style(ui: &mut egui::Ui) {
    ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));
}
