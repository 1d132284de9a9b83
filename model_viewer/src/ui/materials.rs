//! Material selector: one swatch per preset.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::tooltip::{show_tooltip, TooltipClock, Tooltips};
use crate::catalog::MATERIAL_PRESETS;
use crate::scene::ActiveMaterial;

const SWATCH: f32 = 22.0;

pub fn material_selector_system(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut active: ResMut<ActiveMaterial>,
    mut tooltips: ResMut<Tooltips>,
    mut clock: ResMut<TooltipClock>,
) {
    let now = time.elapsed();
    let dt = time.delta_secs();
    let ctx = contexts.ctx_mut().clone();

    egui::Window::new("Material")
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -16.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(super::panel_frame())
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("MAT").monospace().size(11.0));
                ui.add_space(4.0);
                for preset in &MATERIAL_PRESETS {
                    let selected = active.0 == preset.key;
                    let (response, painter) =
                        ui.allocate_painter(egui::vec2(SWATCH, SWATCH), egui::Sense::click());
                    let [r, g, b] = preset.swatch;
                    let fill = egui::Color32::from_rgb(r, g, b);
                    let rect = response.rect;
                    if selected {
                        painter.rect_filled(rect.shrink(SWATCH * 0.1), SWATCH * 0.2, fill);
                        painter.rect_stroke(
                            rect,
                            SWATCH * 0.25,
                            egui::Stroke::new(1.5, egui::Color32::from_rgb(100, 220, 180)),
                            egui::StrokeKind::Outside,
                        );
                    } else {
                        painter.circle_filled(rect.center(), SWATCH * 0.5, fill);
                    }

                    show_tooltip(
                        &ctx,
                        &response,
                        preset.key.as_str(),
                        preset.label,
                        false,
                        now,
                        dt,
                        &mut tooltips,
                        &mut clock,
                    );
                    if response.clicked() && !selected {
                        info!("material preset {}", preset.key);
                        active.0 = preset.key;
                    }
                }
            });
        });
}
