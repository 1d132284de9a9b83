//! Page overlays: gallery cards, project info, load fallback, not found.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::catalog::{Route, Router, PROJECTS};
use crate::pages::OpenProject;
use crate::scene::{ModelScene, SceneStatus};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 220, 180);
const FALLBACK_MESSAGE: &str = "Failed to load 3D scene.";

pub fn gallery_system(mut contexts: EguiContexts, mut router: ResMut<Router>) {
    egui::CentralPanel::default()
        .frame(egui::Frame::default().inner_margin(egui::Margin::same(32)))
        .show(contexts.ctx_mut(), |ui| {
            super::apply_text_style(ui);
            ui.heading(egui::RichText::new("Projects").size(28.0).color(ACCENT));
            ui.add_space(16.0);

            for project in PROJECTS {
                let card = super::panel_frame().show(ui, |ui| {
                    ui.set_width(420.0);
                    ui.label(egui::RichText::new(project.title).size(18.0).strong());
                    ui.label(project.description);
                    ui.add_space(4.0);
                    ui.button("Open").clicked()
                });
                let clicked = card.inner
                    || card
                        .response
                        .interact(egui::Sense::click())
                        .on_hover_cursor(egui::CursorIcon::PointingHand)
                        .clicked();
                if clicked {
                    router.navigate(Route::Project(project));
                }
                ui.add_space(12.0);
            }
        });
}

pub fn project_panel_system(
    mut contexts: EguiContexts,
    open: Res<OpenProject>,
    scene: Res<ModelScene>,
    mut router: ResMut<Router>,
) {
    let ctx = contexts.ctx_mut().clone();
    let project = open.0;

    egui::Window::new("Project")
        .anchor(egui::Align2::LEFT_TOP, [16.0, 16.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(super::panel_frame())
        .show(&ctx, |ui| {
            super::apply_text_style(ui);
            ui.set_max_width(300.0);
            if ui.button("Back").clicked() {
                router.back();
            }
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(project.title)
                    .size(18.0)
                    .color(ACCENT),
            );
            ui.label(project.description);
            ui.add_space(4.0);
            match &scene.status {
                SceneStatus::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading model");
                    });
                }
                SceneStatus::Failed(_) => {
                    ui.label(egui::RichText::new("Model unavailable").weak());
                }
                _ => {}
            }
        });

    if matches!(scene.status, SceneStatus::Failed(_)) {
        egui::Area::new(egui::Id::new("scene_fallback"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .interactable(false)
            .show(&ctx, |ui| {
                ui.label(
                    egui::RichText::new(FALLBACK_MESSAGE)
                        .size(14.0)
                        .color(egui::Color32::from_rgb(160, 170, 185)),
                );
            });
    }
}

pub fn not_found_system(mut contexts: EguiContexts, mut router: ResMut<Router>) {
    egui::CentralPanel::default()
        .frame(egui::Frame::default())
        .show(contexts.ctx_mut(), |ui| {
            super::apply_text_style(ui);
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.label(egui::RichText::new("404").size(64.0).color(ACCENT));
                ui.label("The page you are looking for does not exist.");
                ui.add_space(12.0);
                if ui.button("Return Home").clicked() {
                    router.navigate(Route::Home);
                }
            });
        });
}
