//! Viewpoints D-pad with the rolling view cube.
//!
//! The four buttons are rebuilt from the active view's neighbors every frame.
//! Each transition restarts the button group's fade-in and rolls the cube from
//! the navigator's overshoot keyframe back to the new face.

use std::time::Duration;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::easing::{SETTLE, STANDARD};
use super::tooltip::{show_tooltip, TooltipClock, Tooltips};
use crate::navigation::{
    CubeRotation, Direction, FocusRequest, NavigateRequest, ViewTransitioned, ViewpointNavigator,
    ViewpointsReset, RESTING_CUBE,
};

const GROUP_FADE: Duration = Duration::from_millis(280);
const CUBE_ROLL: Duration = Duration::from_millis(700);
const BUTTON_SIZE: f32 = 28.0;
const CUBE_SIZE: f32 = 44.0;

/// Keyframes of the cube roll currently playing.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CubeAnimation {
    pub from: CubeRotation,
    pub to: CubeRotation,
    pub started: Duration,
}

impl Default for CubeAnimation {
    fn default() -> Self {
        Self {
            from: RESTING_CUBE,
            to: RESTING_CUBE,
            started: Duration::ZERO,
        }
    }
}

impl CubeAnimation {
    pub fn sample(&self, now: Duration) -> CubeRotation {
        let t = progress(now, self.started, CUBE_ROLL);
        let k = SETTLE.ease(t);
        CubeRotation {
            x: self.from.x + (self.to.x - self.from.x) * k,
            y: self.from.y + (self.to.y - self.from.y) * k,
        }
    }
}

/// When the current button group mounted.
#[derive(Resource, Debug, Default)]
pub struct ButtonGroup {
    pub tick: u64,
    pub mounted: Duration,
}

/// Tooltip keys of the D-pad buttons. The group remounts on every transition.
fn slot_keys() -> impl Iterator<Item = &'static str> {
    Direction::ALL.into_iter().map(Direction::slot)
}

pub fn track_transitions(
    time: Res<Time>,
    mut resets: EventReader<ViewpointsReset>,
    mut transitions: EventReader<ViewTransitioned>,
    mut cube: ResMut<CubeAnimation>,
    mut group: ResMut<ButtonGroup>,
    mut tooltips: ResMut<Tooltips>,
    mut clock: ResMut<TooltipClock>,
) {
    let now = time.elapsed();
    if resets.read().count() > 0 {
        *cube = CubeAnimation::default();
        *group = ButtonGroup::default();
        tooltips.forget(slot_keys(), now, &mut clock);
    }
    for ViewTransitioned(transition) in transitions.read() {
        tooltips.forget(slot_keys(), now, &mut clock);
        *cube = CubeAnimation {
            from: transition.roll_offset,
            to: transition.cube_target,
            started: now,
        };
        *group = ButtonGroup {
            tick: transition.tick,
            mounted: now,
        };
    }
}

#[allow(clippy::too_many_arguments)]
pub fn viewpoints_panel_system(
    mut contexts: EguiContexts,
    time: Res<Time>,
    navigator: Res<ViewpointNavigator>,
    cube: Res<CubeAnimation>,
    group: Res<ButtonGroup>,
    mut focus: ResMut<FocusRequest>,
    mut tooltips: ResMut<Tooltips>,
    mut clock: ResMut<TooltipClock>,
    mut requests: EventWriter<NavigateRequest>,
) {
    let now = time.elapsed();
    let dt = time.delta_secs();
    let neighbors = navigator.neighbors();
    let suppressed = navigator.tooltips_suppressed();
    let fade = if group.tick == 0 {
        1.0
    } else {
        STANDARD.ease(progress(now, group.mounted, GROUP_FADE))
    };
    let rotation = cube.sample(now);
    let ctx = contexts.ctx_mut().clone();

    egui::Window::new("Viewpoints")
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(super::panel_frame())
        .show(&ctx, |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
            let mut slot = |ui: &mut egui::Ui, direction: Direction, glyph: &str| {
                let target = neighbors.toward(direction);
                let button = egui::Button::new(glyph)
                    .min_size(egui::vec2(BUTTON_SIZE, BUTTON_SIZE))
                    .corner_radius(egui::CornerRadius::same(6));
                let response = ui.add_enabled(fade >= 1.0, button);
                if focus.0 == Some(direction) {
                    response.request_focus();
                    focus.0 = None;
                }
                show_tooltip(
                    &ctx,
                    &response,
                    direction.slot(),
                    target.label(),
                    suppressed,
                    now,
                    dt,
                    &mut tooltips,
                    &mut clock,
                );
                if response.clicked() {
                    response.surrender_focus();
                    requests.send(NavigateRequest(direction));
                }
            };

            ui.set_opacity(fade);
            let pad = egui::vec2(BUTTON_SIZE + 4.0, 0.0);
            ui.horizontal(|ui| {
                ui.add_space(pad.x);
                slot(ui, Direction::Up, "▲");
            });
            ui.horizontal(|ui| {
                slot(ui, Direction::Left, "◀");
                ui.scope(|ui| {
                    ui.set_opacity(1.0);
                    paint_cube(ui, rotation);
                });
                slot(ui, Direction::Right, "▶");
            });
            ui.horizontal(|ui| {
                ui.add_space(pad.x);
                slot(ui, Direction::Down, "▼");
            });
        });
}

fn progress(now: Duration, started: Duration, length: Duration) -> f32 {
    (now.saturating_sub(started).as_secs_f32() / length.as_secs_f32()).clamp(0.0, 1.0)
}

struct Face {
    normal: Vec3,
    u: Vec3,
    v: Vec3,
    label: &'static str,
}

// Screen convention: +X right, +Y down, +Z toward the viewer.
static FACES: [Face; 6] = [
    Face {
        normal: Vec3::Z,
        u: Vec3::X,
        v: Vec3::Y,
        label: "F",
    },
    Face {
        normal: Vec3::NEG_Z,
        u: Vec3::NEG_X,
        v: Vec3::Y,
        label: "B",
    },
    Face {
        normal: Vec3::X,
        u: Vec3::NEG_Z,
        v: Vec3::Y,
        label: "R",
    },
    Face {
        normal: Vec3::NEG_X,
        u: Vec3::Z,
        v: Vec3::Y,
        label: "L",
    },
    Face {
        normal: Vec3::NEG_Y,
        u: Vec3::X,
        v: Vec3::Z,
        label: "T",
    },
    Face {
        normal: Vec3::Y,
        u: Vec3::X,
        v: Vec3::NEG_Z,
        label: "B",
    },
];

fn cube_orientation(rotation: CubeRotation) -> Quat {
    Quat::from_rotation_x(rotation.x.to_radians()) * Quat::from_rotation_y(rotation.y.to_radians())
}

fn paint_cube(ui: &mut egui::Ui, rotation: CubeRotation) {
    let (response, painter) =
        ui.allocate_painter(egui::vec2(CUBE_SIZE, CUBE_SIZE), egui::Sense::hover());
    let center = response.rect.center();
    let half = CUBE_SIZE * 0.3;
    let orientation = cube_orientation(rotation);
    let project = |p: Vec3| center + egui::vec2(p.x, p.y) * half;

    let mut visible: Vec<(f32, &Face, Vec3)> = FACES
        .iter()
        .map(|face| (face, orientation * face.normal))
        .filter(|(_, n)| n.z > 1e-3)
        .map(|(face, n)| (n.z, face, n))
        .collect();
    visible.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (facing, face, normal) in visible {
        let u = orientation * face.u;
        let v = orientation * face.v;
        let corners = [
            normal - u - v,
            normal + u - v,
            normal + u + v,
            normal - u + v,
        ]
        .map(|p| project(p))
        .to_vec();
        let shade = (90.0 + 120.0 * facing) as u8;
        painter.add(egui::Shape::convex_polygon(
            corners,
            egui::Color32::from_rgba_unmultiplied(shade, shade, shade + 20, 230),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(40, 40, 55)),
        ));
        painter.text(
            project(normal),
            egui::Align2::CENTER_CENTER,
            face.label,
            egui::FontId::monospace(10.0 * facing.max(0.5)),
            egui::Color32::from_rgb(20, 20, 30),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::View;

    fn facing_normal(rotation: CubeRotation) -> Vec3 {
        let orientation = cube_orientation(rotation);
        FACES
            .iter()
            .max_by(|a, b| {
                (orientation * a.normal)
                    .z
                    .total_cmp(&(orientation * b.normal).z)
            })
            .map(|f| f.normal)
            .unwrap()
    }

    #[test]
    fn each_view_pose_shows_its_face() {
        let expected = [
            (View::Front, Vec3::Z),
            (View::Right, Vec3::X),
            (View::Back, Vec3::NEG_Z),
            (View::Left, Vec3::NEG_X),
            (View::Top, Vec3::NEG_Y),
            (View::Bottom, Vec3::Y),
        ];
        for (view, normal) in expected {
            assert_eq!(facing_normal(CubeRotation::of(view)), normal, "{view}");
            let facing = cube_orientation(CubeRotation::of(view)) * normal;
            assert!(facing.z > 0.999, "{view} faces {facing}");
        }
    }

    #[test]
    fn reset_puts_cube_and_buttons_back_at_rest() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ViewpointsReset>()
            .add_event::<ViewTransitioned>()
            .init_resource::<Tooltips>()
            .init_resource::<TooltipClock>()
            .insert_resource(CubeAnimation {
                from: CubeRotation { x: -75.0, y: 30.0 },
                to: CubeRotation::of(View::Top),
                started: Duration::from_secs(2),
            })
            .insert_resource(ButtonGroup {
                tick: 3,
                mounted: Duration::from_secs(2),
            })
            .add_systems(Update, track_transitions);
        app.world_mut()
            .resource_mut::<Tooltips>()
            .get_mut(Direction::Up.slot())
            .enter(Duration::ZERO, &TooltipClock::default());

        app.world_mut().send_event(ViewpointsReset);
        app.update();

        let cube = app.world().resource::<CubeAnimation>();
        assert_eq!(cube.from, RESTING_CUBE);
        assert_eq!(cube.to, RESTING_CUBE);
        assert_eq!(app.world().resource::<ButtonGroup>().tick, 0);
        assert!(!app
            .world_mut()
            .resource_mut::<Tooltips>()
            .get_mut(Direction::Up.slot())
            .is_engaged());
    }

    #[test]
    fn roll_starts_at_overshoot_and_lands_on_target() {
        let anim = CubeAnimation {
            from: CubeRotation { x: 15.0, y: -150.0 },
            to: CubeRotation { x: 0.0, y: -90.0 },
            started: Duration::from_millis(100),
        };
        assert_eq!(anim.sample(Duration::from_millis(100)), anim.from);
        assert_eq!(anim.sample(Duration::from_millis(800)), anim.to);
        let mid = anim.sample(Duration::from_millis(300));
        assert!(mid.y > -150.0 && mid.y < -90.0);
    }

    #[test]
    fn progress_clamps() {
        let start = Duration::from_millis(50);
        assert_eq!(progress(Duration::ZERO, start, GROUP_FADE), 0.0);
        assert_eq!(progress(Duration::from_secs(5), start, GROUP_FADE), 1.0);
    }
}
