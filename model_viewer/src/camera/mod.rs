//! Orbit camera rig: command events, per-frame damping, and mouse orbit/dolly.

mod rig;

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

pub use rig::{OrbitRig, RigPose};

/// Requests understood by the camera rig. Animated moves report completion
/// through [`RigSettled`].
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum CameraCommand {
    RotateTo {
        azimuth: f32,
        polar: f32,
        smooth: bool,
    },
    FitToBox {
        min: Vec3,
        max: Vec3,
        animate: bool,
    },
    SetTarget {
        target: Vec3,
        animate: bool,
    },
}

/// Fired once when an animated rig move comes to rest.
#[derive(Event, Clone, Copy, Debug)]
pub struct RigSettled(pub Entity);

/// Commands, damping, and transform sync. Needs no input or UI plugins.
pub fn orbit_rig_plugin(app: &mut App) {
    app.add_event::<CameraCommand>()
        .add_event::<RigSettled>()
        .add_systems(
            Update,
            (apply_camera_commands, step_rigs)
                .chain()
                .in_set(RigSet),
        );
}

/// Mouse drag to orbit, wheel to dolly. Ignores input over egui panels.
pub fn orbit_input_plugin(app: &mut App) {
    app.add_systems(Update, orbit_input_system.before(RigSet));
}

#[derive(SystemSet, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RigSet;

pub fn spawn_rig_camera(commands: &mut Commands) -> Entity {
    let rig = OrbitRig::default();
    let transform = rig.current.transform();
    commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: rig.fov,
                ..default()
            }),
            transform,
            rig,
        ))
        .id()
}

fn apply_camera_commands(mut events: EventReader<CameraCommand>, mut rigs: Query<&mut OrbitRig>) {
    for command in events.read() {
        for mut rig in &mut rigs {
            match *command {
                CameraCommand::RotateTo {
                    azimuth,
                    polar,
                    smooth,
                } => rig.rotate_to(azimuth, polar, smooth),
                CameraCommand::FitToBox { min, max, animate } => rig.fit_to_box(min, max, animate),
                CameraCommand::SetTarget { target, animate } => rig.set_target(target, animate),
            }
        }
    }
}

fn step_rigs(
    time: Res<Time>,
    mut rigs: Query<(Entity, &mut OrbitRig, &mut Transform)>,
    mut settled: EventWriter<RigSettled>,
) {
    let dt = time.delta_secs();
    for (entity, mut rig, mut transform) in &mut rigs {
        if rig.step(dt) {
            settled.send(RigSettled(entity));
        }
        let next = rig.current.transform();
        if *transform != next {
            *transform = next;
        }
    }
}

fn orbit_input_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut rigs: Query<&mut OrbitRig>,
) {
    let over_ui = contexts.ctx_mut().is_pointer_over_area();
    let drag: Vec2 = motion.read().map(|m| m.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y,
            MouseScrollUnit::Pixel => w.y / 100.0,
        })
        .sum();

    let dragging = mouse.pressed(MouseButton::Left) && !over_ui;
    for mut rig in &mut rigs {
        rig.dragging = dragging;
        if dragging && drag != Vec2::ZERO {
            rig.orbit_by(drag);
        }
        if !over_ui && scroll != 0.0 {
            rig.dolly_by(scroll);
        }
    }
}
