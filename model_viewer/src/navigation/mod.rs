//! Viewpoint navigation: six-view state machine wired into the ECS.
//!
//! The D-pad sends [`NavigateRequest`]s. Each one is applied immediately to the
//! [`ViewpointNavigator`], turned into a smooth [`CameraCommand::RotateTo`], and
//! announced as a [`ViewTransitioned`] for the view cube. The settle that
//! re-enables tooltips and moves focus lands in [`FocusRequest`].

mod navigator;
mod timing;
mod view;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::{CameraCommand, RigSet};

pub use navigator::{
    CubeRotation, Navigator, RotateTo, Settled, Transition, RESTING_CUBE, SETTLE_DELAY,
};
pub use timing::{Deferred, TimerHandle};
pub use view::{Direction, Neighbors, View, ViewSpec};

#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct ViewpointNavigator(pub Navigator);

/// Source of the view cube's random roll. Seed it for repeatable animation.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct OvershootRng(pub StdRng);

impl OvershootRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigateRequest(pub Direction);

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct ViewTransitioned(pub Transition);

/// Start over at the front view: fresh navigator, camera snapped to front,
/// cube and D-pad back at rest. Sent whenever a project page opens.
#[derive(Event, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewpointsReset;

/// D-pad slot that should take keyboard focus on the next UI pass.
#[derive(Resource, Debug, Default)]
pub struct FocusRequest(pub Option<Direction>);

#[derive(SystemSet, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NavigationSet;

pub fn viewpoint_plugin(app: &mut App) {
    app.init_resource::<ViewpointNavigator>()
        .init_resource::<FocusRequest>()
        .add_event::<NavigateRequest>()
        .add_event::<ViewTransitioned>()
        .add_event::<ViewpointsReset>()
        .add_systems(
            Update,
            (reset_viewpoints, apply_navigate_requests, settle_navigator)
                .chain()
                .in_set(NavigationSet),
        )
        .configure_sets(Update, NavigationSet.before(RigSet));

    if !app.world().contains_resource::<OvershootRng>() {
        app.insert_resource(OvershootRng::from_entropy());
    }
}

/// Drop pending settle work when the project view closes.
pub fn cancel_navigator(mut navigator: ResMut<ViewpointNavigator>, mut focus: ResMut<FocusRequest>) {
    navigator.cancel();
    focus.0 = None;
}

fn reset_viewpoints(
    mut resets: EventReader<ViewpointsReset>,
    mut navigator: ResMut<ViewpointNavigator>,
    mut focus: ResMut<FocusRequest>,
    mut camera: EventWriter<CameraCommand>,
) {
    if resets.read().count() == 0 {
        return;
    }
    navigator.0 = Navigator::new();
    focus.0 = None;
    let front = View::Front.spec();
    camera.send(CameraCommand::RotateTo {
        azimuth: front.azimuth,
        polar: front.polar,
        smooth: false,
    });
    debug!("viewpoints reset to {}", View::Front);
}

fn apply_navigate_requests(
    time: Res<Time>,
    mut requests: EventReader<NavigateRequest>,
    mut navigator: ResMut<ViewpointNavigator>,
    mut rng: ResMut<OvershootRng>,
    mut camera: EventWriter<CameraCommand>,
    mut transitioned: EventWriter<ViewTransitioned>,
) {
    let now = time.elapsed();
    for NavigateRequest(direction) in requests.read() {
        let transition = navigator.go_to(*direction, now, &mut rng.0);
        debug!(
            "viewpoint {} -> {} ({:?}, tick {})",
            transition.from, transition.to, direction, transition.tick
        );
        let RotateTo {
            azimuth,
            polar,
            smooth,
        } = transition.camera;
        camera.send(CameraCommand::RotateTo {
            azimuth,
            polar,
            smooth,
        });
        transitioned.send(ViewTransitioned(transition));
    }
}

fn settle_navigator(
    time: Res<Time>,
    mut navigator: ResMut<ViewpointNavigator>,
    mut focus: ResMut<FocusRequest>,
) {
    if let Some(settled) = navigator.poll(time.elapsed()) {
        focus.0 = Some(settled.focus);
    }
}
