//! Viewpoint navigator: the active view, the D-pad transition, the view-cube
//! overshoot keyframe, and the deferred settle that hands focus back.

use std::time::Duration;

use rand::Rng;

use super::timing::{Deferred, TimerHandle};
use super::view::{Direction, Neighbors, View};

/// Matches the D-pad button group's exit/enter animation.
pub const SETTLE_DELAY: Duration = Duration::from_millis(320);

/// Resting pose of the view cube before the first transition.
pub const RESTING_CUBE: CubeRotation = CubeRotation { x: -20.0, y: 45.0 };

const LATERAL_JITTER_X: f32 = 15.0;
const LATERAL_JITTER_Y: f32 = 30.0;
const OVERSHOOT_X: f32 = 30.0;
const OVERSHOOT_Y: f32 = 60.0;

/// View cube rotation in degrees about its X and Y axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CubeRotation {
    pub x: f32,
    pub y: f32,
}

impl CubeRotation {
    pub fn of(view: View) -> Self {
        let spec = view.spec();
        Self {
            x: spec.cube_x,
            y: spec.cube_y,
        }
    }
}

/// Orbit target handed to the camera rig.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateTo {
    pub azimuth: f32,
    pub polar: f32,
    pub smooth: bool,
}

/// Everything one `go_to` call changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub from: View,
    pub to: View,
    pub direction: Direction,
    pub tick: u64,
    pub roll_offset: CubeRotation,
    pub cube_target: CubeRotation,
    pub camera: RotateTo,
    pub settle: TimerHandle,
}

/// Cosmetic state restored once a transition has visually settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settled {
    /// D-pad slot that should take keyboard focus.
    pub focus: Direction,
    pub tick: u64,
}

#[derive(Debug)]
pub struct Navigator {
    active: View,
    tick: u64,
    cube_target: CubeRotation,
    roll_offset: CubeRotation,
    tooltips_suppressed: bool,
    settle: Deferred<Settled>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            active: View::Front,
            tick: 0,
            cube_target: RESTING_CUBE,
            roll_offset: RESTING_CUBE,
            tooltips_suppressed: false,
            settle: Deferred::default(),
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> View {
        self.active
    }

    pub fn transition_tick(&self) -> u64 {
        self.tick
    }

    pub fn cube_target(&self) -> CubeRotation {
        self.cube_target
    }

    pub fn roll_offset(&self) -> CubeRotation {
        self.roll_offset
    }

    pub fn tooltips_suppressed(&self) -> bool {
        self.tooltips_suppressed
    }

    pub fn settle_pending(&self) -> bool {
        self.settle.is_pending()
    }

    /// The views the four D-pad buttons currently lead to.
    pub fn neighbors(&self) -> Neighbors {
        self.active.neighbors()
    }

    /// Move one face in `direction`. The state update is immediate; only the
    /// focus/tooltip restore is deferred, and it replaces any earlier one.
    pub fn go_to<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        now: Duration,
        rng: &mut R,
    ) -> Transition {
        let from = self.active;
        let to = from.neighbors().toward(direction);
        let current = CubeRotation::of(from);
        let target = CubeRotation::of(to);

        let roll_offset = CubeRotation {
            x: target.x + overshoot(target.x - current.x, OVERSHOOT_X, LATERAL_JITTER_X, rng),
            y: target.y + overshoot(target.y - current.y, OVERSHOOT_Y, LATERAL_JITTER_Y, rng),
        };

        self.active = to;
        self.cube_target = target;
        self.roll_offset = roll_offset;
        self.tick += 1;
        self.tooltips_suppressed = true;

        let settle = self.settle.schedule(
            now,
            SETTLE_DELAY,
            Settled {
                focus: direction,
                tick: self.tick,
            },
        );

        let spec = to.spec();
        Transition {
            from,
            to,
            direction,
            tick: self.tick,
            roll_offset,
            cube_target: target,
            camera: RotateTo {
                azimuth: spec.azimuth,
                polar: spec.polar,
                smooth: true,
            },
            settle,
        }
    }

    /// Run the settle callback if it is due.
    pub fn poll(&mut self, now: Duration) -> Option<Settled> {
        let settled = self.settle.fire(now)?;
        self.tooltips_suppressed = false;
        Some(settled)
    }

    /// Drop any pending settle, e.g. when the view is torn down.
    pub fn cancel(&mut self) {
        if self.settle.cancel() {
            self.tooltips_suppressed = false;
        }
    }
}

/// Extra rotation past the target along one axis, in the direction of travel.
/// An axis that does not move gets a random nudge so the cube still rolls.
fn overshoot<R: Rng + ?Sized>(delta: f32, extra: f32, jitter: f32, rng: &mut R) -> f32 {
    if delta == 0.0 {
        if rng.gen_bool(0.5) {
            jitter
        } else {
            -jitter
        }
    } else {
        extra.copysign(delta)
    }
}
