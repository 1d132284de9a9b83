//! OrbitRig component: spherical camera around a target with damped moves.
//!
//! Angles follow the viewer convention: azimuth turns about +Y with 0 looking
//! from +Z, polar is measured down from +Y.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

pub const DEFAULT_SMOOTH_TIME: f32 = 0.15;
pub const DRAGGING_SMOOTH_TIME: f32 = 0.1;
pub const DEFAULT_DOLLY_SPEED: f32 = 2.5;
const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_4;
const MIN_POLAR: f32 = 1e-3;
const MAX_POLAR: f32 = PI - 1e-3;
const MIN_DISTANCE: f32 = 0.05;
const MAX_DISTANCE: f32 = 500.0;
const ORBIT_RADIANS_PER_PIXEL: f32 = 0.005;
const ANGLE_EPSILON: f32 = 1e-4;
const DISTANCE_EPSILON: f32 = 1e-3;

/// A full camera pose in rig coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigPose {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl RigPose {
    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + self.distance * Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Velocity {
    azimuth: f32,
    polar: f32,
    distance: f32,
    target: Vec3,
}

/// Camera controller driven by [`super::CameraCommand`]s and mouse input.
#[derive(Component, Clone, Debug)]
pub struct OrbitRig {
    pub current: RigPose,
    pub goal: RigPose,
    pub smooth_time: f32,
    pub dragging_smooth_time: f32,
    pub dolly_speed: f32,
    pub fov: f32,
    pub dragging: bool,
    velocity: Velocity,
    animating: bool,
}

impl Default for OrbitRig {
    fn default() -> Self {
        let pose = RigPose {
            azimuth: PI / 4.0,
            polar: PI / 3.0,
            distance: 17.0,
            target: Vec3::ZERO,
        };
        Self {
            current: pose,
            goal: pose,
            smooth_time: DEFAULT_SMOOTH_TIME,
            dragging_smooth_time: DRAGGING_SMOOTH_TIME,
            dolly_speed: DEFAULT_DOLLY_SPEED,
            fov: DEFAULT_FOV,
            dragging: false,
            velocity: Velocity::default(),
            animating: false,
        }
    }
}

impl OrbitRig {
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Orbit to the given angles. The azimuth goal is unwrapped so the move
    /// takes the short way round.
    pub fn rotate_to(&mut self, azimuth: f32, polar: f32, smooth: bool) {
        self.current.azimuth = wrap_angle(self.current.azimuth);
        let mut delta = wrap_angle(azimuth) - self.current.azimuth;
        if delta > PI {
            delta -= TAU;
        } else if delta < -PI {
            delta += TAU;
        }
        self.goal.azimuth = self.current.azimuth + delta;
        self.goal.polar = polar.clamp(MIN_POLAR, MAX_POLAR);
        self.commit(smooth);
    }

    /// Center on the box and back off until its bounding sphere fills the view.
    pub fn fit_to_box(&mut self, min: Vec3, max: Vec3, animate: bool) {
        let center = (min + max) * 0.5;
        let radius = ((max - min) * 0.5).length().max(MIN_DISTANCE);
        self.goal.target = center;
        self.goal.distance = (radius / (self.fov * 0.5).sin()).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.commit(animate);
    }

    pub fn set_target(&mut self, target: Vec3, animate: bool) {
        self.goal.target = target;
        self.commit(animate);
    }

    /// Drag by a screen-space delta in pixels.
    pub fn orbit_by(&mut self, delta: Vec2) {
        self.goal.azimuth -= delta.x * ORBIT_RADIANS_PER_PIXEL;
        self.goal.polar =
            (self.goal.polar - delta.y * ORBIT_RADIANS_PER_PIXEL).clamp(MIN_POLAR, MAX_POLAR);
        self.animating = true;
    }

    /// Scroll to dolly; positive values move closer.
    pub fn dolly_by(&mut self, amount: f32) {
        let scale = (1.0 - 0.1 * self.dolly_speed).powf(amount);
        self.goal.distance = (self.goal.distance * scale).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.animating = true;
    }

    /// Advance toward the goal. Returns true on the frame an animated move settles.
    pub fn step(&mut self, dt: f32) -> bool {
        if !self.animating {
            return false;
        }
        let smooth = if self.dragging {
            self.dragging_smooth_time
        } else {
            self.smooth_time
        };
        let (cur, goal, vel) = (&mut self.current, self.goal, &mut self.velocity);
        cur.azimuth = smooth_damp(cur.azimuth, goal.azimuth, &mut vel.azimuth, smooth, dt);
        cur.polar = smooth_damp(cur.polar, goal.polar, &mut vel.polar, smooth, dt);
        cur.distance = smooth_damp(cur.distance, goal.distance, &mut vel.distance, smooth, dt);
        cur.target = Vec3::new(
            smooth_damp(cur.target.x, goal.target.x, &mut vel.target.x, smooth, dt),
            smooth_damp(cur.target.y, goal.target.y, &mut vel.target.y, smooth, dt),
            smooth_damp(cur.target.z, goal.target.z, &mut vel.target.z, smooth, dt),
        );

        if self.at_goal() {
            self.current = self.goal;
            self.velocity = Velocity::default();
            self.animating = false;
            return true;
        }
        false
    }

    fn at_goal(&self) -> bool {
        let (c, g) = (&self.current, &self.goal);
        (c.azimuth - g.azimuth).abs() < ANGLE_EPSILON
            && (c.polar - g.polar).abs() < ANGLE_EPSILON
            && (c.distance - g.distance).abs() < DISTANCE_EPSILON
            && c.target.distance(g.target) < DISTANCE_EPSILON
    }

    fn commit(&mut self, animate: bool) {
        if animate {
            self.animating = true;
        } else {
            self.current = self.goal;
            self.velocity = Velocity::default();
            self.animating = false;
        }
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Critically damped spring toward `goal` (Game Programming Gems 4, 1.10).
fn smooth_damp(current: f32, goal: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - goal;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = goal + (change + temp) * exp;
    // Never overshoot the goal.
    if (goal - current > 0.0) == (output > goal) {
        output = goal;
        *velocity = (output - goal) / dt.max(1e-6);
    }
    output
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn run_until_settled(rig: &mut OrbitRig) -> usize {
        for frame in 1..=600 {
            if rig.step(1.0 / 60.0) {
                return frame;
            }
        }
        panic!("rig never settled");
    }

    #[test]
    fn front_pose_sits_on_positive_z() {
        let pose = RigPose {
            azimuth: 0.0,
            polar: FRAC_PI_2,
            distance: 10.0,
            target: Vec3::ZERO,
        };
        assert!(pose.eye().abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-4));
    }

    #[test]
    fn right_pose_sits_on_positive_x() {
        let pose = RigPose {
            azimuth: FRAC_PI_2,
            polar: FRAC_PI_2,
            distance: 4.0,
            target: Vec3::ONE,
        };
        assert!(pose.eye().abs_diff_eq(Vec3::new(5.0, 1.0, 1.0), 1e-4));
    }

    #[test]
    fn smooth_rotation_converges_and_reports_once() {
        let mut rig = OrbitRig::default();
        rig.rotate_to(FRAC_PI_2, FRAC_PI_2, true);
        assert!(rig.is_animating());

        let frames = run_until_settled(&mut rig);
        assert!(frames > 1);
        assert_eq!(rig.current, rig.goal);
        assert!(!rig.step(1.0 / 60.0));
    }

    #[test]
    fn instant_rotation_snaps() {
        let mut rig = OrbitRig::default();
        rig.rotate_to(PI, FRAC_PI_2, false);
        assert!(!rig.is_animating());
        assert!((rig.current.azimuth.abs() - PI).abs() < 1e-5);
    }

    #[test]
    fn azimuth_takes_the_short_way_round() {
        let mut rig = OrbitRig::default();
        rig.rotate_to(-FRAC_PI_2, FRAC_PI_2, false);
        rig.rotate_to(PI, FRAC_PI_2, true);
        // From -90 deg the short way to 180 deg is -90 more, not +270.
        assert!((rig.goal.azimuth - (-PI)).abs() < 1e-5);
    }

    #[test]
    fn fit_to_box_frames_the_bounding_sphere() {
        let mut rig = OrbitRig::default();
        rig.fit_to_box(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(3.0, 2.0, 1.0), false);
        assert_eq!(rig.current.target, Vec3::new(1.0, 1.0, 0.0));
        let radius = Vec3::new(2.0, 1.0, 1.0).length();
        let expected = radius / (rig.fov * 0.5).sin();
        assert!((rig.current.distance - expected).abs() < 1e-4);
    }

    #[test]
    fn polar_is_clamped_off_the_poles() {
        let mut rig = OrbitRig::default();
        rig.rotate_to(0.0, -1.0, false);
        assert!(rig.current.polar > 0.0);
        rig.orbit_by(Vec2::new(0.0, -10_000.0));
        assert!(rig.goal.polar < PI);
    }

    #[test]
    fn dolly_moves_closer_for_positive_scroll() {
        let mut rig = OrbitRig::default();
        let before = rig.goal.distance;
        rig.dolly_by(1.0);
        assert!(rig.goal.distance < before);
        rig.dolly_by(-2.0);
        assert!(rig.goal.distance > before);
    }
}
