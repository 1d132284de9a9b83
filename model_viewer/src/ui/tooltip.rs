//! Hover tooltips with a warm window.
//!
//! A cold tooltip waits [`OPEN_DELAY`] before opening. If any tooltip closed
//! within the last [`WARM_WINDOW`], the next one opens immediately with a
//! stiffer entrance, so sweeping across adjacent controls does not stutter.
//! The last-closed time lives in a shared [`TooltipClock`].

use std::collections::HashMap;
use std::time::Duration;

use bevy::prelude::*;
use bevy::window::WindowFocused;
use bevy_egui::egui;

use crate::navigation::Deferred;

pub const OPEN_DELAY: Duration = Duration::from_millis(400);
pub const WARM_WINDOW: Duration = Duration::from_millis(500);

/// When any tooltip was last dismissed. Shared by every tooltip.
#[derive(Resource, Debug, Default)]
pub struct TooltipClock {
    last_closed: Option<Duration>,
}

impl TooltipClock {
    pub fn is_warm(&self, now: Duration) -> bool {
        self.last_closed
            .is_some_and(|closed| now.saturating_sub(closed) < WARM_WINDOW)
    }

    pub fn mark_closed(&mut self, now: Duration) {
        self.last_closed = Some(now);
    }
}

/// Longest integration step; larger frame times are subdivided.
const MAX_SPRING_STEP: f32 = 1.0 / 240.0;
const REST_EPSILON: f32 = 1e-3;

/// Damped spring driving a tooltip's opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Spring {
    /// Advance `(position, velocity)` toward `target` by `dt` seconds.
    pub fn step(&self, position: f32, velocity: f32, target: f32, dt: f32) -> (f32, f32) {
        let steps = (dt / MAX_SPRING_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        let (mut x, mut v) = (position, velocity);
        for _ in 0..steps {
            let accel = (-self.stiffness * (x - target) - self.damping * v) / self.mass;
            v += accel * h;
            x += v * h;
        }
        if (x - target).abs() < REST_EPSILON && v.abs() < REST_EPSILON {
            return (target, 0.0);
        }
        (x, v)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Entrance {
    Warm,
    #[default]
    Cold,
}

impl Entrance {
    pub fn spring(self) -> Spring {
        match self {
            Entrance::Warm => Spring {
                stiffness: 600.0,
                damping: 35.0,
                mass: 0.8,
            },
            Entrance::Cold => Spring {
                stiffness: 400.0,
                damping: 25.0,
                mass: 0.8,
            },
        }
    }
}

/// Hover state of one tooltip trigger.
#[derive(Debug, Default)]
pub struct Tooltip {
    hovered: bool,
    entrance: Entrance,
    open: Deferred<()>,
    engaged: bool,
    opacity: f32,
    velocity: f32,
}

impl Tooltip {
    pub fn enter(&mut self, now: Duration, clock: &TooltipClock) {
        self.engaged = true;
        if clock.is_warm(now) {
            self.entrance = Entrance::Warm;
            self.open.cancel();
            self.hovered = true;
        } else {
            self.entrance = Entrance::Cold;
            self.open.schedule(now, OPEN_DELAY, ());
        }
    }

    pub fn leave(&mut self, now: Duration, clock: &mut TooltipClock) {
        self.open.cancel();
        self.hovered = false;
        self.engaged = false;
        clock.mark_closed(now);
    }

    /// Open a cold tooltip once its delay has elapsed.
    pub fn tick(&mut self, now: Duration) {
        if self.open.fire(now).is_some() {
            self.hovered = true;
        }
    }

    /// Whether the pointer or focus is on the trigger, shown or not.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn is_visible(&self, disabled: bool) -> bool {
        self.hovered && !disabled
    }

    pub fn entrance(&self) -> Entrance {
        self.entrance
    }

    /// Spring the opacity toward shown or hidden; returns the new opacity.
    pub fn animate(&mut self, disabled: bool, dt: f32) -> f32 {
        let target = if self.is_visible(disabled) { 1.0 } else { 0.0 };
        let spring = self.entrance.spring();
        (self.opacity, self.velocity) = spring.step(self.opacity, self.velocity, target, dt);
        self.opacity
    }
}

/// Per-trigger tooltip state, keyed by a stable control id.
#[derive(Resource, Debug, Default)]
pub struct Tooltips(HashMap<&'static str, Tooltip>);

impl Tooltips {
    pub fn get_mut(&mut self, key: &'static str) -> &mut Tooltip {
        self.0.entry(key).or_default()
    }

    /// Dismiss everything, e.g. when the window loses focus.
    pub fn close_all(&mut self, now: Duration, clock: &mut TooltipClock) {
        for tooltip in self.0.values_mut().filter(|t| t.is_engaged()) {
            tooltip.leave(now, clock);
        }
    }

    /// Close and drop the state of triggers that are being remounted.
    pub fn forget(
        &mut self,
        keys: impl IntoIterator<Item = &'static str>,
        now: Duration,
        clock: &mut TooltipClock,
    ) {
        for key in keys {
            if let Some(mut tooltip) = self.0.remove(key) {
                if tooltip.is_engaged() {
                    tooltip.leave(now, clock);
                }
            }
        }
    }
}

/// Window blur and right-click both force every tooltip closed.
pub fn dismiss_tooltips(
    time: Res<Time>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut focused: EventReader<WindowFocused>,
    mut tooltips: ResMut<Tooltips>,
    mut clock: ResMut<TooltipClock>,
) {
    let blurred = focused.read().fold(false, |acc, e| acc || !e.focused);
    if blurred || mouse.just_pressed(MouseButton::Right) {
        tooltips.close_all(time.elapsed(), &mut clock);
    }
}

/// Drive one tooltip from an egui response and draw it above the trigger.
#[allow(clippy::too_many_arguments)]
pub fn show_tooltip(
    ctx: &egui::Context,
    response: &egui::Response,
    key: &'static str,
    text: &str,
    disabled: bool,
    now: Duration,
    dt: f32,
    tooltips: &mut Tooltips,
    clock: &mut TooltipClock,
) {
    let tooltip = tooltips.get_mut(key);
    let engaged = response.hovered() || response.has_focus();
    if engaged && !tooltip.is_engaged() {
        tooltip.enter(now, clock);
    } else if !engaged && tooltip.is_engaged() {
        tooltip.leave(now, clock);
    }
    tooltip.tick(now);

    let opacity = tooltip.animate(disabled, dt).clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }

    let lift = if tooltip.entrance() == Entrance::Warm {
        0.0
    } else {
        5.0 * (1.0 - opacity)
    };
    egui::Area::new(egui::Id::new(("tooltip", key)))
        .order(egui::Order::Tooltip)
        .interactable(false)
        .pivot(egui::Align2::CENTER_BOTTOM)
        .fixed_pos(response.rect.center_top() + egui::vec2(0.0, lift - 6.0))
        .show(ctx, |ui| {
            ui.set_opacity(opacity);
            egui::Frame::default()
                .fill(egui::Color32::from_rgb(235, 238, 245))
                .inner_margin(egui::Margin::symmetric(8, 4))
                .corner_radius(egui::CornerRadius::same(4))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(text)
                            .size(12.0)
                            .color(egui::Color32::from_rgb(20, 20, 30)),
                    );
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn cold_tooltip_waits_for_the_delay() {
        let clock = TooltipClock::default();
        let mut tooltip = Tooltip::default();
        tooltip.enter(ms(1000), &clock);
        assert_eq!(tooltip.entrance(), Entrance::Cold);

        tooltip.tick(ms(1399));
        assert!(!tooltip.is_visible(false));
        tooltip.tick(ms(1400));
        assert!(tooltip.is_visible(false));
    }

    #[test]
    fn tooltip_within_warm_window_opens_immediately() {
        let mut clock = TooltipClock::default();
        let mut first = Tooltip::default();
        first.enter(ms(0), &clock);
        first.tick(ms(400));
        first.leave(ms(600), &mut clock);

        let mut second = Tooltip::default();
        second.enter(ms(1099), &clock);
        assert_eq!(second.entrance(), Entrance::Warm);
        assert!(second.is_visible(false));
    }

    #[test]
    fn tooltip_after_warm_window_is_cold_again() {
        let mut clock = TooltipClock::default();
        clock.mark_closed(ms(600));

        let mut tooltip = Tooltip::default();
        tooltip.enter(ms(1100), &clock);
        assert_eq!(tooltip.entrance(), Entrance::Cold);
        assert!(!tooltip.is_visible(false));
    }

    #[test]
    fn leaving_before_delay_cancels_the_open() {
        let mut clock = TooltipClock::default();
        let mut tooltip = Tooltip::default();
        tooltip.enter(ms(0), &clock);
        tooltip.leave(ms(200), &mut clock);
        tooltip.tick(ms(1000));
        assert!(!tooltip.is_visible(false));
    }

    #[test]
    fn disabled_hides_without_forgetting_hover() {
        let mut clock = TooltipClock::default();
        clock.mark_closed(ms(0));
        let mut tooltip = Tooltip::default();
        tooltip.enter(ms(100), &clock);
        assert!(!tooltip.is_visible(true));
        assert!(tooltip.is_visible(false));
    }

    #[test]
    fn close_all_stamps_the_clock() {
        let mut clock = TooltipClock::default();
        let mut tooltips = Tooltips::default();
        tooltips.get_mut("a").enter(ms(0), &clock);
        tooltips.get_mut("b");
        tooltips.close_all(ms(50), &mut clock);

        assert!(!tooltips.get_mut("a").is_engaged());
        assert!(clock.is_warm(ms(500)));
        assert!(!clock.is_warm(ms(550)));
    }

    fn time_to_rest(spring: Spring) -> f32 {
        let (mut x, mut v, mut t) = (0.0, 0.0, 0.0);
        while (x, v) != (1.0, 0.0) {
            (x, v) = spring.step(x, v, 1.0, 1.0 / 60.0);
            t += 1.0 / 60.0;
            assert!(t < 5.0, "spring never came to rest");
        }
        t
    }

    #[test]
    fn spring_comes_to_rest_on_target() {
        let spring = Entrance::Cold.spring();
        let (mut x, mut v) = (0.0, 0.0);
        for _ in 0..120 {
            (x, v) = spring.step(x, v, 1.0, 1.0 / 60.0);
        }
        assert_eq!((x, v), (1.0, 0.0));
    }

    #[test]
    fn warm_entrance_is_quicker() {
        let warm = time_to_rest(Entrance::Warm.spring());
        let cold = time_to_rest(Entrance::Cold.spring());
        assert!(warm < cold);
    }

    #[test]
    fn heavier_spring_is_slower() {
        let base = Entrance::Warm.spring();
        let heavy = Spring {
            mass: base.mass * 4.0,
            ..base
        };
        assert!(time_to_rest(base) < time_to_rest(heavy));
    }

    #[test]
    fn long_frames_are_subdivided() {
        let spring = Entrance::Warm.spring();
        let (x, _) = spring.step(0.0, 0.0, 1.0, 0.5);
        assert!((x - 1.0).abs() < 0.05);
    }

    #[test]
    fn hidden_tooltip_fades_back_to_zero() {
        let mut clock = TooltipClock::default();
        clock.mark_closed(ms(0));
        let mut tooltip = Tooltip::default();
        tooltip.enter(ms(10), &clock);
        for _ in 0..60 {
            tooltip.animate(false, 1.0 / 60.0);
        }
        assert_eq!(tooltip.animate(false, 1.0 / 60.0), 1.0);

        tooltip.leave(ms(1100), &mut clock);
        for _ in 0..120 {
            tooltip.animate(false, 1.0 / 60.0);
        }
        assert_eq!(tooltip.animate(false, 1.0 / 60.0), 0.0);
    }

    #[test]
    fn forget_closes_and_drops_remounted_triggers() {
        let mut clock = TooltipClock::default();
        let mut tooltips = Tooltips::default();
        tooltips.get_mut("up").enter(ms(0), &clock);
        tooltips.get_mut("steel").enter(ms(0), &clock);

        tooltips.forget(["up", "down"], ms(100), &mut clock);

        assert!(clock.is_warm(ms(500)));
        assert!(!tooltips.get_mut("up").is_engaged());
        assert!(tooltips.get_mut("steel").is_engaged());
    }

    #[test]
    fn right_click_dismisses_open_tooltips() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<WindowFocused>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Tooltips>()
            .init_resource::<TooltipClock>()
            .add_systems(Update, dismiss_tooltips);
        app.world_mut()
            .resource_mut::<Tooltips>()
            .get_mut("up")
            .enter(Duration::ZERO, &TooltipClock::default());

        app.update();
        assert!(app.world_mut().resource_mut::<Tooltips>().get_mut("up").is_engaged());

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Right);
        app.update();
        assert!(!app.world_mut().resource_mut::<Tooltips>().get_mut("up").is_engaged());
    }
}
