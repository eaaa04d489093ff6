//! Scalar animations driven by the frame clock.
//!
//! [`animate`] interpolates one `f32` from a start value to a target, calling
//! back on every frame and once on completion. Cancelling the returned
//! [`AnimationHandle`] (or dropping it) guarantees the completion callback
//! never runs.

use std::cell::RefCell;
use std::rc::Rc;

use pinchgrid_core::{FrameCallbackRegistration, FrameClock};

/// Cubic bezier easing curve through (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierEasing {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezierEasing {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn evaluate(a: f32, b: f32, t: f32) -> f32 {
        // Bernstein form with P0 = 0 and P3 = 1.
        let inv = 1.0 - t;
        3.0 * a * inv * inv * t + 3.0 * b * inv * t * t + t * t * t
    }

    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        // x(t) is monotonic for control points inside [0, 1], so bisect for t.
        let mut low = 0.0f32;
        let mut high = 1.0f32;
        let mut t = fraction;
        for _ in 0..24 {
            let x = Self::evaluate(self.x1, self.x2, t);
            if (x - fraction).abs() < 1e-5 {
                break;
            }
            if x < fraction {
                low = t;
            } else {
                high = t;
            }
            t = 0.5 * (low + high);
        }
        Self::evaluate(self.y1, self.y2, t)
    }
}

/// Easing functions for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    LinearEasing,
    EaseInOut,
    FastOutSlowInEasing,
    LinearOutSlowInEasing,
    FastOutLinearInEasing,
    Custom(CubicBezierEasing),
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction.clamp(0.0, 1.0),
            Easing::EaseInOut => CubicBezierEasing::new(0.42, 0.0, 0.58, 1.0).transform(fraction),
            Easing::FastOutSlowInEasing => {
                CubicBezierEasing::new(0.4, 0.0, 0.2, 1.0).transform(fraction)
            }
            Easing::LinearOutSlowInEasing => {
                CubicBezierEasing::new(0.0, 0.0, 0.2, 1.0).transform(fraction)
            }
            Easing::FastOutLinearInEasing => {
                CubicBezierEasing::new(0.4, 0.0, 1.0, 1.0).transform(fraction)
            }
            Easing::Custom(curve) => curve.transform(fraction),
        }
    }
}

/// Tween specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Higher values settle faster.
    pub stiffness: f32,
    /// Velocity (fraction of the distance per second) below which the spring may rest.
    pub velocity_threshold: f32,
    /// Distance to the target, in value units, below which the spring may rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub const DAMPING_RATIO_HIGH_BOUNCY: f32 = 0.2;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;

    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f32 = 1_500.0;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
    pub const STIFFNESS_LOW: f32 = 200.0;
    pub const STIFFNESS_VERY_LOW: f32 = 50.0;

    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    pub fn default_spring() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, Self::STIFFNESS_MEDIUM)
    }

    pub fn bouncy() -> Self {
        Self::new(Self::DAMPING_RATIO_MEDIUM_BOUNCY, Self::STIFFNESS_MEDIUM)
    }

    pub fn stiff() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, 3_000.0)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Spring(SpringSpec::default())
    }
}

/// Fixed integration step for spring physics, in seconds.
const SPRING_TIMESTEP: f32 = 0.016;

struct FloatAnimationInner {
    clock: FrameClock,
    start: f32,
    target: f32,
    current: f32,
    /// Progress units (0 = start, 1 = target) per second.
    velocity: f32,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_tick: Option<Box<dyn FnMut(f32)>>,
    on_end: Option<Box<dyn FnOnce()>>,
    finished: bool,
    cancelled: bool,
}

enum Step {
    Wait,
    Value { value: f32, done: bool },
}

impl FloatAnimationInner {
    fn progress(&self) -> f32 {
        let distance = self.target - self.start;
        if distance.abs() < f32::EPSILON {
            1.0
        } else {
            (self.current - self.start) / distance
        }
    }

    fn step(&mut self, frame_time_nanos: u64) -> Step {
        match self.animation_type {
            AnimationType::Tween(spec) => {
                let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
                let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
                let delay_nanos = spec.delay_millis * 1_000_000;
                if elapsed_nanos < delay_nanos {
                    return Step::Wait;
                }
                let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                let linear = ((elapsed_nanos - delay_nanos) as f32 / duration_nanos as f32)
                    .clamp(0.0, 1.0);
                if linear >= 1.0 {
                    self.current = self.target;
                    return Step::Value {
                        value: self.target,
                        done: true,
                    };
                }
                let eased = spec.easing.transform(linear);
                self.current = self.start + (self.target - self.start) * eased;
                Step::Value {
                    value: self.current,
                    done: false,
                }
            }
            AnimationType::Spring(spec) => {
                if (self.target - self.start).abs() < f32::EPSILON {
                    self.current = self.target;
                    return Step::Value {
                        value: self.target,
                        done: true,
                    };
                }
                let Some(last_frame) = self.last_frame_nanos.replace(frame_time_nanos) else {
                    return Step::Wait;
                };
                let dt = frame_time_nanos.saturating_sub(last_frame) as f32 / 1_000_000_000.0;
                let damping = 2.0 * spec.damping_ratio * spec.stiffness.sqrt();
                let mut progress = self.progress();
                let mut simulated = 0.0f32;
                // Semi-implicit Euler over the time since the previous frame.
                while simulated < dt {
                    let step = SPRING_TIMESTEP.min(dt - simulated);
                    let displacement = progress - 1.0;
                    let force = -spec.stiffness * displacement - damping * self.velocity;
                    self.velocity += force * step;
                    progress = (progress + self.velocity * step).clamp(0.0, 2.0);
                    simulated += step;
                }
                self.current = self.start + (self.target - self.start) * progress;

                let at_rest = self.velocity.abs() < spec.velocity_threshold;
                let near_target = (self.current - self.target).abs() < spec.position_threshold;
                if at_rest && near_target {
                    self.current = self.target;
                    self.velocity = 0.0;
                    return Step::Value {
                        value: self.target,
                        done: true,
                    };
                }
                Step::Value {
                    value: self.current,
                    done: false,
                }
            }
        }
    }
}

/// Handle to a running [`animate`] call.
///
/// Dropping the handle stops the animation the same way [`cancel`](Self::cancel)
/// does.
pub struct AnimationHandle {
    inner: Rc<RefCell<FloatAnimationInner>>,
}

impl AnimationHandle {
    /// Stops the animation. Neither callback runs after this returns.
    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.finished || inner.cancelled {
            return;
        }
        inner.cancelled = true;
        inner.on_tick = None;
        inner.on_end = None;
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        let inner = self.inner.borrow();
        !inner.finished && !inner.cancelled
    }

    pub fn value(&self) -> f32 {
        self.inner.borrow().current
    }

    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    fn schedule_frame(this: &Rc<RefCell<FloatAnimationInner>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || inner.cancelled || inner.finished {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<FloatAnimationInner>>, frame_time_nanos: u64) {
        let step = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if inner.cancelled {
                return;
            }
            inner.step(frame_time_nanos)
        };

        if let Step::Value { value, done } = step {
            // Callbacks run without a borrow held so they may cancel this animation.
            let tick = this.borrow_mut().on_tick.take();
            if let Some(mut tick) = tick {
                tick(value);
                let mut inner = this.borrow_mut();
                if !inner.cancelled && !done {
                    inner.on_tick = Some(tick);
                }
            }
            if done {
                let end = {
                    let mut inner = this.borrow_mut();
                    if inner.cancelled {
                        return;
                    }
                    inner.finished = true;
                    inner.on_end.take()
                };
                log::trace!("animation reached {value}");
                if let Some(end) = end {
                    end();
                }
                return;
            }
        }

        Self::schedule_frame(this);
    }
}

/// Animates a scalar from `from` to `to`, starting on the next frame.
///
/// `on_tick` receives every intermediate value including the final one;
/// `on_end` runs once afterwards unless the handle was cancelled or dropped.
pub fn animate(
    clock: &FrameClock,
    from: f32,
    to: f32,
    animation: AnimationType,
    on_tick: impl FnMut(f32) + 'static,
    on_end: impl FnOnce() + 'static,
) -> AnimationHandle {
    let inner = FloatAnimationInner {
        clock: clock.clone(),
        start: from,
        target: to,
        current: from,
        velocity: 0.0,
        animation_type: animation,
        start_time_nanos: None,
        last_frame_nanos: None,
        registration: None,
        on_tick: Some(Box::new(on_tick)),
        on_end: Some(Box::new(on_end)),
        finished: false,
        cancelled: false,
    };
    let handle = AnimationHandle {
        inner: Rc::new(RefCell::new(inner)),
    };
    AnimationHandle::schedule_frame(&handle.inner);
    handle
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
