//! Tween animations on top of [`FrameClock`](autogrow_core::FrameClock).

use std::cell::RefCell;
use std::rc::Rc;

use autogrow_core::{
    FrameCallbackRegistration, MutableState, RuntimeHandle, StateSubscription, NANOS_PER_MILLI,
};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Easing curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    /// Symmetric cubic ease, the curve hosts use for keyboard transitions.
    EaseInOut,
    /// Material "standard" curve.
    FastOutSlowIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Evaluates the CSS-style cubic bezier `(0,0) (x1,y1) (x2,y2) (1,1)` at `x = fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson first, bisection when the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let error = sample(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            solved = true;
            break;
        }
        let derivative = slope(ax, bx, cx, t);
        if derivative.abs() < 1e-6 {
            break;
        }
        t = (t - error / derivative).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut low, mut high) = (0.0_f32, 1.0_f32);
        t = fraction;
        for _ in 0..16 {
            let error = sample(ax, bx, cx, t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
    }

    sample(ay, by, cy, t)
}

/// Duration and easing of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
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
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Eased progress in `[0, 1]` after `elapsed_nanos`, and whether the tween is done.
    pub fn progress_at(&self, elapsed_nanos: u64) -> (f32, bool) {
        let delay_nanos = self.delay_millis * NANOS_PER_MILLI;
        if elapsed_nanos < delay_nanos {
            return (0.0, false);
        }
        let duration_nanos = (self.duration_millis * NANOS_PER_MILLI).max(1);
        let linear =
            ((elapsed_nanos - delay_nanos) as f64 / duration_nanos as f64).clamp(0.0, 1.0) as f32;
        (self.easing.transform(linear), linear >= 1.0)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Value animated towards a target, one step per frame.
///
/// Retargeting while running starts the new tween from the current value.
/// Asking for the target that is already running (or already reached) is a
/// no-op, so bursts of identical requests coalesce into one animation.
pub struct Animatable<T: Lerp + Clone + PartialEq + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + PartialEq + 'static> {
    state: MutableState<T>,
    runtime: RuntimeHandle,
    current: T,
    start: T,
    target: T,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
}

impl<T: Lerp + Clone + PartialEq + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            state: MutableState::new(initial.clone()),
            runtime,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            spec: AnimationSpec::default(),
            start_time_nanos: None,
            registration: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animates towards `target`. Returns `false` when nothing had to start.
    pub fn animate_to(&self, target: T, spec: AnimationSpec) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            let running = inner.registration.is_some();
            if inner.target == target && (running || inner.current == target) {
                return false;
            }

            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.start = inner.current.clone();
            inner.target = target;
            inner.spec = spec;
            inner.start_time_nanos = None;
        }
        Self::schedule_frame(&self.inner);
        true
    }

    /// Jumps to `target`, cancelling any running tween.
    pub fn snap_to(&self, target: T) {
        let state = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target.clone();
            inner.start_time_nanos = None;
            inner.state.clone()
        };
        state.set(target);
    }

    /// Cancels a running tween, leaving the value where it is.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.target = inner.current.clone();
        inner.start = inner.current.clone();
        inner.start_time_nanos = None;
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn spec(&self) -> AnimationSpec {
        self.inner.borrow().spec
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    /// Observes every animated value, frame by frame.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> StateSubscription {
        let state = self.inner.borrow().state.clone();
        state.subscribe(listener)
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.frame_clock()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if registration.is_active() {
            this.borrow_mut().registration = Some(registration);
        } else {
            log::trace!("runtime gone; animation cannot be scheduled");
        }
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let (state, value, finished) = {
            let mut inner = this.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.disarm();
            }
            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let (progress, finished) = inner
                .spec
                .progress_at(frame_time_nanos.saturating_sub(start_time));

            let value = if finished {
                inner.start = inner.target.clone();
                inner.start_time_nanos = None;
                inner.target.clone()
            } else {
                inner.start.lerp(&inner.target, progress)
            };
            inner.current = value.clone();
            (inner.state.clone(), value, finished)
        };

        // Listeners run with no borrow held; they may read or retarget.
        state.set(value);

        if !finished {
            Self::schedule_frame(this);
        }
    }
}

impl<T: Lerp + Clone + PartialEq + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
