use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slipsheet_runtime::{
    FrameCallbackRegistration, MutableValue, RuntimeHandle, ValueListenerId, ValueState,
};

use crate::easing::Easing;

/// Time-based animation: duration, easing, optional start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl TweenSpec {
    pub fn new(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::Linear)
    }

    /// The sheet's closing curve: a quick cubic ease-out.
    pub fn ease_out(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::EaseOut)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(300, Easing::FastOutSlowIn)
    }
}

/// Physics-based spring animation over the value in its own units
/// (logical pixels for the sheet height), mass fixed at 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 bouncy, > 1.0 sluggish.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Speed below which the spring may come to rest, in units per second.
    pub velocity_threshold: f32,
    /// Distance from the target below which the spring may come to rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            velocity_threshold: 5.0,
            position_threshold: 0.5,
        }
    }

    pub fn bouncy() -> Self {
        Self::new(0.5, 1500.0)
    }

    pub fn stiff() -> Self {
        Self::new(1.0, 3000.0)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(1.0, 1500.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationSpec {
    Tween(TweenSpec),
    Spring(SpringSpec),
}

impl Default for AnimationSpec {
    fn default() -> Self {
        AnimationSpec::Spring(SpringSpec::default())
    }
}

type EndCallback = Box<dyn FnOnce()>;

/// A single animated `f32` driven by the runtime's frame callbacks.
///
/// A new `animate_to` or `snap_to` supersedes the in-flight animation and the
/// superseded animation's end callback is dropped unfired. All methods take
/// `&self`; the handle is cheap to clone and clones share the value.
pub struct AnimatedValue {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    value: MutableValue<f32>,
    runtime: RuntimeHandle,
    current: f32,
    velocity: f32,
    start: f32,
    target: f32,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndCallback>,
}

/// Longest frame gap the spring will integrate across. Anything larger (a
/// paused host, a debugger break) is treated as a single slow frame.
const MAX_SPRING_FRAME_SECONDS: f32 = 0.1;

/// Fixed substep for spring integration, roughly one 60 Hz frame.
const SPRING_SUBSTEP_SECONDS: f32 = 0.016;

impl AnimatedValue {
    pub fn new(initial: f32, runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value: MutableValue::new(initial),
                runtime,
                current: initial,
                velocity: 0.0,
                start: initial,
                target: initial,
                spec: AnimationSpec::default(),
                start_time_nanos: None,
                last_frame_nanos: None,
                registration: None,
                on_end: None,
            })),
        }
    }

    pub fn value(&self) -> f32 {
        self.inner.borrow().current
    }

    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    /// Read-only observable view of the value.
    pub fn state(&self) -> ValueState<f32> {
        self.inner.borrow().value.as_state()
    }

    /// Observes every mutation of the value, animated or direct.
    pub fn add_listener(&self, listener: impl Fn(&f32) + 'static) -> ValueListenerId {
        self.inner.borrow().value.add_listener(listener)
    }

    pub fn remove_listener(&self, id: ValueListenerId) {
        self.inner.borrow().value.remove_listener(id);
    }

    /// Starts animating toward `target`, superseding any in-flight animation.
    pub fn animate_to(&self, target: f32, spec: AnimationSpec) {
        self.start_animation(target, spec, None);
    }

    /// Like [`AnimatedValue::animate_to`], additionally running `on_end` once
    /// the animation settles. Superseded animations never run their `on_end`.
    pub fn animate_to_then(&self, target: f32, spec: AnimationSpec, on_end: impl FnOnce() + 'static) {
        self.start_animation(target, spec, Some(Box::new(on_end)));
    }

    /// Sets the value immediately, cancelling any in-flight animation.
    /// This is the direct-drive path used while a drag owns the value.
    pub fn snap_to(&self, target: f32) {
        let value = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            if inner.on_end.take().is_some() {
                log::trace!("animated value: end callback dropped by snap_to");
            }
            inner.current = target;
            inner.start = target;
            inner.target = target;
            inner.velocity = 0.0;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.value.clone()
        };
        // Notify outside the borrow; listeners may start a new animation.
        value.set(target);
    }

    fn start_animation(&self, target: f32, spec: AnimationSpec, on_end: Option<EndCallback>) {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            if inner.on_end.take().is_some() {
                log::trace!("animated value: end callback superseded");
            }
            inner.start = inner.current;
            inner.target = target;
            inner.spec = spec;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.on_end = on_end;
            if matches!(spec, AnimationSpec::Tween(_)) {
                inner.velocity = 0.0;
            }
        }
        Self::schedule_frame(&self.inner);
    }

    fn schedule_frame(this: &Rc<RefCell<Inner>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime
            .frame_clock()
            .with_frame_nanos(move |time| Self::on_frame(&weak, time));
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(weak: &Weak<RefCell<Inner>>, frame_time_nanos: u64) {
        let Some(this) = weak.upgrade() else {
            return;
        };

        enum Step {
            /// Still inside the tween delay; nothing to publish.
            Waiting,
            Running(f32),
            Finished(f32),
        }

        let (value, step, on_end) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            let step = match inner.spec {
                AnimationSpec::Tween(spec) => {
                    let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
                    let delay_nanos = spec.delay_millis * 1_000_000;

                    if elapsed_nanos < delay_nanos {
                        Step::Waiting
                    } else {
                        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                        let linear = ((elapsed_nanos - delay_nanos) as f32
                            / duration_nanos as f32)
                            .clamp(0.0, 1.0);
                        let eased = spec.easing.transform(linear);
                        let next = inner.start + (inner.target - inner.start) * eased;
                        if linear >= 1.0 {
                            Step::Finished(inner.target)
                        } else {
                            Step::Running(next)
                        }
                    }
                }
                AnimationSpec::Spring(spec) => {
                    let last = *inner.last_frame_nanos.get_or_insert(frame_time_nanos);
                    let dt = (frame_time_nanos.saturating_sub(last) as f32 / 1e9)
                        .min(MAX_SPRING_FRAME_SECONDS);

                    if dt <= 0.0 {
                        // First frame only establishes the time base.
                        Step::Waiting
                    } else {
                        // Semi-implicit Euler on the value itself, fixed
                        // substeps for stability at large frame gaps.
                        let damping = 2.0 * spec.damping_ratio * spec.stiffness.sqrt();
                        let target = inner.target;
                        let mut position = inner.current;
                        let mut velocity = inner.velocity;
                        let mut remaining = dt;
                        while remaining > 0.0 {
                            let step = remaining.min(SPRING_SUBSTEP_SECONDS);
                            let acceleration =
                                -spec.stiffness * (position - target) - damping * velocity;
                            velocity += acceleration * step;
                            position += velocity * step;
                            remaining -= step;
                        }
                        inner.velocity = velocity;
                        inner.current = position;

                        let at_rest = velocity.abs() < spec.velocity_threshold
                            && (position - target).abs() < spec.position_threshold;
                        if at_rest {
                            Step::Finished(target)
                        } else {
                            Step::Running(position)
                        }
                    }
                }
            };

            inner.last_frame_nanos = Some(frame_time_nanos);

            let on_end = match &step {
                Step::Running(next) => {
                    inner.current = *next;
                    None
                }
                Step::Finished(target) => {
                    inner.current = *target;
                    inner.start = *target;
                    inner.velocity = 0.0;
                    inner.start_time_nanos = None;
                    inner.last_frame_nanos = None;
                    inner.on_end.take()
                }
                Step::Waiting => None,
            };

            (inner.value.clone(), step, on_end)
        };

        // Publish and finish outside the borrow: listeners and end callbacks
        // may re-enter this value (e.g. the sheet starting its next phase).
        match step {
            Step::Waiting => Self::schedule_frame(&this),
            Step::Running(next) => {
                value.set(next);
                Self::schedule_frame(&this);
            }
            Step::Finished(target) => {
                log::trace!("animated value: settled at {target}");
                value.set(target);
                if let Some(on_end) = on_end {
                    on_end();
                }
            }
        }
    }
}

impl Clone for AnimatedValue {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[path = "tests/animated_value_tests.rs"]
mod tests;
