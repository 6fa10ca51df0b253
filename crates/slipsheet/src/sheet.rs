use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slipsheet_animation::{AnimatedValue, AnimationSpec, SpringSpec, TweenSpec};
use slipsheet_runtime::{RuntimeHandle, ValueListenerId, ValueState};

use crate::color::Color;
use crate::gesture::{DragEvent, DragTracker, CLOSE_SNAP_THRESHOLD};
use crate::style::SheetStyle;

/// Where the sheet currently is in its lifecycle.
///
/// `Opening` covers every settling animation that keeps the sheet on screen
/// (the initial open and post-drag snaps); `Open` means the height has
/// settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetPhase {
    Closed,
    Opening,
    Open,
    Closing,
    Dragging,
}

/// Caller configuration. Plain data with builder-style setters.
///
/// `min_height > max_height` is a caller error; the sheet clamps defensively
/// instead of validating (see the configuration contract in the crate docs).
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Height the sheet opens to and snaps back to after an undecided drag.
    pub target_height: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Modal sheets draw a backdrop; tapping it closes the sheet.
    pub modal: bool,
    /// Ignore drag gestures entirely.
    pub disable_drag: bool,
    /// The sheet can only be dismissed programmatically: drags always snap
    /// back and backdrop taps are ignored.
    pub disable_close: bool,
    /// Spring for the opening animation.
    pub open_spring: SpringSpec,
    /// Spring for post-drag snaps.
    pub snap_spring: SpringSpec,
    /// Tween for the closing animation.
    pub close_tween: TweenSpec,
    pub style: SheetStyle,
}

impl SheetConfig {
    pub fn new(target_height: f32) -> Self {
        Self {
            target_height,
            min_height: 0.0,
            max_height: target_height,
            modal: true,
            disable_drag: false,
            disable_close: false,
            open_spring: SpringSpec::default(),
            snap_spring: SpringSpec::stiff(),
            close_tween: TweenSpec::ease_out(250),
            style: SheetStyle::default(),
        }
    }

    pub fn with_bounds(mut self, min_height: f32, max_height: f32) -> Self {
        self.min_height = min_height;
        self.max_height = max_height;
        self
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn with_disable_drag(mut self, disable_drag: bool) -> Self {
        self.disable_drag = disable_drag;
        self
    }

    pub fn with_disable_close(mut self, disable_close: bool) -> Self {
        self.disable_close = disable_close;
        self
    }

    pub fn with_style(mut self, style: SheetStyle) -> Self {
        self.style = style;
        self
    }
}

type CloseCallback = Rc<dyn Fn()>;

/// The sheet controller: one animated height, one drag flag, one snap policy.
///
/// Clones share the same sheet. The host calls [`set_visible`], [`drag`], and
/// [`backdrop_tap`] from its event handlers and reads [`height`] /
/// [`phase`] / handle visuals when rendering.
///
/// [`set_visible`]: BottomSheetState::set_visible
/// [`drag`]: BottomSheetState::drag
/// [`backdrop_tap`]: BottomSheetState::backdrop_tap
/// [`height`]: BottomSheetState::height
/// [`phase`]: BottomSheetState::phase
pub struct BottomSheetState {
    inner: Rc<SheetInner>,
}

struct SheetInner {
    config: RefCell<SheetConfig>,
    height: AnimatedValue,
    phase: Cell<SheetPhase>,
    /// Whether the sheet is logically shown. Cleared as soon as a close
    /// begins so a second dismissal cannot fire the close callback twice.
    visible: Cell<bool>,
    dragging: Cell<bool>,
    tracker: Cell<DragTracker>,
    on_close: RefCell<Option<CloseCallback>>,
}

impl BottomSheetState {
    /// Creates a closed sheet (height 0).
    pub fn new(runtime: RuntimeHandle, config: SheetConfig) -> Self {
        Self {
            inner: Rc::new(SheetInner {
                config: RefCell::new(config),
                height: AnimatedValue::new(0.0, runtime),
                phase: Cell::new(SheetPhase::Closed),
                visible: Cell::new(false),
                dragging: Cell::new(false),
                tracker: Cell::new(DragTracker::default()),
                on_close: RefCell::new(None),
            }),
        }
    }

    pub fn config(&self) -> SheetConfig {
        self.inner.config.borrow().clone()
    }

    pub fn set_config(&self, config: SheetConfig) {
        *self.inner.config.borrow_mut() = config;
    }

    pub fn style(&self) -> SheetStyle {
        self.inner.config.borrow().style
    }

    pub fn height(&self) -> f32 {
        self.inner.height.value()
    }

    /// Read-only observable height, for hosts that bind rather than poll.
    pub fn height_state(&self) -> ValueState<f32> {
        self.inner.height.state()
    }

    pub fn phase(&self) -> SheetPhase {
        self.inner.phase.get()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.visible.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.dragging.get()
    }

    /// Handle-bar color for the current drag flag.
    pub fn handle_color(&self) -> Color {
        self.style().handle_color(self.is_dragging())
    }

    /// Handle-bar scale for the current drag flag.
    pub fn handle_scale(&self) -> f32 {
        self.style().handle_scale(self.is_dragging())
    }

    /// Sets the close callback, replacing any previous one. Invoked once per
    /// dismissal, after the closing animation settles at height 0.
    pub fn on_close(&self, callback: impl Fn() + 'static) {
        *self.inner.on_close.borrow_mut() = Some(Rc::new(callback));
    }

    /// Observes every height mutation, animated or drag-driven.
    pub fn on_height_change(&self, callback: impl Fn(f32) + 'static) -> ValueListenerId {
        self.inner.height.add_listener(move |height| callback(*height))
    }

    pub fn remove_height_listener(&self, id: ValueListenerId) {
        self.inner.height.remove_listener(id);
    }

    /// Shows or dismisses the sheet. Showing spring-animates to the target
    /// height; dismissing tween-animates to 0 and then fires the close
    /// callback. Redundant calls are no-ops.
    pub fn set_visible(&self, visible: bool) {
        if visible == self.inner.visible.get() {
            return;
        }
        if visible {
            log::debug!("sheet: opening");
            self.inner.visible.set(true);
            let (target, spring) = {
                let config = self.inner.config.borrow();
                (config.target_height, config.open_spring)
            };
            Self::snap_open(&self.inner, target, spring);
        } else {
            log::debug!("sheet: dismiss requested");
            self.inner.visible.set(false);
            if self.inner.dragging.get() {
                self.inner.dragging.set(false);
                let mut tracker = self.inner.tracker.get();
                tracker.finish();
                self.inner.tracker.set(tracker);
            }
            Self::begin_close(&self.inner);
        }
    }

    /// Feeds one drag phase from the host gesture layer.
    pub fn drag(&self, event: DragEvent) {
        let inner = &self.inner;
        match event {
            DragEvent::Start => {
                if inner.config.borrow().disable_drag || !inner.visible.get() {
                    return;
                }
                // Take over the height from any in-flight animation.
                let height = inner.height.value();
                inner.height.snap_to(height);
                let mut tracker = inner.tracker.get();
                tracker.start(height);
                inner.tracker.set(tracker);
                inner.dragging.set(true);
                inner.phase.set(SheetPhase::Dragging);
                log::debug!("sheet: drag started at {height}");
            }
            DragEvent::Move { translation } => {
                if !inner.dragging.get() {
                    return;
                }
                let config = inner.config.borrow();
                let height = inner.tracker.get().height_at(
                    translation,
                    config.min_height,
                    config.max_height,
                );
                drop(config);
                inner.height.snap_to(height);
            }
            DragEvent::End | DragEvent::Cancel => {
                if !inner.dragging.get() {
                    return;
                }
                inner.dragging.set(false);
                let mut tracker = inner.tracker.get();
                tracker.finish();
                inner.tracker.set(tracker);
                Self::settle_after_drag(inner);
            }
        }
    }

    /// Tap on the backdrop scrim. Closes modal sheets unless closing is
    /// disabled; ignored entirely for non-modal sheets.
    pub fn backdrop_tap(&self) {
        let config = self.inner.config.borrow();
        if !config.modal || config.disable_close {
            return;
        }
        drop(config);
        if !self.inner.visible.get() {
            return;
        }
        log::debug!("sheet: backdrop tapped");
        self.inner.visible.set(false);
        Self::begin_close(&self.inner);
    }

    /// Snap policy, evaluated once per drag end.
    fn settle_after_drag(inner: &Rc<SheetInner>) {
        let config = inner.config.borrow().clone();
        let height = inner.height.value();

        if config.disable_close {
            log::debug!("sheet: drag ended at {height}, closing disabled, snapping back");
            Self::snap_open(inner, config.target_height, config.snap_spring);
        } else if height >= config.max_height {
            log::debug!("sheet: drag ended at {height}, snapping to max");
            Self::snap_open(inner, config.max_height, config.snap_spring);
        } else if height <= config.min_height {
            log::debug!("sheet: drag ended at {height}, snapping to min");
            Self::snap_open(inner, config.min_height, config.snap_spring);
        } else if height < config.target_height - CLOSE_SNAP_THRESHOLD {
            log::debug!("sheet: drag ended at {height}, below close threshold");
            inner.visible.set(false);
            Self::begin_close(inner);
        } else {
            log::debug!("sheet: drag ended at {height}, snapping back to target");
            Self::snap_open(inner, config.target_height, config.snap_spring);
        }
    }

    /// Spring toward a resting height that keeps the sheet on screen.
    fn snap_open(inner: &Rc<SheetInner>, target: f32, spring: SpringSpec) {
        inner.phase.set(SheetPhase::Opening);
        let weak = Rc::downgrade(inner);
        inner
            .height
            .animate_to_then(target, AnimationSpec::Spring(spring), move || {
                if let Some(inner) = weak.upgrade() {
                    inner.phase.set(SheetPhase::Open);
                }
            });
    }

    /// Tween to 0; on settle, mark closed and fire the close callback.
    /// The caller has already cleared `visible`.
    fn begin_close(inner: &Rc<SheetInner>) {
        debug_assert!(!inner.visible.get());
        inner.phase.set(SheetPhase::Closing);
        let tween = inner.config.borrow().close_tween;
        let weak = Rc::downgrade(inner);
        inner
            .height
            .animate_to_then(0.0, AnimationSpec::Tween(tween), move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.phase.set(SheetPhase::Closed);
                log::debug!("sheet: closed");
                let callback = inner.on_close.borrow().clone();
                if let Some(callback) = callback {
                    callback();
                }
            });
    }
}

impl Clone for BottomSheetState {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[path = "tests/sheet_tests.rs"]
mod tests;
