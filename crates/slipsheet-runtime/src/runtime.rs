use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::frame_clock::FrameClock;

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;

/// Owns the frame-callback registry. Created once by the host and kept alive
/// for the lifetime of the UI; handles hold a `Weak` reference so dropping the
/// runtime quietly disables every outstanding animation.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

struct RuntimeInner {
    next_callback_id: Cell<FrameCallbackId>,
    frame_callbacks: RefCell<FxHashMap<FrameCallbackId, FrameCallback>>,
    /// Origin instant for the wall-clock convenience driver.
    started_at: web_time::Instant,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                next_callback_id: Cell::new(1),
                frame_callbacks: RefCell::new(FxHashMap::default()),
                started_at: web_time::Instant::now(),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Runs every callback registered before this call, in registration
    /// order. Callbacks registered while draining (the usual "schedule the
    /// next frame" pattern) are deferred to the next drain.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    /// Drains using the wall clock. Hosts without an explicit frame time
    /// (tests use synthetic times instead) can call this once per frame.
    pub fn drain_frames_now(&self) {
        let elapsed = self.inner.started_at.elapsed().as_nanos() as u64;
        self.inner.drain_frame_callbacks(elapsed);
    }

    /// Whether any animation still wants a frame. Hosts use this to decide
    /// whether to request another vsync.
    pub fn has_frame_callbacks(&self) -> bool {
        !self.inner.frame_callbacks.borrow().is_empty()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeInner {
    fn register_frame_callback(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.next_callback_id.get();
        self.next_callback_id.set(id + 1);
        self.frame_callbacks.borrow_mut().insert(id, callback);
        log::trace!("runtime: frame callback {id} registered");
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        self.frame_callbacks.borrow_mut().remove(&id);
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        // Move the due callbacks out before running them so that callbacks
        // may register or cancel without re-entering the registry borrow.
        let mut due: SmallVec<[(FrameCallbackId, FrameCallback); 4]> = {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            callbacks.drain().collect()
        };
        due.sort_by_key(|(id, _)| *id);
        for (_, callback) in due {
            callback(frame_time_nanos);
        }
    }
}

/// Cheap, cloneable reference to the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    /// Registers a one-shot frame callback. Returns `None` when the runtime
    /// is gone, in which case the caller simply never animates.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| !inner.frame_callbacks.borrow().is_empty())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
