//! Single-threaded frame-callback runtime for slipsheet.
//!
//! The host UI framework owns the event loop; this crate only provides the
//! seam between it and the sheet's animations. Once per vsync the host calls
//! [`Runtime::drain_frame_callbacks`] with the frame time and every pending
//! callback (typically a single in-flight animation) runs on that thread.
//!
//! Everything here is `Rc`/`RefCell` based and must stay on the UI thread.

mod frame_clock;
mod runtime;
mod value;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
pub use value::{MutableValue, ValueListenerId, ValueState};
