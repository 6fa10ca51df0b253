//! Draggable, animated bottom sheet.
//!
//! The widget is exposed as a shared-handle state object,
//! [`BottomSheetState`], in the style of scroll state objects: the host
//! framework renders from it (height, phase, style) and feeds it visibility
//! changes, recognized drag phases, and backdrop taps. All animation runs off
//! a [`slipsheet_runtime::Runtime`] the host drains once per frame.
//!
//! ```
//! use slipsheet::{BottomSheetState, DragEvent, SheetConfig};
//! use slipsheet_runtime::Runtime;
//!
//! let runtime = Runtime::new();
//! let sheet = BottomSheetState::new(runtime.handle(), SheetConfig::new(420.0));
//! sheet.set_visible(true);
//! // Host event loop: runtime.drain_frames_now() once per frame,
//! // sheet.drag(DragEvent::..) from the gesture recognizer.
//! ```

mod color;
mod gesture;
mod sheet;
mod style;

pub use color::Color;
pub use gesture::{DragEvent, DragTracker, CLOSE_SNAP_THRESHOLD};
pub use sheet::{BottomSheetState, SheetConfig, SheetPhase};
pub use style::SheetStyle;

pub use slipsheet_animation::{AnimationSpec, Easing, SpringSpec, TweenSpec};
pub use slipsheet_runtime::{Runtime, RuntimeHandle, ValueListenerId};
