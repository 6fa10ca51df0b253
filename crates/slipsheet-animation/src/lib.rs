//! Animation for the sheet height value.
//!
//! Deliberately not a general animation engine: one `f32` scalar, a tween
//! driver, and a spring driver. The value is advanced by frame callbacks on
//! the [`slipsheet_runtime::Runtime`]; a new animation command supersedes the
//! in-flight one (last write wins).

mod animated_value;
mod easing;

pub use animated_value::{AnimatedValue, AnimationSpec, SpringSpec, TweenSpec};
pub use easing::Easing;
