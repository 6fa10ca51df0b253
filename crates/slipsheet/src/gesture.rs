//! Adapter between the host's drag recognizer and the sheet height.
//!
//! The host delivers already-recognized drag phases with a cumulative
//! translation; this module only maps translation to a clamped height. No
//! recognition (slop, velocity tracking) happens here.

/// How far below the open height a drag must end for the sheet to close
/// instead of snapping back, in logical pixels.
///
/// A fixed distance rather than a fraction: short sheets should not become
/// impossible to close and tall sheets should not close from a nudge.
pub const CLOSE_SNAP_THRESHOLD: f32 = 80.0;

/// Drag phases as delivered by the host gesture layer. `translation` is the
/// cumulative finger travel since `Start`, positive toward the bottom of the
/// screen (so a positive translation shrinks the sheet).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Start,
    Move { translation: f32 },
    End,
    /// The host revoked the gesture (e.g. a parent scroller claimed it).
    Cancel,
}

/// Tracks one drag: remembers the height at `Start` and converts each
/// cumulative translation into a clamped height.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    start_height: f32,
    active: bool,
}

impl DragTracker {
    pub fn start(&mut self, height: f32) {
        self.start_height = height;
        self.active = true;
    }

    pub fn finish(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start_height(&self) -> f32 {
        self.start_height
    }

    /// Height for the given cumulative translation, clamped to the bounds.
    pub fn height_at(&self, translation: f32, min_height: f32, max_height: f32) -> f32 {
        clamp_height(self.start_height - translation, min_height, max_height)
    }
}

/// Clamp that tolerates reversed bounds (`min > max` is caller error per the
/// configuration contract, but it must not panic like `f32::clamp` would).
pub(crate) fn clamp_height(height: f32, min_height: f32, max_height: f32) -> f32 {
    let lo = min_height.min(max_height);
    let hi = min_height.max(max_height);
    height.max(lo).min(hi)
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
