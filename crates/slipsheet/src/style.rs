use crate::color::Color;

/// Visual overrides for the sheet. All fields are plain data; the host's
/// renderer reads them every frame together with the current height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetStyle {
    pub sheet_color: Color,
    /// Backdrop scrim behind the sheet in modal mode.
    pub backdrop_color: Color,
    pub handle_color: Color,
    /// Handle-bar color while a drag is active.
    pub handle_color_dragging: Color,
    /// Handle-bar scale factor while a drag is active.
    pub handle_scale_dragging: f32,
    pub corner_radius: f32,
    pub handle_width: f32,
    pub handle_height: f32,
}

impl SheetStyle {
    /// Handle-bar color for the given drag flag.
    pub fn handle_color(&self, dragging: bool) -> Color {
        if dragging {
            self.handle_color_dragging
        } else {
            self.handle_color
        }
    }

    /// Handle-bar scale for the given drag flag.
    pub fn handle_scale(&self, dragging: bool) -> f32 {
        if dragging {
            self.handle_scale_dragging
        } else {
            1.0
        }
    }
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            sheet_color: Color::WHITE,
            backdrop_color: Color::BLACK.with_alpha(0.4),
            handle_color: Color::from_rgb_u8(0xd0, 0xd0, 0xd0),
            handle_color_dragging: Color::from_rgb_u8(0xa0, 0xa0, 0xa0),
            handle_scale_dragging: 1.2,
            corner_radius: 16.0,
            handle_width: 40.0,
            handle_height: 4.0,
        }
    }
}

#[cfg(test)]
#[path = "tests/style_tests.rs"]
mod tests;
