use super::*;

#[test]
fn drag_flag_picks_handle_color_and_scale() {
    let style = SheetStyle::default();

    assert_eq!(style.handle_color(false), style.handle_color);
    assert_eq!(style.handle_color(true), style.handle_color_dragging);
    assert_eq!(style.handle_scale(false), 1.0);
    assert_eq!(style.handle_scale(true), style.handle_scale_dragging);
}

#[test]
fn default_backdrop_is_translucent_black() {
    let style = SheetStyle::default();
    assert_eq!(style.backdrop_color, Color::BLACK.with_alpha(0.4));
    assert!(style.backdrop_color.a < 1.0);
}
