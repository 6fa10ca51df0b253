use super::*;

#[test]
fn tracker_maps_translation_against_the_start_height() {
    let mut tracker = DragTracker::default();
    assert!(!tracker.is_active());

    tracker.start(400.0);
    assert!(tracker.is_active());
    assert_eq!(tracker.start_height(), 400.0);

    // Positive translation (finger moving down) shrinks the sheet.
    assert_eq!(tracker.height_at(100.0, 0.0, 600.0), 300.0);
    // Negative translation grows it.
    assert_eq!(tracker.height_at(-150.0, 0.0, 600.0), 550.0);

    tracker.finish();
    assert!(!tracker.is_active());
}

#[test]
fn tracker_clamps_to_the_configured_bounds() {
    let mut tracker = DragTracker::default();
    tracker.start(400.0);

    assert_eq!(tracker.height_at(1_000.0, 100.0, 600.0), 100.0);
    assert_eq!(tracker.height_at(-1_000.0, 100.0, 600.0), 600.0);
}

#[test]
fn each_move_is_computed_from_the_start_not_the_previous_move() {
    let mut tracker = DragTracker::default();
    tracker.start(400.0);

    // Overshooting the clamp and coming back must not accumulate error.
    assert_eq!(tracker.height_at(1_000.0, 100.0, 600.0), 100.0);
    assert_eq!(tracker.height_at(50.0, 100.0, 600.0), 350.0);
}

#[test]
fn clamp_tolerates_reversed_bounds() {
    // min > max is caller error; the clamp must stay panic-free.
    assert_eq!(clamp_height(250.0, 500.0, 100.0), 250.0);
    assert_eq!(clamp_height(50.0, 500.0, 100.0), 100.0);
    assert_eq!(clamp_height(900.0, 500.0, 100.0), 500.0);
}
