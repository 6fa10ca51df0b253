use crate::MutableValue;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn set_notifies_listeners_with_new_value() {
    let value = MutableValue::new(0.0f32);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let seen_cb = Rc::clone(&seen);
    value.add_listener(move |v| seen_cb.borrow_mut().push(*v));

    value.set(1.5);
    value.set(3.0);
    assert_eq!(seen.borrow().as_slice(), &[1.5, 3.0]);
    assert_eq!(value.get(), 3.0);
}

#[test]
fn removed_listener_stops_receiving_updates() {
    let value = MutableValue::new(0u32);
    let count = Rc::new(RefCell::new(0));

    let count_cb = Rc::clone(&count);
    let id = value.add_listener(move |_| *count_cb.borrow_mut() += 1);

    value.set(1);
    value.remove_listener(id);
    value.set(2);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn listener_may_read_the_cell_it_observes() {
    let value = MutableValue::new(0.0f32);
    let observed = Rc::new(RefCell::new(0.0f32));

    let inner_value = value.clone();
    let observed_cb = Rc::clone(&observed);
    value.add_listener(move |_| *observed_cb.borrow_mut() = inner_value.get());

    value.set(42.0);
    assert_eq!(*observed.borrow(), 42.0);
}

#[test]
fn state_view_tracks_the_cell() {
    let value = MutableValue::new(7i32);
    let state = value.as_state();
    assert_eq!(state.get(), 7);
    value.set(9);
    assert_eq!(state.get(), 9);
    assert_eq!(state.with(|v| *v * 2), 18);
}
