//! Integration tests for the debounced button state machine

use padflow::{Button, ButtonState, Edge, InputError, ManualClock};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn bump(count: &Rc<Cell<u32>>) -> impl FnMut() + 'static {
    let count = Rc::clone(count);
    move || count.set(count.get() + 1)
}

fn tally() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let count = Rc::new(Cell::new(0));
    let handler = bump(&count);
    (count, handler)
}

#[test]
fn test_press_release_scenario() {
    let clock = ManualClock::new();
    let mut button = Button::with_clock(ms(250), Rc::new(clock.clone()));
    let (presses, on_press) = tally();
    let (releases, on_release) = tally();
    button.on_press(on_press).on_release(on_release);

    // Let the window opened by construction run out; this is t = 0
    clock.advance(ms(250));
    button.set_state(true).unwrap();
    assert_eq!(presses.get(), 1);

    // t = 0.1s: inside the window, dropped
    clock.advance(ms(100));
    button.set_state(false).unwrap();
    assert_eq!(button.state(), ButtonState::Pressed);
    assert_eq!(releases.get(), 0);

    // t = 0.3s
    clock.advance(ms(200));
    button.set_state(false).unwrap();
    assert_eq!(button.state(), ButtonState::Released);
    assert_eq!(releases.get(), 1);
    assert_eq!(presses.get(), 1);
}

#[test]
fn test_rapid_press_release_after_construction() {
    let clock = ManualClock::new();
    let mut button = Button::with_clock(ms(100), Rc::new(clock.clone()));
    let dispatches = Rc::new(Cell::new(0));
    button.on_press(bump(&dispatches)).on_release(bump(&dispatches));

    clock.advance(ms(50));
    button.set_state(true).unwrap();
    button.set_state(false).unwrap();
    assert_eq!(dispatches.get(), 0);
    assert!(!button.is_pressed());
}

#[test]
fn test_rapid_bounce_after_confirmed_press() {
    let clock = ManualClock::new();
    let mut button = Button::with_clock(ms(100), Rc::new(clock.clone()));
    let dispatches = Rc::new(Cell::new(0));
    button.on_press(bump(&dispatches)).on_release(bump(&dispatches));

    clock.advance(ms(100));
    button.set_state(true).unwrap();
    assert_eq!(dispatches.get(), 1);

    // Contact bounce: release and re-press both within the window
    clock.advance(ms(10));
    button.set_state(false).unwrap();
    clock.advance(ms(10));
    button.set_state(true).unwrap();
    assert_eq!(dispatches.get(), 1);
    assert!(button.is_pressed());
}

#[test]
fn test_multiple_subscribers_each_fire_once() {
    let clock = ManualClock::new();
    let mut button = Button::with_clock(ms(100), Rc::new(clock.clone()));
    let log = Rc::new(RefCell::new(Vec::new()));

    for label in ["first", "second"] {
        let press_log = Rc::clone(&log);
        let release_log = Rc::clone(&log);
        button
            .on_press(move || press_log.borrow_mut().push(format!("{label} press")))
            .on_release(move || release_log.borrow_mut().push(format!("{label} release")));
    }

    clock.advance(ms(100));
    button.set_state(true).unwrap();
    clock.advance(ms(100));
    button.set_state(false).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["first press", "second press", "first release", "second release"]
    );
}

#[test]
fn test_custom_debounce_interval() {
    let clock = ManualClock::new();
    let mut button = Button::with_clock(ms(500), Rc::new(clock.clone()));
    let (presses, on_press) = tally();
    button.on_press(on_press);

    clock.advance(ms(500));
    button.set_state(true).unwrap();
    clock.advance(ms(500));
    button.set_state(false).unwrap();
    clock.advance(ms(500));
    button.set_state(true).unwrap();
    assert_eq!(presses.get(), 2);
}

#[test]
fn test_zero_debounce_accepts_every_change() {
    let clock = ManualClock::new();
    let mut button = Button::with_clock(Duration::ZERO, Rc::new(clock.clone()));
    let (presses, on_press) = tally();
    button.on_press(on_press);

    button.set_state(true).unwrap();
    button.set_state(false).unwrap();
    button.set_state(true).unwrap();
    assert_eq!(presses.get(), 2);
}

#[test]
fn test_release_callback_error_propagates() {
    let clock = ManualClock::new();
    let mut button = Button::with_clock(ms(10), Rc::new(clock.clone()));
    button.try_on_release(|| anyhow::bail!("device gone"));

    clock.advance(ms(10));
    button.set_state(true).unwrap();
    clock.advance(ms(10));

    let err = button.set_state(false).unwrap_err();
    assert!(matches!(err, InputError::Callback { edge: Edge::Release, index: 0, .. }));
    assert!(err.to_string().contains("device gone"));
}
