//! Debounced digital input
//!
//! The polling loop calls [`Button::set_state`] once per tick with the freshly
//! sampled level. A change is confirmed only when at least the debounce
//! interval has passed since the previous confirmed change; anything faster is
//! dropped outright (no deferred dispatch).
//!
//! Subscriber failures are not isolated. The first failing subscriber aborts
//! the remaining ones for that edge and the error reaches the caller of
//! `set_state`.

use crate::input::clock::{Clock, MonotonicClock};
use crate::input::constants::DEFAULT_DEBOUNCE;
use crate::input::InputError;
use log::{debug, trace, warn};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Confirmed button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

impl From<bool> for ButtonState {
    fn from(pressed: bool) -> Self {
        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

/// Transition a subscriber is registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Released -> Pressed
    Press,
    /// Pressed -> Released
    Release,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Press => write!(f, "press"),
            Edge::Release => write!(f, "release"),
        }
    }
}

/// Callback invoked on a confirmed edge. No payload: query state separately.
pub type Subscriber = Box<dyn FnMut() -> anyhow::Result<()>>;

/// Digital input with press/release subscribers
pub struct Button {
    state: ButtonState,
    debounce_interval: Duration,
    last_confirmed_change: Duration,
    press_subscribers: Vec<Subscriber>,
    release_subscribers: Vec<Subscriber>,
    clock: Rc<dyn Clock>,
}

impl Button {
    /// Button with the default debounce interval on the system monotonic clock
    pub fn new() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(debounce_interval: Duration) -> Self {
        Self::with_clock(debounce_interval, Rc::new(MonotonicClock::new()))
    }

    /// Button reading time from `clock`
    ///
    /// Construction counts as the last confirmed change, so the first
    /// transition is only accepted once the debounce interval has elapsed.
    pub fn with_clock(debounce_interval: Duration, clock: Rc<dyn Clock>) -> Self {
        let last_confirmed_change = clock.now();
        Self {
            state: ButtonState::Released,
            debounce_interval,
            last_confirmed_change,
            press_subscribers: Vec::new(),
            release_subscribers: Vec::new(),
            clock,
        }
    }

    /// Run `callback` on every confirmed press
    pub fn on_press<F>(&mut self, mut callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.press_subscribers.push(Box::new(move || -> anyhow::Result<()> {
            callback();
            Ok(())
        }));
        self
    }

    /// Run `callback` on every confirmed release
    pub fn on_release<F>(&mut self, mut callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.release_subscribers.push(Box::new(move || -> anyhow::Result<()> {
            callback();
            Ok(())
        }));
        self
    }

    /// Fallible variant of [`on_press`](Self::on_press)
    pub fn try_on_press<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.press_subscribers.push(Box::new(callback));
        self
    }

    /// Fallible variant of [`on_release`](Self::on_release)
    pub fn try_on_release<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.release_subscribers.push(Box::new(callback));
        self
    }

    /// Register already boxed subscribers for `edge`, keeping their order
    pub fn subscribe<I>(&mut self, edge: Edge, subscribers: I) -> &mut Self
    where
        I: IntoIterator<Item = Subscriber>,
    {
        self.subscribers_mut(edge).extend(subscribers);
        self
    }

    /// Feed the sampled level for this tick
    pub fn set_state(&mut self, pressed: bool) -> Result<(), InputError> {
        let target = ButtonState::from(pressed);
        if target == self.state {
            return Ok(());
        }

        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_confirmed_change);
        if elapsed < self.debounce_interval {
            trace!(
                "Suppressed {:?} -> {:?} after {:?} (debounce {:?})",
                self.state,
                target,
                elapsed,
                self.debounce_interval
            );
            return Ok(());
        }

        self.state = target;
        self.last_confirmed_change = now;

        let edge = match target {
            ButtonState::Pressed => Edge::Press,
            ButtonState::Released => Edge::Release,
        };
        debug!("Confirmed {} after {:?}", edge, elapsed);
        self.dispatch(edge)
    }

    fn dispatch(&mut self, edge: Edge) -> Result<(), InputError> {
        for (index, subscriber) in self.subscribers_mut(edge).iter_mut().enumerate() {
            if let Err(source) = subscriber() {
                warn!("{} subscriber #{} failed: {}", edge, index, source);
                return Err(InputError::Callback { edge, index, source });
            }
        }
        Ok(())
    }

    fn subscribers_mut(&mut self, edge: Edge) -> &mut Vec<Subscriber> {
        match edge {
            Edge::Press => &mut self.press_subscribers,
            Edge::Release => &mut self.release_subscribers,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.state == ButtonState::Pressed
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn debounce_interval(&self) -> Duration {
        self.debounce_interval
    }

    pub fn subscriber_count(&self, edge: Edge) -> usize {
        match edge {
            Edge::Press => self.press_subscribers.len(),
            Edge::Release => self.release_subscribers.len(),
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("state", &self.state)
            .field("debounce_interval", &self.debounce_interval)
            .field("last_confirmed_change", &self.last_confirmed_change)
            .field("press_subscribers", &self.press_subscribers.len())
            .field("release_subscribers", &self.release_subscribers.len())
            .finish()
    }
}
