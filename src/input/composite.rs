//! Composite inputs
//!
//! Higher-level controls built by owning axis pipelines and buttons. Each
//! part is updated on its own during a tick; a trigger's button level comes
//! from its own raw sample, never from the axis reading.

use crate::input::axis::AxisPipeline;
use crate::input::button::{Button, ButtonState};
use crate::input::clock::Clock;
use crate::input::range::Blindspot;
use crate::input::InputError;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::time::Duration;

/// Two independent axes exposed under `x`/`y` names
///
/// Implementors only provide access to the pipelines; every read and write
/// is forwarded to the matching axis.
pub trait TwoAxis {
    fn horizontal(&self) -> &AxisPipeline;
    fn vertical(&self) -> &AxisPipeline;
    fn horizontal_mut(&mut self) -> &mut AxisPipeline;
    fn vertical_mut(&mut self) -> &mut AxisPipeline;

    fn set_raw_x(&mut self, value: f64) {
        self.horizontal_mut().set_raw(value);
    }

    fn set_raw_y(&mut self, value: f64) {
        self.vertical_mut().set_raw(value);
    }

    fn x(&self) -> f64 {
        self.horizontal().value()
    }

    fn y(&self) -> f64 {
        self.vertical().value()
    }

    fn adjusted_x(&self, blindspot: Blindspot, zero: f64) -> Result<f64, InputError> {
        self.horizontal().adjusted_value(blindspot, zero)
    }

    fn adjusted_y(&self, blindspot: Blindspot, zero: f64) -> Result<f64, InputError> {
        self.vertical().adjusted_value(blindspot, zero)
    }

    fn mapped_x(&self, new_min: f64, new_max: f64) -> Result<f64, InputError> {
        self.horizontal().mapped_value(new_min, new_max)
    }

    fn mapped_y(&self, new_min: f64, new_max: f64) -> Result<f64, InputError> {
        self.vertical().mapped_value(new_min, new_max)
    }

    fn calibrated_x(&self, blindspot: Blindspot, zero: f64, new_min: f64, new_max: f64) -> Result<f64, InputError> {
        self.horizontal().calibrated_value(blindspot, zero, new_min, new_max)
    }

    fn calibrated_y(&self, blindspot: Blindspot, zero: f64, new_min: f64, new_max: f64) -> Result<f64, InputError> {
        self.vertical().calibrated_value(blindspot, zero, new_min, new_max)
    }
}

// ============================================================================
// Directional pad
// ============================================================================

/// One of the four pad directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

/// A single pad direction: a button with no axis
#[derive(Debug, Default)]
pub struct DirectionalEntry {
    button: Button,
}

impl DirectionalEntry {
    pub fn new(button: Button) -> Self {
        Self { button }
    }

    pub fn on_press<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.button.on_press(callback);
        self
    }

    pub fn on_release<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.button.on_release(callback);
        self
    }

    pub fn try_on_press<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.button.try_on_press(callback);
        self
    }

    pub fn try_on_release<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.button.try_on_release(callback);
        self
    }

    pub fn set_state(&mut self, pressed: bool) -> Result<(), InputError> {
        self.button.set_state(pressed)
    }

    pub fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    pub fn state(&self) -> ButtonState {
        self.button.state()
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut Button {
        &mut self.button
    }
}

/// Four directional entries sharing one debounce configuration
#[derive(Debug, Default)]
pub struct DirectionalPad {
    pub up: DirectionalEntry,
    pub down: DirectionalEntry,
    pub left: DirectionalEntry,
    pub right: DirectionalEntry,
}

impl DirectionalPad {
    pub fn new(debounce_interval: Duration, clock: Rc<dyn Clock>) -> Self {
        let entry = || DirectionalEntry::new(Button::with_clock(debounce_interval, Rc::clone(&clock)));
        Self {
            up: entry(),
            down: entry(),
            left: entry(),
            right: entry(),
        }
    }

    pub fn entry(&self, direction: Direction) -> &DirectionalEntry {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn entry_mut(&mut self, direction: Direction) -> &mut DirectionalEntry {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    pub fn set_direction(&mut self, direction: Direction, pressed: bool) -> Result<(), InputError> {
        self.entry_mut(direction).set_state(pressed)
    }
}

// ============================================================================
// Stick
// ============================================================================

/// Two-axis analog input, optionally pressable
#[derive(Debug)]
pub struct Stick {
    horizontal: AxisPipeline,
    vertical: AxisPipeline,
    button: Option<Button>,
}

impl Stick {
    pub fn new(horizontal: AxisPipeline, vertical: AxisPipeline) -> Self {
        Self {
            horizontal,
            vertical,
            button: None,
        }
    }

    /// Make the stick clickable
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = Some(button);
        self
    }

    pub fn is_pressable(&self) -> bool {
        self.button.is_some()
    }

    pub fn button(&self) -> Option<&Button> {
        self.button.as_ref()
    }

    pub fn button_mut(&mut self) -> Option<&mut Button> {
        self.button.as_mut()
    }

    /// Feed the click level; fails on a stick without a button
    pub fn set_pressed(&mut self, pressed: bool) -> Result<(), InputError> {
        match self.button.as_mut() {
            Some(button) => button.set_state(pressed),
            None => Err(InputError::NotPressable("stick".into())),
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.button.as_ref().is_some_and(Button::is_pressed)
    }
}

impl Default for Stick {
    fn default() -> Self {
        Self::new(AxisPipeline::default(), AxisPipeline::default())
    }
}

impl TwoAxis for Stick {
    fn horizontal(&self) -> &AxisPipeline {
        &self.horizontal
    }

    fn vertical(&self) -> &AxisPipeline {
        &self.vertical
    }

    fn horizontal_mut(&mut self) -> &mut AxisPipeline {
        &mut self.horizontal
    }

    fn vertical_mut(&mut self) -> &mut AxisPipeline {
        &mut self.vertical
    }
}

// ============================================================================
// Pressure trigger
// ============================================================================

/// Analog trigger that is also a digital button
///
/// Usually only one axis carries the pressure reading.
#[derive(Debug)]
pub struct PressureTrigger {
    horizontal: AxisPipeline,
    vertical: AxisPipeline,
    button: Button,
}

impl PressureTrigger {
    pub fn new(horizontal: AxisPipeline, vertical: AxisPipeline, button: Button) -> Self {
        Self {
            horizontal,
            vertical,
            button,
        }
    }

    pub fn on_press<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.button.on_press(callback);
        self
    }

    pub fn on_release<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.button.on_release(callback);
        self
    }

    pub fn try_on_press<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.button.try_on_press(callback);
        self
    }

    pub fn try_on_release<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.button.try_on_release(callback);
        self
    }

    pub fn set_pressed(&mut self, pressed: bool) -> Result<(), InputError> {
        self.button.set_state(pressed)
    }

    pub fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut Button {
        &mut self.button
    }
}

impl TwoAxis for PressureTrigger {
    fn horizontal(&self) -> &AxisPipeline {
        &self.horizontal
    }

    fn vertical(&self) -> &AxisPipeline {
        &self.vertical
    }

    fn horizontal_mut(&mut self) -> &mut AxisPipeline {
        &mut self.horizontal
    }

    fn vertical_mut(&mut self) -> &mut AxisPipeline {
        &mut self.vertical
    }
}
