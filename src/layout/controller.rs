//! Controller built from a layout
//!
//! Owns every input declared in a [`LayoutConfig`] and routes the samples a
//! polling loop produces to the matching component. All buttons share one
//! clock, so a tick is evaluated against a single time source.

use crate::input::axis::AxisPipeline;
use crate::input::button::Button;
use crate::input::clock::{Clock, MonotonicClock};
use crate::input::composite::{Direction, DirectionalPad, PressureTrigger, Stick, TwoAxis};
use crate::input::InputError;
use crate::layout::config::{AxisLayout, ConfigError, LayoutConfig};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Axis of a two-axis input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisId {
    X,
    Y,
}

/// One raw reading taken by the polling loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputSample {
    /// Digital level of a button, stick click or trigger button
    Button { name: String, pressed: bool },

    /// Raw value of one axis of a stick or trigger
    Axis { name: String, axis: AxisId, value: f64 },

    /// Digital level of a d-pad direction
    Direction { direction: Direction, pressed: bool },
}

/// Oriented reading of a two-axis input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisReading {
    pub x: f64,
    pub y: f64,
    pub pressed: bool,
}

/// Point-in-time view of every input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSnapshot {
    pub buttons: BTreeMap<String, bool>,
    pub sticks: BTreeMap<String, AxisReading>,
    pub triggers: BTreeMap<String, AxisReading>,
    pub dpad: Option<BTreeMap<Direction, bool>>,
}

/// A full set of inputs updated once per polling tick
pub struct Controller {
    buttons: HashMap<String, Button>,
    sticks: HashMap<String, Stick>,
    triggers: HashMap<String, PressureTrigger>,
    dpad: Option<DirectionalPad>,
}

impl Controller {
    /// Build the layout on the system monotonic clock
    pub fn from_config(config: &LayoutConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Rc::new(MonotonicClock::new()))
    }

    /// Build the layout with every button reading `clock`
    ///
    /// The layout is validated first, so duplicate or blank names never
    /// collapse into a single input.
    pub fn with_clock(config: &LayoutConfig, clock: Rc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;

        let button = |debounce_ms: Option<u64>| Button::with_clock(config.debounce_for(debounce_ms), Rc::clone(&clock));

        let buttons: HashMap<String, Button> = config
            .buttons
            .iter()
            .map(|b| (b.name.clone(), button(b.debounce_ms)))
            .collect();

        let sticks: HashMap<String, Stick> = config
            .sticks
            .iter()
            .map(|s| {
                let mut stick = Stick::new(axis(&s.x), axis(&s.y));
                if s.pressable {
                    stick = stick.with_button(button(s.debounce_ms));
                }
                (s.name.clone(), stick)
            })
            .collect();

        let triggers: HashMap<String, PressureTrigger> = config
            .triggers
            .iter()
            .map(|t| (t.name.clone(), PressureTrigger::new(axis(&t.x), axis(&t.y), button(t.debounce_ms))))
            .collect();

        let dpad = config
            .dpad
            .as_ref()
            .map(|d| DirectionalPad::new(config.debounce_for(d.debounce_ms), Rc::clone(&clock)));

        info!(
            "Controller ready: {} buttons, {} sticks, {} triggers, d-pad: {}",
            buttons.len(),
            sticks.len(),
            triggers.len(),
            dpad.is_some()
        );

        Ok(Self {
            buttons,
            sticks,
            triggers,
            dpad,
        })
    }

    pub fn button(&self, name: &str) -> Option<&Button> {
        self.buttons.get(name)
    }

    /// Plain button by name, for registering subscribers
    pub fn button_mut(&mut self, name: &str) -> Option<&mut Button> {
        self.buttons.get_mut(name)
    }

    pub fn stick(&self, name: &str) -> Option<&Stick> {
        self.sticks.get(name)
    }

    pub fn stick_mut(&mut self, name: &str) -> Option<&mut Stick> {
        self.sticks.get_mut(name)
    }

    pub fn trigger(&self, name: &str) -> Option<&PressureTrigger> {
        self.triggers.get(name)
    }

    pub fn trigger_mut(&mut self, name: &str) -> Option<&mut PressureTrigger> {
        self.triggers.get_mut(name)
    }

    pub fn dpad(&self) -> Option<&DirectionalPad> {
        self.dpad.as_ref()
    }

    pub fn dpad_mut(&mut self) -> Option<&mut DirectionalPad> {
        self.dpad.as_mut()
    }

    /// Route one sample to its input
    pub fn apply(&mut self, sample: &InputSample) -> Result<(), InputError> {
        match sample {
            InputSample::Button { name, pressed } => self.set_button(name, *pressed),
            InputSample::Axis { name, axis, value } => self.set_axis(name, *axis, *value),
            InputSample::Direction { direction, pressed } => self.set_direction(*direction, *pressed),
        }
    }

    /// Apply a tick's samples in order, stopping at the first error
    pub fn apply_all<'a, I>(&mut self, samples: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = &'a InputSample>,
    {
        for sample in samples {
            self.apply(sample)?;
        }
        Ok(())
    }

    /// Feed a digital level: plain buttons first, then stick clicks, then triggers
    pub fn set_button(&mut self, name: &str, pressed: bool) -> Result<(), InputError> {
        if let Some(button) = self.buttons.get_mut(name) {
            return button.set_state(pressed);
        }
        if let Some(stick) = self.sticks.get_mut(name) {
            return match stick.button_mut() {
                Some(button) => button.set_state(pressed),
                None => Err(InputError::NotPressable(name.to_string())),
            };
        }
        if let Some(trigger) = self.triggers.get_mut(name) {
            return trigger.set_pressed(pressed);
        }
        debug!("Sample for unknown button '{}'", name);
        Err(InputError::UnknownInput(name.to_string()))
    }

    /// Feed a raw axis value of a stick or trigger
    pub fn set_axis(&mut self, name: &str, axis: AxisId, value: f64) -> Result<(), InputError> {
        let target: &mut dyn TwoAxis = if let Some(stick) = self.sticks.get_mut(name) {
            stick
        } else if let Some(trigger) = self.triggers.get_mut(name) {
            trigger
        } else {
            debug!("Sample for unknown axis input '{}'", name);
            return Err(InputError::UnknownInput(name.to_string()));
        };

        match axis {
            AxisId::X => target.set_raw_x(value),
            AxisId::Y => target.set_raw_y(value),
        }
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction, pressed: bool) -> Result<(), InputError> {
        match self.dpad.as_mut() {
            Some(dpad) => dpad.set_direction(direction, pressed),
            None => Err(InputError::UnknownInput("dpad".into())),
        }
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            buttons: self
                .buttons
                .iter()
                .map(|(name, button)| (name.clone(), button.is_pressed()))
                .collect(),
            sticks: self
                .sticks
                .iter()
                .map(|(name, stick)| (name.clone(), reading(stick, stick.is_pressed())))
                .collect(),
            triggers: self
                .triggers
                .iter()
                .map(|(name, trigger)| (name.clone(), reading(trigger, trigger.is_pressed())))
                .collect(),
            dpad: self.dpad.as_ref().map(|dpad| {
                Direction::ALL
                    .iter()
                    .map(|&direction| (direction, dpad.entry(direction).is_pressed()))
                    .collect()
            }),
        }
    }
}

fn axis(layout: &AxisLayout) -> AxisPipeline {
    AxisPipeline::new(layout.range, layout.inverted)
}

fn reading<T: TwoAxis>(input: &T, pressed: bool) -> AxisReading {
    AxisReading {
        x: input.x(),
        y: input.y(),
        pressed,
    }
}
