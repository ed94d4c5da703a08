//! Padflow: debounced buttons and calibrated axes for game controllers
//!
//! This library normalizes raw controller samples, pushed in by a polling
//! loop once per tick, into debounced press/release events and configurable
//! axis readings (dead zone, zero shift, inversion, range mapping).

pub mod input;
pub mod layout;

// Re-export commonly used items
pub use input::{
    AxisPipeline, Blindspot, Button, ButtonState, Clock, Direction, DirectionalEntry, DirectionalPad, Edge,
    InputError, ManualClock, MonotonicClock, PressureTrigger, Stick, TwoAxis, ValueRange,
};
pub use layout::{Controller, InputSample, LayoutConfig};
