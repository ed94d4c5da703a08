//! Input primitives
//!
//! This module provides the building blocks fed by a polling loop:
//! - Axis pipelines (invert, dead zone, zero shift, range mapping)
//! - Debounced buttons with press/release subscribers
//! - Composite inputs (d-pad entries, sticks, pressure triggers)
//! - Injectable clocks for debounce timing

pub mod axis;
pub mod button;
pub mod clock;
pub mod composite;
pub mod constants;
pub mod range;

pub use axis::AxisPipeline;
pub use button::{Button, ButtonState, Edge, Subscriber};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use composite::{Direction, DirectionalEntry, DirectionalPad, PressureTrigger, Stick, TwoAxis};
pub use constants::*;
pub use range::{Blindspot, ValueRange};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    /// Degenerate numeric configuration hit during a computation
    #[error("Domain error: {0}")]
    Domain(String),

    /// Malformed range or blindspot bounds
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A subscriber failed; later subscribers for the same edge did not run
    #[error("{edge} subscriber #{index} failed: {source}")]
    Callback {
        edge: Edge,
        index: usize,
        source: anyhow::Error,
    },

    /// A sample or lookup named an input the layout does not have
    #[error("Unknown input: {0}")]
    UnknownInput(String),

    /// A digital level was fed to a stick without a button
    #[error("Input '{0}' is not pressable")]
    NotPressable(String),
}
