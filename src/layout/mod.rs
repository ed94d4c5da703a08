//! Layout module - assembles composite inputs into a controller

pub mod config;
pub mod controller;

pub use config::{ConfigError, LayoutConfig};
pub use controller::{AxisId, AxisReading, Controller, ControllerSnapshot, InputSample};
