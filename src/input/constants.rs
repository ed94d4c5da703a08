//! Input defaults
//!
//! Ranges are expressed in raw device units. The common 16-bit signed stick
//! report is used as the default value range.

use std::time::Duration;

/// Default full range of an axis (signed 16-bit report)
pub const DEFAULT_VALUE_RANGE: (f64, f64) = (-32768.0, 32767.0);

/// Default dead zone around the stick's rest position
pub const DEFAULT_BLINDSPOT: (f64, f64) = (-3000.0, 3000.0);

/// Default debounce interval for buttons
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);
