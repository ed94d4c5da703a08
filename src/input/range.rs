//! Value ranges, dead zones and the numeric helpers shared by axis pipelines

use crate::input::constants::{DEFAULT_BLINDSPOT, DEFAULT_VALUE_RANGE};
use crate::input::InputError;
use serde::{Deserialize, Serialize};

/// Closed interval of raw axis values (`min < max`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Create a range, rejecting non-finite, inverted or zero-width bounds
    pub fn new(min: f64, max: f64) -> Result<Self, InputError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(InputError::InvalidConfiguration(format!(
                "value range bounds must be finite, got ({}, {})",
                min, max
            )));
        }
        if min >= max {
            return Err(InputError::InvalidConfiguration(format!(
                "value range minimum must be below maximum, got ({}, {})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Neutral point used when no explicit zero is given
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_VALUE_RANGE.0,
            max: DEFAULT_VALUE_RANGE.1,
        }
    }
}

impl TryFrom<(f64, f64)> for ValueRange {
    type Error = InputError;

    fn try_from((min, max): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<ValueRange> for (f64, f64) {
    fn from(range: ValueRange) -> Self {
        (range.min, range.max)
    }
}

/// Dead zone: raw values in `[lo, hi]` read as no input
///
/// `lo == hi` is allowed and suppresses a single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Blindspot {
    lo: f64,
    hi: f64,
}

impl Blindspot {
    pub fn new(lo: f64, hi: f64) -> Result<Self, InputError> {
        if lo.is_nan() || hi.is_nan() {
            return Err(InputError::InvalidConfiguration(
                "blindspot bounds must not be NaN".into(),
            ));
        }
        if lo > hi {
            return Err(InputError::InvalidConfiguration(format!(
                "blindspot lower bound {} is above upper bound {}",
                lo, hi
            )));
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl Default for Blindspot {
    fn default() -> Self {
        Self {
            lo: DEFAULT_BLINDSPOT.0,
            hi: DEFAULT_BLINDSPOT.1,
        }
    }
}

impl TryFrom<(f64, f64)> for Blindspot {
    type Error = InputError;

    fn try_from((lo, hi): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(lo, hi)
    }
}

impl From<Blindspot> for (f64, f64) {
    fn from(blindspot: Blindspot) -> Self {
        (blindspot.lo, blindspot.hi)
    }
}

/// Affine map of `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`
///
/// The source endpoints land exactly on `to_lo` and `to_hi`. Values outside
/// the source span extrapolate linearly. A zero-width source span has no
/// defined mapping and fails with [`InputError::Domain`].
pub fn remap(value: f64, from_lo: f64, from_hi: f64, to_lo: f64, to_hi: f64) -> Result<f64, InputError> {
    let span = from_hi - from_lo;
    if span == 0.0 {
        return Err(InputError::Domain(format!(
            "cannot map {} from the zero-width span [{}, {}]",
            value, from_lo, from_hi
        )));
    }
    let t = (value - from_lo) / span;
    Ok(to_lo * (1.0 - t) + to_hi * t)
}

/// Dead-zone suppression with a zero shift
///
/// - inside the blindspot: exactly `0`
/// - below it: `[bounds.min, lo]` onto `[bounds.min, zero - 1]`
/// - above it: `[hi, bounds.max]` onto `[zero + 1, bounds.max]`
///
/// The one-unit gap either side of `zero` keeps the dead-zone edges distinct
/// from the neutral reading.
pub fn range_adjust(value: f64, blindspot: Blindspot, bounds: ValueRange, zero: f64) -> Result<f64, InputError> {
    if blindspot.contains(value) {
        return Ok(0.0);
    }

    if value < blindspot.lo {
        return remap(value, bounds.min, blindspot.lo, bounds.min, zero - 1.0);
    }

    remap(value, blindspot.hi, bounds.max, zero + 1.0, bounds.max)
}
