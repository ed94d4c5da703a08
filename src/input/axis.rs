//! Axis pipeline
//!
//! A single analog axis: the raw reading from the last polling tick plus the
//! fixed range and inversion it was configured with. Every read is a pure
//! function of that state.

use crate::input::range::{range_adjust, remap, Blindspot, ValueRange};
use crate::input::InputError;

/// Raw-to-logical transformation for one axis (invert, adjust, map)
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPipeline {
    raw_value: f64,
    value_range: ValueRange,
    inverted: bool,
}

impl AxisPipeline {
    pub fn new(value_range: ValueRange, inverted: bool) -> Self {
        Self {
            raw_value: 0.0,
            value_range,
            inverted,
        }
    }

    /// Store the sampled value. No clamping: readings may exceed the range.
    pub fn set_raw(&mut self, value: f64) {
        self.raw_value = value;
    }

    /// Raw reading, ignoring inversion
    pub fn raw_value(&self) -> f64 {
        self.raw_value
    }

    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Raw reading with inversion applied
    pub fn value(&self) -> f64 {
        self.orient(self.raw_value)
    }

    /// Dead-zone suppressed reading shifted around `zero`
    ///
    /// Readings inside `blindspot` are exactly zero; readings outside are
    /// stretched so the dead-zone edge lands at `zero ± 1` and the range
    /// extremes stay fixed.
    pub fn adjusted_value(&self, blindspot: Blindspot, zero: f64) -> Result<f64, InputError> {
        self.adjust(blindspot, zero).map(|v| self.orient(v))
    }

    /// [`adjusted_value`](Self::adjusted_value) with the range midpoint as zero
    pub fn adjusted_value_centered(&self, blindspot: Blindspot) -> Result<f64, InputError> {
        self.adjusted_value(blindspot, self.value_range.midpoint())
    }

    /// Reading rescaled from the configured range onto `[new_min, new_max]`
    pub fn mapped_value(&self, new_min: f64, new_max: f64) -> Result<f64, InputError> {
        self.map_onto(self.raw_value, new_min, new_max).map(|v| self.orient(v))
    }

    /// Adjust then map; inversion is applied once, to the final value
    pub fn calibrated_value(
        &self,
        blindspot: Blindspot,
        zero: f64,
        new_min: f64,
        new_max: f64,
    ) -> Result<f64, InputError> {
        let adjusted = self.adjust(blindspot, zero)?;
        let mapped = self.map_onto(adjusted, new_min, new_max)?;
        Ok(self.orient(mapped))
    }

    fn adjust(&self, blindspot: Blindspot, zero: f64) -> Result<f64, InputError> {
        range_adjust(self.raw_value, blindspot, self.value_range, zero)
    }

    fn map_onto(&self, value: f64, new_min: f64, new_max: f64) -> Result<f64, InputError> {
        remap(value, self.value_range.min(), self.value_range.max(), new_min, new_max)
    }

    fn orient(&self, value: f64) -> f64 {
        if self.inverted {
            -value
        } else {
            value
        }
    }
}

impl Default for AxisPipeline {
    fn default() -> Self {
        Self::new(ValueRange::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(inverted: bool) -> AxisPipeline {
        AxisPipeline::new(ValueRange::default(), inverted)
    }

    #[test]
    fn test_starts_at_rest() {
        let a = axis(false);
        assert_eq!(a.raw_value(), 0.0);
        assert_eq!(a.value(), 0.0);
    }

    #[test]
    fn test_value_inversion() {
        let mut plain = axis(false);
        let mut inverted = axis(true);
        for v in [100.0, -50.0, 0.5, 40000.0] {
            plain.set_raw(v);
            inverted.set_raw(v);
            assert_eq!(plain.value(), v);
            assert_eq!(inverted.value(), -v);
        }
    }

    #[test]
    fn test_adjusted_inside_blindspot_is_zero() {
        let mut a = axis(false);
        let blindspot = Blindspot::new(-3000.0, 3000.0).unwrap();
        for v in [-3000.0, -1.0, 0.0, 2999.9, 3000.0] {
            a.set_raw(v);
            assert_eq!(a.adjusted_value(blindspot, 0.0).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_adjusted_inverted_is_negated() {
        let mut a = axis(false);
        let mut b = axis(true);
        let blindspot = Blindspot::default();
        a.set_raw(12000.0);
        b.set_raw(12000.0);
        let plain = a.adjusted_value(blindspot, 0.0).unwrap();
        assert_eq!(b.adjusted_value(blindspot, 0.0).unwrap(), -plain);
    }

    #[test]
    fn test_adjusted_centered_uses_midpoint() {
        let mut a = AxisPipeline::new(ValueRange::new(0.0, 255.0).unwrap(), false);
        let blindspot = Blindspot::new(120.0, 135.0).unwrap();
        a.set_raw(255.0);
        assert_eq!(a.adjusted_value_centered(blindspot).unwrap(), 255.0);
        a.set_raw(136.0);
        let near_zero = a.adjusted_value_centered(blindspot).unwrap();
        assert!(near_zero > 128.5 && near_zero < 130.0);
    }

    #[test]
    fn test_mapped_value_endpoints() {
        let mut a = axis(false);
        a.set_raw(-32768.0);
        assert_eq!(a.mapped_value(-1.0, 1.0).unwrap(), -1.0);
        a.set_raw(32767.0);
        assert_eq!(a.mapped_value(-1.0, 1.0).unwrap(), 1.0);
        assert_eq!(a.mapped_value(0.0, 255.0).unwrap(), 255.0);
    }

    #[test]
    fn test_mapped_value_inverted() {
        let mut a = axis(true);
        a.set_raw(32767.0);
        assert_eq!(a.mapped_value(0.0, 100.0).unwrap(), -100.0);
    }

    #[test]
    fn test_calibrated_adjusts_then_maps() {
        let mut a = axis(false);
        let blindspot = Blindspot::default();

        a.set_raw(1500.0);
        let centre = a.calibrated_value(blindspot, 0.0, 0.0, 1.0).unwrap();
        // Adjusted 0 maps to the fractional position of 0 within the range
        assert!((centre - 32768.0 / 65535.0).abs() < 1e-12);

        a.set_raw(32767.0);
        assert_eq!(a.calibrated_value(blindspot, 0.0, -1.0, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_calibrated_inverts_once() {
        let mut plain = axis(false);
        let mut inverted = axis(true);
        let blindspot = Blindspot::default();
        plain.set_raw(20000.0);
        inverted.set_raw(20000.0);
        let p = plain.calibrated_value(blindspot, 0.0, -1.0, 1.0).unwrap();
        let i = inverted.calibrated_value(blindspot, 0.0, -1.0, 1.0).unwrap();
        assert!(p > 0.0);
        assert_eq!(i, -p);
    }

    #[test]
    fn test_adjusted_degenerate_edge_fails() {
        let mut a = AxisPipeline::new(ValueRange::new(0.0, 10.0).unwrap(), false);
        let blindspot = Blindspot::new(2.0, 10.0).unwrap();
        a.set_raw(11.0);
        assert!(matches!(a.adjusted_value(blindspot, 5.0), Err(InputError::Domain(_))));
    }
}
