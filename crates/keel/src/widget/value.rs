//! Bounded numeric value model.
//!
//! [`BoundedValue`] holds the raw value, the range, and the rounding
//! precision for every value-bearing control. The raw value is stored
//! verbatim; rounding and clamping happen on every read, so changing the
//! range or the precision later re-derives the effective value without
//! losing information.
//!
//! [`ChangeEmitter`] pairs with it to turn effective-value reads into
//! deduplicated `value_changed` notifications.

use keel_core::Signal;

/// A numeric value constrained to a range with configurable precision.
///
/// `decimals` controls rounding: `2` rounds to hundredths, `0` to whole
/// numbers, `-2` to hundreds. Halves round away from zero. The effective
/// value is `clamp(round(raw))`, computed on read.
#[derive(Debug, Clone)]
pub struct BoundedValue {
    raw: f64,
    minimum: f64,
    maximum: f64,
    decimals: i32,
}

impl Default for BoundedValue {
    fn default() -> Self {
        Self::new(0.0, 100.0, 0)
    }
}

impl BoundedValue {
    /// Create a bounded value with the given range and precision, starting
    /// at the minimum.
    pub fn new(minimum: f64, maximum: f64, decimals: i32) -> Self {
        Self {
            raw: minimum,
            minimum,
            maximum,
            decimals,
        }
    }

    // =========================================================================
    // Raw state
    // =========================================================================

    /// The stored raw value, before rounding and clamping.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.raw
    }

    /// Store a new raw value. No rounding or clamping happens here.
    pub fn set_raw(&mut self, raw: f64) {
        self.raw = raw;
    }

    /// The configured minimum, as set.
    #[inline]
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// The configured maximum, as set.
    #[inline]
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Set the range. Stored verbatim; an inverted range (minimum above
    /// maximum) is tolerated and normalized on read.
    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        self.minimum = minimum;
        self.maximum = maximum;
    }

    /// The rounding precision in decimal places. May be negative.
    #[inline]
    pub fn decimals(&self) -> i32 {
        self.decimals
    }

    /// Set the rounding precision.
    pub fn set_decimals(&mut self, decimals: i32) {
        self.decimals = decimals;
    }

    // =========================================================================
    // Derived reads
    // =========================================================================

    /// The effective bounds, ordered low to high.
    #[inline]
    fn bounds(&self) -> (f64, f64) {
        (
            self.minimum.min(self.maximum),
            self.minimum.max(self.maximum),
        )
    }

    /// Round a raw number to the configured precision, halves away from
    /// zero.
    fn round(&self, raw: f64) -> f64 {
        let factor = 10f64.powi(self.decimals);
        (raw * factor).round() / factor
    }

    /// The effective value: the raw value rounded to the configured
    /// precision, then clamped into the range.
    pub fn value(&self) -> f64 {
        let (lo, hi) = self.bounds();
        self.round(self.raw).clamp(lo, hi)
    }

    /// The effective value formatted for display.
    ///
    /// With a positive precision the string carries exactly that many
    /// fractional digits, zero-padded. Otherwise the value is shown as an
    /// integer.
    pub fn format(&self) -> String {
        let value = self.value();
        if self.decimals > 0 {
            format!("{:.*}", self.decimals as usize, value)
        } else {
            format!("{}", value as i64)
        }
    }

    /// The distance covered by one step at the configured precision:
    /// `10^(-decimals)`. Two decimals step by 0.01; minus-two steps by 100.
    #[inline]
    pub fn step_size(&self) -> f64 {
        10f64.powi(-self.decimals)
    }

    /// The width of the range. Zero when the range is degenerate.
    pub fn span(&self) -> f64 {
        let (lo, hi) = self.bounds();
        hi - lo
    }

    /// The effective value's position within the range, in `0.0..=1.0`.
    ///
    /// A degenerate range reports 0.
    pub fn percent(&self) -> f64 {
        let (lo, _) = self.bounds();
        let span = self.span();
        if span <= 0.0 {
            0.0
        } else {
            (self.value() - lo) / span
        }
    }

    /// The raw value corresponding to a position within the range.
    ///
    /// `percent` is clamped into `0.0..=1.0` first.
    pub fn value_at_percent(&self, percent: f64) -> f64 {
        let (lo, _) = self.bounds();
        lo + percent.clamp(0.0, 1.0) * self.span()
    }

    /// Advance the raw value by a whole number of steps from the current
    /// effective value.
    pub fn step_by(&mut self, steps: i32) {
        self.raw = self.value() + f64::from(steps) * self.step_size();
    }

    /// Jump to the low end of the range.
    pub fn to_minimum(&mut self) {
        let (lo, _) = self.bounds();
        self.raw = lo;
    }

    /// Jump to the high end of the range.
    pub fn to_maximum(&mut self) {
        let (_, hi) = self.bounds();
        self.raw = hi;
    }
}

/// Turns effective-value reads into deduplicated change notifications.
///
/// A control calls [`notify`](ChangeEmitter::notify) after every mutation;
/// the signal fires only when the effective value differs from the last one
/// emitted, so raw-value churn that rounds to the same number stays silent.
pub struct ChangeEmitter {
    last_emitted: Option<f64>,

    /// Signal emitted when the effective value changes.
    pub value_changed: Signal<f64>,
}

impl Default for ChangeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeEmitter {
    /// Create an emitter that has emitted nothing yet.
    pub fn new() -> Self {
        Self {
            last_emitted: None,
            value_changed: Signal::new(),
        }
    }

    /// The last value emitted, if any.
    pub fn last_emitted(&self) -> Option<f64> {
        self.last_emitted
    }

    /// Emit `value_changed` if `value` differs from the last emission.
    ///
    /// Returns `true` if a notification was sent. The first call always
    /// notifies.
    pub fn notify(&mut self, value: f64) -> bool {
        if self.last_emitted == Some(value) {
            return false;
        }
        self.last_emitted = Some(value);
        self.value_changed.emit(value);
        true
    }

    /// Record `value` as already known without emitting.
    ///
    /// Used when a control initializes its display directly.
    pub fn sync(&mut self, value: f64) {
        self.last_emitted = Some(value);
    }
}
