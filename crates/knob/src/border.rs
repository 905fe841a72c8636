//! Phase of the animated rainbow border.
//!
//! Purely cosmetic: the border cycles through its gradient once per period
//! and has no influence on the knob.

use crate::error::InvalidConfig;
use palette::Srgb;
use std::time::Duration;

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(3000);

/// Horizontal distance, in pixels, covered by one repetition of the gradient.
pub const GRADIENT_SPAN: f64 = 1000.0;

pub fn rainbow_stops() -> [Srgb<f64>; 7] {
    [
        Srgb::new(1.0, 0.0, 0.0),
        Srgb::new(1.0, 1.0, 0.0),
        Srgb::new(0.0, 1.0, 0.0),
        Srgb::new(0.0, 1.0, 1.0),
        Srgb::new(0.0, 0.0, 1.0),
        Srgb::new(1.0, 0.0, 1.0),
        Srgb::new(1.0, 0.0, 0.0),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderAnimation {
    period: Duration,
}

impl BorderAnimation {
    pub fn new(period: Duration) -> Result<Self, InvalidConfig> {
        if period.is_zero() {
            return Err(InvalidConfig::BorderPeriod);
        }
        Ok(Self { period })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Position in the current cycle, in `[0, 1)`.
    pub fn phase(&self, elapsed: Duration) -> f64 {
        (elapsed.as_secs_f64() / self.period.as_secs_f64()).fract()
    }

    /// Start and end x coordinates of the repeating linear gradient at `phase`.
    pub fn gradient_span(phase: f64) -> (f64, f64) {
        (phase * GRADIENT_SPAN, (phase + 1.0) * GRADIENT_SPAN)
    }
}

impl Default for BorderAnimation {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
        }
    }
}
