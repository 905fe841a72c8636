//! Multi-segment level meter.
//!
//! The meter turns a value in `[0, 1]` into a row of segment descriptors the
//! host can draw as bars. Segment `i` is active when
//! `i <= round(value * segment_count)`.

use crate::error::InvalidConfig;
use palette::{FromColor, Hsv, Srgb, encoding};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_SEGMENT_COUNT: usize = 20;
pub const ACTIVE_BRIGHTNESS: f64 = 1.0;
pub const INACTIVE_BRIGHTNESS: f64 = 0.3;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MeterStyle {
    /// Fixed "on" color for active bars, dimmed neutral for the rest.
    #[strum(to_string = "binary", serialize = "solid", serialize = "b")]
    Binary,
    /// Each bar gets its own hue around the color wheel.
    #[default]
    #[strum(
        to_string = "rainbow",
        serialize = "gradient",
        serialize = "hue",
        serialize = "r"
    )]
    Rainbow,
}

impl MeterStyle {
    fn color(&self, index: usize, segment_count: usize, active: bool) -> Srgb<f64> {
        match self {
            Self::Binary if active => Srgb::new(0.0, 1.0, 0.0),
            Self::Binary => Srgb::new(0.267, 0.267, 0.267),
            Self::Rainbow => {
                let hue = (index as f64 * 360.0 / segment_count as f64) % 360.0;
                Srgb::from_color(Hsv::<encoding::Srgb, f64>::new(hue, 1.0, brightness(active)))
            }
        }
    }
}

fn brightness(active: bool) -> f64 {
    if active {
        ACTIVE_BRIGHTNESS
    } else {
        INACTIVE_BRIGHTNESS
    }
}

/// One bar of the meter as the host should draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub active: bool,
    pub brightness: f64,
    pub color: Srgb<f64>,
}

/// Bar rectangle in the meter's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelMeter {
    segment_count: usize,
    style: MeterStyle,
}

impl LevelMeter {
    pub fn new(segment_count: usize, style: MeterStyle) -> Result<Self, InvalidConfig> {
        if segment_count == 0 {
            return Err(InvalidConfig::ZeroSegments);
        }
        Ok(Self {
            segment_count,
            style,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn style(&self) -> MeterStyle {
        self.style
    }

    /// `round(value * segment_count)` after clamping `value` into `[0, 1]`.
    /// NaN counts as 0.
    pub fn active_segments(&self, value: f64) -> usize {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        (value * self.segment_count as f64).round() as usize
    }

    pub fn render(&self, value: f64) -> Vec<Segment> {
        let active_segments = self.active_segments(value);

        (0..self.segment_count)
            .map(|index| {
                let active = index <= active_segments;
                Segment {
                    index,
                    active,
                    brightness: brightness(active),
                    color: self.style.color(index, self.segment_count, active),
                }
            })
            .collect()
    }

    /// Bars are half a slot wide and centered in their slot, leaving equal
    /// gaps between them.
    pub fn segment_rect(&self, index: usize, width: f64, height: f64) -> SegmentRect {
        let bar_width = width / (2.0 * self.segment_count as f64);
        SegmentRect {
            x: index as f64 * bar_width * 2.0 + bar_width / 2.0,
            y: 0.0,
            width: bar_width,
            height,
        }
    }
}

impl Default for LevelMeter {
    fn default() -> Self {
        Self {
            segment_count: DEFAULT_SEGMENT_COUNT,
            style: MeterStyle::default(),
        }
    }
}

pub fn render(
    value: f64,
    segment_count: usize,
    style: MeterStyle,
) -> Result<Vec<Segment>, InvalidConfig> {
    Ok(LevelMeter::new(segment_count, style)?.render(value))
}
