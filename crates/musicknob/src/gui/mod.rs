pub mod app;
pub mod model;
pub mod theme;
pub mod view;

pub const WINDOW_WIDTH: i32 = 640;
pub const WINDOW_HEIGHT: i32 = 260;
pub const KNOB_SIZE: i32 = 150; // knob drawing area, square
pub const METER_HEIGHT: i32 = 30;
pub const CONTENT_PADDING: i32 = 30; // between border and content
pub const CONTENT_SPACING: i32 = 20; // between knob and meter
pub const KNOB_BODY_FACTOR: f64 = 2.0 / 3.0; // body radius relative to the tinted ring
pub const INDICATOR_INNER: f64 = 0.25;
pub const INDICATOR_OUTER: f64 = 0.85;
pub const STOP_MARK_LENGTH: f64 = 0.12;
