pub mod angle;
pub mod border;
pub mod config;
pub mod control;
pub mod error;
pub mod geometry;
pub mod meter;

pub use angle::LimitingAngle;
pub use control::{KnobAction, KnobControl, PointerKind};
pub use error::InvalidConfig;
pub use geometry::Point;
pub use meter::{LevelMeter, MeterStyle, Segment};
