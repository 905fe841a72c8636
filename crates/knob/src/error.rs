use thiserror::Error;

/// Misconfiguration detected when a control, meter or animation is built.
///
/// Nothing at pointer-event time is an error; these are only raised while
/// constructing values from configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfig {
    #[error("Segment count must be positive")]
    ZeroSegments,
    #[error("Limiting angle {0} is outside [0, 180)")]
    LimitingAngle(f64),
    #[error("Border animation period must be positive")]
    BorderPeriod,
}
