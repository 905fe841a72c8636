use std::str::FromStr;
use thiserror::Error;

/// A position in screen or control-local space.
///
/// Used both for the knob center (delivered by the host on layout) and for
/// touch positions (delivered per pointer event).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePointError {
    #[error("expected `x,y`, got {0:?}")]
    Format(String),
    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
}

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParsePointError::Format(s.to_string()))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ParsePointError::Coordinate(v.trim().to_string()))
        };
        Ok(Self::new(parse(x)?, parse(y)?))
    }
}
