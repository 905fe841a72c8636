use knob::border::BorderAnimation;
use knob::config::{BorderConfig, Config};
use knob::{InvalidConfig, KnobControl, LevelMeter};
use std::time::Instant;

fn knob_with_listener(knob: KnobControl) -> KnobControl {
    knob.on_value_change(|value| log::debug!("Knob value changed to {value:.3}"))
}

pub struct State {
    pub knob: KnobControl,
    pub meter: LevelMeter,
    pub border: BorderAnimation,
    pub border_style: BorderConfig,
    pub started: Instant,
}

impl State {
    pub fn from_config(config: &Config) -> Result<Self, InvalidConfig> {
        Ok(Self {
            knob: knob_with_listener(config.knob()?),
            meter: config.meter()?,
            border: config.border_animation()?,
            border_style: config.border.clone(),
            started: Instant::now(),
        })
    }

    /// Applies a reloaded config. The knob keeps its value and layout even
    /// when the limiting angle changes. On error nothing is modified.
    pub fn reconfigure(&mut self, config: &Config) -> Result<(), InvalidConfig> {
        let mut knob = knob_with_listener(config.knob()?);
        let meter = config.meter()?;
        let border = config.border_animation()?;

        knob.set_value(self.knob.value());
        if let Some(center) = self.knob.center() {
            knob.on_layout(center);
        }

        self.knob = knob;
        self.meter = meter;
        self.border = border;
        self.border_style = config.border.clone();
        Ok(())
    }

    pub fn value(&self) -> f64 {
        self.knob.value()
    }

    pub fn border_phase(&self) -> f64 {
        self.border.phase(self.started.elapsed())
    }
}

impl Default for State {
    fn default() -> Self {
        Self {
            knob: knob_with_listener(KnobControl::default()),
            meter: LevelMeter::default(),
            border: BorderAnimation::default(),
            border_style: BorderConfig::default(),
            started: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knob::{Point, PointerKind};

    #[test]
    fn test_reconfigure_keeps_value_and_center() {
        let mut state = State::default();
        state.knob.on_layout_size(150.0, 150.0);
        state
            .knob
            .handle_event(PointerKind::Down, Point::new(150.0, 75.0));
        let value = state.value();

        let config = Config {
            limiting_angle: 40.0,
            segment_count: 10,
            ..Config::default()
        };
        state.reconfigure(&config).unwrap();

        assert!((state.value() - value).abs() < 1e-9);
        assert_eq!(state.knob.center(), Some(Point::new(75.0, 75.0)));
        assert_eq!(state.meter.segment_count(), 10);
    }

    #[test]
    fn test_invalid_reload_leaves_state_untouched() {
        let mut state = State::default();
        let config = Config {
            segment_count: 0,
            limiting_angle: 40.0,
            ..Config::default()
        };

        assert_eq!(state.reconfigure(&config), Err(InvalidConfig::ZeroSegments));
        assert_eq!(*state.knob.limit(), 25.0);
    }
}
