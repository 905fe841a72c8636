use crate::angle::{self, LimitingAngle};
use crate::geometry::Point;
use palette::{FromColor, Hsv, Srgb, encoding};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Other,
}

type ValueListener = Box<dyn FnMut(f64)>;

/// A rotary control driven by pointer events.
///
/// The only state is the rotation, which always stays in
/// `[limit, 360 - limit]`. The host delivers the control's center through
/// [`KnobControl::on_layout`] and forwards raw pointer events to
/// [`KnobControl::handle_event`].
pub struct KnobControl {
    limit: LimitingAngle,
    center: Option<Point>,
    rotation: f64,
    listener: Option<ValueListener>,
}

impl KnobControl {
    pub fn new(limit: LimitingAngle) -> Self {
        Self {
            limit,
            center: None,
            rotation: limit.min_rotation(),
            listener: None,
        }
    }

    /// Registers the callback invoked with the new value whenever a pointer
    /// event moves the knob.
    pub fn on_value_change(mut self, listener: impl FnMut(f64) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn on_layout(&mut self, center: Point) {
        log::trace!("Knob center set to ({}, {})", center.x, center.y);
        self.center = Some(center);
    }

    /// Layout callback for hosts that report the control's local size; the
    /// center is the middle of those bounds.
    pub fn on_layout_size(&mut self, width: f64, height: f64) {
        self.on_layout(Point::new(width / 2.0, height / 2.0));
    }

    pub fn handle_event(&mut self, kind: PointerKind, position: Point) -> KnobAction {
        match kind {
            PointerKind::Down | PointerKind::Move => self.track(position),
            PointerKind::Up | PointerKind::Other => KnobAction::default(),
        }
    }

    fn track(&mut self, position: Point) -> KnobAction {
        let Some(center) = self.center else {
            log::debug!("Ignoring pointer event before layout");
            return KnobAction::default();
        };

        let touch_angle = angle::compute_angle(center, position);
        let Some(rotation) = angle::accepted_rotation(touch_angle, self.limit) else {
            log::trace!("Touch angle {touch_angle:.1} is inside the dead zone");
            return KnobAction::default();
        };

        self.rotation = rotation;
        let value = self.value();
        if let Some(listener) = self.listener.as_mut() {
            listener(value);
        }
        KnobAction::moved(value)
    }

    /// Current rotation in degrees, for the host to apply to the knob image.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn value(&self) -> f64 {
        angle::rotation_to_value(self.rotation, self.limit)
    }

    /// Moves the knob to `value` (clamped to `[0, 1]`) without notifying the
    /// listener.
    pub fn set_value(&mut self, value: f64) {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        self.rotation = angle::value_to_rotation(value, self.limit)
            .clamp(self.limit.min_rotation(), self.limit.max_rotation());
    }

    pub fn limit(&self) -> LimitingAngle {
        self.limit
    }

    pub fn center(&self) -> Option<Point> {
        self.center
    }

    /// Background tint of the knob, cycling once around the hue wheel over
    /// the value range.
    pub fn knob_color(&self) -> Srgb<f64> {
        let hue = (self.value() * 360.0) % 360.0;
        Srgb::from_color(Hsv::<encoding::Srgb, f64>::new(hue, 1.0, 1.0))
    }
}

impl Default for KnobControl {
    fn default() -> Self {
        Self::new(LimitingAngle::default())
    }
}

impl fmt::Debug for KnobControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnobControl")
            .field("limit", &self.limit)
            .field("center", &self.center)
            .field("rotation", &self.rotation)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

/// Outcome of a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KnobAction {
    pub should_redraw: bool,
    pub value: Option<f64>,
}

impl KnobAction {
    pub fn moved(value: f64) -> Self {
        Self {
            should_redraw: true,
            value: Some(value),
        }
    }
}
