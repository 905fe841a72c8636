use super::model::State;
use super::theme::ThemeColors;
use super::{INDICATOR_INNER, INDICATOR_OUTER, KNOB_BODY_FACTOR, STOP_MARK_LENGTH};
use cairo::{Context, LinearGradient};
use knob::border::{self, BorderAnimation};
use knob::{KnobControl, LevelMeter};
use palette::{Srgb, Srgba};
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn set_opaque(cr: &Context, color: Srgb<f64>) {
    let (r, g, b) = color.into_components();
    cr.set_source_rgb(r, g, b);
}

struct KnobRenderer<'a> {
    knob: &'a KnobControl,
    center: (f64, f64),
    radius: f64,
}

impl<'a> KnobRenderer<'a> {
    fn new(knob: &'a KnobControl, width: f64, height: f64) -> Self {
        Self {
            knob,
            center: (width / 2.0, height / 2.0),
            radius: width.min(height) / 2.0,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_ring(cr)?;
        self.draw_stops(cr, colors)?;
        self.draw_body(cr, colors)?;
        self.draw_indicator(cr, colors)
    }

    fn draw_ring(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_opaque(cr, self.knob.knob_color());
        cr.arc(self.center.0, self.center.1, self.radius, 0.0, 2.0 * PI);
        cr.fill()
    }

    /// Marks the two ends of the dead zone on the tinted ring.
    fn draw_stops(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let limit = self.knob.limit().degrees();
        if limit == 0.0 {
            return Ok(());
        }

        set_color(cr, colors.stop_mark);
        cr.set_line_width(2.0);
        for degrees in [limit, -limit] {
            self.radial_line(cr, degrees, 1.0 - STOP_MARK_LENGTH, 1.0);
        }
        cr.stroke()
    }

    fn draw_body(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_color(cr, colors.knob_body);
        cr.arc(
            self.center.0,
            self.center.1,
            self.radius * KNOB_BODY_FACTOR,
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }

    fn draw_indicator(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_color(cr, colors.indicator);
        cr.set_line_width(4.0);
        cr.set_line_cap(cairo::LineCap::Round);
        self.radial_line(
            cr,
            self.knob.rotation(),
            INDICATOR_INNER * KNOB_BODY_FACTOR,
            INDICATOR_OUTER * KNOB_BODY_FACTOR,
        );
        cr.stroke()
    }

    /// Adds a segment along the ray at `degrees` (0 up, clockwise), between
    /// the given fractions of the ring radius.
    fn radial_line(&self, cr: &Context, degrees: f64, from: f64, to: f64) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let point = |f: f64| {
            (
                self.center.0 + self.radius * f * sin,
                self.center.1 - self.radius * f * cos,
            )
        };
        let (x0, y0) = point(from);
        let (x1, y1) = point(to);
        cr.move_to(x0, y0);
        cr.line_to(x1, y1);
    }
}

pub fn draw_knob(
    cr: &Context,
    state: &State,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    KnobRenderer::new(&state.knob, width, height).draw(cr, colors)
}

pub fn draw_meter(cr: &Context, state: &State, width: f64, height: f64) -> Result<(), cairo::Error> {
    draw_segments(cr, &state.meter, state.value(), width, height)
}

fn draw_segments(
    cr: &Context,
    meter: &LevelMeter,
    value: f64,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    for segment in meter.render(value) {
        let rect = meter.segment_rect(segment.index, width, height);
        set_opaque(cr, segment.color);
        cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        cr.fill()?;
    }
    Ok(())
}

pub fn draw_border(cr: &Context, state: &State, width: f64, height: f64) -> Result<(), cairo::Error> {
    let style = &state.border_style;
    let (start, end) = BorderAnimation::gradient_span(state.border_phase());

    let gradient = LinearGradient::new(start, 0.0, end, 0.0);
    let stops = border::rainbow_stops();
    let last = (stops.len() - 1) as f64;
    for (i, stop) in stops.into_iter().enumerate() {
        let (r, g, b) = stop.into_components();
        gradient.add_color_stop_rgb(i as f64 / last, r, g, b);
    }
    gradient.set_extend(cairo::Extend::Repeat);

    let inset = style.width / 2.0;
    rounded_rect(
        cr,
        inset,
        inset,
        width - style.width,
        height - style.width,
        style.corner_radius,
    );
    cr.set_source(&gradient)?;
    cr.set_line_width(style.width);
    cr.stroke()
}

fn rounded_rect(cr: &Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    cr.new_sub_path();
    cr.arc(x + width - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + width - r, y + height - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + height - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 1.5 * PI);
    cr.close_path();
}
