use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba, WithAlpha};

/// A color the knob reads from the GTK theme by name.
///
/// `opacity`, when set, replaces whatever alpha the theme supplies.
struct NamedColor {
    name: &'static str,
    fallback: Srgb<u8>,
    opacity: Option<f64>,
}

const KNOB_BODY: NamedColor = NamedColor {
    name: "knob_body_color",
    fallback: Srgb::new(0x1e, 0x1e, 0x1e),
    opacity: None,
};

const INDICATOR: NamedColor = NamedColor {
    name: "theme_fg_color",
    fallback: Srgb::new(0xf2, 0xf2, 0xf2),
    opacity: Some(1.0),
};

const STOP_MARK: NamedColor = NamedColor {
    name: "theme_unfocused_fg_color",
    fallback: Srgb::new(0x99, 0x99, 0x99),
    opacity: Some(0.8),
};

impl NamedColor {
    fn fallback(&self) -> Srgba<f64> {
        let color: Srgb<f64> = self.fallback.into_format();
        color.with_alpha(self.opacity.unwrap_or(1.0))
    }

    fn resolve(&self, context: &gtk::StyleContext) -> Srgba<f64> {
        let Some(rgba) = context.lookup_color(self.name) else {
            return self.fallback();
        };
        let themed: Srgba<f64> =
            Srgba::new(rgba.red(), rgba.green(), rgba.blue(), rgba.alpha()).into_format();
        match self.opacity {
            Some(alpha) => themed.color.with_alpha(alpha),
            None => themed,
        }
    }

    /// `@define-color` rule so CSS can restyle the color by name.
    fn css_definition(&self) -> String {
        format!("@define-color {} #{:x};", self.name, self.fallback)
    }
}

pub struct ThemeColors {
    pub knob_body: Srgba<f64>,
    pub indicator: Srgba<f64>,
    pub stop_mark: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            knob_body: KNOB_BODY.resolve(context),
            indicator: INDICATOR.resolve(context),
            stop_mark: STOP_MARK.resolve(context),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            knob_body: KNOB_BODY.fallback(),
            indicator: INDICATOR.fallback(),
            stop_mark: STOP_MARK.fallback(),
        }
    }
}

fn stylesheet() -> String {
    format!(
        "{}\n.musicknob-window {{ background-color: black; }}\n",
        KNOB_BODY.css_definition()
    )
}

pub fn load_css() {
    let Some(display) = gdk::Display::default() else {
        log::warn!("No display available, skipping stylesheet");
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_data(&stylesheet());
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
