use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub surface: Srgba<f64>,
    pub text: Srgba<f64>,
    pub title: Srgba<f64>,
    pub accent: Srgba<f64>,
    pub alarm: Srgba<f64>,
    pub popup_border: Srgba<f64>,
    pub cursor: Srgba<f64>,
    pub sun: Srgba<f64>,
    pub moon: Srgba<f64>,
    pub sound_on: Srgba<f64>,
    pub ticker: [Srgba<f64>; 2],
    pub backdrop: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Srgba::new(0.04, 0.04, 0.04, 1.0),
            surface: Srgba::new(0.12, 0.16, 0.22, 1.0),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.9, 0.91, 0.92, 1.0),
                Some(1.0),
            ),
            title: Srgba::new(0.75, 0.52, 0.99, 1.0),
            accent: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.58, 0.2, 0.92, 1.0),
                Some(1.0),
            ),
            alarm: Self::lookup_color(
                context,
                "error_color",
                Srgba::new(0.94, 0.27, 0.27, 1.0),
                Some(1.0),
            ),
            popup_border: Srgba::new(1.0, 0.85, 0.0, 1.0),
            cursor: Srgba::new(0.23, 0.51, 0.96, 0.8),
            sun: Srgba::new(0.98, 0.8, 0.08, 1.0),
            moon: Srgba::new(0.61, 0.64, 0.69, 1.0),
            sound_on: Srgba::new(0.13, 0.77, 0.37, 1.0),
            ticker: [
                Srgba::new(0.75, 0.52, 0.99, 1.0),
                Srgba::new(0.29, 0.87, 0.5, 1.0),
            ],
            backdrop: Srgba::new(0.0, 0.0, 0.0, 0.5),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.pester-window, .pester-page {
    background-color: #0a0a0a;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
