use super::layout::{
    NavButton, PageTransform, Rect, button_rect, menu_close_rect, menu_panel_rect,
    popup_close_rect, popup_rect,
};
use super::{
    BANNER, BUTTON_LABEL, CURSOR_DOT_RADIUS, MARQUEE, MARQUEE_HEIGHT, MARQUEE_SPEED, MENU_ITEMS,
    NAV_BUTTON_RADIUS, NAV_HEIGHT, SHAKE_AMPLITUDE, TITLE,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use nag::popup::{Popup, PopupText};
use nag::{Point, UiState, Viewport};
use palette::Srgba;
use std::f64::consts::PI;

const FONT: &str = "Comic Sans MS";

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, rect: Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.x + rect.width, rect.y + rect.height);
    cr.new_sub_path();
    cr.arc(x1 - r, y0 + r, r, -PI / 2.0, 0.0);
    cr.arc(x1 - r, y1 - r, r, 0.0, PI / 2.0);
    cr.arc(x0 + r, y1 - r, r, PI / 2.0, PI);
    cr.arc(x0 + r, y0 + r, r, PI, 1.5 * PI);
    cr.close_path();
}

fn font(cr: &Context, size: f64, bold: bool) {
    let weight = if bold {
        cairo::FontWeight::Bold
    } else {
        cairo::FontWeight::Normal
    };
    cr.select_font_face(FONT, cairo::FontSlant::Normal, weight);
    cr.set_font_size(size);
}

fn text_centered(cr: &Context, text: &str, center: Point) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(
        center.x - ext.width() / 2.0 - ext.x_bearing(),
        center.y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

/// Greedy word wrap against the current font.
fn wrap(cr: &Context, text: &str, max_width: f64) -> Result<Vec<String>, cairo::Error> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };
        if !line.is_empty() && cr.text_extents(&candidate)?.x_advance() > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    Ok(lines)
}

pub fn draw(
    cr: &Context,
    state: &UiState,
    viewport: Viewport,
    colors: &ThemeColors,
    seconds: f64,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.background);
    cr.paint()?;

    if state.loading {
        return draw_loading(cr, viewport, colors);
    }

    cr.save()?;
    apply_page_transform(cr, state, viewport, seconds);

    draw_frame(cr, viewport, colors)?;
    draw_nav(cr, state, viewport, colors)?;
    draw_banner(cr, viewport, colors)?;
    draw_button(cr, state, colors)?;
    for popup in &state.popups {
        draw_popup(cr, popup, colors)?;
    }
    if state.menu_open {
        draw_menu(cr, viewport, colors)?;
    }
    draw_music_badge(cr, viewport, colors)?;
    draw_marquee(cr, viewport, colors, seconds)?;
    draw_cursor(cr, state.cursor, colors)?;
    if let Some(sound) = state.sound {
        draw_sound_toast(cr, viewport, colors, sound.label())?;
    }

    cr.restore()
}

fn draw_loading(cr: &Context, viewport: Viewport, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.text);
    font(cr, 28.0, false);
    text_centered(cr, "Loading...", viewport.center())
}

fn apply_page_transform(cr: &Context, state: &UiState, viewport: Viewport, seconds: f64) {
    let t = PageTransform::for_state(state, viewport);
    if state.shaking {
        cr.translate(
            (seconds * 71.0).sin() * SHAKE_AMPLITUDE,
            (seconds * 53.0).cos() * SHAKE_AMPLITUDE,
        );
    }
    cr.translate(t.center.x, t.center.y);
    cr.rotate(t.angle);
    cr.scale(t.scale, t.scale);
    cr.translate(-t.center.x, -t.center.y);
}

fn draw_frame(cr: &Context, viewport: Viewport, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.background);
    cr.rectangle(0.0, 0.0, viewport.width, viewport.height);
    cr.fill_preserve()?;
    set_color(cr, colors.alarm);
    cr.set_line_width(2.0);
    cr.stroke()
}

fn draw_nav(
    cr: &Context,
    state: &UiState,
    viewport: Viewport,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.surface);
    cr.rectangle(0.0, 0.0, viewport.width, NAV_HEIGHT);
    cr.fill()?;

    set_color(cr, colors.title);
    font(cr, 24.0, true);
    cr.move_to(16.0, NAV_HEIGHT / 2.0 + 8.0);
    cr.show_text(TITLE)?;

    for button in NavButton::ALL {
        let c = button.center(viewport);
        set_color(cr, colors.background);
        cr.arc(c.x, c.y, NAV_BUTTON_RADIUS, 0.0, 2.0 * PI);
        cr.fill()?;
        match button {
            NavButton::DarkMode if state.dark_mode => draw_sun(cr, c, colors)?,
            NavButton::DarkMode => draw_moon(cr, c, colors)?,
            NavButton::Menu => draw_hamburger(cr, c, colors)?,
            NavButton::Mute => draw_speaker(cr, c, state.muted, colors)?,
        }
    }
    Ok(())
}

fn draw_sun(cr: &Context, c: Point, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.sun);
    cr.arc(c.x, c.y, 5.0, 0.0, 2.0 * PI);
    cr.fill()?;
    cr.set_line_width(2.0);
    for i in 0..8 {
        let a = i as f64 * PI / 4.0;
        cr.move_to(c.x + 8.0 * a.cos(), c.y + 8.0 * a.sin());
        cr.line_to(c.x + 11.0 * a.cos(), c.y + 11.0 * a.sin());
    }
    cr.stroke()
}

fn draw_moon(cr: &Context, c: Point, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.moon);
    cr.arc(c.x, c.y, 9.0, 0.0, 2.0 * PI);
    cr.fill()?;
    set_color(cr, colors.background);
    cr.arc(c.x + 5.0, c.y - 4.0, 8.0, 0.0, 2.0 * PI);
    cr.fill()
}

fn draw_hamburger(cr: &Context, c: Point, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.text);
    cr.set_line_width(2.0);
    for dy in [-6.0, 0.0, 6.0] {
        cr.move_to(c.x - 9.0, c.y + dy);
        cr.line_to(c.x + 9.0, c.y + dy);
    }
    cr.stroke()
}

fn draw_speaker(
    cr: &Context,
    c: Point,
    muted: bool,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let color = if muted { colors.alarm } else { colors.sound_on };
    set_color(cr, color);
    cr.move_to(c.x - 9.0, c.y - 4.0);
    cr.line_to(c.x - 4.0, c.y - 4.0);
    cr.line_to(c.x + 2.0, c.y - 9.0);
    cr.line_to(c.x + 2.0, c.y + 9.0);
    cr.line_to(c.x - 4.0, c.y + 4.0);
    cr.line_to(c.x - 9.0, c.y + 4.0);
    cr.close_path();
    cr.fill()?;

    cr.set_line_width(2.0);
    if muted {
        cr.move_to(c.x + 5.0, c.y - 4.0);
        cr.line_to(c.x + 11.0, c.y + 4.0);
        cr.move_to(c.x + 11.0, c.y - 4.0);
        cr.line_to(c.x + 5.0, c.y + 4.0);
    } else {
        cr.arc(c.x + 2.0, c.y, 7.0, -PI / 4.0, PI / 4.0);
    }
    cr.stroke()
}

fn draw_banner(cr: &Context, viewport: Viewport, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.alarm);
    font(cr, 36.0, true);
    text_centered(cr, BANNER, viewport.center())
}

fn draw_button(cr: &Context, state: &UiState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let rect = button_rect(state);
    set_color(cr, colors.accent);
    rounded_rect(cr, rect, 6.0);
    cr.fill()?;
    cr.set_source_rgb(1.0, 1.0, 1.0);
    font(cr, 12.0, false);
    text_centered(cr, BUTTON_LABEL, rect.center())
}

fn draw_popup(cr: &Context, popup: &Popup, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let rect = popup_rect(popup);
    rounded_rect(cr, rect, 8.0);
    set_color(cr, colors.surface);
    cr.fill_preserve()?;
    set_color(cr, colors.popup_border);
    cr.set_line_width(2.0);
    cr.stroke()?;

    // a fresh roll every frame
    let text = PopupText::roll(&mut rand::thread_rng()).as_str();
    set_color(cr, colors.text);
    font(cr, 14.0, false);
    let close = popup_close_rect(popup);
    let max_width = close.x - rect.x - 24.0;
    for (i, line) in wrap(cr, text, max_width)?.iter().enumerate() {
        cr.move_to(rect.x + 16.0, rect.y + 30.0 + i as f64 * 18.0);
        cr.show_text(line)?;
    }

    draw_close_glyph(cr, close, colors.moon)?;

    // zap
    set_color(cr, colors.sun);
    let (x, y) = (rect.x + 16.0, rect.y + rect.height - 30.0);
    cr.move_to(x + 8.0, y);
    cr.line_to(x, y + 12.0);
    cr.line_to(x + 6.0, y + 12.0);
    cr.line_to(x + 4.0, y + 22.0);
    cr.line_to(x + 12.0, y + 9.0);
    cr.line_to(x + 6.0, y + 9.0);
    cr.close_path();
    cr.fill()
}

fn draw_close_glyph(cr: &Context, rect: Rect, color: Srgba<f64>) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.set_line_width(2.0);
    let inset = rect.width * 0.25;
    cr.move_to(rect.x + inset, rect.y + inset);
    cr.line_to(rect.x + rect.width - inset, rect.y + rect.height - inset);
    cr.move_to(rect.x + rect.width - inset, rect.y + inset);
    cr.line_to(rect.x + inset, rect.y + rect.height - inset);
    cr.stroke()
}

fn draw_menu(cr: &Context, viewport: Viewport, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.backdrop);
    cr.rectangle(0.0, 0.0, viewport.width, viewport.height);
    cr.fill()?;

    let panel = menu_panel_rect(viewport);
    set_color(cr, colors.surface);
    cr.rectangle(panel.x, panel.y, panel.width, panel.height);
    cr.fill()?;

    draw_close_glyph(cr, menu_close_rect(viewport), colors.text)?;

    font(cr, 18.0, false);
    let item_colors = [colors.title, colors.ticker[1], colors.cursor];
    for (i, (item, color)) in MENU_ITEMS.iter().zip(item_colors).enumerate() {
        set_color(cr, color);
        cr.move_to(panel.x + 16.0, panel.y + 64.0 + i as f64 * 36.0);
        cr.show_text(item)?;
    }
    Ok(())
}

fn draw_music_badge(
    cr: &Context,
    viewport: Viewport,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let c = Point::new(
        viewport.width - 36.0,
        viewport.height - MARQUEE_HEIGHT - 36.0,
    );
    set_color(cr, colors.surface);
    cr.arc(c.x, c.y, 20.0, 0.0, 2.0 * PI);
    cr.fill()?;

    set_color(cr, colors.sound_on);
    cr.arc(c.x - 5.0, c.y + 6.0, 4.0, 0.0, 2.0 * PI);
    cr.fill()?;
    cr.set_line_width(2.0);
    cr.move_to(c.x - 1.0, c.y + 6.0);
    cr.line_to(c.x - 1.0, c.y - 9.0);
    cr.line_to(c.x + 7.0, c.y - 6.0);
    cr.stroke()
}

fn draw_marquee(
    cr: &Context,
    viewport: Viewport,
    colors: &ThemeColors,
    seconds: f64,
) -> Result<(), cairo::Error> {
    let top = viewport.height - MARQUEE_HEIGHT;
    set_color(cr, colors.surface);
    cr.rectangle(0.0, top, viewport.width, MARQUEE_HEIGHT);
    cr.fill()?;

    cr.save()?;
    cr.rectangle(0.0, top, viewport.width, MARQUEE_HEIGHT);
    cr.clip();

    font(cr, 18.0, false);
    let gap = 32.0;
    let widths = MARQUEE
        .iter()
        .map(|s| cr.text_extents(s).map(|e| e.x_advance() + gap))
        .collect::<Result<Vec<_>, _>>()?;
    let cycle: f64 = widths.iter().sum();

    // scroll right to left, wrapping once a full cycle has passed
    let mut x = viewport.width - (seconds * MARQUEE_SPEED).rem_euclid(cycle + viewport.width);
    while x < viewport.width {
        for ((text, width), color) in MARQUEE.iter().zip(&widths).zip(colors.ticker) {
            set_color(cr, color);
            cr.move_to(x, top + MARQUEE_HEIGHT / 2.0 + 6.0);
            cr.show_text(text)?;
            x += width;
        }
    }
    cr.restore()
}

fn draw_cursor(cr: &Context, cursor: Point, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.cursor);
    cr.arc(
        cursor.x + CURSOR_DOT_RADIUS,
        cursor.y + CURSOR_DOT_RADIUS,
        CURSOR_DOT_RADIUS,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}

fn draw_sound_toast(
    cr: &Context,
    viewport: Viewport,
    colors: &ThemeColors,
    label: &str,
) -> Result<(), cairo::Error> {
    let text = format!("Sound: {}", label);
    font(cr, 16.0, false);
    let ext = cr.text_extents(&text)?;
    let rect = Rect::new(
        (viewport.width - ext.width()) / 2.0 - 16.0,
        NAV_HEIGHT + 16.0,
        ext.width() + 32.0,
        36.0,
    );
    set_color(cr, colors.surface);
    rounded_rect(cr, rect, 18.0);
    cr.fill()?;
    cr.set_source_rgb(1.0, 1.0, 1.0);
    text_centered(cr, &text, rect.center())
}
