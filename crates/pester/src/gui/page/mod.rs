pub mod layout;
pub mod view;

pub use layout::{Hit, PageTransform, Rect, hit_test};
pub use view::draw;

pub const NAV_HEIGHT: f64 = 64.0;
pub const NAV_BUTTON_RADIUS: f64 = 18.0;
pub const NAV_BUTTON_SPACING: f64 = 52.0;
pub const NAV_EDGE_INSET: f64 = 40.0;

pub const MENU_WIDTH: f64 = 256.0;
pub const MENU_CLOSE_SIZE: f64 = 24.0;

pub const POPUP_WIDTH: f64 = 256.0;
pub const POPUP_HEIGHT: f64 = 100.0;
pub const POPUP_CLOSE_SIZE: f64 = 24.0;

// matches the relocation margin of the evasive button
pub const BUTTON_WIDTH: f64 = 100.0;
pub const BUTTON_HEIGHT: f64 = 40.0;

pub const CURSOR_DOT_RADIUS: f64 = 12.0;
pub const SHAKE_AMPLITUDE: f64 = 10.0; // px
pub const MARQUEE_SPEED: f64 = 120.0; // px per second
pub const MARQUEE_HEIGHT: f64 = 40.0;

pub const TITLE: &str = "DarkIrritating.com";
pub const BANNER: &str = "Congratulations! You've won eternal confusion!";
pub const BUTTON_LABEL: &str = "Try to click me!";
pub const MENU_ITEMS: &[&str] = &["Home", "About", "Contact"];
pub const MARQUEE: &[&str] = &[
    "Breaking news: This website now causes auditory hallucinations!",
    "Warning: Side effects may include uncontrollable dancing!",
];
