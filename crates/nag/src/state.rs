use crate::geometry::Point;
use crate::popup::{Popup, PopupId};
use crate::sound::SoundKind;

pub const DEFAULT_ZOOM: u16 = 100;
pub const MENU_ZOOM: u16 = 150;
pub const ROTATION_STEP: i64 = 180;

/// Snapshot of everything on screen. Transitions build a new value instead of editing
/// the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub loading: bool,
    /// Set once the warm-up window has elapsed; loading never comes back after that.
    pub warmed_up: bool,
    pub dark_mode: bool,
    pub menu_open: bool,
    pub shaking: bool,
    pub muted: bool,
    /// Percent.
    pub zoom: u16,
    /// Degrees, unbounded.
    pub rotation: i64,
    pub button: Point,
    pub cursor: Point,
    pub sound: Option<SoundKind>,
    /// Bumped each time a sound label is set.
    pub sound_generation: u64,
    pub popups: Vec<Popup>,
    pub last_popup_id: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            loading: true,
            warmed_up: false,
            dark_mode: true,
            menu_open: false,
            shaking: false,
            muted: false,
            zoom: DEFAULT_ZOOM,
            rotation: 0,
            button: Point::new(100.0, 100.0),
            cursor: Point::default(),
            sound: None,
            sound_generation: 0,
            popups: Vec::new(),
            last_popup_id: 0,
        }
    }
}

impl UiState {
    pub fn rotation_normalized(&self) -> i64 {
        self.rotation.rem_euclid(360)
    }

    pub fn scale(&self) -> f64 {
        self.zoom as f64 / 100.0
    }

    pub fn popup(&self, id: PopupId) -> Option<&Popup> {
        self.popups.iter().find(|p| p.id == id)
    }
}
