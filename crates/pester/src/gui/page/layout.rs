use super::{
    BUTTON_HEIGHT, BUTTON_WIDTH, MENU_CLOSE_SIZE, MENU_WIDTH, NAV_BUTTON_SPACING, NAV_EDGE_INSET,
    NAV_HEIGHT, POPUP_CLOSE_SIZE, POPUP_HEIGHT, POPUP_WIDTH,
};
use nag::popup::{Popup, PopupId};
use nag::{Event, Point, UiState, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Rotation and zoom applied to the whole page around the viewport center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    pub center: Point,
    /// Radians.
    pub angle: f64,
    pub scale: f64,
}

impl PageTransform {
    pub fn for_state(state: &UiState, viewport: Viewport) -> Self {
        Self {
            center: viewport.center(),
            angle: (state.rotation_normalized() as f64).to_radians(),
            scale: state.scale(),
        }
    }

    pub fn to_screen(&self, p: Point) -> Point {
        let (sin, cos) = self.angle.sin_cos();
        let (dx, dy) = (
            (p.x - self.center.x) * self.scale,
            (p.y - self.center.y) * self.scale,
        );
        Point::new(
            self.center.x + dx * cos - dy * sin,
            self.center.y + dx * sin + dy * cos,
        )
    }

    /// Maps a pointer position back onto the untransformed page.
    pub fn to_page(&self, p: Point) -> Point {
        let (sin, cos) = self.angle.sin_cos();
        let (dx, dy) = (p.x - self.center.x, p.y - self.center.y);
        Point::new(
            self.center.x + (dx * cos + dy * sin) / self.scale,
            self.center.y + (-dx * sin + dy * cos) / self.scale,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    DarkMode,
    Menu,
    Mute,
}

impl NavButton {
    pub const ALL: [Self; 3] = [Self::DarkMode, Self::Menu, Self::Mute];

    /// Buttons sit right-aligned in the nav bar, dark mode leftmost.
    pub fn center(&self, viewport: Viewport) -> Point {
        let from_right = match self {
            Self::DarkMode => 2.0,
            Self::Menu => 1.0,
            Self::Mute => 0.0,
        };
        Point::new(
            viewport.width - NAV_EDGE_INSET - from_right * NAV_BUTTON_SPACING,
            NAV_HEIGHT / 2.0,
        )
    }

    fn contains(&self, viewport: Viewport, p: Point) -> bool {
        let c = self.center(viewport);
        (p.x - c.x).hypot(p.y - c.y) <= super::NAV_BUTTON_RADIUS
    }
}

pub fn popup_rect(popup: &Popup) -> Rect {
    Rect::at(popup.position, POPUP_WIDTH, POPUP_HEIGHT)
}

pub fn popup_close_rect(popup: &Popup) -> Rect {
    Rect::new(
        popup.position.x + POPUP_WIDTH - POPUP_CLOSE_SIZE - 8.0,
        popup.position.y + 8.0,
        POPUP_CLOSE_SIZE,
        POPUP_CLOSE_SIZE,
    )
}

pub fn button_rect(state: &UiState) -> Rect {
    Rect::at(state.button, BUTTON_WIDTH, BUTTON_HEIGHT)
}

pub fn menu_panel_rect(viewport: Viewport) -> Rect {
    Rect::new(viewport.width - MENU_WIDTH, 0.0, MENU_WIDTH, viewport.height)
}

pub fn menu_close_rect(viewport: Viewport) -> Rect {
    Rect::new(
        viewport.width - MENU_CLOSE_SIZE - 8.0,
        8.0,
        MENU_CLOSE_SIZE,
        MENU_CLOSE_SIZE,
    )
}

/// What sits under the pointer, topmost first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    MenuClose,
    MenuBackdrop,
    PopupClose(PopupId),
    PopupBody(PopupId),
    EvasiveButton,
    Nav(NavButton),
}

impl Hit {
    pub fn click_event(&self) -> Option<Event> {
        match self {
            Self::MenuClose | Self::MenuBackdrop | Self::Nav(NavButton::Menu) => {
                Some(Event::ToggleMenu)
            }
            Self::Nav(NavButton::DarkMode) => Some(Event::ToggleDarkMode),
            Self::Nav(NavButton::Mute) => Some(Event::ToggleMute),
            Self::PopupClose(id) => Some(Event::ClosePopup(*id)),
            Self::PopupBody(_) | Self::EvasiveButton => None,
        }
    }
}

pub fn hit_test(state: &UiState, viewport: Viewport, screen: Point) -> Option<Hit> {
    if state.loading {
        return None;
    }
    let p = PageTransform::for_state(state, viewport).to_page(screen);

    // the menu overlay covers the whole page
    if state.menu_open {
        return Some(if menu_close_rect(viewport).contains(p) {
            Hit::MenuClose
        } else {
            Hit::MenuBackdrop
        });
    }

    if let Some(popup) = state
        .popups
        .iter()
        .rev()
        .find(|popup| popup_rect(popup).contains(p))
    {
        return Some(if popup_close_rect(popup).contains(p) {
            Hit::PopupClose(popup.id)
        } else {
            Hit::PopupBody(popup.id)
        });
    }

    if button_rect(state).contains(p) {
        return Some(Hit::EvasiveButton);
    }

    NavButton::ALL
        .into_iter()
        .find(|b| b.contains(viewport, p))
        .map(Hit::Nav)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 600.0,
    };

    fn ready() -> UiState {
        UiState {
            loading: false,
            warmed_up: true,
            ..UiState::default()
        }
    }

    fn assert_near(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{:?} != {:?}",
            a,
            b
        );
    }

    fn with_popups(ids_and_positions: &[(u64, f64, f64)]) -> UiState {
        UiState {
            popups: ids_and_positions
                .iter()
                .map(|&(id, x, y)| Popup::new(PopupId::new(id), Point::new(x, y)))
                .collect(),
            ..ready()
        }
    }

    #[test]
    fn test_identity_transform_at_rest() {
        let t = PageTransform::for_state(&ready(), VIEWPORT);
        let p = Point::new(123.0, 45.0);
        assert_near(t.to_page(p), p);
        assert_near(t.to_screen(p), p);
    }

    #[test]
    fn test_half_turn_mirrors_through_center() {
        let state = UiState {
            rotation: 180,
            ..ready()
        };
        let t = PageTransform::for_state(&state, VIEWPORT);
        assert_near(t.to_page(Point::new(10.0, 20.0)), Point::new(990.0, 580.0));

        let full_turn = UiState {
            rotation: 360,
            ..ready()
        };
        let t = PageTransform::for_state(&full_turn, VIEWPORT);
        assert_near(t.to_page(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_zoom_scales_about_center() {
        let state = UiState {
            zoom: 150,
            ..ready()
        };
        let t = PageTransform::for_state(&state, VIEWPORT);
        assert_near(t.to_page(Point::new(530.0, 300.0)), Point::new(520.0, 300.0));
        assert_near(t.to_screen(Point::new(520.0, 300.0)), Point::new(530.0, 300.0));
    }

    #[test]
    fn test_loading_ignores_pointer() {
        let state = UiState::default();
        assert_eq!(hit_test(&state, VIEWPORT, state.button), None);
    }

    #[test]
    fn test_topmost_popup_wins() {
        let state = with_popups(&[(1, 100.0, 100.0), (2, 150.0, 120.0)]);
        assert_eq!(
            hit_test(&state, VIEWPORT, Point::new(160.0, 130.0)),
            Some(Hit::PopupBody(PopupId::new(2)))
        );
        assert_eq!(
            hit_test(&state, VIEWPORT, Point::new(110.0, 110.0)),
            Some(Hit::PopupBody(PopupId::new(1)))
        );

        let close = popup_close_rect(&state.popups[1]).center();
        let hit = hit_test(&state, VIEWPORT, close);
        assert_eq!(hit, Some(Hit::PopupClose(PopupId::new(2))));
        assert_eq!(
            hit.and_then(|h| h.click_event()),
            Some(Event::ClosePopup(PopupId::new(2)))
        );
    }

    #[test]
    fn test_popup_covers_button() {
        let state = UiState {
            button: Point::new(110.0, 180.0),
            ..with_popups(&[(1, 100.0, 100.0)])
        };
        assert_eq!(
            hit_test(&state, VIEWPORT, Point::new(120.0, 185.0)),
            Some(Hit::PopupBody(PopupId::new(1)))
        );
        assert_eq!(
            hit_test(&state, VIEWPORT, Point::new(120.0, 210.0)),
            Some(Hit::EvasiveButton)
        );
    }

    #[test]
    fn test_button_found_through_rotation() {
        let state = UiState {
            rotation: 180,
            button: Point::new(100.0, 100.0),
            ..ready()
        };
        let on_screen =
            PageTransform::for_state(&state, VIEWPORT).to_screen(Point::new(150.0, 120.0));
        assert_eq!(
            hit_test(&state, VIEWPORT, on_screen),
            Some(Hit::EvasiveButton)
        );
        assert_eq!(hit_test(&state, VIEWPORT, Point::new(150.0, 120.0)), None);
    }

    #[test]
    fn test_nav_buttons() {
        let state = ready();
        for (button, event) in [
            (NavButton::DarkMode, Event::ToggleDarkMode),
            (NavButton::Menu, Event::ToggleMenu),
            (NavButton::Mute, Event::ToggleMute),
        ] {
            let hit = hit_test(&state, VIEWPORT, button.center(VIEWPORT));
            assert_eq!(hit, Some(Hit::Nav(button)));
            assert_eq!(hit.and_then(|h| h.click_event()), Some(event));
        }
    }

    #[test]
    fn test_open_menu_swallows_clicks() {
        let state = UiState {
            menu_open: true,
            zoom: 150,
            ..ready()
        };
        let hit = hit_test(&state, VIEWPORT, Point::new(500.0, 300.0));
        assert_eq!(hit, Some(Hit::MenuBackdrop));
        assert_eq!(hit.and_then(|h| h.click_event()), Some(Event::ToggleMenu));

        let close = PageTransform::for_state(&state, VIEWPORT)
            .to_screen(menu_close_rect(VIEWPORT).center());
        assert_eq!(hit_test(&state, VIEWPORT, close), Some(Hit::MenuClose));
    }
}
