use crate::geometry::Point;
use derive_more::{Deref, Display, From, Into};
use rand::Rng;
use strum::{EnumIter, IntoStaticStr};

pub const MAX_POPUPS: usize = 5;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Deref, From, Into,
)]
pub struct PopupId(u64);

impl PopupId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Issues an id from a millisecond timestamp, bumped past `last` when the clock has not
    /// moved on since the previous popup.
    pub fn issue(stamp_millis: u64, last: u64) -> Self {
        Self(stamp_millis.max(last.saturating_add(1)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Popup {
    pub id: PopupId,
    pub position: Point,
}

impl Popup {
    pub fn new(id: PopupId, position: Point) -> Self {
        Self { id, position }
    }
}

/// Body copy of a popup card. Rolled again every time a popup is drawn, so a redraw may
/// change what a popup says without any state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum PopupText {
    #[strum(serialize = "This popup is here to stay!")]
    HereToStay,
    #[strum(serialize = "You thought you could close this? Think again!")]
    ThinkAgain,
}

impl PopupText {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::HereToStay
        } else {
            Self::ThinkAgain
        }
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Appends `popup` unless the collection is already full.
pub fn append_capped(popups: &[Popup], popup: Popup) -> Option<Vec<Popup>> {
    (popups.len() < MAX_POPUPS).then(|| {
        let mut next = Vec::with_capacity(popups.len() + 1);
        next.extend_from_slice(popups);
        next.push(popup);
        next
    })
}

/// Drops every popup carrying `id`, keeping the rest in order.
pub fn without(popups: &[Popup], id: PopupId) -> Vec<Popup> {
    popups.iter().filter(|p| p.id != id).copied().collect()
}
