use crate::geometry::{Point, Viewport};
use crate::popup::PopupId;
use strum::{Display as StrumDisplay, EnumIter};

/// Everything the host can feed into a session: timer firings and user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LoadingTick,
    WarmupElapsed,
    SpawnDue,
    ShakeDue,
    ShakeSettled,
    AmbientDue,
    SoundExpired { generation: u64 },
    PointerMoved(Point),
    CursorSettled(Point),
    ButtonHovered,
    ToggleMenu,
    ToggleDarkMode,
    ToggleMute,
    ClosePopup(PopupId),
    Resize(Viewport),
}

/// Timers armed at mount. Their handles live in the session's registry until teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum TimerSlot {
    LoadingBlink,
    Warmup,
    Spawn,
    Shake,
    Ambient,
}
