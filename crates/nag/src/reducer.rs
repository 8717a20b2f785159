use crate::config::Config;
use crate::event::{Event, TimerSlot};
use crate::geometry::Point;
use crate::popup::{self, Popup, PopupId};
use crate::sound::{SoundClear, SoundKind};
use crate::state::{DEFAULT_ZOOM, MENU_ZOOM, ROTATION_STEP, UiState};
use std::time::Duration;

/// A resolved event: any randomness or clock reading it needs has already been sampled.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadingTick,
    WarmupElapsed,
    Spawn { at: Point, stamp_millis: u64 },
    ShakeStart,
    ShakeSettled,
    Ambient,
    SoundExpired { generation: u64 },
    PointerMoved(Point),
    CursorSettled(Point),
    MoveButton(Point),
    ToggleMenu,
    ToggleDarkMode,
    ToggleMute,
    ClosePopup(PopupId),
}

/// Work the host has to carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    After { delay: Duration, event: Event },
    Cancel(TimerSlot),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: UiState,
    pub effects: Vec<Effect>,
}

struct Step<'a> {
    state: UiState,
    effects: Vec<Effect>,
    config: &'a Config,
}

impl<'a> Step<'a> {
    fn new(state: &UiState, config: &'a Config) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
            config,
        }
    }

    fn after(&mut self, delay: Duration, event: Event) {
        self.effects.push(Effect::After { delay, event });
    }

    fn cancel(&mut self, slot: TimerSlot) {
        self.effects.push(Effect::Cancel(slot));
    }

    /// Shows `kind` as the current sound and arms its expiry. Silent while muted.
    fn notify(&mut self, kind: SoundKind) {
        if self.state.muted {
            return;
        }
        self.state.sound = Some(kind);
        self.state.sound_generation += 1;
        let generation = self.state.sound_generation;
        self.after(
            self.config.timings.sound_linger,
            Event::SoundExpired { generation },
        );
    }

    fn finish(self) -> Transition {
        Transition {
            state: self.state,
            effects: self.effects,
        }
    }
}

pub fn reduce(state: &UiState, action: Action, config: &Config) -> Transition {
    let mut step = Step::new(state, config);

    match action {
        Action::LoadingTick => {
            if !step.state.warmed_up {
                step.state.loading = !step.state.loading;
                step.notify(SoundKind::Loading);
            }
        }
        Action::WarmupElapsed => {
            if !step.state.warmed_up {
                step.cancel(TimerSlot::LoadingBlink);
                step.state.loading = false;
                step.state.warmed_up = true;
                step.notify(SoundKind::Complete);
            }
        }
        Action::Spawn { at, stamp_millis } => {
            let id = PopupId::issue(stamp_millis, step.state.last_popup_id);
            if let Some(popups) = popup::append_capped(&step.state.popups, Popup::new(id, at)) {
                step.state.popups = popups;
                step.state.last_popup_id = *id;
                step.notify(SoundKind::Popup);
            }
        }
        Action::ShakeStart => {
            step.state.shaking = true;
            step.notify(SoundKind::Shake);
            step.after(config.timings.shake_length, Event::ShakeSettled);
        }
        Action::ShakeSettled => step.state.shaking = false,
        Action::Ambient => step.notify(SoundKind::Music),
        Action::SoundExpired { generation } => match config.sound.clear {
            SoundClear::Unconditional => step.state.sound = None,
            SoundClear::IfUnchanged => {
                if generation == step.state.sound_generation {
                    step.state.sound = None;
                }
            }
        },
        Action::PointerMoved(point) => {
            step.after(config.timings.cursor_lag, Event::CursorSettled(point))
        }
        Action::CursorSettled(point) => step.state.cursor = point,
        Action::MoveButton(point) => {
            step.state.button = point;
            step.notify(SoundKind::Move);
        }
        Action::ToggleMenu => {
            step.state.menu_open = !step.state.menu_open;
            step.state.zoom = if step.state.zoom == DEFAULT_ZOOM {
                MENU_ZOOM
            } else {
                DEFAULT_ZOOM
            };
            step.notify(SoundKind::Menu);
        }
        Action::ToggleDarkMode => {
            step.state.dark_mode = !step.state.dark_mode;
            step.state.rotation += ROTATION_STEP;
            step.notify(SoundKind::Toggle);
        }
        Action::ToggleMute => {
            step.state.muted = !step.state.muted;
            if step.state.muted {
                step.state.sound = None;
            }
            step.notify(SoundKind::Mute);
        }
        Action::ClosePopup(id) => {
            step.state.popups = popup::without(&step.state.popups, id);
            step.notify(SoundKind::Close);
        }
    }

    step.finish()
}
