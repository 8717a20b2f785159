use crate::config::Config;
use crate::event::{Event, TimerSlot};
use crate::geometry::{BUTTON_MARGIN, POPUP_MARGIN, Viewport};
use crate::reducer::{self, Action, Effect, Transition};
use crate::schedule::{Scheduler, TimerRegistry};
use crate::state::UiState;
use rand::Rng;
use std::time::Duration;

/// Drives one mounted component: turns host events into reductions and reductions into
/// timer work.
pub struct Session<S: Scheduler, R: Rng> {
    state: UiState,
    config: Config,
    viewport: Viewport,
    scheduler: S,
    rng: R,
    timers: TimerRegistry<S::Handle>,
    mounted: bool,
}

impl<S: Scheduler, R: Rng> Session<S, R> {
    pub fn new(config: Config, scheduler: S, rng: R) -> Self {
        let viewport = config.window.viewport();
        Self {
            state: UiState::default(),
            config,
            viewport,
            scheduler,
            rng,
            timers: TimerRegistry::new(),
            mounted: false,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn timers(&self) -> &TimerRegistry<S::Handle> {
        &self.timers
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        log::debug!("Setting up timers");
        self.mounted = true;
        self.state = UiState::default();

        let timings = self.config.timings.clone();
        self.arm_repeating(TimerSlot::LoadingBlink, timings.loading_blink, Event::LoadingTick);
        let warmup = self
            .scheduler
            .schedule_once(timings.warmup, Event::WarmupElapsed);
        self.timers.insert(TimerSlot::Warmup, warmup);
        self.arm_cycles();
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        log::debug!("Cleaning up timers");
        self.mounted = false;
        self.timers.release_all();
    }

    /// Swaps in a new config and re-arms the periodic timers with its periods. The
    /// warm-up already in flight keeps its original schedule.
    pub fn reconfigure(&mut self, config: Config) {
        self.config = config;
        if self.mounted {
            self.arm_cycles();
        }
    }

    /// Feeds one event through the reducer. Returns whether the visible state changed.
    pub fn dispatch(&mut self, event: Event) -> bool {
        if !self.mounted {
            log::debug!("Ignoring {:?} after teardown", event);
            return false;
        }

        let Some(action) = self.resolve(event) else {
            return false;
        };
        let Transition { state, effects } = reducer::reduce(&self.state, action, &self.config);
        for effect in effects {
            self.apply(effect);
        }

        let changed = state != self.state;
        self.state = state;
        changed
    }

    fn arm_repeating(&mut self, slot: TimerSlot, period: Duration, event: Event) {
        let handle = self.scheduler.schedule_repeating(period, event);
        self.timers.insert(slot, handle);
    }

    fn arm_cycles(&mut self) {
        let timings = self.config.timings.clone();
        self.arm_repeating(TimerSlot::Spawn, timings.spawn_period, Event::SpawnDue);
        self.arm_repeating(TimerSlot::Shake, timings.shake_period, Event::ShakeDue);
        self.arm_repeating(TimerSlot::Ambient, timings.ambient_period, Event::AmbientDue);
    }

    fn resolve(&mut self, event: Event) -> Option<Action> {
        let action = match event {
            Event::LoadingTick => Action::LoadingTick,
            Event::WarmupElapsed => {
                self.timers.forget(TimerSlot::Warmup);
                Action::WarmupElapsed
            }
            Event::SpawnDue => {
                log::debug!("Attempting to create popup");
                Action::Spawn {
                    at: self.viewport.sample(POPUP_MARGIN, &mut self.rng),
                    stamp_millis: self.scheduler.now_millis(),
                }
            }
            Event::ShakeDue => Action::ShakeStart,
            Event::ShakeSettled => Action::ShakeSettled,
            Event::AmbientDue => Action::Ambient,
            Event::SoundExpired { generation } => Action::SoundExpired { generation },
            Event::PointerMoved(point) => Action::PointerMoved(point),
            Event::CursorSettled(point) => Action::CursorSettled(point),
            Event::ButtonHovered => {
                Action::MoveButton(self.viewport.sample(BUTTON_MARGIN, &mut self.rng))
            }
            Event::ToggleMenu => Action::ToggleMenu,
            Event::ToggleDarkMode => Action::ToggleDarkMode,
            Event::ToggleMute => Action::ToggleMute,
            Event::ClosePopup(id) => Action::ClosePopup(id),
            Event::Resize(viewport) => {
                self.viewport = viewport;
                return None;
            }
        };
        Some(action)
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            // one-shots are not tracked; a late firing after teardown is dropped by `dispatch`
            Effect::After { delay, event } => {
                let _ = self.scheduler.schedule_once(delay, event);
            }
            Effect::Cancel(slot) => {
                self.timers.cancel(slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::popup::MAX_POPUPS;
    use crate::schedule::VirtualClock;
    use crate::sound::SoundKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    type TestSession = Session<VirtualClock, ChaCha8Rng>;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn mounted(config: Config) -> (VirtualClock, TestSession) {
        let clock = VirtualClock::new();
        let mut session = Session::new(config, clock.clone(), ChaCha8Rng::seed_from_u64(11));
        session.mount();
        (clock, session)
    }

    fn run(clock: &VirtualClock, session: &mut TestSession, until: u64) {
        clock.run_until(ms(until), |_, event| {
            session.dispatch(event);
        });
    }

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.timings.warmup = ms(1000);
        config.timings.shake_period = ms(3_600_000);
        config.timings.ambient_period = ms(3_600_000);
        config
    }

    #[test]
    fn test_mount_arms_all_timers() {
        let (clock, session) = mounted(Config::default());
        assert_eq!(session.timers().len(), 5);
        assert_eq!(clock.pending(), 5);
        assert!(session.state().loading);
    }

    #[test]
    fn test_loading_settles_after_warmup() {
        let (clock, mut session) = mounted(Config::default());
        run(&clock, &mut session, 4999);
        assert!(!session.state().warmed_up);

        run(&clock, &mut session, 5000);
        assert!(!session.state().loading);
        assert!(!session.timers().is_armed(TimerSlot::LoadingBlink));
        assert!(!session.timers().is_armed(TimerSlot::Warmup));

        clock.run_until(ms(60_000), |_, event| {
            assert_ne!(event, Event::LoadingTick);
            session.dispatch(event);
            assert!(!session.state().loading);
        });
    }

    #[test]
    fn test_spawner_never_exceeds_cap() {
        let (clock, mut session) = mounted(Config::default());
        clock.run_until(ms(120_000), |_, event| {
            session.dispatch(event);
            assert!(session.state().popups.len() <= MAX_POPUPS);
        });
        assert_eq!(session.state().popups.len(), MAX_POPUPS);

        let ids: Vec<u64> = session.state().popups.iter().map(|p| *p.id).collect();
        assert_eq!(ids, vec![3000, 6000, 9000, 12000, 15000]);
    }

    #[test]
    fn test_popups_respect_viewport() {
        let (clock, mut session) = mounted(Config::default());
        session.dispatch(Event::Resize(Viewport::new(800.0, 600.0)));
        run(&clock, &mut session, 20_000);
        for popup in &session.state().popups {
            assert!(popup.position.x >= 0.0 && popup.position.x < 600.0);
            assert!(popup.position.y >= 0.0 && popup.position.y < 500.0);
        }
    }

    #[test]
    fn test_popup_label_clears_after_linger() {
        let (clock, mut session) = mounted(quiet_config());
        run(&clock, &mut session, 3000);
        assert_eq!(session.state().sound, Some(SoundKind::Popup));

        run(&clock, &mut session, 3499);
        assert_eq!(session.state().sound, Some(SoundKind::Popup));

        clock.run_until(ms(5999), |at, event| {
            session.dispatch(event);
            if at >= ms(3500) {
                assert_ne!(session.state().sound, Some(SoundKind::Popup));
            }
        });
        assert_eq!(session.state().sound, None);
    }

    #[test]
    fn test_hover_moves_button_within_bounds() {
        let (clock, mut session) = mounted(Config::default());
        run(&clock, &mut session, 5000);
        session.dispatch(Event::Resize(Viewport::new(400.0, 300.0)));

        for _ in 0..200 {
            session.dispatch(Event::ButtonHovered);
            let button = session.state().button;
            assert!(button.x >= 0.0 && button.x < 300.0, "x = {}", button.x);
            assert!(button.y >= 0.0 && button.y < 260.0, "y = {}", button.y);
            assert_eq!(session.state().sound, Some(SoundKind::Move));
        }
    }

    #[test]
    fn test_cursor_follows_each_move_once_after_lag() {
        let (clock, mut session) = mounted(quiet_config());
        run(&clock, &mut session, 1000);

        let a = Point::new(10.0, 10.0);
        let b = Point::new(90.0, 40.0);
        session.dispatch(Event::PointerMoved(a));
        run(&clock, &mut session, 1050);
        session.dispatch(Event::PointerMoved(b));

        run(&clock, &mut session, 1199);
        assert_eq!(session.state().cursor, Point::default());

        let mut settled = Vec::new();
        clock.run_until(ms(2000), |at, event| {
            if let Event::CursorSettled(p) = event {
                settled.push((at, p));
            }
            session.dispatch(event);
        });
        assert_eq!(settled, vec![(ms(1200), a), (ms(1250), b)]);
        assert_eq!(session.state().cursor, b);
    }

    #[test]
    fn test_mute_keeps_label_empty() {
        let (clock, mut session) = mounted(Config::default());
        run(&clock, &mut session, 5000);
        session.dispatch(Event::ToggleMute);
        assert_eq!(session.state().sound, None);

        clock.run_until(ms(60_000), |_, event| {
            session.dispatch(event);
            assert_eq!(session.state().sound, None);
        });
        session.dispatch(Event::ButtonHovered);
        assert_eq!(session.state().sound, None);

        session.dispatch(Event::ToggleMute);
        assert_eq!(session.state().sound, Some(SoundKind::Mute));
    }

    #[test]
    fn test_unmount_stops_periodic_timers() {
        let (clock, mut session) = mounted(Config::default());
        run(&clock, &mut session, 10_000);
        let snapshot = session.state().clone();

        session.unmount();
        assert!(session.timers().is_empty());

        let mut late = Vec::new();
        clock.run_until(ms(120_000), |_, event| {
            late.push(event.clone());
            assert!(!session.dispatch(event));
        });
        assert!(late.iter().all(|e| matches!(
            e,
            Event::SoundExpired { .. } | Event::ShakeSettled | Event::CursorSettled(_)
        )));
        assert_eq!(session.state(), &snapshot);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_remount_starts_fresh() {
        let (clock, mut session) = mounted(Config::default());
        run(&clock, &mut session, 20_000);
        assert!(session.state().warmed_up);

        session.unmount();
        session.mount();
        assert_eq!(session.state(), &UiState::default());
        assert!(session.timers().is_armed(TimerSlot::LoadingBlink));

        run(&clock, &mut session, 25_000);
        assert!(session.state().warmed_up);
        assert!(!session.state().loading);
        assert!(!session.timers().is_armed(TimerSlot::LoadingBlink));

        clock.run_until(ms(60_000), |_, event| {
            assert_ne!(event, Event::LoadingTick);
            session.dispatch(event);
        });
    }

    #[test]
    fn test_drop_releases_timers() {
        let (clock, session) = mounted(Config::default());
        drop(session);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_reconfigure_rearms_spawner() {
        let (clock, mut session) = mounted(quiet_config());
        run(&clock, &mut session, 1000);
        assert!(session.state().popups.is_empty());

        let mut faster = quiet_config();
        faster.timings.spawn_period = ms(100);
        session.reconfigure(faster);
        run(&clock, &mut session, 1350);
        assert_eq!(session.state().popups.len(), 3);
        assert_eq!(session.timers().len(), 3);
    }
}
