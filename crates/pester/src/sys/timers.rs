use crate::gui::app::AppMsg;
use nag::Event;
use nag::schedule::{Scheduler, TimerHandle};
use relm4::Sender;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Runs session timers on the glib main loop. A firing timer posts its event back to the
/// component as [`AppMsg::Fire`].
pub struct GlibScheduler {
    sender: Sender<AppMsg>,
}

impl GlibScheduler {
    pub fn new(sender: Sender<AppMsg>) -> Self {
        Self { sender }
    }
}

pub struct GlibTimer(glib::SourceId);

impl TimerHandle for GlibTimer {
    fn cancel(self) {
        // `SourceId::remove` panics on a source that already finished
        if let Some(source) = glib::MainContext::default().find_source_by_id(&self.0) {
            source.destroy();
        }
    }
}

impl Scheduler for GlibScheduler {
    type Handle = GlibTimer;

    fn schedule_once(&mut self, after: Duration, event: Event) -> GlibTimer {
        let sender = self.sender.clone();
        GlibTimer(glib::timeout_add_local_once(after, move || {
            // the component may be gone already
            let _ = sender.send(AppMsg::Fire(event));
        }))
    }

    fn schedule_repeating(&mut self, period: Duration, event: Event) -> GlibTimer {
        let sender = self.sender.clone();
        GlibTimer(glib::timeout_add_local(period, move || {
            if sender.send(AppMsg::Fire(event.clone())).is_err() {
                return glib::ControlFlow::Break;
            }
            glib::ControlFlow::Continue
        }))
    }

    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}
