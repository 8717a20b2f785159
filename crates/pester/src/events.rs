/// Messages from background services to the GUI thread.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
}
