use pester::gui::app::AppModel;
use pester::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = nag::config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.pester.pester");

    app.run::<AppModel>((config, rx));
}
