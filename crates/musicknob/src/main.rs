use knob::config;
use musicknob::gui::app::AppModel;
use musicknob::gui::model::State;
use musicknob::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    let state = State::from_config(&config).unwrap_or_else(|e| {
        log::error!("Invalid configuration, using defaults: {}", e);
        State::default()
    });

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.rainbowt.musicknob");

    app.run::<AppModel>((state, rx));
}
