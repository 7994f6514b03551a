mod controls;
mod gameplay;
mod renderer;

use crate::controls::ControlAction;
use crate::gameplay::FillApp;

use macroquad::prelude::*;
use water_fill::config::{self, FillerConfig};

#[macroquad::main("Water Fill Preview")]
async fn main() {
    let config = config::load().unwrap_or_else(|err| {
        warn!("{}; falling back to defaults", err);
        FillerConfig::default()
    });
    let mut app = match FillApp::new(config) {
        Ok(app) => app,
        Err(err) => {
            error!("{}", err);
            return;
        }
    };
    loop {
        app.update(get_frame_time());
        app.render();
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            app.handle_click(x, y);
        }
        if app.is_playback() {
            if is_key_pressed(KeyCode::Right) {
                app.handle_action(ControlAction::StepForward);
            }
            if is_key_pressed(KeyCode::Left) {
                app.handle_action(ControlAction::StepBackward);
            }
            if is_key_pressed(KeyCode::Space) {
                app.handle_action(ControlAction::TogglePlay);
            }
        }
        next_frame().await;
    }
}
