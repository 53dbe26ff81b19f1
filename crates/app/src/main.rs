mod audio;
mod frame_input;
mod ui_render;
mod window_config;

use std::{env, process};

use macroquad::prelude::next_frame;
use tower_app::app_loop::{AppCommand, AppState};
use tower_app::format_seed;
use tower_app::seed::{generate_runtime_seed, resolve_seed_from_args};
use tower_core::scene::{AudioSink, play_event_cues};
use tower_core::{GameConfig, Session};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use audio::MacroquadAudio;
use frame_input::capture_frame_input;
use ui_render::{MacroquadRenderer, draw_frame};
use window_config::build_window_conf;

#[macroquad::main(build_window_conf)]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    let source = match resolve_seed_from_args(&args, generate_runtime_seed()) {
        Ok(source) => source,
        Err(message) => {
            error!(%message, "invalid arguments");
            process::exit(2);
        }
    };

    let mut session = match Session::new(source.value(), GameConfig::default()) {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "could not build the first floor");
            process::exit(1);
        }
    };
    info!(seed = %format_seed(source.value()), source = source.label(), "cursed tower starting");

    let mut audio = MacroquadAudio::load().await;
    let mut renderer = MacroquadRenderer::load().await;
    let mut app = AppState::new();

    // One simulation tick per rendered frame; macroquad paces frames to the display.
    loop {
        let input = capture_frame_input();
        match app.tick(&mut session, &input) {
            AppCommand::Quit => break,
            AppCommand::Restart | AppCommand::None => {}
        }

        play_event_cues(&app.frame_events, &mut audio);
        audio.play_music(app.music(&session));
        draw_frame(&session, &app, &mut renderer);

        next_frame().await;
    }

    info!("cursed tower closed");
}
