use macroquad::prelude::KeyCode;
use tower_core::scene::MusicCue;
use tower_core::{GameError, GameEvent, InputSnapshot, Session, TickOutcome};
use tracing::{error, info};

use crate::{format_seed, format_snapshot_hash, outcome_label};

pub const MENU_OPTIONS: [&str; 2] = ["Start Game", "Quit"];
const MENU_START: usize = 0;
const MENU_QUIT: usize = 1;

/// Everything the app reads from the keyboard in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Keys that went down this frame, used for menu navigation.
    pub keys_pressed: Vec<KeyCode>,
    pub gameplay: InputSnapshot,
}

impl FrameInput {
    fn pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }
}

/// What the caller should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AppCommand {
    #[default]
    None,
    Quit,
    /// A fresh run was started this frame.
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    Menu { selected: usize },
    Playing,
    Paused,
    GameOver,
    Victory,
}

impl Default for AppMode {
    fn default() -> Self {
        Self::Menu { selected: MENU_START }
    }
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    /// Events drained from the session during the current frame's `tick()` call.
    /// Read by the caller after each tick to trigger sounds.
    pub frame_events: Vec<GameEvent>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one frame of input, stepping the session at most once.
    pub fn tick(&mut self, session: &mut Session, input: &FrameInput) -> AppCommand {
        self.frame_events.clear();

        match self.mode {
            AppMode::Menu { selected } => self.tick_menu(session, input, selected),
            AppMode::Playing => {
                if input.gameplay.pause_pressed || input.pressed(KeyCode::Escape) {
                    self.mode = AppMode::Paused;
                    return AppCommand::None;
                }
                self.step_session(session, &input.gameplay);
                AppCommand::None
            }
            AppMode::Paused => {
                if input.gameplay.pause_pressed || input.pressed(KeyCode::Escape) {
                    self.mode = AppMode::Playing;
                } else if input.pressed(KeyCode::M) {
                    self.mode = AppMode::default();
                }
                AppCommand::None
            }
            AppMode::GameOver | AppMode::Victory => {
                if input.pressed(KeyCode::R) {
                    return self.start_run(session);
                }
                if input.pressed(KeyCode::M) {
                    self.mode = AppMode::default();
                }
                AppCommand::None
            }
        }
    }

    /// Background track for the current mode.
    pub fn music(&self, session: &Session) -> MusicCue {
        match self.mode {
            AppMode::Menu { .. } => MusicCue::Menu,
            AppMode::Playing | AppMode::Paused => {
                if session.config().is_final_floor(session.floor_index()) {
                    MusicCue::Boss
                } else {
                    MusicCue::Game
                }
            }
            AppMode::GameOver => MusicCue::GameOver,
            AppMode::Victory => MusicCue::Victory,
        }
    }

    fn tick_menu(
        &mut self,
        session: &mut Session,
        input: &FrameInput,
        selected: usize,
    ) -> AppCommand {
        let count = MENU_OPTIONS.len();
        if input.pressed(KeyCode::Up) {
            self.mode = AppMode::Menu { selected: (selected + count - 1) % count };
        } else if input.pressed(KeyCode::Down) {
            self.mode = AppMode::Menu { selected: (selected + 1) % count };
        } else if input.pressed(KeyCode::Enter) {
            match selected {
                MENU_START => return self.start_run(session),
                MENU_QUIT => return AppCommand::Quit,
                _ => {}
            }
        }
        AppCommand::None
    }

    /// Starts playing. An untouched session is used as is so a `--seed` run starts on that seed.
    fn start_run(&mut self, session: &mut Session) -> AppCommand {
        let untouched = session.clock().ticks() == 0 && session.floor_index() == 0;
        if !untouched && let Err(err) = session.reset() {
            self.fail(&err);
            return AppCommand::None;
        }
        info!(seed = %format_seed(session.seed()), "run started");
        self.mode = AppMode::Playing;
        AppCommand::Restart
    }

    fn step_session(&mut self, session: &mut Session, input: &InputSnapshot) {
        let outcome = match session.tick(input) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.fail(&err);
                return;
            }
        };
        self.frame_events = session.drain_events();

        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::GameOver => self.mode = AppMode::GameOver,
            TickOutcome::Victory => self.mode = AppMode::Victory,
        }
        if outcome.is_terminal() {
            info!(
                outcome = outcome_label(outcome),
                floor = session.floor_index() + 1,
                hash = %format_snapshot_hash(session.snapshot_hash()),
                "run finished"
            );
        }
    }

    fn fail(&mut self, err: &GameError) {
        error!(%err, "session failed; returning to the menu");
        self.mode = AppMode::default();
    }
}
