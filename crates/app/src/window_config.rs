//! Window configuration for the desktop app.

use macroquad::window::Conf;
use tower_app::APP_NAME;
use tower_core::GameConfig;

pub fn build_window_conf() -> Conf {
    let config = GameConfig::default();
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: config.screen_width,
        window_height: config.screen_height,
        window_resizable: false,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::build_window_conf;

    #[test]
    fn window_matches_the_simulated_screen() {
        let conf = build_window_conf();
        assert_eq!((conf.window_width, conf.window_height), (800, 600));
        assert!(!conf.window_resizable);
    }
}
