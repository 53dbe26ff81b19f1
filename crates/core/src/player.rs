//! The player agent: wall-checked movement, timed attacks, invulnerability frames and the
//! power buff.
//! This module exists so combat timing rules can be exercised without a session around them.
//! It does not own collision against enemies or items; the session resolves those each tick.

use crate::clock::SimClock;
use crate::config::GameConfig;
use crate::geometry::Rect;
use crate::input::InputSnapshot;
use crate::mapgen::Grid;
use crate::types::{Direction, Pos, TileKind};

const FLICKER_PERIOD_MS: u64 = 200;
const FLICKER_VISIBLE_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
struct PlayerTuning {
    max_health: i32,
    speed: f32,
    power_speed_multiplier: f32,
    power_duration_secs: f32,
    attack_duration_ticks: u32,
    invulnerability_ticks: u32,
    attack_reach: f32,
}

impl PlayerTuning {
    fn from_config(config: &GameConfig) -> Self {
        Self {
            max_health: config.player_health,
            speed: config.player_speed,
            power_speed_multiplier: config.power_speed_multiplier,
            power_duration_secs: config.power_duration_secs,
            attack_duration_ticks: config.attack_duration_ticks,
            invulnerability_ticks: config.invulnerability_ticks,
            attack_reach: config.player_size * 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    rect: Rect,
    health: i32,
    facing: Direction,
    is_moving: bool,
    attack_ticks: u32,
    invulnerable_ticks: u32,
    power_started_secs: Option<f32>,
    power_remaining_secs: f32,
    tuning: PlayerTuning,
}

impl Player {
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Self {
            rect: Rect::square(x, y, config.player_size),
            health: config.player_health,
            facing: Direction::Down,
            is_moving: false,
            attack_ticks: 0,
            invulnerable_ticks: 0,
            power_started_secs: None,
            power_remaining_secs: 0.0,
            tuning: PlayerTuning::from_config(config),
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.tuning.max_health
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_ticks > 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    pub fn is_power_active(&self) -> bool {
        self.power_started_secs.is_some()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Seconds left on the power buff as of the last update; zero when inactive.
    pub fn power_remaining_secs(&self) -> f32 {
        if self.is_power_active() { self.power_remaining_secs } else { 0.0 }
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn speed(&self) -> f32 {
        if self.is_power_active() {
            self.tuning.speed * self.tuning.power_speed_multiplier
        } else {
            self.tuning.speed
        }
    }

    /// Advances one tick: movement from held keys, then attack, invulnerability and power timers.
    pub fn update(&mut self, input: &InputSnapshot, grid: &Grid, clock: &SimClock, tile_size: i32) {
        let movement = input.movement();
        self.is_moving = movement.is_some();
        if let Some(direction) = movement {
            self.facing = direction;
            let step = self.speed();
            let (dx, dy) = match direction {
                Direction::Left => (-step, 0.0),
                Direction::Right => (step, 0.0),
                Direction::Up => (0.0, -step),
                Direction::Down => (0.0, step),
            };
            let candidate = self.rect.translated(dx, dy);
            if !touches_wall(&candidate, grid, tile_size) {
                self.rect = candidate;
            }
        }

        self.attack_ticks = self.attack_ticks.saturating_sub(1);
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);

        if let Some(started) = self.power_started_secs {
            let elapsed = clock.elapsed_secs() - started;
            self.power_remaining_secs = (self.tuning.power_duration_secs - elapsed).max(0.0);
            if self.power_remaining_secs <= 0.0 {
                self.power_started_secs = None;
            }
        }
    }

    /// Starts a swing unless one is already in progress. Returns whether a new swing began.
    pub fn attack(&mut self) -> bool {
        if self.is_attacking() {
            return false;
        }
        self.attack_ticks = self.tuning.attack_duration_ticks;
        true
    }

    /// Hitbox flush against the facing side, or `None` when not swinging.
    pub fn attack_hitbox(&self) -> Option<Rect> {
        self.is_attacking().then(|| {
            Rect::square(0.0, 0.0, self.tuning.attack_reach).placed_beside(&self.rect, self.facing)
        })
    }

    /// Applies damage unless invulnerable. Returns whether the hit landed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.health -= amount;
        self.invulnerable_ticks = self.tuning.invulnerability_ticks;
        true
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.tuning.max_health);
    }

    /// Starts (or restarts) the power buff from the current simulated time.
    pub fn activate_power(&mut self, clock: &SimClock) {
        self.power_started_secs = Some(clock.elapsed_secs());
        self.power_remaining_secs = self.tuning.power_duration_secs;
    }

    /// Invulnerable players blink: visible for the first half of every 200 ms window.
    pub fn is_visible_this_frame(&self, clock: &SimClock) -> bool {
        !self.is_invulnerable() || clock.elapsed_ms() % FLICKER_PERIOD_MS < FLICKER_VISIBLE_MS
    }
}

fn touches_wall(rect: &Rect, grid: &Grid, tile_size: i32) -> bool {
    let (min, max) = rect.tile_span(tile_size);
    let last_x = grid.width() as i32 - 1;
    let last_y = grid.height() as i32 - 1;
    for y in min.y.max(0)..=max.y.min(last_y) {
        for x in min.x.max(0)..=max.x.min(last_x) {
            if grid.tile(Pos { y, x }) == TileKind::Wall {
                return true;
            }
        }
    }
    false
}
