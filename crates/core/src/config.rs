//! Immutable gameplay tuning shared by every simulation component.
//! A `GameConfig` is built once at startup and passed by reference; nothing mutates it afterward.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::EnemyVariant;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tile_size: i32,
    pub tick_rate: u32,
    pub screen_width: i32,
    pub screen_height: i32,

    pub player_speed: f32,
    pub player_size: f32,
    pub player_health: i32,

    pub enemy_speed: f32,
    pub enemy_size: f32,
    pub enemy_detection_radius: f32,
    pub enemy_patrol_radius: f32,

    pub floor_count: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub min_rooms: u32,
    pub max_rooms: u32,

    pub potion_heal: i32,
    pub power_duration_secs: f32,
    pub power_speed_multiplier: f32,

    pub attack_duration_ticks: u32,
    pub invulnerability_ticks: u32,
    pub contact_damage: i32,
    pub attack_damage: i32,

    pub path_refresh_ms: u64,
    pub patrol_sample_attempts: u32,
    pub spawn_attempts: u32,

    pub normal_enemy: EnemyStats,
    pub boss_enemy: EnemyStats,
}

/// Per-variant overrides applied on top of the base enemy speed and size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: i32,
    pub speed_multiplier: f32,
    pub size_multiplier: f32,
    /// Zero disables the special attack entirely.
    pub special_cooldown_ticks: u32,
    /// Arming distance for the special attack, in multiples of the base enemy size.
    pub special_range_bodies: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 32,
            tick_rate: 60,
            screen_width: 800,
            screen_height: 600,
            player_speed: 5.0,
            player_size: 32.0,
            player_health: 100,
            enemy_speed: 3.0,
            enemy_size: 32.0,
            enemy_detection_radius: 150.0,
            enemy_patrol_radius: 100.0,
            floor_count: 5,
            room_min_size: 5,
            room_max_size: 10,
            min_rooms: 3,
            max_rooms: 8,
            potion_heal: 25,
            power_duration_secs: 10.0,
            power_speed_multiplier: 1.5,
            attack_duration_ticks: 10,
            invulnerability_ticks: 60,
            contact_damage: 10,
            attack_damage: 20,
            path_refresh_ms: 500,
            patrol_sample_attempts: 10,
            spawn_attempts: 256,
            normal_enemy: EnemyStats {
                health: 50,
                speed_multiplier: 1.0,
                size_multiplier: 1.0,
                special_cooldown_ticks: 0,
                special_range_bodies: 0.0,
            },
            boss_enemy: EnemyStats {
                health: 150,
                speed_multiplier: 0.8,
                size_multiplier: 1.5,
                special_cooldown_ticks: 120,
                special_range_bodies: 3.0,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
    #[error("{min_field} ({min}) exceeds {max_field} ({max})")]
    InvertedRange { min_field: &'static str, max_field: &'static str, min: i64, max: i64 },
    #[error("rooms up to {room_max_size} tiles do not fit the {width}x{height} base grid")]
    RoomTooLarge { room_max_size: i32, width: i32, height: i32 },
}

impl GameConfig {
    pub fn enemy_stats(&self, variant: EnemyVariant) -> &EnemyStats {
        match variant {
            EnemyVariant::Normal => &self.normal_enemy,
            EnemyVariant::Boss => &self.boss_enemy,
        }
    }

    pub fn grid_width(&self, floor_index: u32) -> i32 {
        25 + 2 * floor_index as i32
    }

    pub fn grid_height(&self, floor_index: u32) -> i32 {
        20 + 2 * floor_index as i32
    }

    pub fn is_final_floor(&self, floor_index: u32) -> bool {
        floor_index + 1 == self.floor_count
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive_ints = [
            ("tile_size", self.tile_size as i64),
            ("tick_rate", self.tick_rate as i64),
            ("player_health", self.player_health as i64),
            ("floor_count", self.floor_count as i64),
            ("room_min_size", self.room_min_size as i64),
            ("min_rooms", self.min_rooms as i64),
            ("spawn_attempts", self.spawn_attempts as i64),
        ];
        for (field, value) in positive_ints {
            if value <= 0 {
                return Err(ConfigError::NotPositive { field });
            }
        }
        let positive_floats = [
            ("player_speed", self.player_speed),
            ("player_size", self.player_size),
            ("enemy_speed", self.enemy_speed),
            ("enemy_size", self.enemy_size),
        ];
        for (field, value) in positive_floats {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NotPositive { field });
            }
        }
        if self.room_min_size > self.room_max_size {
            return Err(ConfigError::InvertedRange {
                min_field: "room_min_size",
                max_field: "room_max_size",
                min: self.room_min_size as i64,
                max: self.room_max_size as i64,
            });
        }
        if self.min_rooms > self.max_rooms {
            return Err(ConfigError::InvertedRange {
                min_field: "min_rooms",
                max_field: "max_rooms",
                min: self.min_rooms as i64,
                max: self.max_rooms as i64,
            });
        }
        // The first floor is the smallest; a room plus a one-tile border on each side must fit.
        let width = self.grid_width(0);
        let height = self.grid_height(0);
        if self.room_max_size + 2 > width || self.room_max_size + 2 > height {
            return Err(ConfigError::RoomTooLarge {
                room_max_size: self.room_max_size,
                width,
                height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn grid_grows_two_tiles_per_floor() {
        let config = GameConfig::default();
        assert_eq!((config.grid_width(0), config.grid_height(0)), (25, 20));
        assert_eq!((config.grid_width(4), config.grid_height(4)), (33, 28));
    }

    #[test]
    fn inverted_room_bounds_are_rejected() {
        let config = GameConfig { min_rooms: 9, max_rooms: 2, ..GameConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { min_field: "min_rooms", .. })
        ));
    }

    #[test]
    fn oversized_rooms_are_rejected() {
        let config = GameConfig { room_max_size: 19, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::RoomTooLarge { .. })));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let config = GameConfig { tick_rate: 0, ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::NotPositive { field: "tick_rate" }));
    }

    #[test]
    fn boss_stats_scale_down_speed_and_up_size() {
        let config = GameConfig::default();
        let boss = config.enemy_stats(EnemyVariant::Boss);
        assert_eq!(boss.health, 150);
        assert!(boss.speed_multiplier < 1.0);
        assert!(boss.size_multiplier > 1.0);
        assert_eq!(config.enemy_stats(EnemyVariant::Normal).special_cooldown_ticks, 0);
    }
}
