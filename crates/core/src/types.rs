use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

use crate::config::ConfigError;

new_key_type! {
    pub struct EnemyId;
    pub struct ItemId;
}

/// Tile-space coordinate. Ordered row-major so sorted collections walk the grid top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    Normal,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Potion,
    Power,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver,
    Victory,
}

impl TickOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Things that happened during a tick, drained by the presentation layer for sound and HUD cues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    AttackStarted,
    PlayerHurt { health: i32 },
    EnemyHit { enemy: EnemyId },
    EnemyKilled { enemy: EnemyId, variant: EnemyVariant },
    PotionConsumed { health: i32 },
    PowerActivated,
    FloorReached { floor_index: u32 },
    BossFloorReached,
    BossSpecialArmed { enemy: EnemyId },
    Victory,
    GameOver,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("floor {floor_index} has no walkable tiles")]
    NoWalkableTiles { floor_index: u32 },
    #[error("no free spawn position on floor {floor_index} after {attempts} attempts")]
    SpawnExhausted { floor_index: u32, attempts: u32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
