//! Floor population: where the player, enemies, stairs and items start on a fresh floor.
//! This module exists so bounded rejection sampling and floor retries live in one place.
//! It does not own entity construction; the session turns positions into agents.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::mapgen::{GeneratedFloor, generate_floor};
use crate::random::GameRng;
use crate::types::{EnemyVariant, GameError, ItemKind, Pos};

/// Fresh floors generated before a spawn failure is surfaced to the caller.
pub(super) const MAX_FLOOR_ATTEMPTS: u32 = 8;

/// Tile top-left pixel positions, in spawn order.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct FloorPopulation {
    pub(super) player: (f32, f32),
    pub(super) enemies: Vec<(EnemyVariant, (f32, f32))>,
    pub(super) stairs: (f32, f32),
    pub(super) items: Vec<(ItemKind, (f32, f32))>,
}

pub(super) fn generate_populated_floor(
    floor_index: u32,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Result<(GeneratedFloor, FloorPopulation), GameError> {
    let mut last_error = GameError::NoWalkableTiles { floor_index };
    for attempt in 1..=MAX_FLOOR_ATTEMPTS {
        let floor = generate_floor(floor_index, config, rng);
        match populate_floor(&floor, config, rng) {
            Ok(population) => return Ok((floor, population)),
            Err(err) => {
                warn!(floor_index, attempt, %err, "floor could not host its spawns; regenerating");
                last_error = err;
            }
        }
    }
    Err(last_error)
}

pub(super) fn enemy_count(floor_index: u32) -> u32 {
    2 + floor_index
}

pub(super) fn item_count(floor_index: u32) -> u32 {
    2 + floor_index / 2
}

pub(super) fn populate_floor(
    floor: &GeneratedFloor,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Result<FloorPopulation, GameError> {
    let mut sampler = SpawnSampler::new(floor, config, rng)?;

    let player = sampler.next_position()?;

    let boss_floor = config.is_final_floor(floor.floor_index);
    let mut enemies = Vec::new();
    for slot in 0..enemy_count(floor.floor_index) {
        let variant =
            if boss_floor && slot == 0 { EnemyVariant::Boss } else { EnemyVariant::Normal };
        enemies.push((variant, sampler.next_position()?));
    }

    let stairs = sampler.next_position()?;

    let mut items = Vec::new();
    for _ in 0..item_count(floor.floor_index) {
        let position = sampler.next_position()?;
        let kind = if sampler.rng.coin_flip() { ItemKind::Potion } else { ItemKind::Power };
        items.push((kind, position));
    }

    debug!(
        floor_index = floor.floor_index,
        enemies = enemies.len(),
        items = items.len(),
        boss_floor,
        "floor populated"
    );
    Ok(FloorPopulation { player, enemies, stairs, items })
}

struct SpawnSampler<'a> {
    floor: &'a GeneratedFloor,
    rng: &'a mut GameRng,
    occupied: BTreeSet<Pos>,
    tile_size: i32,
    max_attempts: u32,
}

impl<'a> SpawnSampler<'a> {
    fn new(
        floor: &'a GeneratedFloor,
        config: &GameConfig,
        rng: &'a mut GameRng,
    ) -> Result<Self, GameError> {
        if floor.walkable.is_empty() {
            return Err(GameError::NoWalkableTiles { floor_index: floor.floor_index });
        }
        Ok(Self {
            floor,
            rng,
            occupied: BTreeSet::new(),
            tile_size: config.tile_size,
            max_attempts: config.spawn_attempts,
        })
    }

    /// Draws walkable tiles until one is unoccupied, giving up after `max_attempts` draws.
    fn next_position(&mut self) -> Result<(f32, f32), GameError> {
        for _ in 0..self.max_attempts {
            let tile = self.floor.walkable[self.rng.index(self.floor.walkable.len())];
            if self.occupied.insert(tile) {
                return Ok(((tile.x * self.tile_size) as f32, (tile.y * self.tile_size) as f32));
            }
        }
        Err(GameError::SpawnExhausted {
            floor_index: self.floor.floor_index,
            attempts: self.max_attempts,
        })
    }
}
