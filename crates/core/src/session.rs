//! The per-run simulation: one floor at a time, stepped a tick at a time.
//! This module exists to own every mutable piece of game state and the order they update in.
//! It does not own drawing, audio or menu flow; those read the session and drain its events.

use std::mem;

use slotmap::SlotMap;
use tracing::info;

use crate::behavior::BehaviorNode;
use crate::clock::SimClock;
use crate::config::GameConfig;
use crate::enemy::{Enemy, EnemyAction, enemy_behavior_tree};
use crate::geometry::Rect;
use crate::input::InputSnapshot;
use crate::mapgen::{GeneratedFloor, Grid};
use crate::player::Player;
use crate::random::GameRng;
use crate::types::*;

mod collisions;
mod hash;
mod spawning;


use spawning::{FloorPopulation, generate_populated_floor};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub rect: Rect,
}

pub struct Session {
    seed: u64,
    config: GameConfig,
    rng: GameRng,
    clock: SimClock,
    floor: GeneratedFloor,
    player: Player,
    enemies: SlotMap<EnemyId, Enemy>,
    items: SlotMap<ItemId, Item>,
    stairs: Rect,
    outcome: TickOutcome,
    events: Vec<GameEvent>,
    behavior: BehaviorNode<EnemyAction>,
}

impl Session {
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = GameRng::seeded(seed);
        let (floor, population) = generate_populated_floor(0, &config, &mut rng)?;
        let (px, py) = population.player;
        let player = Player::new(px, py, &config);

        let mut session = Self {
            seed,
            clock: SimClock::new(config.tick_rate),
            rng,
            floor,
            player,
            enemies: SlotMap::with_key(),
            items: SlotMap::with_key(),
            stairs: Rect::square(0.0, 0.0, 0.0),
            outcome: TickOutcome::Continue,
            events: Vec::new(),
            behavior: enemy_behavior_tree(),
            config,
        };
        session.install_population(population);
        info!(seed, floors = session.config.floor_count, "session started");
        Ok(session)
    }

    /// Restarts from the first floor. The new run draws its seed from the current stream,
    /// so consecutive resets do not replay the same tower.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let seed = self.rng.next_u64();
        *self = Self::new(seed, self.config.clone())?;
        Ok(())
    }

    /// Advances one simulation step.
    ///
    /// Order: player movement, stairs, enemies (contact then attack), item pickups. Terminal
    /// outcomes are returned the moment they happen and repeated on every later call.
    pub fn tick(&mut self, input: &InputSnapshot) -> Result<TickOutcome, GameError> {
        if self.outcome.is_terminal() {
            return Ok(self.outcome);
        }

        self.clock.advance();
        if input.attack_pressed && self.player.attack() {
            self.events.push(GameEvent::AttackStarted);
        }
        self.player.update(input, &self.floor.grid, &self.clock, self.config.tile_size);

        if self.player.rect().overlaps(&self.stairs)
            && let Some(outcome) = self.climb_stairs()?
        {
            return Ok(outcome);
        }

        if let Some(outcome) = self.resolve_enemies() {
            return Ok(outcome);
        }
        self.resolve_items();

        Ok(TickOutcome::Continue)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.floor.grid
    }

    pub fn floor(&self) -> &GeneratedFloor {
        &self.floor
    }

    pub fn floor_index(&self) -> u32 {
        self.floor.floor_index
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &SlotMap<EnemyId, Enemy> {
        &self.enemies
    }

    pub fn items(&self) -> &SlotMap<ItemId, Item> {
        &self.items
    }

    pub fn stairs(&self) -> &Rect {
        &self.stairs
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn outcome(&self) -> TickOutcome {
        self.outcome
    }

    fn climb_stairs(&mut self) -> Result<Option<TickOutcome>, GameError> {
        let next_floor = self.floor.floor_index + 1;
        if next_floor >= self.config.floor_count {
            info!(
                floor_index = self.floor.floor_index,
                ticks = self.clock.ticks(),
                "tower cleared"
            );
            self.outcome = TickOutcome::Victory;
            self.events.push(GameEvent::Victory);
            return Ok(Some(TickOutcome::Victory));
        }

        let (floor, population) =
            generate_populated_floor(next_floor, &self.config, &mut self.rng)?;
        self.floor = floor;
        self.install_population(population);
        info!(
            floor_index = next_floor,
            enemies = self.enemies.len(),
            items = self.items.len(),
            "floor reached"
        );
        self.events.push(GameEvent::FloorReached { floor_index: next_floor });
        if self.config.is_final_floor(next_floor) {
            self.events.push(GameEvent::BossFloorReached);
        }
        Ok(None)
    }

    fn install_population(&mut self, population: FloorPopulation) {
        let FloorPopulation { player, enemies, stairs, items } = population;
        self.player.move_to(player.0, player.1);

        self.enemies.clear();
        for (variant, (x, y)) in enemies {
            self.enemies.insert(Enemy::new(variant, x, y, &self.config));
        }

        let tile_size = self.config.tile_size as f32;
        self.stairs = Rect::square(stairs.0, stairs.1, tile_size);

        self.items.clear();
        for (kind, (x, y)) in items {
            self.items.insert(Item { kind, rect: Rect::square(x, y, tile_size) });
        }
    }
}
