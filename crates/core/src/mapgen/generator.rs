//! High-level floor generation orchestration that composes room rolls and corridor carving.

use tracing::debug;

use crate::config::GameConfig;
use crate::random::GameRng;
use crate::types::TileKind;

use super::grid::Grid;
use super::layout::{carve_room, carve_room_corridors, roll_rooms};
use super::model::GeneratedFloor;

pub struct FloorGenerator<'a> {
    config: &'a GameConfig,
}

impl<'a> FloorGenerator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, floor_index: u32, rng: &mut GameRng) -> GeneratedFloor {
        let width = self.config.grid_width(floor_index);
        let height = self.config.grid_height(floor_index);
        let mut grid = Grid::filled(width as usize, height as usize, TileKind::Wall);

        let rooms = roll_rooms(rng, self.config, width, height);
        for room in &rooms {
            carve_room(&mut grid, room);
        }
        carve_room_corridors(&mut grid, rng, &rooms);

        let walkable = grid.walkable_tiles();
        debug!(
            floor_index,
            width,
            height,
            rooms = rooms.len(),
            walkable = walkable.len(),
            "floor generated"
        );

        GeneratedFloor { floor_index, grid, walkable, room_count: rooms.len() }
    }
}
