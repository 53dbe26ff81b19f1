//! Public data model for a generated floor.

use serde::Serialize;

use crate::types::Pos;

use super::grid::Grid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedFloor {
    pub floor_index: u32,
    pub grid: Grid,
    /// Every floor tile in row-major order; the pool spawn positions are sampled from.
    pub walkable: Vec<Pos>,
    pub room_count: usize,
}
