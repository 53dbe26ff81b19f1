//! Tile-grid line of sight between two entity centres.
//! This module exists to keep sight rules deterministic and separate from detection radius checks.

use crate::mapgen::Grid;
use crate::types::{Pos, TileKind};

/// Walks an integer Bresenham line from `from` towards `to`.
///
/// Every tile visited before `to` is tested, the origin included; a Wall blocks sight.
/// Tiles outside the grid are skipped rather than treated as walls.
pub fn has_line_of_sight(grid: &Grid, from: Pos, to: Pos) -> bool {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx - dy;
    let mut p = from;

    while p != to {
        if grid.tile_at(p) == Some(TileKind::Wall) {
            return false;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            p.x += sx;
        }
        if e2 < dx {
            err += dx;
            p.y += sy;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_room_has_sight_in_every_direction() {
        let grid = Grid::from_ascii(&["#######", "#.....#", "#.....#", "#.....#", "#######"]);
        let centre = Pos { y: 2, x: 3 };
        for target in grid.walkable_tiles() {
            assert!(has_line_of_sight(&grid, centre, target), "blocked towards {target:?}");
        }
    }

    #[test]
    fn pillar_between_tiles_blocks_sight() {
        let grid = Grid::from_ascii(&["#######", "#.....#", "#..#..#", "#.....#", "#######"]);
        assert!(!has_line_of_sight(&grid, Pos { y: 2, x: 1 }, Pos { y: 2, x: 5 }));
        assert!(has_line_of_sight(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 5 }));
    }

    #[test]
    fn wall_at_the_target_does_not_block() {
        let grid = Grid::from_ascii(&["####", "#..#", "####"]);
        assert!(has_line_of_sight(&grid, Pos { y: 1, x: 1 }, Pos { y: 1, x: 3 }));
    }

    #[test]
    fn tiles_outside_the_grid_are_skipped() {
        let grid = Grid::from_ascii(&["...", "...", "..."]);
        assert!(has_line_of_sight(&grid, Pos { y: -2, x: -2 }, Pos { y: 1, x: 1 }));
    }

    #[test]
    fn same_tile_is_always_visible() {
        let grid = Grid::from_ascii(&["#"]);
        assert!(has_line_of_sight(&grid, Pos { y: 0, x: 0 }, Pos { y: 0, x: 0 }));
    }
}
