//! Room placement and corridor carving logic for base floor topology.

use crate::config::GameConfig;
use crate::random::GameRng;
use crate::types::{Pos, TileKind};

use super::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) x: i32,
    pub(super) y: i32,
    pub(super) width: i32,
    pub(super) height: i32,
}

impl RoomRect {
    fn right(self) -> i32 {
        self.x + self.width - 1
    }

    fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    pub(super) fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }
}

/// Draws rooms that fit inside the grid with a one-tile border. Rooms may overlap.
pub(super) fn roll_rooms(
    rng: &mut GameRng,
    config: &GameConfig,
    width: i32,
    height: i32,
) -> Vec<RoomRect> {
    let room_count = rng.range_i32(config.min_rooms as i32, config.max_rooms as i32);
    (0..room_count)
        .map(|_| {
            let room_width = rng.range_i32(config.room_min_size, config.room_max_size);
            let room_height = rng.range_i32(config.room_min_size, config.room_max_size);
            let x = rng.range_i32(1, width - room_width - 1);
            let y = rng.range_i32(1, height - room_height - 1);
            RoomRect { x, y, width: room_width, height: room_height }
        })
        .collect()
}

pub(super) fn carve_room(grid: &mut Grid, room: &RoomRect) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            grid.set_tile(Pos { y, x }, TileKind::Floor);
        }
    }
}

/// Joins each room to the next one in generation order.
pub(super) fn carve_room_corridors(grid: &mut Grid, rng: &mut GameRng, rooms: &[RoomRect]) {
    for pair in rooms.windows(2) {
        let horizontal_first = rng.coin_flip();
        carve_l_shaped_corridor(grid, pair[0].center(), pair[1].center(), horizontal_first);
    }
}

pub(super) fn carve_l_shaped_corridor(
    grid: &mut Grid,
    start: Pos,
    end: Pos,
    horizontal_first: bool,
) {
    if horizontal_first {
        carve_horizontal_line(grid, start.y, start.x, end.x);
        carve_vertical_line(grid, end.x, start.y, end.y);
    } else {
        carve_vertical_line(grid, start.x, start.y, end.y);
        carve_horizontal_line(grid, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(grid: &mut Grid, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        grid.set_tile(Pos { y, x }, TileKind::Floor);
    }
}

fn carve_vertical_line(grid: &mut Grid, x: i32, top_y: i32, bottom_y: i32) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        grid.set_tile(Pos { y, x }, TileKind::Floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolled_rooms_respect_count_size_and_border() {
        let config = GameConfig::default();
        let mut rng = GameRng::seeded(42);
        for _ in 0..50 {
            let rooms = roll_rooms(&mut rng, &config, 25, 20);
            assert!((3..=8).contains(&rooms.len()));
            for room in rooms {
                assert!((5..=10).contains(&room.width) && (5..=10).contains(&room.height));
                assert!(room.x >= 1 && room.y >= 1);
                assert!(room.right() <= 23 && room.bottom() <= 18, "{room:?} touches the border");
            }
        }
    }

    #[test]
    fn corridor_orientation_controls_the_elbow() {
        let start = Pos { y: 2, x: 2 };
        let end = Pos { y: 6, x: 8 };

        let mut horizontal = Grid::filled(10, 10, TileKind::Wall);
        carve_l_shaped_corridor(&mut horizontal, start, end, true);
        assert!(horizontal.is_walkable(Pos { y: 2, x: 8 }), "elbow at (start.y, end.x)");
        assert!(!horizontal.is_walkable(Pos { y: 6, x: 2 }));

        let mut vertical = Grid::filled(10, 10, TileKind::Wall);
        carve_l_shaped_corridor(&mut vertical, start, end, false);
        assert!(vertical.is_walkable(Pos { y: 6, x: 2 }), "elbow at (end.y, start.x)");
        assert!(!vertical.is_walkable(Pos { y: 2, x: 8 }));

        assert_eq!(horizontal.walkable_tiles().len(), vertical.walkable_tiles().len());
    }

    #[test]
    fn room_center_uses_floor_division() {
        let room = RoomRect { x: 3, y: 4, width: 5, height: 6 };
        let center = room.center();
        assert_eq!(center, Pos { y: 7, x: 5 });
        assert!((room.x..=room.right()).contains(&center.x));
        assert!((room.y..=room.bottom()).contains(&center.y));
    }
}
