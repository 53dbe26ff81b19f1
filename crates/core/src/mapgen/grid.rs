//! Wall/floor tile matrix produced per floor and queried by movement, sight and pathing.

use serde::Serialize;

use crate::types::{Pos, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    /// Builds a grid from rows of `#` (wall) and `.` (floor). Intended for fixtures and tools.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut tiles = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.chars().count(), width, "ragged grid row: {row:?}");
            tiles.extend(row.chars().map(|ch| match ch {
                '#' => TileKind::Wall,
                '.' => TileKind::Floor,
                other => panic!("unknown tile glyph {other:?}"),
            }));
        }
        Self { width, height, tiles }
    }

    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.tiles.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|tile| match tile {
                TileKind::Wall => '#',
                TileKind::Floor => '.',
            }));
            out.push('\n');
        }
        out
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn tile_at(&self, pos: Pos) -> Option<TileKind> {
        self.in_bounds(pos).then(|| self.tiles[self.index(pos)])
    }

    /// Unchecked lookup for coordinates the caller already knows are on the grid.
    pub fn tile(&self, pos: Pos) -> TileKind {
        assert!(self.in_bounds(pos), "tile {pos:?} outside {}x{} grid", self.width, self.height);
        self.tiles[self.index(pos)]
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos) == Some(TileKind::Floor)
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        assert!(self.in_bounds(pos), "tile {pos:?} outside {}x{} grid", self.width, self.height);
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    /// Floor coordinates in row-major order.
    pub fn walkable_tiles(&self) -> Vec<Pos> {
        let mut walkable = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos { y: y as i32, x: x as i32 };
                if self.tile(pos) == TileKind::Floor {
                    walkable.push(pos);
                }
            }
        }
        walkable
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

pub(crate) fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y, x: p.x - 1 },
    ]
}

pub(crate) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
