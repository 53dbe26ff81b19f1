//! Pixel-space bounding boxes and their mapping onto the tile grid.

use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    /// A square of `size` whose top-left corner sits on the top-left of `tile`.
    pub fn at_tile(tile: Pos, tile_size: i32, size: f32) -> Self {
        Self::square((tile.x * tile_size) as f32, (tile.y * tile_size) as f32, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn distance_to(&self, other: &Rect) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (bx - ax).hypot(by - ay)
    }

    pub fn center_tile(&self, tile_size: i32) -> Pos {
        let (cx, cy) = self.center();
        pixel_to_tile(cx, cy, tile_size)
    }

    /// Inclusive tile bounds `(min, max)` of every tile this rectangle intersects.
    pub fn tile_span(&self, tile_size: i32) -> (Pos, Pos) {
        let size = tile_size as f32;
        let min = Pos { y: (self.y / size).floor() as i32, x: (self.x / size).floor() as i32 };
        let max = Pos {
            y: (self.bottom() / size).ceil() as i32 - 1,
            x: (self.right() / size).ceil() as i32 - 1,
        };
        (min, Pos { y: max.y.max(min.y), x: max.x.max(min.x) })
    }

    /// Places a rectangle of this size flush against `anchor` on the `side` edge, centred along it.
    pub fn placed_beside(&self, anchor: &Rect, side: Direction) -> Self {
        let (ax, ay) = anchor.center();
        let (x, y) = match side {
            Direction::Up => (ax - self.width / 2.0, anchor.y - self.height),
            Direction::Down => (ax - self.width / 2.0, anchor.bottom()),
            Direction::Left => (anchor.x - self.width, ay - self.height / 2.0),
            Direction::Right => (anchor.right(), ay - self.height / 2.0),
        };
        Self { x, y, ..*self }
    }
}

pub fn pixel_to_tile(px: f32, py: f32, tile_size: i32) -> Pos {
    let size = tile_size as f32;
    Pos { y: (py / size).floor() as i32, x: (px / size).floor() as i32 }
}

pub fn tile_center(tile: Pos, tile_size: i32) -> (f32, f32) {
    let half = tile_size as f32 / 2.0;
    ((tile.x * tile_size) as f32 + half, (tile.y * tile_size) as f32 + half)
}
