use crate::types::Direction;

/// Per-tick read-only view of the controls.
///
/// Directions are held state; `attack_pressed` and `pause_pressed` are edge-triggered and only
/// true on the tick the key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub attack_pressed: bool,
    pub pause_pressed: bool,
}

impl InputSnapshot {
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
        attack_pressed: false,
        pause_pressed: false,
    };

    pub fn holding(direction: Direction) -> Self {
        match direction {
            Direction::Left => Self { left: true, ..Self::IDLE },
            Direction::Right => Self { right: true, ..Self::IDLE },
            Direction::Up => Self { up: true, ..Self::IDLE },
            Direction::Down => Self { down: true, ..Self::IDLE },
        }
    }

    /// Resolves held keys to a single axis. Left wins over right, right over up, up over down.
    pub fn movement(&self) -> Option<Direction> {
        if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }
}
