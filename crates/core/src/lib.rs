pub mod behavior;
pub mod clock;
pub mod config;
pub mod enemy;
pub mod geometry;
pub mod input;
pub mod mapgen;
pub mod pathfinding;
pub mod player;
pub mod random;
pub mod scene;
pub mod session;
pub mod types;
pub mod visibility;

pub use clock::SimClock;
pub use config::{ConfigError, EnemyStats, GameConfig};
pub use enemy::{Enemy, EnemyState};
pub use geometry::Rect;
pub use input::InputSnapshot;
pub use mapgen::{GeneratedFloor, Grid, generate_floor};
pub use pathfinding::find_path;
pub use player::Player;
pub use random::GameRng;
pub use session::{Item, Session};
pub use types::*;
