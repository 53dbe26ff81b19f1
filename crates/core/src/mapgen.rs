//! Procedural floor generation split into grid, layout, and orchestration submodules.

pub mod grid;
pub mod model;

mod generator;
mod layout;

pub use generator::FloorGenerator;
pub use grid::Grid;
pub use model::GeneratedFloor;

use crate::config::GameConfig;
use crate::random::GameRng;

pub fn generate_floor(floor_index: u32, config: &GameConfig, rng: &mut GameRng) -> GeneratedFloor {
    FloorGenerator::new(config).generate(floor_index, rng)
}

#[cfg(test)]
mod tests {
    use super::{FloorGenerator, generate_floor};
    use crate::config::GameConfig;
    use crate::random::GameRng;

    #[test]
    fn generate_floor_matches_floor_generator_output() {
        let config = GameConfig::default();
        let from_helper = generate_floor(2, &config, &mut GameRng::seeded(123));
        let from_generator = FloorGenerator::new(&config).generate(2, &mut GameRng::seeded(123));
        assert_eq!(from_helper, from_generator);
    }
}
