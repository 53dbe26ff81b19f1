//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from the tick loop.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Session {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.clock.ticks());
        hasher.write_u32(self.floor.floor_index);
        hasher.write_u8(match self.outcome {
            TickOutcome::Continue => 0,
            TickOutcome::GameOver => 1,
            TickOutcome::Victory => 2,
        });
        write_rect(&mut hasher, self.player.rect());
        hasher.write_i32(self.player.health());
        hasher.write_u8(u8::from(self.player.is_attacking()));
        hasher.write_u8(u8::from(self.player.is_invulnerable()));
        hasher.write_u32(self.player.power_remaining_secs().to_bits());
        write_rect(&mut hasher, &self.stairs);
        for enemy in self.enemies.values() {
            hasher.write_u8(enemy.variant() as u8);
            write_rect(&mut hasher, enemy.rect());
            hasher.write_i32(enemy.health());
            hasher.write_u32(enemy.special_cooldown());
        }
        for item in self.items.values() {
            hasher.write_u8(item.kind as u8);
            write_rect(&mut hasher, &item.rect);
        }
        hasher.finish()
    }
}

fn write_rect(hasher: &mut Xxh3, rect: &Rect) {
    hasher.write_u32(rect.x.to_bits());
    hasher.write_u32(rect.y.to_bits());
    hasher.write_u32(rect.width.to_bits());
    hasher.write_u32(rect.height.to_bits());
}
