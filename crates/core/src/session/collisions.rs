//! Per-tick enemy updates and the overlap rules between player, enemies and items.
//! Both loops walk a snapshot of keys so removals never skip or repeat an entity.

use tracing::{debug, info};

use super::*;
use crate::enemy::EnemyWorld;

impl Session {
    pub(super) fn resolve_enemies(&mut self) -> Option<TickOutcome> {
        let ids: Vec<EnemyId> = self.enemies.keys().collect();
        for id in ids {
            let Some(enemy) = self.enemies.get_mut(id) else {
                continue;
            };
            let mut world = EnemyWorld {
                grid: &self.floor.grid,
                config: &self.config,
                clock: &self.clock,
                rng: &mut self.rng,
            };
            if enemy.update(&self.behavior, self.player.rect(), &mut world) {
                self.events.push(GameEvent::BossSpecialArmed { enemy: id });
            }

            let touching = enemy.rect().overlaps(self.player.rect());
            if touching && self.player.take_damage(self.config.contact_damage) {
                self.events.push(GameEvent::PlayerHurt { health: self.player.health() });
                if self.player.is_dead() {
                    info!(
                        floor_index = self.floor.floor_index,
                        ticks = self.clock.ticks(),
                        "player died"
                    );
                    self.outcome = TickOutcome::GameOver;
                    self.events.push(GameEvent::GameOver);
                    return Some(TickOutcome::GameOver);
                }
            }

            if let Some(hitbox) = self.player.attack_hitbox()
                && hitbox.overlaps(enemy.rect())
            {
                enemy.take_damage(self.config.attack_damage);
                self.events.push(GameEvent::EnemyHit { enemy: id });
                if enemy.is_dead() {
                    let variant = enemy.variant();
                    self.enemies.remove(id);
                    debug!(?id, ?variant, "enemy killed");
                    self.events.push(GameEvent::EnemyKilled { enemy: id, variant });
                }
            }
        }
        None
    }

    pub(super) fn resolve_items(&mut self) {
        let ids: Vec<ItemId> = self.items.keys().collect();
        for id in ids {
            let Some(item) = self.items.get(id).copied() else {
                continue;
            };
            if !self.player.rect().overlaps(&item.rect) {
                continue;
            }
            match item.kind {
                ItemKind::Potion => {
                    self.player.heal(self.config.potion_heal);
                    self.events.push(GameEvent::PotionConsumed { health: self.player.health() });
                }
                ItemKind::Power => {
                    self.player.activate_power(&self.clock);
                    self.events.push(GameEvent::PowerActivated);
                }
            }
            self.items.remove(id);
        }
    }
}
