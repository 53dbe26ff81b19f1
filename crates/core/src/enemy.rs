//! Enemy and boss agents driven by a shared behavior tree.
//! This module exists to keep patrol, chase and the boss special cooldown in one agent type.
//! It does not own contact damage or removal; the session resolves those after each update.

use std::f32::consts::TAU;

use tracing::trace;

use crate::behavior::{BehaviorAction, BehaviorNode};
use crate::clock::SimClock;
use crate::config::GameConfig;
use crate::geometry::{Rect, pixel_to_tile, tile_center};
use crate::mapgen::Grid;
use crate::pathfinding::find_path;
use crate::random::GameRng;
use crate::types::{EnemyVariant, Pos};
use crate::visibility::has_line_of_sight;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Patrol,
    Chase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyAction {
    DetectPlayer,
    ChasePlayer,
    Patrol,
}

/// `Selector[Sequence[DetectPlayer, ChasePlayer], Patrol]`
pub fn enemy_behavior_tree() -> BehaviorNode<EnemyAction> {
    BehaviorNode::Selector(vec![
        BehaviorNode::Sequence(vec![
            BehaviorNode::Action(EnemyAction::DetectPlayer),
            BehaviorNode::Action(EnemyAction::ChasePlayer),
        ]),
        BehaviorNode::Action(EnemyAction::Patrol),
    ])
}

/// Read-mostly floor state an enemy needs for one update.
pub struct EnemyWorld<'a> {
    pub grid: &'a Grid,
    pub config: &'a GameConfig,
    pub clock: &'a SimClock,
    pub rng: &'a mut GameRng,
}

pub struct EnemyContext<'e, 'w, 'a> {
    enemy: &'e mut Enemy,
    player: &'e Rect,
    world: &'w mut EnemyWorld<'a>,
    special_armed: bool,
}

impl BehaviorAction<EnemyContext<'_, '_, '_>> for EnemyAction {
    fn run(&self, ctx: &mut EnemyContext<'_, '_, '_>) -> bool {
        match self {
            Self::DetectPlayer => {
                if ctx.enemy.can_see_player(ctx.player, ctx.world.grid, ctx.world.config) {
                    ctx.enemy.state = EnemyState::Chase;
                    true
                } else {
                    false
                }
            }
            Self::ChasePlayer => {
                if ctx.enemy.state != EnemyState::Chase {
                    return false;
                }
                ctx.special_armed |= ctx.enemy.chase(ctx.player, ctx.world);
                true
            }
            Self::Patrol => {
                if ctx.enemy.state == EnemyState::Chase {
                    // The cached route starts where the chase left off. The refresh
                    // throttle is left running.
                    ctx.enemy.path.clear();
                }
                ctx.enemy.state = EnemyState::Patrol;
                ctx.enemy.patrol(ctx.world);
                true
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    variant: EnemyVariant,
    rect: Rect,
    health: i32,
    max_health: i32,
    speed: f32,
    state: EnemyState,
    path: Vec<Pos>,
    last_path_update_ms: Option<u64>,
    patrol_target: Option<(f32, f32)>,
    special_cooldown: u32,
}

impl Enemy {
    pub fn new(variant: EnemyVariant, x: f32, y: f32, config: &GameConfig) -> Self {
        let stats = config.enemy_stats(variant);
        Self {
            variant,
            rect: Rect::square(x, y, config.enemy_size * stats.size_multiplier),
            health: stats.health,
            max_health: stats.health,
            speed: config.enemy_speed * stats.speed_multiplier,
            state: EnemyState::Patrol,
            path: Vec::new(),
            last_path_update_ms: None,
            patrol_target: None,
            special_cooldown: 0,
        }
    }

    pub fn variant(&self) -> EnemyVariant {
        self.variant
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn path(&self) -> &[Pos] {
        &self.path
    }

    pub fn special_cooldown(&self) -> u32 {
        self.special_cooldown
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Remaining health in `[0, 1]`, used for the bar drawn above the sprite.
    pub fn health_fraction(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    /// Runs the behavior tree once and ticks the special cooldown.
    /// Returns true when a boss armed its special this tick.
    pub fn update(
        &mut self,
        tree: &BehaviorNode<EnemyAction>,
        player: &Rect,
        world: &mut EnemyWorld<'_>,
    ) -> bool {
        let mut ctx = EnemyContext { enemy: self, player, world, special_armed: false };
        tree.run(&mut ctx);
        let armed = ctx.special_armed;
        self.special_cooldown = self.special_cooldown.saturating_sub(1);
        armed
    }

    pub fn can_see_player(&self, player: &Rect, grid: &Grid, config: &GameConfig) -> bool {
        if self.rect.distance_to(player) > config.enemy_detection_radius {
            return false;
        }
        let tile_size = config.tile_size;
        has_line_of_sight(grid, self.rect.center_tile(tile_size), player.center_tile(tile_size))
    }

    fn chase(&mut self, player: &Rect, world: &mut EnemyWorld<'_>) -> bool {
        let now_ms = world.clock.elapsed_ms();
        let refresh_due = self
            .last_path_update_ms
            .is_none_or(|last| now_ms.saturating_sub(last) > world.config.path_refresh_ms);
        if refresh_due {
            self.last_path_update_ms = Some(now_ms);
            let tile_size = world.config.tile_size;
            let start = self.rect.center_tile(tile_size);
            let goal = player.center_tile(tile_size);
            match find_path(start, goal, world.grid) {
                Some(path) => {
                    trace!(?start, ?goal, steps = path.len(), "enemy path refreshed");
                    self.path = path;
                }
                None => trace!(?start, ?goal, "no path to player; keeping cached route"),
            }
        }

        if let Some(&next) = self.path.first() {
            let target = tile_center(next, world.config.tile_size);
            self.rect = step_toward(&self.rect, target, self.speed);
            if reached(&self.rect, target, self.speed) {
                self.path.remove(0);
            }
        }

        self.try_arm_special(player, world.config)
    }

    fn try_arm_special(&mut self, player: &Rect, config: &GameConfig) -> bool {
        let stats = config.enemy_stats(self.variant);
        if stats.special_cooldown_ticks == 0 || self.special_cooldown > 0 {
            return false;
        }
        if self.rect.distance_to(player) < config.enemy_size * stats.special_range_bodies {
            self.special_cooldown = stats.special_cooldown_ticks;
            return true;
        }
        false
    }

    fn patrol(&mut self, world: &mut EnemyWorld<'_>) {
        let needs_target =
            self.patrol_target.is_none_or(|target| reached(&self.rect, target, self.speed));
        if needs_target {
            self.choose_patrol_target(world);
        }
        let Some(target) = self.patrol_target else {
            return;
        };

        let candidate = step_toward(&self.rect, target, self.speed);
        if world.grid.is_walkable(candidate.center_tile(world.config.tile_size)) {
            self.rect = candidate;
        }
    }

    fn choose_patrol_target(&mut self, world: &mut EnemyWorld<'_>) {
        let (cx, cy) = self.rect.center();
        for _ in 0..world.config.patrol_sample_attempts {
            let angle = world.rng.range_f32(0.0, TAU);
            let distance = world.rng.range_f32(0.0, world.config.enemy_patrol_radius);
            let target = (cx + angle.cos() * distance, cy + angle.sin() * distance);
            let tile = pixel_to_tile(target.0, target.1, world.config.tile_size);
            if world.grid.is_walkable(tile) {
                self.patrol_target = Some(target);
                return;
            }
        }
        if self.patrol_target.is_none() {
            self.patrol_target = Some((cx, cy));
        }
    }
}

/// Moves the rect's centre `speed` pixels toward `target`. The divisor is floored at one pixel.
fn step_toward(rect: &Rect, target: (f32, f32), speed: f32) -> Rect {
    let (cx, cy) = rect.center();
    let (dx, dy) = (target.0 - cx, target.1 - cy);
    let length = dx.hypot(dy).max(1.0);
    rect.translated(dx / length * speed, dy / length * speed)
}

fn reached(rect: &Rect, target: (f32, f32), speed: f32) -> bool {
    let (cx, cy) = rect.center();
    (cx - target.0).abs() < speed && (cy - target.1).abs() < speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    fn corridor_room() -> Grid {
        Grid::from_ascii(&[
            "############",
            "#..........#",
            "#..........#",
            "#..........#",
            "#..........#",
            "############",
        ])
    }

    struct Fixture {
        grid: Grid,
        config: GameConfig,
        clock: SimClock,
        rng: GameRng,
        tree: BehaviorNode<EnemyAction>,
    }

    impl Fixture {
        fn new(grid: Grid) -> Self {
            Self {
                grid,
                config: GameConfig::default(),
                clock: SimClock::new(60),
                rng: GameRng::seeded(5),
                tree: enemy_behavior_tree(),
            }
        }

        fn world(&mut self) -> EnemyWorld<'_> {
            EnemyWorld {
                grid: &self.grid,
                config: &self.config,
                clock: &self.clock,
                rng: &mut self.rng,
            }
        }

        fn step(&mut self, enemy: &mut Enemy, player: &Rect) -> bool {
            self.clock.advance();
            let mut world = EnemyWorld {
                grid: &self.grid,
                config: &self.config,
                clock: &self.clock,
                rng: &mut self.rng,
            };
            enemy.update(&self.tree, player, &mut world)
        }
    }

    fn at_tile(tile: Pos) -> (f32, f32) {
        ((tile.x * 32) as f32, (tile.y * 32) as f32)
    }

    #[test]
    fn boss_uses_variant_stats() {
        let config = GameConfig::default();
        let boss = Enemy::new(EnemyVariant::Boss, 0.0, 0.0, &config);
        assert_eq!(boss.health(), 150);
        assert!((boss.speed() - 2.4).abs() < 1e-6);
        assert_eq!(boss.rect().width, 48.0);
        let normal = Enemy::new(EnemyVariant::Normal, 0.0, 0.0, &config);
        assert_eq!((normal.health(), normal.speed(), normal.rect().width), (50, 3.0, 32.0));
    }

    #[test]
    fn visible_player_in_range_triggers_chase_and_path() {
        let mut fx = Fixture::new(corridor_room());
        let (ex, ey) = at_tile(Pos { y: 2, x: 2 });
        let mut enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &fx.config);
        let (px, py) = at_tile(Pos { y: 2, x: 5 });
        let player = Rect::square(px, py, 32.0);

        fx.step(&mut enemy, &player);
        assert_eq!(enemy.state(), EnemyState::Chase);
        assert_eq!(enemy.path().last(), Some(&Pos { y: 2, x: 5 }));
        assert!(enemy.rect().x > ex, "enemy should step toward the player");
    }

    #[test]
    fn player_out_of_range_leaves_enemy_patrolling() {
        let mut fx = Fixture::new(corridor_room());
        let (ex, ey) = at_tile(Pos { y: 1, x: 1 });
        let mut enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &fx.config);
        let (px, py) = at_tile(Pos { y: 4, x: 10 });
        let player = Rect::square(px, py, 32.0);
        fx.step(&mut enemy, &player);
        assert_eq!(enemy.state(), EnemyState::Patrol);
        assert!(enemy.path().is_empty());
    }

    #[test]
    fn wall_between_enemy_and_player_blocks_detection() {
        let grid = Grid::from_ascii(&["#######", "#..#..#", "#..#..#", "#######"]);
        let config = GameConfig::default();
        let (ex, ey) = at_tile(Pos { y: 1, x: 1 });
        let enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &config);
        let (px, py) = at_tile(Pos { y: 1, x: 5 });
        assert!(!enemy.can_see_player(&Rect::square(px, py, 32.0), &grid, &config));
    }

    #[test]
    fn chase_is_rederived_each_tick() {
        let mut fx = Fixture::new(corridor_room());
        let (ex, ey) = at_tile(Pos { y: 2, x: 2 });
        let mut enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &fx.config);
        let (px, py) = at_tile(Pos { y: 2, x: 4 });
        fx.step(&mut enemy, &Rect::square(px, py, 32.0));
        assert_eq!(enemy.state(), EnemyState::Chase);

        let (fx_x, fx_y) = at_tile(Pos { y: 4, x: 10 });
        fx.step(&mut enemy, &Rect::square(fx_x, fx_y, 32.0));
        assert_eq!(enemy.state(), EnemyState::Patrol);
        assert!(enemy.path().is_empty(), "a lost chase drops its route");
    }

    #[test]
    fn path_refresh_is_throttled_by_simulated_time() {
        let mut fx = Fixture::new(corridor_room());
        let (ex, ey) = at_tile(Pos { y: 2, x: 1 });
        let mut enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &fx.config);
        let (px, py) = at_tile(Pos { y: 2, x: 5 });
        fx.step(&mut enemy, &Rect::square(px, py, 32.0));
        let first_goal = *enemy.path().last().expect("path after first chase tick");

        let (qx, qy) = at_tile(Pos { y: 3, x: 5 });
        let moved = Rect::square(qx, qy, 32.0);
        fx.step(&mut enemy, &moved);
        assert_eq!(
            enemy.path().last(),
            Some(&first_goal),
            "cached route kept inside the refresh window"
        );

        for _ in 0..35 {
            fx.step(&mut enemy, &moved);
        }
        assert_eq!(enemy.path().last(), Some(&Pos { y: 3, x: 5 }));
    }

    #[test]
    fn flickering_sight_does_not_bypass_the_refresh_window() {
        let mut fx = Fixture::new(corridor_room());
        let (ex, ey) = at_tile(Pos { y: 2, x: 2 });
        let mut enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &fx.config);
        let (px, py) = at_tile(Pos { y: 2, x: 5 });
        fx.step(&mut enemy, &Rect::square(px, py, 32.0));
        assert_eq!(enemy.state(), EnemyState::Chase);
        assert_eq!(enemy.path().last(), Some(&Pos { y: 2, x: 5 }));
        let searched_at = enemy.last_path_update_ms;
        assert!(searched_at.is_some());

        let (far_x, far_y) = at_tile(Pos { y: 4, x: 10 });
        fx.step(&mut enemy, &Rect::square(far_x, far_y, 32.0));
        assert_eq!(enemy.state(), EnemyState::Patrol);
        assert!(enemy.path().is_empty());
        assert_eq!(enemy.last_path_update_ms, searched_at);

        let (qx, qy) = at_tile(Pos { y: 3, x: 5 });
        let back = Rect::square(qx, qy, 32.0);
        fx.step(&mut enemy, &back);
        assert_eq!(enemy.state(), EnemyState::Chase);
        assert!(enemy.path().is_empty(), "no search until the window elapses");
        assert_eq!(enemy.last_path_update_ms, searched_at);

        for _ in 0..35 {
            fx.step(&mut enemy, &back);
        }
        assert_eq!(enemy.path().last(), Some(&Pos { y: 3, x: 5 }));
        assert!(enemy.last_path_update_ms > searched_at);
    }

    #[test]
    fn unreachable_player_keeps_the_cached_route() {
        // (1, 4) is floor but only touches the room diagonally: visible, never reachable.
        let grid = Grid::from_ascii(&["######", "#..#.#", "#...##", "######"]);
        let mut fx = Fixture::new(grid);
        let (ex, ey) = at_tile(Pos { y: 2, x: 2 });
        let mut enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &fx.config);
        let (px, py) = at_tile(Pos { y: 2, x: 3 });
        fx.step(&mut enemy, &Rect::square(px, py, 32.0));
        assert_eq!(enemy.path(), &[Pos { y: 2, x: 3 }]);

        for _ in 0..40 {
            fx.clock.advance();
        }
        let isolated = Pos { y: 1, x: 4 };
        assert!(find_path(Pos { y: 2, x: 2 }, isolated, &fx.grid).is_none());
        let (ix, iy) = at_tile(isolated);
        fx.step(&mut enemy, &Rect::square(ix, iy, 32.0));
        assert_eq!(enemy.state(), EnemyState::Chase);
        assert_eq!(enemy.last_path_update_ms, Some(fx.clock.elapsed_ms()));
        assert_eq!(enemy.path(), &[Pos { y: 2, x: 3 }]);
    }

    #[test]
    fn failed_patrol_sampling_falls_back_to_centre_or_keeps_target() {
        let mut fx = Fixture::new(Grid::from_ascii(&["###", "###", "###"]));
        fx.config.enemy_patrol_radius = 10.0;
        let (ex, ey) = at_tile(Pos { y: 1, x: 1 });
        let mut enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &fx.config);
        fx.step(&mut enemy, &Rect::square(-10_000.0, -10_000.0, 32.0));
        assert_eq!(enemy.state(), EnemyState::Patrol);
        assert_eq!(enemy.patrol_target, Some((48.0, 48.0)));
        assert_eq!(enemy.rect().center(), (48.0, 48.0));

        let earlier = (144.0, 48.0);
        enemy.patrol_target = Some(earlier);
        let mut world = fx.world();
        enemy.choose_patrol_target(&mut world);
        assert_eq!(enemy.patrol_target, Some(earlier));
    }

    #[test]
    fn boss_arms_special_when_close_and_cooldown_counts_down() {
        let mut fx = Fixture::new(corridor_room());
        let (ex, ey) = at_tile(Pos { y: 2, x: 2 });
        let mut boss = Enemy::new(EnemyVariant::Boss, ex, ey, &fx.config);
        let (px, py) = at_tile(Pos { y: 2, x: 4 });
        let player = Rect::square(px, py, 32.0);

        assert!(fx.step(&mut boss, &player));
        assert_eq!(boss.special_cooldown(), 119);
        assert!(!fx.step(&mut boss, &player));
        assert_eq!(boss.special_cooldown(), 118);
    }

    #[test]
    fn normal_enemies_never_arm_a_special() {
        let mut fx = Fixture::new(corridor_room());
        let (ex, ey) = at_tile(Pos { y: 2, x: 2 });
        let mut enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &fx.config);
        let (px, py) = at_tile(Pos { y: 2, x: 3 });
        assert!(!fx.step(&mut enemy, &Rect::square(px, py, 32.0)));
        assert_eq!(enemy.special_cooldown(), 0);
    }

    #[test]
    fn patrolling_enemy_stays_on_floor_tiles() {
        let mut fx = Fixture::new(corridor_room());
        let (ex, ey) = at_tile(Pos { y: 2, x: 5 });
        let mut enemy = Enemy::new(EnemyVariant::Normal, ex, ey, &fx.config);
        let far_away = Rect::square(-10_000.0, -10_000.0, 32.0);
        for _ in 0..600 {
            fx.step(&mut enemy, &far_away);
            let tile = enemy.rect().center_tile(32);
            assert_eq!(
                fx.grid.tile_at(tile),
                Some(TileKind::Floor),
                "patrol left the floor at {tile:?}"
            );
        }
    }

    #[test]
    fn damage_is_unconditional_and_kills_at_zero() {
        let config = GameConfig::default();
        let mut enemy = Enemy::new(EnemyVariant::Normal, 0.0, 0.0, &config);
        enemy.take_damage(20);
        enemy.take_damage(20);
        assert!(!enemy.is_dead());
        assert!((enemy.health_fraction() - 0.2).abs() < 1e-6);
        enemy.take_damage(20);
        assert!(enemy.is_dead());
        assert_eq!(enemy.health_fraction(), 0.0);
    }
}
