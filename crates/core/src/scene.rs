//! Presentation seams: what to draw and which sounds to play, without knowing how.
//! This module exists so the frame layout and audio cue table stay testable without a window.
//! It does not own textures, fonts or mixers; front ends implement `Renderer` and `AudioSink`.

use crate::geometry::Rect;
use crate::session::Session;
use crate::types::{EnemyVariant, GameEvent, ItemKind, Pos, TileKind};

const HEALTH_BAR_WIDTH: f32 = 200.0;
const HEALTH_BAR_HEIGHT: f32 = 20.0;
const HUD_MARGIN: f32 = 20.0;
const ENEMY_BAR_HEIGHT: f32 = 5.0;
const ENEMY_BAR_GAP: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GRAY: Self = Self::rgb(100, 100, 100);
    pub const DARK_GRAY: Self = Self::rgb(50, 50, 50);
    pub const PURPLE: Self = Self::rgb(128, 0, 128);
    pub const BOSS: Self = Self::rgb(150, 0, 150);
    pub const PLAYER: Self = Self::rgb(0, 200, 0);
    pub const POWERED: Self = Self::rgb(0, 100, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Wall,
    Floor,
    Stairs,
    Potion,
    Power,
    Enemy,
    Boss,
    Player,
    /// Outline only.
    AttackArc,
    BarBack,
    BarFill,
    /// Outline only.
    BarFrame,
}

impl SpriteKind {
    pub fn is_outline(self) -> bool {
        matches!(self, Self::AttackArc | Self::BarFrame)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub size: TextSize,
    pub tint: Tint,
    pub align: TextAlign,
}

/// Draw sink implemented by the front end. Coordinates are screen pixels.
pub trait Renderer {
    fn draw_rect(&mut self, sprite: SpriteKind, rect: Rect, tint: Tint);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Swing,
    Hit,
    Hurt,
    EnemyDeath,
    Power,
    Stairs,
}

impl SoundCue {
    pub const ALL: [Self; 6] =
        [Self::Swing, Self::Hit, Self::Hurt, Self::EnemyDeath, Self::Power, Self::Stairs];

    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::AttackStarted => Some(Self::Swing),
            GameEvent::EnemyHit { .. } => Some(Self::Hit),
            GameEvent::PlayerHurt { .. } => Some(Self::Hurt),
            GameEvent::EnemyKilled { .. } => Some(Self::EnemyDeath),
            GameEvent::PowerActivated => Some(Self::Power),
            GameEvent::FloorReached { .. } => Some(Self::Stairs),
            GameEvent::PotionConsumed { .. }
            | GameEvent::BossFloorReached
            | GameEvent::BossSpecialArmed { .. }
            | GameEvent::Victory
            | GameEvent::GameOver => None,
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Swing => "swing",
            Self::Hit => "attack",
            Self::Hurt => "hurt",
            Self::EnemyDeath => "enemy_death",
            Self::Power => "power",
            Self::Stairs => "stairs",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MusicCue {
    Menu,
    Game,
    Boss,
    Victory,
    GameOver,
}

impl MusicCue {
    pub const ALL: [Self; 5] = [Self::Menu, Self::Game, Self::Boss, Self::Victory, Self::GameOver];

    /// Track changes driven by the simulation; menu and game tracks are chosen by the front end.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BossFloorReached => Some(Self::Boss),
            GameEvent::Victory => Some(Self::Victory),
            GameEvent::GameOver => Some(Self::GameOver),
            _ => None,
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Game => "game",
            Self::Boss => "boss",
            Self::Victory => "victory",
            Self::GameOver => "game_over",
        }
    }

    pub fn looped(self) -> bool {
        matches!(self, Self::Menu | Self::Game | Self::Boss)
    }
}

/// Fire-and-forget audio. Implementations swallow their own failures.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    fn play_music(&mut self, cue: MusicCue);
}

/// Plays the cues for a batch of drained events, in order.
pub fn play_event_cues(events: &[GameEvent], audio: &mut impl AudioSink) {
    for event in events {
        if let Some(cue) = SoundCue::for_event(event) {
            audio.play(cue);
        }
        if let Some(track) = MusicCue::for_event(event) {
            audio.play_music(track);
        }
    }
}

/// Top-left of the visible window into the floor, following the player and clamped to the map.
pub fn camera_offset(session: &Session, screen_width: f32, screen_height: f32) -> (f32, f32) {
    let tile_size = session.config().tile_size as f32;
    let world_width = session.grid().width() as f32 * tile_size;
    let world_height = session.grid().height() as f32 * tile_size;
    let (cx, cy) = session.player().rect().center();
    let clamp_axis = |centre: f32, view: f32, world: f32| {
        if world <= view {
            (world - view) / 2.0
        } else {
            (centre - view / 2.0).clamp(0.0, world - view)
        }
    };
    (clamp_axis(cx, screen_width, world_width), clamp_axis(cy, screen_height, world_height))
}

/// Draws one gameplay frame: tiles, stairs, items, enemies, player, then the HUD.
pub fn draw_session(session: &Session, renderer: &mut impl Renderer) {
    let config = session.config();
    let (ox, oy) = camera_offset(session, config.screen_width as f32, config.screen_height as f32);
    let to_screen = |rect: &Rect| rect.translated(-ox, -oy);
    let tile_size = config.tile_size;

    let grid = session.grid();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let pos = Pos { y, x };
            let rect = to_screen(&Rect::at_tile(pos, tile_size, tile_size as f32));
            match grid.tile(pos) {
                TileKind::Wall => renderer.draw_rect(SpriteKind::Wall, rect, Tint::DARK_GRAY),
                TileKind::Floor => renderer.draw_rect(SpriteKind::Floor, rect, Tint::GRAY),
            }
        }
    }

    renderer.draw_rect(SpriteKind::Stairs, to_screen(session.stairs()), Tint::PURPLE);

    for item in session.items().values() {
        let (sprite, tint) = match item.kind {
            ItemKind::Potion => (SpriteKind::Potion, Tint::GREEN),
            ItemKind::Power => (SpriteKind::Power, Tint::BLUE),
        };
        renderer.draw_rect(sprite, to_screen(&item.rect), tint);
    }

    for enemy in session.enemies().values() {
        let rect = to_screen(enemy.rect());
        let (sprite, tint) = match enemy.variant() {
            EnemyVariant::Normal => (SpriteKind::Enemy, Tint::RED),
            EnemyVariant::Boss => (SpriteKind::Boss, Tint::BOSS),
        };
        renderer.draw_rect(sprite, rect, tint);
        let bar = Rect::new(rect.x, rect.y - ENEMY_BAR_GAP, rect.width, ENEMY_BAR_HEIGHT);
        renderer.draw_rect(SpriteKind::BarBack, bar, Tint::RED);
        let fill = Rect { width: bar.width * enemy.health_fraction(), ..bar };
        renderer.draw_rect(SpriteKind::BarFill, fill, Tint::GREEN);
    }

    let player = session.player();
    if player.is_visible_this_frame(session.clock()) {
        let tint = if player.is_power_active() { Tint::POWERED } else { Tint::PLAYER };
        renderer.draw_rect(SpriteKind::Player, to_screen(player.rect()), tint);
    }
    if let Some(hitbox) = player.attack_hitbox() {
        renderer.draw_rect(SpriteKind::AttackArc, to_screen(&hitbox), Tint::RED);
    }

    draw_hud(session, renderer);
}

fn draw_hud(session: &Session, renderer: &mut impl Renderer) {
    let config = session.config();
    let player = session.player();

    let frame = Rect::new(HUD_MARGIN, HUD_MARGIN, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT);
    let fraction = (player.health() as f32 / player.max_health() as f32).clamp(0.0, 1.0);
    renderer.draw_rect(SpriteKind::BarBack, frame, Tint::RED);
    let fill = Rect { width: frame.width * fraction, ..frame };
    renderer.draw_rect(SpriteKind::BarFill, fill, Tint::GREEN);
    renderer.draw_rect(SpriteKind::BarFrame, frame, Tint::WHITE);

    let floor_label = format!("Floor {}/{}", session.floor_index() + 1, config.floor_count);
    let right_edge = config.screen_width as f32 - HUD_MARGIN;
    let style = TextStyle { size: TextSize::Small, tint: Tint::WHITE, align: TextAlign::Right };
    renderer.draw_text(&floor_label, right_edge, HUD_MARGIN, style);

    if player.is_power_active() {
        let label = format!("Power: {:.1}s", player.power_remaining_secs());
        let style = TextStyle { size: TextSize::Small, tint: Tint::BLUE, align: TextAlign::Left };
        renderer.draw_text(&label, HUD_MARGIN, HUD_MARGIN + 30.0, style);
    }
}

/// Title screen with `options` listed under the title; `selected` is highlighted.
pub fn draw_title_screen(
    renderer: &mut impl Renderer,
    screen_width: f32,
    screen_height: f32,
    options: &[&str],
    selected: usize,
) {
    let cx = screen_width / 2.0;
    let title = centred(TextSize::Large, Tint::RED);
    renderer.draw_text("THE CURSED TOWER", cx, screen_height / 4.0, title);
    for (i, option) in options.iter().enumerate() {
        let tint = if i == selected { Tint::GREEN } else { Tint::WHITE };
        let y = screen_height / 2.0 + i as f32 * 60.0;
        renderer.draw_text(option, cx, y, centred(TextSize::Medium, tint));
    }
    renderer.draw_text(
        "Arrow keys to move, SPACE to attack",
        cx,
        screen_height * 3.0 / 4.0,
        centred(TextSize::Small, Tint::WHITE),
    );
}

pub fn draw_game_over_screen(renderer: &mut impl Renderer, screen_width: f32, screen_height: f32) {
    let cx = screen_width / 2.0;
    let body = centred(TextSize::Medium, Tint::WHITE);
    renderer.draw_text("GAME OVER", cx, screen_height / 3.0, centred(TextSize::Large, Tint::RED));
    renderer.draw_text("Press R to restart", cx, screen_height / 2.0, body);
    renderer.draw_text("Press M for the menu", cx, screen_height / 2.0 + 60.0, body);
}

pub fn draw_victory_screen(renderer: &mut impl Renderer, screen_width: f32, screen_height: f32) {
    let cx = screen_width / 2.0;
    let body = centred(TextSize::Medium, Tint::WHITE);
    renderer.draw_text("VICTORY!", cx, screen_height / 3.0, centred(TextSize::Large, Tint::GREEN));
    renderer.draw_text("You escaped the Cursed Tower", cx, screen_height / 2.0, body);
    renderer.draw_text("Press R to play again", cx, screen_height / 2.0 + 60.0, body);
    renderer.draw_text("Press M for the menu", cx, screen_height / 2.0 + 120.0, body);
}

pub fn draw_pause_overlay(renderer: &mut impl Renderer, screen_width: f32, screen_height: f32) {
    let cx = screen_width / 2.0;
    renderer.draw_text("PAUSED", cx, screen_height / 3.0, centred(TextSize::Large, Tint::WHITE));
    let body = centred(TextSize::Medium, Tint::WHITE);
    renderer.draw_text("ESC to resume, M for the menu", cx, screen_height / 2.0, body);
}

fn centred(size: TextSize, tint: Tint) -> TextStyle {
    TextStyle { size, tint, align: TextAlign::Center }
}
