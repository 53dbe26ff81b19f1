//! Macroquad backend for the core draw seam, plus per-mode frame selection.
//! Sprites come from `assets/images/<name>.png`; a missing image is drawn as a shape instead.

use std::collections::HashMap;

use macroquad::prelude::*;
use tower_app::app_loop::{AppMode, AppState, MENU_OPTIONS};
use tower_core::Session;
use tower_core::geometry::Rect as WorldRect;
use tower_core::scene::{
    Renderer, SpriteKind, TextAlign, TextSize, TextStyle, Tint, draw_game_over_screen,
    draw_pause_overlay, draw_session, draw_title_screen, draw_victory_screen,
};
use tracing::{debug, warn};

const IMAGE_DIR: &str = "assets/images";
const OUTLINE_THICKNESS: f32 = 2.0;
const DETAIL_THICKNESS: f32 = 1.0;

/// Sprites that can be replaced by an image file. Bars and outlines are always geometric.
const TEXTURED_SPRITES: [SpriteKind; 8] = [
    SpriteKind::Wall,
    SpriteKind::Floor,
    SpriteKind::Stairs,
    SpriteKind::Potion,
    SpriteKind::Power,
    SpriteKind::Enemy,
    SpriteKind::Boss,
    SpriteKind::Player,
];

pub struct MacroquadRenderer {
    textures: HashMap<SpriteKind, Texture2D>,
}

impl MacroquadRenderer {
    pub async fn load() -> Self {
        let mut textures = HashMap::new();
        for sprite in TEXTURED_SPRITES {
            let Some(stem) = image_stem(sprite) else {
                continue;
            };
            if let Some(texture) = load_or_warn(&format!("{IMAGE_DIR}/{stem}.png")).await {
                texture.set_filter(FilterMode::Nearest);
                textures.insert(sprite, texture);
            }
        }
        debug!(textures = textures.len(), "images loaded");
        Self { textures }
    }
}

impl Renderer for MacroquadRenderer {
    fn draw_rect(&mut self, sprite: SpriteKind, rect: WorldRect, tint: Tint) {
        let color = to_color(tint);
        if sprite.is_outline() {
            draw_rectangle_lines(rect.x, rect.y, rect.width, rect.height, OUTLINE_THICKNESS, color);
            return;
        }
        if let Some(texture) = self.textures.get(&sprite) {
            let params = DrawTextureParams {
                dest_size: Some(vec2(rect.width, rect.height)),
                ..DrawTextureParams::default()
            };
            draw_texture_ex(texture, rect.x, rect.y, texture_color(sprite, tint), params);
            return;
        }
        for shape in placeholder_shapes(sprite, rect, color) {
            shape.draw();
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let px = font_size(style.size);
        let width = measure_text(text, None, px as u16, 1.0).width;
        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Right => x - width,
            TextAlign::Center => x - width / 2.0,
        };
        // Core positions are top-left; macroquad draws from the baseline.
        draw_text(text, left, y + px * 0.75, px, to_color(style.tint));
    }
}

pub fn draw_frame(session: &Session, app_state: &AppState, renderer: &mut MacroquadRenderer) {
    clear_background(BLACK);
    let (width, height) = (screen_width(), screen_height());

    match app_state.mode {
        AppMode::Menu { selected } => {
            draw_title_screen(renderer, width, height, &MENU_OPTIONS, selected);
        }
        AppMode::Playing => draw_session(session, renderer),
        AppMode::Paused => {
            draw_session(session, renderer);
            draw_rectangle(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, 0.6));
            draw_pause_overlay(renderer, width, height);
        }
        AppMode::GameOver => draw_game_over_screen(renderer, width, height),
        AppMode::Victory => draw_victory_screen(renderer, width, height),
    }
}

async fn load_or_warn(path: &str) -> Option<Texture2D> {
    match load_texture(path).await {
        Ok(texture) => Some(texture),
        Err(err) => {
            warn!(path, %err, "image unavailable; drawing a placeholder shape");
            None
        }
    }
}

fn image_stem(sprite: SpriteKind) -> Option<&'static str> {
    match sprite {
        SpriteKind::Wall => Some("wall"),
        SpriteKind::Floor => Some("floor"),
        SpriteKind::Stairs => Some("stairs"),
        SpriteKind::Potion => Some("potion"),
        SpriteKind::Power => Some("power"),
        SpriteKind::Enemy => Some("enemy"),
        SpriteKind::Boss => Some("boss"),
        SpriteKind::Player => Some("player"),
        SpriteKind::AttackArc
        | SpriteKind::BarBack
        | SpriteKind::BarFill
        | SpriteKind::BarFrame => None,
    }
}

/// Images carry their own colours. Only the powered player keeps its tint so the buff shows.
fn texture_color(sprite: SpriteKind, tint: Tint) -> Color {
    if sprite == SpriteKind::Player && tint == Tint::POWERED {
        to_color(tint)
    } else {
        WHITE
    }
}

/// One drawing primitive of a placeholder sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Shape {
    Fill(Rect, Color),
    Line { from: Vec2, to: Vec2, color: Color },
    Triangle([Vec2; 3], Color),
    Circle { center: Vec2, radius: f32, color: Color },
}

impl Shape {
    fn draw(self) {
        match self {
            Self::Fill(r, color) => draw_rectangle(r.x, r.y, r.w, r.h, color),
            Self::Line { from, to, color } => {
                draw_line(from.x, from.y, to.x, to.y, DETAIL_THICKNESS, color);
            }
            Self::Triangle([a, b, c], color) => draw_triangle(a, b, c, color),
            Self::Circle { center, radius, color } => {
                draw_circle(center.x, center.y, radius, color);
            }
        }
    }
}

/// Procedural stand-ins for sprites whose image did not load, laid out in `rect`.
fn placeholder_shapes(sprite: SpriteKind, rect: WorldRect, color: Color) -> Vec<Shape> {
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    // Point at a fraction of the sprite box.
    let at = |fx: f32, fy: f32| vec2(x + w * fx, y + h * fy);
    let fill = |fx: f32, fy: f32, fw: f32, fh: f32, color: Color| {
        Shape::Fill(Rect::new(x + w * fx, y + h * fy, w * fw, h * fh), color)
    };
    let line = |from: Vec2, to: Vec2, color: Color| Shape::Line { from, to, color };

    match sprite {
        SpriteKind::Wall => {
            let mut shapes = vec![fill(0.0, 0.0, 1.0, 1.0, color)];
            for course in 0..4 {
                let top = course as f32 / 4.0;
                let bottom = top + 0.25;
                if course > 0 {
                    shapes.push(line(at(0.0, top), at(1.0, top), BLACK));
                }
                let joint = if course % 2 == 0 { 0.25 } else { 0.75 };
                shapes.push(line(at(joint, top), at(joint, bottom), BLACK));
            }
            shapes
        }
        SpriteKind::Floor => {
            let seam = shade(color, 0.5);
            let shadow = shade(color, 0.8);
            let mut shapes = vec![
                fill(0.0, 0.0, 1.0, 1.0, color),
                line(at(0.0, 0.5), at(1.0, 0.5), seam),
                line(at(0.5, 0.0), at(0.5, 1.0), seam),
            ];
            for corner in [at(0.0, 0.0), at(1.0, 0.0), at(0.0, 1.0), at(1.0, 1.0)] {
                shapes.push(line(corner, at(0.5, 0.5), shadow));
            }
            shapes
        }
        SpriteKind::Stairs => {
            let frame = shade(color, 0.8);
            let step = shade(color, 1.2);
            let (lo, hi) = (0.125, 0.875);
            let mut shapes = vec![
                line(at(lo, lo), at(hi, lo), frame),
                line(at(hi, lo), at(hi, hi), frame),
                line(at(hi, hi), at(lo, hi), frame),
                line(at(lo, hi), at(lo, lo), frame),
                line(at(1.0 / 3.0, lo), at(1.0 / 3.0, hi), step),
            ];
            for rung in 1..6 {
                let ry = lo + rung as f32 * (hi - lo) / 6.0;
                shapes.push(line(at(lo, ry), at(hi, ry), step));
            }
            shapes
        }
        SpriteKind::Potion => vec![
            fill(0.375, 1.0 / 6.0, 0.25, 0.125, shade(color, 0.4)),
            fill(1.0 / 3.0, 0.25, 1.0 / 3.0, 0.5, shade(color, 0.7)),
            Shape::Triangle(
                [at(1.0 / 3.0, 0.75), at(2.0 / 3.0, 0.75), at(0.5, 0.875)],
                shade(color, 0.7),
            ),
            fill(0.4, 0.5, 0.2, 0.25, color),
            Shape::Circle { center: at(0.5, 0.625), radius: w / 12.0, color: WHITE },
        ],
        SpriteKind::Power => vec![
            Shape::Triangle([at(0.55, 0.125), at(0.25, 0.6), at(0.55, 0.55)], color),
            Shape::Triangle([at(0.45, 0.45), at(0.75, 0.4), at(0.45, 0.875)], color),
        ],
        SpriteKind::Enemy | SpriteKind::Boss | SpriteKind::Player => vec![
            fill(0.0, 0.0, 1.0, 1.0, color),
            Shape::Circle { center: at(1.0 / 3.0, 1.0 / 3.0), radius: w / 10.0, color: WHITE },
            Shape::Circle { center: at(2.0 / 3.0, 1.0 / 3.0), radius: w / 10.0, color: WHITE },
        ],
        SpriteKind::AttackArc
        | SpriteKind::BarBack
        | SpriteKind::BarFill
        | SpriteKind::BarFrame => vec![fill(0.0, 0.0, 1.0, 1.0, color)],
    }
}

fn shade(color: Color, factor: f32) -> Color {
    Color::new(
        (color.r * factor).min(1.0),
        (color.g * factor).min(1.0),
        (color.b * factor).min(1.0),
        color.a,
    )
}

fn font_size(size: TextSize) -> f32 {
    match size {
        TextSize::Small => 30.0,
        TextSize::Medium => 44.0,
        TextSize::Large => 66.0,
    }
}

fn to_color(tint: Tint) -> Color {
    Color::from_rgba(tint.r, tint.g, tint.b, 255)
}
