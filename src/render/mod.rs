//! Painting the world onto a 2D surface.
//!
//! [`draw`] only reads the world. Everything it produces goes through the
//! [`Surface`] trait, so the same code paints the terminal canvas and the
//! recording surface used by tests.

pub mod canvas;
pub mod hud;
pub mod recording;

pub use canvas::{Cell, CellCanvas};
pub use hud::{score_text, Hud, TextElement};
pub use recording::{DrawOp, RecordingSurface};

use crate::game::{Background, ScoreDisplay, World};
use ratatui::style::Color;

/// A 2D drawing target in logical pixel coordinates. Append-only: the core
/// never reads pixels back.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    /// Draw `text` with its first character at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);
}

/// Gap between the entity and its label.
const LABEL_GAP: f64 = 5.0;

/// Paint background, obstacles, entity, score and (when idle) the start
/// prompt. In variants with a score element the score goes to `hud` instead.
pub fn draw<S: Surface + ?Sized>(world: &World, surface: &mut S, hud: &mut Hud) {
    let tuning = &world.tuning;
    let (width, height) = (world.width, world.height);

    match tuning.background {
        Background::Bands {
            sky,
            ground,
            horizon,
        } => {
            let split = height * horizon;
            surface.fill_rect(0.0, 0.0, width, split, sky);
            surface.fill_rect(0.0, split, width, height - split, ground);
        }
        Background::Clear(color) => surface.clear(color),
    }

    for obstacle in &world.obstacles {
        surface.fill_rect(
            obstacle.position,
            0.0,
            tuning.obstacle_width,
            obstacle.offset,
            tuning.obstacle_color,
        );
        let lower = obstacle.gap_bottom();
        surface.fill_rect(
            obstacle.position,
            lower,
            tuning.obstacle_width,
            height - lower,
            tuning.obstacle_color,
        );
    }

    let top = world.entity.position;
    surface.fill_rect(
        tuning.entity_offset,
        top,
        tuning.entity_width,
        tuning.entity_height,
        tuning.entity_color,
    );
    surface.fill_text(
        tuning.entity_label,
        tuning.entity_offset + tuning.entity_width + LABEL_GAP,
        top + tuning.entity_height / 3.0,
        tuning.entity_color,
    );

    match tuning.score_display {
        ScoreDisplay::Surface => {
            surface.fill_text(
                &score_text(world.score),
                10.0,
                height - 20.0,
                tuning.text_color,
            );
        }
        ScoreDisplay::Element => hud.score.set_text(score_text(world.score)),
    }

    if !world.running {
        surface.fill_text(tuning.prompt, 10.0, 10.0, tuning.text_color);
    }
}
