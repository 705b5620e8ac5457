//! Data structures for the simulation: variants and their tuning, the entity,
//! obstacles and the world record that owns them.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reset position of the entity (distance from the top of the surface).
pub const ENTITY_RESET_POSITION: f64 = 100.0;

/// Reset velocity of the entity. Overwritten by the start velocity when a
/// session begins.
pub const ENTITY_RESET_VELOCITY: f64 = 1.0;

/// The three shipped tunings of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Classic,
    Compact,
    Arcade,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Classic, Variant::Compact, Variant::Arcade];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Compact => "compact",
            Self::Arcade => "arcade",
        }
    }

    /// Constants and cosmetic switches for this variant.
    pub fn tuning(&self) -> Tuning {
        match self {
            Self::Classic => Tuning {
                surface: SurfaceSize::Viewport,
                obstacle_width: 100.0,
                spacing: 200.0,
                base_speed: 0.08,
                age_speed_factor: 0.0001,
                entity_width: 30.0,
                entity_height: 30.0,
                entity_offset: 100.0,
                gravity: 0.01,
                flap_impulse: -0.3,
                start_velocity: -0.1,
                min_opening: 100.0,
                opening_range: OpeningRange::HalfOfRemaining,
                background: Background::Bands {
                    sky: Color::Rgb(0x55, 0x88, 0xFF),
                    ground: Color::Rgb(0x55, 0xFF, 0x66),
                    horizon: 0.3,
                },
                obstacle_color: Color::Rgb(0x77, 0x44, 0x11),
                entity_color: Color::Rgb(0xFF, 0x00, 0x00),
                text_color: Color::Rgb(0x00, 0x00, 0x00),
                score_display: ScoreDisplay::Surface,
                entity_label: "Anna, das flatternde Vögelchen",
                prompt: "Press Enter to start the game.",
                title: "Annas persönlicher Flappy-Bird-Klon",
                game_over: "Uups!",
                game_over_font_scale: 1.0,
                title_delay_ms: 1000,
                skip_alternate_frames: false,
                skip_draw_on_game_over: false,
            },
            Self::Compact => Tuning {
                surface: SurfaceSize::Fixed {
                    width: 400.0,
                    height: 600.0,
                },
                obstacle_width: 60.0,
                spacing: 160.0,
                base_speed: 0.12,
                age_speed_factor: 0.00015,
                entity_width: 20.0,
                entity_height: 20.0,
                entity_offset: 60.0,
                gravity: 0.012,
                flap_impulse: -0.35,
                start_velocity: -0.15,
                min_opening: 90.0,
                opening_range: OpeningRange::Fixed(80.0),
                background: Background::Clear(Color::Rgb(0x20, 0x20, 0x30)),
                obstacle_color: Color::Rgb(0x44, 0xAA, 0x44),
                entity_color: Color::Rgb(0xFF, 0xCC, 0x00),
                text_color: Color::Rgb(0xFF, 0xFF, 0xFF),
                score_display: ScoreDisplay::Element,
                entity_label: "hop",
                prompt: "Press S to start.",
                title: "Flapper Compact",
                game_over: "Crashed!",
                game_over_font_scale: 1.0,
                title_delay_ms: 500,
                skip_alternate_frames: true,
                skip_draw_on_game_over: true,
            },
            Self::Arcade => Tuning {
                surface: SurfaceSize::Viewport,
                obstacle_width: 80.0,
                spacing: 240.0,
                base_speed: 0.1,
                age_speed_factor: 0.0001,
                entity_width: 24.0,
                entity_height: 24.0,
                entity_offset: 120.0,
                gravity: 0.01,
                flap_impulse: -0.32,
                start_velocity: -0.1,
                min_opening: 110.0,
                opening_range: OpeningRange::HalfOfRemaining,
                background: Background::Bands {
                    sky: Color::Rgb(0x22, 0x22, 0x66),
                    ground: Color::Rgb(0x33, 0x88, 0x33),
                    horizon: 0.3,
                },
                obstacle_color: Color::Rgb(0xCC, 0x55, 0x22),
                entity_color: Color::Rgb(0xFF, 0x44, 0xAA),
                text_color: Color::Rgb(0xFF, 0xFF, 0xFF),
                score_display: ScoreDisplay::Element,
                entity_label: "zoom",
                prompt: "Press N for a new game.",
                title: "Flapper Arcade",
                game_over: "GAME OVER",
                game_over_font_scale: 2.0,
                title_delay_ms: 750,
                skip_alternate_frames: false,
                skip_draw_on_game_over: false,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown variant '{}' (expected one of: classic, compact, arcade)",
                    s
                )
            })
    }
}

/// How the logical surface is sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceSize {
    /// Follows the viewport handed over at bootstrap.
    Viewport,
    /// Always this many logical pixels, scaled to fit the viewport.
    Fixed { width: f64, height: f64 },
}

/// Rule for the random part of an obstacle's opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpeningRange {
    /// `opening ∈ [min, min + range]`
    Fixed(f64),
    /// `range = (height - 2 * min) / 2`, never negative.
    HalfOfRemaining,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Sky above `horizon` (fraction of height), ground below.
    Bands {
        sky: Color,
        ground: Color,
        horizon: f64,
    },
    /// Whole surface cleared to one color.
    Clear(Color),
}

/// Where the score is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDisplay {
    /// Painted onto the surface near the bottom-left corner.
    Surface,
    /// Written into the HUD score element.
    Element,
}

/// Per-variant constants. Distances are logical pixels, speeds are pixels
/// per millisecond, gravity is a velocity increment per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub surface: SurfaceSize,

    // Obstacles
    pub obstacle_width: f64,
    pub spacing: f64,
    pub base_speed: f64,
    /// Extra scroll per tick for every elapsed millisecond of the session.
    pub age_speed_factor: f64,
    pub min_opening: f64,
    pub opening_range: OpeningRange,

    // Entity
    pub entity_width: f64,
    pub entity_height: f64,
    /// Fixed horizontal position of the entity's left edge.
    pub entity_offset: f64,
    pub gravity: f64,
    pub flap_impulse: f64,
    pub start_velocity: f64,

    // Cosmetics
    pub background: Background,
    pub obstacle_color: Color,
    pub entity_color: Color,
    pub text_color: Color,
    pub score_display: ScoreDisplay,
    pub entity_label: &'static str,
    pub prompt: &'static str,
    pub title: &'static str,
    pub game_over: &'static str,
    pub game_over_font_scale: f32,
    pub title_delay_ms: u64,
    /// Simulate every frame but only draw every other one.
    pub skip_alternate_frames: bool,
    /// Leave the crash frame undrawn.
    pub skip_draw_on_game_over: bool,
}

impl Tuning {
    /// Collision only looks at the leftmost obstacle. That is enough as long
    /// as the entity's right edge stays left of `spacing`: while the leftmost
    /// obstacle is still on screen, the next one cannot reach the entity yet.
    pub fn nearest_only_collision_is_sound(&self) -> bool {
        self.entity_offset + self.entity_width <= self.spacing
    }

    /// Size of the random part of an opening for a surface of `height`.
    pub fn opening_span(&self, height: f64) -> f64 {
        match self.opening_range {
            OpeningRange::Fixed(range) => range,
            OpeningRange::HalfOfRemaining => ((height - 2.0 * self.min_opening) / 2.0).max(0.0),
        }
    }

    /// Logical surface size for a viewport of the given size.
    pub fn surface_size(&self, viewport_width: f64, viewport_height: f64) -> (f64, f64) {
        match self.surface {
            SurfaceSize::Viewport => (viewport_width, viewport_height),
            SurfaceSize::Fixed { width, height } => (width, height),
        }
    }
}

/// The player-controlled body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    /// Top edge, in `[0, height - entity_height]`.
    pub position: f64,
    /// Pixels per millisecond, positive is downward.
    pub velocity: f64,
}

/// A pair of blocks with a gap, scrolling toward the entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub position: f64,
    /// Distance from the top of the surface to the top of the gap.
    pub offset: f64,
    /// Gap height.
    pub opening: f64,
}

impl Obstacle {
    pub fn gap_bottom(&self) -> f64 {
        self.offset + self.opening
    }
}

/// All simulation state for one game.
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub width: f64,
    pub height: f64,

    pub entity: Entity,
    /// Ordered by position, leftmost first.
    pub obstacles: Vec<Obstacle>,

    pub score: u32,
    /// Milliseconds since the session started.
    pub age: u64,
    pub running: bool,
    /// Timestamp of the last tick in milliseconds.
    pub time: u64,
}

impl World {
    /// Create an idle world for a surface of `width` x `height` logical pixels.
    pub fn new(tuning: Tuning, width: f64, height: f64, now_ms: u64) -> Self {
        debug_assert!(
            tuning.nearest_only_collision_is_sound(),
            "entity must clear the obstacle spacing for nearest-only collision"
        );
        let mut world = Self {
            tuning,
            width,
            height,
            entity: Entity {
                position: 0.0,
                velocity: 0.0,
            },
            obstacles: Vec::new(),
            score: 0,
            age: 0,
            running: false,
            time: now_ms,
        };
        world.reset(now_ms);
        world
    }

    /// Return every field to its between-sessions default.
    pub fn reset(&mut self, now_ms: u64) {
        self.running = false;
        self.entity = Entity {
            position: ENTITY_RESET_POSITION.min(self.max_position()),
            velocity: ENTITY_RESET_VELOCITY,
        };
        self.obstacles.clear();
        self.time = now_ms;
        self.age = 0;
        self.score = 0;
    }

    /// Lowest allowed entity position (top edge touching the floor).
    pub fn max_position(&self) -> f64 {
        (self.height - self.tuning.entity_height).max(0.0)
    }
}
