//! Flapper - terminal side-scroller library.
//!
//! The simulation (`game`), drawing (`render`) and session state machine
//! (`session`) know nothing about the terminal; `terminal` and `ui` put
//! them on screen.

pub mod app;
pub mod build_info;
pub mod config;
pub mod game;
pub mod input;
pub mod logging;
pub mod render;
pub mod session;
pub mod terminal;
pub mod ui;
pub mod utils;

pub use config::{Config, ConfigError};
pub use game::{StepOutcome, Tuning, Variant, World};
pub use input::{GameKey, Key, KeyBindings};
pub use render::{CellCanvas, RecordingSurface, Surface};
pub use session::{run_loop, Command, Phase, Session};
