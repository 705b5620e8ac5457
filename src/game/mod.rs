//! Simulation core.
//!
//! A body falls under constant gravity at a fixed horizontal position while
//! obstacles with a vertical gap scroll in from the right. Callers hand in
//! timestamps and a random source; the core does no I/O and keeps no
//! timers. Colors in the tuning use `ratatui::style::Color` so the terminal
//! canvas can paint them directly.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
