//! A headless surface that remembers every call.

use super::Surface;
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Hand back everything recorded so far and start over.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}
