//! Text elements that sit on top of the play surface: the status message
//! (title / game over) and, in some variants, the score counter.

use crate::game::{ScoreDisplay, Tuning};

/// A piece of text the core writes and the front end displays.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    text: String,
    visible: bool,
    font_scale: f32,
}

impl TextElement {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            visible: false,
            font_scale: 1.0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn font_scale(&self) -> f32 {
        self.font_scale
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_font_scale(&mut self, scale: f32) {
        self.font_scale = scale;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

impl Default for TextElement {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub message: TextElement,
    pub score: TextElement,
}

impl Hud {
    pub fn new(tuning: &Tuning) -> Self {
        let mut score = TextElement::new();
        if tuning.score_display == ScoreDisplay::Element {
            score.set_text(score_text(0));
            score.show();
        }
        Self {
            message: TextElement::new(),
            score,
        }
    }
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Variant;

    #[test]
    fn test_text_element_defaults() {
        let el = TextElement::new();
        assert!(el.text().is_empty());
        assert!(!el.is_visible());
        assert_eq!(el.font_scale(), 1.0);
    }

    #[test]
    fn test_score_element_visible_only_when_used() {
        let classic = Hud::new(&Variant::Classic.tuning());
        assert!(!classic.score.is_visible());

        let arcade = Hud::new(&Variant::Arcade.tuning());
        assert!(arcade.score.is_visible());
        assert_eq!(arcade.score.text(), "Score: 0");
    }
}
