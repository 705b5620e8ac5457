//! Shared layout pieces for the play screen.

use crate::render::TextElement;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the info panel on the right.
pub const INFO_PANEL_WIDTH: u16 = 22;

/// Layout areas returned by `compute_game_layout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    /// Play field - top left, inside outer border
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Split `area` without drawing anything.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [content area]                │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn compute_game_layout(area: Rect) -> GameLayout {
    let inner = Block::default().borders(Borders::ALL).inner(area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(INFO_PANEL_WIDTH)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Draw the outer border and return the layout inside it.
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    compute_game_layout(area)
}

/// Render a status bar (2 lines: status message + controls).
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(String, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(key.clone(), Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Render an info panel frame with the " Info " title. Returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Text as shown at the element's font scale. Terminals have one font size,
/// so scale 2 and up is approximated with spaced capitals.
pub fn scaled_text(element: &TextElement) -> String {
    if element.font_scale() >= 2.0 {
        element
            .text()
            .to_uppercase()
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        element.text().to_string()
    }
}

/// Centered message box over `area`. Hidden elements draw nothing.
pub fn render_message_overlay(frame: &mut Frame, area: Rect, element: &TextElement) {
    if !element.is_visible() || area.width < 4 || area.height < 3 {
        return;
    }

    let text = scaled_text(element);
    let large = element.font_scale() >= 2.0;
    let box_width = (text.chars().count() as u16 + 6).min(area.width);
    let box_height: u16 = if large { 5 } else { 3 };
    let box_height = box_height.min(area.height);
    let x = area.x + (area.width - box_width) / 2;
    let y = area.y + (area.height - box_height) / 2;
    let box_area = Rect::new(x, y, box_width, box_height);

    frame.render_widget(Clear, box_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let mut style = Style::default().fg(Color::Yellow);
    if large {
        style = style.add_modifier(Modifier::BOLD);
    }
    let top_pad = inner.height.saturating_sub(1) / 2;
    let mut lines = vec![Line::from(""); top_pad as usize];
    lines.push(Line::from(Span::styled(text, style)));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_leaves_room_for_status_and_info() {
        let layout = compute_game_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.info_panel.width, INFO_PANEL_WIDTH);
        assert_eq!(layout.status_bar.height, 2);
        assert_eq!(layout.content.width, 100 - 2 - INFO_PANEL_WIDTH);
        assert_eq!(layout.content.height, 30 - 2 - 2);
    }

    #[test]
    fn test_scaled_text() {
        let mut el = TextElement::new();
        el.set_text("Game over");
        assert_eq!(scaled_text(&el), "Game over");
        el.set_font_scale(2.0);
        assert_eq!(scaled_text(&el), "G A M E   O V E R");
    }
}
