//! The play screen: canvas, message overlay, status bar and info panel.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_message_overlay, render_status_bar,
};
use crate::input::KeyBindings;
use crate::render::CellCanvas;
use crate::session::{Phase, Session};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_play_scene(
    frame: &mut Frame,
    area: Rect,
    canvas: &CellCanvas,
    session: &Session,
    bindings: &KeyBindings,
) {
    let world = session.world();
    let layout = create_game_layout(frame, area, world.tuning.title, Color::Cyan);

    frame.render_widget(Paragraph::new(canvas.to_lines()), layout.content);
    render_message_overlay(frame, layout.content, &session.hud().message);

    let score = &session.hud().score;
    let (status, color) = if score.is_visible() {
        (score.text().to_string(), Color::Green)
    } else if session.phase() == Phase::Running {
        ("Flying".to_string(), Color::Green)
    } else {
        (format!("Press [{}] to start", bindings.start), Color::Yellow)
    };
    render_status_bar(frame, layout.status_bar, &status, color, &bindings.controls());

    render_info_panel(frame, layout.info_panel, session);
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &Session) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let world = session.world();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", world.tuning.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                world.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Time:  ", label),
            Span::styled(format!("{:.1}s", world.age as f64 / 1000.0), value),
        ]),
        Line::from(vec![
            Span::styled(" Games: ", label),
            Span::styled(session.sessions_played().to_string(), value),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
