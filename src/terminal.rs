//! Crossterm-backed frame pump: presents the canvas through ratatui, paces
//! frames and collects keyboard input between them.

use crate::input::{map_key_event, KeyBindings};
use crate::render::CellCanvas;
use crate::session::{Command, FramePump, Session};
use crate::ui::{compute_game_layout, render_play_scene};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::debug;

/// Logical pixels per terminal column for viewport-sized surfaces.
pub const PIXELS_PER_COL: f64 = 10.0;
/// Logical pixels per terminal row. Cells are about twice as tall as wide.
pub const PIXELS_PER_ROW: f64 = 20.0;

const MIN_COLS: u16 = 20;
const MIN_ROWS: u16 = 8;

/// Logical surface size matching a play area of `area` cells.
pub fn viewport_logical_size(area: Rect) -> (f64, f64) {
    (
        area.width.max(MIN_COLS) as f64 * PIXELS_PER_COL,
        area.height.max(MIN_ROWS) as f64 * PIXELS_PER_ROW,
    )
}

pub struct TerminalPump {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    bindings: KeyBindings,
    frame: Duration,
    deadline: Instant,
}

impl TerminalPump {
    /// Switch the terminal into raw mode on the alternate screen. The
    /// previous state comes back when the pump is dropped.
    pub fn enter(bindings: KeyBindings, frame_ms: u64) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
                let _ = disable_raw_mode();
                return Err(e);
            }
        };
        let frame = Duration::from_millis(frame_ms);
        Ok(Self {
            terminal,
            bindings,
            frame,
            deadline: Instant::now() + frame,
        })
    }

    /// Cells available for the play field at the current terminal size.
    pub fn play_area(&self) -> io::Result<Rect> {
        Ok(compute_game_layout(self.terminal.size()?).content)
    }

    fn collect_input(&mut self, canvas: &mut CellCanvas) -> io::Result<Vec<Command>> {
        let mut commands = Vec::new();
        loop {
            let now = Instant::now();
            if now >= self.deadline {
                break;
            }
            if !event::poll(self.deadline - now)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if let Some(command) = map_key_event(&key, &self.bindings) {
                        let quit = command == Command::Quit;
                        commands.push(command);
                        if quit {
                            break;
                        }
                    }
                }
                Event::Resize(cols, rows) => {
                    let area = compute_game_layout(Rect::new(0, 0, cols, rows)).content;
                    debug!(cols = area.width, rows = area.height, "play area resized");
                    canvas.resize(area.width, area.height);
                    commands.push(Command::Redraw);
                }
                _ => {}
            }
        }

        // Fall back to "now" rather than racing to catch up after a stall.
        self.deadline += self.frame;
        let now = Instant::now();
        if self.deadline < now {
            self.deadline = now + self.frame;
        }
        Ok(commands)
    }
}

impl FramePump<CellCanvas> for TerminalPump {
    fn next_frame(&mut self, canvas: &mut CellCanvas, session: &Session) -> io::Result<Vec<Command>> {
        let bindings = self.bindings;
        self.terminal
            .draw(|f| render_play_scene(f, f.size(), canvas, session, &bindings))?;
        self.collect_input(canvas)
    }
}

impl Drop for TerminalPump {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        );
    }
}
