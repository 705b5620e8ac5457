//! The "yield until the next frame" side of the loop.

use super::clock::ManualClock;
use super::{Command, Session};
use crate::render::Surface;
use std::collections::VecDeque;
use std::io;

/// Presents the finished frame, waits for the next one and returns the
/// input that arrived in between.
pub trait FramePump<S: Surface> {
    fn next_frame(&mut self, surface: &mut S, session: &Session) -> io::Result<Vec<Command>>;
}

/// Headless pump replaying a fixed script. Each frame advances a shared
/// [`ManualClock`] by `frame_ms`; once the script runs out it quits.
#[derive(Debug)]
pub struct ScriptedPump {
    clock: ManualClock,
    frame_ms: u64,
    script: VecDeque<Vec<Command>>,
    frames: u64,
    /// Message text seen at each frame, `None` when hidden.
    pub messages: Vec<Option<String>>,
    /// Score seen at each frame.
    pub scores: Vec<u32>,
}

impl ScriptedPump {
    pub fn new(clock: ManualClock, frame_ms: u64) -> Self {
        Self {
            clock,
            frame_ms,
            script: VecDeque::new(),
            frames: 0,
            messages: Vec::new(),
            scores: Vec::new(),
        }
    }

    /// Queue the input for one frame.
    pub fn then(mut self, commands: Vec<Command>) -> Self {
        self.script.push_back(commands);
        self
    }

    /// Queue `count` frames without input.
    pub fn idle(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.script.push_back(Vec::new());
        }
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<S: Surface> FramePump<S> for ScriptedPump {
    fn next_frame(&mut self, _surface: &mut S, session: &Session) -> io::Result<Vec<Command>> {
        let hud = session.hud();
        self.messages.push(
            hud.message
                .is_visible()
                .then(|| hud.message.text().to_string()),
        );
        self.scores.push(session.world().score);
        self.clock.advance(self.frame_ms);
        self.frames += 1;
        Ok(self.script.pop_front().unwrap_or_else(|| vec![Command::Quit]))
    }
}
