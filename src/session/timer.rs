//! One-shot delayed action that can be cancelled before it fires.

#[derive(Debug, Clone, PartialEq)]
pub struct Delayed<T> {
    pending: Option<(u64, T)>,
}

impl<T> Delayed<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Arm the timer, replacing anything already pending.
    pub fn schedule(&mut self, due_ms: u64, value: T) {
        self.pending = Some((due_ms, value));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire if due. A fired timer is disarmed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some((due, _)) if now_ms >= due => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }
}

impl<T> Default for Delayed<T> {
    fn default() -> Self {
        Self::new()
    }
}
