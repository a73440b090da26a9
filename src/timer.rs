/// Per-move countdown, counted in whole seconds.
///
/// A session owns exactly one of these; restarting replaces the window rather
/// than stacking a second one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
        }
    }

    pub fn restart(&mut self) {
        self.remaining = self.duration;
    }

    /// Advance one second. Returns true when the window just ran out.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }
}
