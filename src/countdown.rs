/// A once-per-second countdown that can be stopped and restarted.
///
/// The countdown never schedules anything itself: whoever drives the game
/// calls [`tick`][Countdown::tick] once per elapsed second. While stopped,
/// ticks are ignored, so a stale driver can never run a second clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    max: u32,
    remaining: u32,
    running: bool,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The countdown was not running; nothing changed.
    Ignored,
    /// One second elapsed; this many remain.
    Running(u32),
    /// The last second elapsed. The countdown has stopped itself.
    Expired,
}

impl Countdown {
    /// A stopped countdown with a full clock.
    pub fn new(max: u32) -> Self {
        Self {
            max,
            remaining: max,
            running: false,
        }
    }

    /// Cancel any current run, refill the clock, and start counting.
    pub fn start(&mut self) {
        self.stop();
        self.remaining = self.max;
        self.running = true;
    }

    /// Stop counting. Stopping a stopped countdown does nothing.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Seconds used so far in the current run.
    pub fn elapsed(&self) -> u32 {
        self.max - self.remaining
    }
}
