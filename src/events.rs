use crate::slots::Slots;

/// Tone of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
}

/// Receives everything the engine wants shown to the player.
///
/// Every method defaults to doing nothing, so implementors pick what they render.
pub trait GameEvents {
    fn on_array_changed(&mut self, _slots: &Slots) {}

    fn on_feedback(&mut self, _message: &str, _kind: FeedbackKind) {}

    fn on_level_complete(&mut self, _time_used_secs: u32, _score: u32) {}

    fn on_game_over(&mut self, _score: u32) {}

    fn on_tick(&mut self, _time_remaining: u32) {}
}

/// Discards every event.
impl GameEvents for () {}

impl<T> GameEvents for &mut T
where
    T: GameEvents + ?Sized,
{
    fn on_array_changed(&mut self, slots: &Slots) {
        (**self).on_array_changed(slots)
    }

    fn on_feedback(&mut self, message: &str, kind: FeedbackKind) {
        (**self).on_feedback(message, kind)
    }

    fn on_level_complete(&mut self, time_used_secs: u32, score: u32) {
        (**self).on_level_complete(time_used_secs, score)
    }

    fn on_game_over(&mut self, score: u32) {
        (**self).on_game_over(score)
    }

    fn on_tick(&mut self, time_remaining: u32) {
        (**self).on_tick(time_remaining)
    }
}

/// One emitted event, as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ArrayChanged(Slots),
    Feedback { message: String, kind: FeedbackKind },
    LevelComplete { time_used_secs: u32, score: u32 },
    GameOver { score: u32 },
    Tick { time_remaining: u32 },
}

/// Records every event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog(Vec<Event>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.0
    }

    /// Hand back everything recorded so far, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.0)
    }

    /// The most recent feedback message, if any.
    pub fn last_feedback(&self) -> Option<(&str, FeedbackKind)> {
        self.0.iter().rev().find_map(|event| match event {
            Event::Feedback { message, kind } => Some((message.as_str(), *kind)),
            _ => None,
        })
    }
}

impl GameEvents for EventLog {
    fn on_array_changed(&mut self, slots: &Slots) {
        self.0.push(Event::ArrayChanged(*slots));
    }

    fn on_feedback(&mut self, message: &str, kind: FeedbackKind) {
        self.0.push(Event::Feedback {
            message: message.to_owned(),
            kind,
        });
    }

    fn on_level_complete(&mut self, time_used_secs: u32, score: u32) {
        self.0.push(Event::LevelComplete {
            time_used_secs,
            score,
        });
    }

    fn on_game_over(&mut self, score: u32) {
        self.0.push(Event::GameOver { score });
    }

    fn on_tick(&mut self, time_remaining: u32) {
        self.0.push(Event::Tick { time_remaining });
    }
}
