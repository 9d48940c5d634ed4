use serde::Serialize;

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// The clock is running and the array can be changed.
    #[default]
    Playing,
    /// The secret was found. Waiting for the next level or a restart.
    LevelComplete,
    /// The clock ran out. Waiting for a restart.
    GameOver,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Phase::Playing)
    }
}

/// A read-only view of the session, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub level: u32,
    pub score: u32,
    pub time_remaining: u32,
    pub max_time: u32,
    pub phase: Phase,
    pub operations_count: u32,
}

/// How pressed for time the player is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Urgency {
    Calm,
    Warning,
    Critical,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Fraction of the clock used so far, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.max_time == 0 {
            return 1.0;
        }
        f64::from(self.max_time - self.time_remaining) / f64::from(self.max_time)
    }

    pub fn urgency(&self) -> Urgency {
        match self.time_remaining {
            0..=10 => Urgency::Critical,
            11..=30 => Urgency::Warning,
            _ => Urgency::Calm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn state(time_remaining: u32) -> SessionState {
        SessionState {
            level: 1,
            score: 0,
            time_remaining,
            max_time: 60,
            phase: Phase::Playing,
            operations_count: 0,
        }
    }

    #[rstest]
    #[case(60, Urgency::Calm)]
    #[case(31, Urgency::Calm)]
    #[case(30, Urgency::Warning)]
    #[case(11, Urgency::Warning)]
    #[case(10, Urgency::Critical)]
    #[case(0, Urgency::Critical)]
    fn urgency_bands(#[case] time_remaining: u32, #[case] expect: Urgency) {
        assert_eq!(state(time_remaining).urgency(), expect);
    }

    #[test]
    fn progress() {
        assert_eq!(state(60).progress(), 0.0);
        assert_eq!(state(30).progress(), 0.5);
        assert_eq!(state(0).progress(), 1.0);
    }

    #[test]
    fn only_playing_is_active() {
        assert!(state(5).is_active());
        assert!(!Phase::Playing.is_terminal());
        assert!(Phase::LevelComplete.is_terminal());
        assert!(Phase::GameOver.is_terminal());
    }
}
