use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{self, GameConfig},
    countdown::{Countdown, Tick},
    digit::{self, Digit},
    events::{FeedbackKind, GameEvents},
    secret,
    sequence::{self, Pattern, ScanStep},
    session::{Phase, SessionState},
    slots::{self, Slot, Slots, CAPACITY},
};

/// What a successful command produced, and the phase the game is in afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub phase: Phase,
}

/// The code breaker game: slot array, hidden secret, score and clock.
///
/// Every command runs to completion synchronously. Commands that change the
/// array are followed by a check for the secret; finding it completes the
/// level. The clock advances only through [`tick`][Engine::tick].
///
/// Rejected commands leave the array and the session untouched and report
/// the reason through [`GameEvents::on_feedback`].
pub struct Engine<E = (), R = StdRng> {
    config: GameConfig,
    slots: Slots,
    secret: Pattern,
    countdown: Countdown,
    level: u32,
    score: u32,
    operations: u32,
    phase: Phase,
    rng: R,
    events: E,
}

impl<E> Engine<E, StdRng>
where
    E: GameEvents,
{
    /// Start a game at level 1, drawing secrets from an OS-seeded generator.
    pub fn new(config: GameConfig, events: E) -> Result<Self, Error> {
        Self::with_rng(config, events, StdRng::from_os_rng())
    }
}

impl<E, R> Engine<E, R>
where
    E: GameEvents,
    R: Rng,
{
    /// Start a game at level 1 with the given random source.
    pub fn with_rng(config: GameConfig, events: E, mut rng: R) -> Result<Self, Error> {
        config.validate()?;
        let secret = secret::generate(&config.pattern, 1, &mut rng);
        let mut countdown = Countdown::new(config.max_time_secs);
        countdown.start();
        info!(secret_len = secret.len(), "starting game");
        Ok(Self {
            config,
            slots: Slots::new(),
            secret,
            countdown,
            level: 1,
            score: 0,
            operations: 0,
            phase: Phase::Playing,
            rng,
            events,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> [Slot; CAPACITY] {
        self.slots.snapshot()
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn session(&self) -> SessionState {
        SessionState {
            level: self.level,
            score: self.score,
            time_remaining: self.countdown.remaining(),
            max_time: self.countdown.max(),
            phase: self.phase,
            operations_count: self.operations,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// How many digits the secret has. The digits themselves stay hidden.
    pub fn secret_len(&self) -> usize {
        self.secret.len()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn into_events(self) -> E {
        self.events
    }

    /// The windows a visual scan for `pattern` would highlight.
    ///
    /// Purely presentational; this never changes any state.
    pub fn scan(&self, pattern: &[u8]) -> Result<Vec<ScanStep>, Error> {
        let pattern = Pattern::new(pattern)?;
        Ok(pattern.scan(self.slots.as_slice()))
    }

    // ─────────────────────────────────────────────────────────────
    //  Array commands
    // ─────────────────────────────────────────────────────────────

    /// Shift-insert `value` at `index`. Occupied targets are shifted, never refused.
    ///
    /// Returns the digit pushed off the end of the array, if any.
    #[instrument(skip(self))]
    pub fn insert(&mut self, index: usize, value: u8) -> Result<Outcome<Slot>, Error> {
        self.try_insert(index, value).or_else(|err| self.reject("insert", err))
    }

    fn try_insert(&mut self, index: usize, value: u8) -> Result<Outcome<Slot>, Error> {
        self.ensure_phase("insert", Phase::Playing)?;
        Slots::<CAPACITY>::check_bounds(index)?;
        let digit = Digit::new(value)?;
        // the following line modifies self, so we can't fail past that point
        let discarded = self.slots.insert_at(index, digit)?;
        debug!(index, %digit, ?discarded, "inserted");

        self.events.on_array_changed(&self.slots);
        self.events.on_feedback(
            &format!("Inserted {digit} at index {index}!"),
            FeedbackKind::Success,
        );
        let phase = self.finish_operation(self.config.scoring.insert);
        Ok(Outcome {
            value: discarded,
            phase,
        })
    }

    /// Shift-insert a random digit at `index`, refusing if that slot is occupied.
    ///
    /// Returns the digit inserted.
    #[instrument(skip(self))]
    pub fn quick_insert(&mut self, index: usize) -> Result<Outcome<Digit>, Error> {
        self.try_quick_insert(index)
            .or_else(|err| self.reject("quick insert", err))
    }

    fn try_quick_insert(&mut self, index: usize) -> Result<Outcome<Digit>, Error> {
        self.ensure_phase("quick insert", Phase::Playing)?;
        Slots::<CAPACITY>::check_bounds(index)?;
        let digit = Digit::random(&mut self.rng);
        self.slots.quick_insert_at(index, digit)?;
        debug!(index, %digit, "quick inserted");

        self.events.on_array_changed(&self.slots);
        self.events.on_feedback(
            &format!("Quick inserted {digit} at index {index}!"),
            FeedbackKind::Success,
        );
        let phase = self.finish_operation(self.config.scoring.quick_insert);
        Ok(Outcome {
            value: digit,
            phase,
        })
    }

    /// Shift-delete the digit at `index`, returning it.
    #[instrument(skip(self))]
    pub fn delete(&mut self, index: usize) -> Result<Outcome<Digit>, Error> {
        self.try_delete(index).or_else(|err| self.reject("delete", err))
    }

    fn try_delete(&mut self, index: usize) -> Result<Outcome<Digit>, Error> {
        self.ensure_phase("delete", Phase::Playing)?;
        let removed = self.slots.delete_at(index)?;
        debug!(index, %removed, "deleted");

        self.events.on_array_changed(&self.slots);
        self.events.on_feedback(
            &format!("Deleted element {removed} at index {index}!"),
            FeedbackKind::Info,
        );
        let phase = self.finish_operation(self.config.scoring.delete);
        Ok(Outcome {
            value: removed,
            phase,
        })
    }

    /// Empty every slot. Allowed in any phase; the session is not touched.
    #[instrument(skip(self))]
    pub fn reset_array(&mut self) {
        self.slots.reset();
        debug!("array reset");
        self.events.on_array_changed(&self.slots);
        self.events.on_feedback("Array reset!", FeedbackKind::Info);
    }

    // ─────────────────────────────────────────────────────────────
    //  Search
    // ─────────────────────────────────────────────────────────────

    /// Look for `pattern` in the array, returning the lowest matching index.
    ///
    /// A search that finds nothing still counts as an operation but scores nothing.
    #[instrument(skip(self))]
    pub fn search(&mut self, pattern: &[u8]) -> Result<Outcome<Option<usize>>, Error> {
        self.ensure_phase("search", Phase::Playing)
            .and_then(|()| Pattern::new(pattern).map_err(Error::from))
            .map(|pattern| self.run_search(&pattern))
            .or_else(|err| self.reject("search", err))
    }

    /// As [`search`][Self::search], parsing comma-separated digits such as `"2, 1, 4"`.
    #[instrument(skip(self))]
    pub fn search_text(&mut self, input: &str) -> Result<Outcome<Option<usize>>, Error> {
        self.ensure_phase("search", Phase::Playing)
            .and_then(|()| input.parse::<Pattern>().map_err(Error::from))
            .map(|pattern| self.run_search(&pattern))
            .or_else(|err| self.reject("search", err))
    }

    fn run_search(&mut self, pattern: &Pattern) -> Outcome<Option<usize>> {
        let found = pattern.find(self.slots.as_slice());
        debug!(%pattern, ?found, "searched");
        let phase = match found {
            Some(index) => {
                self.events.on_feedback(
                    &format!("Pattern {pattern} found at index {index}!"),
                    FeedbackKind::Success,
                );
                self.finish_operation(self.config.scoring.search_found)
            }
            None => {
                self.events.on_feedback(
                    &format!("Pattern {pattern} not found!"),
                    FeedbackKind::Info,
                );
                self.operations += 1;
                self.phase
            }
        };
        Outcome {
            value: found,
            phase,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Level transitions
    // ─────────────────────────────────────────────────────────────

    /// Move on from a completed level.
    #[instrument(skip(self))]
    pub fn advance_level(&mut self) -> Result<u32, Error> {
        match self.ensure_phase("advance level", Phase::LevelComplete) {
            Ok(()) => Ok(self.next_level()),
            Err(err) => self.reject("advance level", err),
        }
    }

    /// Start the next level now. While playing, this skips the current level
    /// without a bonus. Not available once the game is over.
    #[instrument(skip(self))]
    pub fn start_new_level(&mut self) -> Result<u32, Error> {
        if self.phase == Phase::GameOver {
            let err = Error::WrongPhase {
                command: "start a new level",
                phase: self.phase,
            };
            return self.reject("start new level", err);
        }
        Ok(self.next_level())
    }

    /// Throw away all progress and start again at level 1.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.score = 0;
        self.operations = 0;
        self.begin_level(1);
        info!("game restarted");
        self.events.on_feedback("Game restarted!", FeedbackKind::Info);
    }

    /// Advance the clock by one second.
    ///
    /// Ignored unless playing. Running out of time ends the game.
    pub fn tick(&mut self) -> Tick {
        let tick = self.countdown.tick();
        match tick {
            Tick::Ignored => {}
            Tick::Running(remaining) => self.events.on_tick(remaining),
            Tick::Expired => {
                self.events.on_tick(0);
                self.game_over();
            }
        }
        tick
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn ensure_phase(&self, command: &'static str, wanted: Phase) -> Result<(), Error> {
        if self.phase == wanted {
            Ok(())
        } else {
            Err(Error::WrongPhase {
                command,
                phase: self.phase,
            })
        }
    }

    fn reject<T>(&mut self, command: &'static str, err: Error) -> Result<T, Error> {
        warn!(command, %err, "command rejected");
        self.events.on_feedback(&err.to_string(), FeedbackKind::Error);
        Err(err)
    }

    /// Count and score a successful operation, then look for the secret.
    fn finish_operation(&mut self, points: u32) -> Phase {
        self.operations += 1;
        self.score = self.score.saturating_add(points);
        if let Some(index) = self.secret.find(self.slots.as_slice()) {
            self.complete_level(index);
        }
        self.phase
    }

    fn complete_level(&mut self, found_at: usize) {
        self.countdown.stop();
        let time_used = self.countdown.elapsed();
        let bonus = self
            .countdown
            .remaining()
            .saturating_mul(self.config.time_bonus_multiplier);
        self.score = self.score.saturating_add(bonus);
        self.phase = Phase::LevelComplete;
        info!(
            level = self.level,
            found_at,
            time_used,
            bonus,
            score = self.score,
            "level complete"
        );

        self.events
            .on_feedback("LEVEL COMPLETE! Code cracked!", FeedbackKind::Success);
        self.events.on_level_complete(time_used, self.score);
    }

    fn game_over(&mut self) {
        self.countdown.stop();
        self.phase = Phase::GameOver;
        info!(level = self.level, score = self.score, "time's up");

        self.events.on_feedback("TIME'S UP!", FeedbackKind::Error);
        self.events.on_game_over(self.score);
    }

    fn next_level(&mut self) -> u32 {
        let level = self.begin_level(self.level.saturating_add(1));
        self.events
            .on_feedback(&format!("Starting Level {level}!"), FeedbackKind::Info);
        level
    }

    fn begin_level(&mut self, level: u32) -> u32 {
        self.level = level;
        self.secret = secret::generate(&self.config.pattern, level, &mut self.rng);
        self.slots.reset();
        self.countdown.start();
        self.phase = Phase::Playing;
        info!(level, secret_len = self.secret.len(), "level started");

        self.events.on_array_changed(&self.slots);
        level
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Value(#[from] digit::Error),
    #[error(transparent)]
    Slot(#[from] slots::Error),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] sequence::Error),
    #[error(transparent)]
    Config(#[from] config::Error),
    #[error("cannot {command} while the game is in phase {phase:?}")]
    WrongPhase { command: &'static str, phase: Phase },
}
