mod config;
mod countdown;
mod digit;
mod engine;
mod events;
mod secret;
mod sequence;
mod session;
mod slots;

pub use config::{Error as ConfigError, GameConfig, PatternConfig, Scoring};
pub use countdown::{Countdown, Tick};
pub use digit::{Digit, Error as DigitError};
pub use engine::{Engine, Error, Outcome};
pub use events::{Event, EventLog, FeedbackKind, GameEvents};
pub use secret::{generate as generate_secret, secret_len};
pub use sequence::{Error as PatternError, Pattern, ScanStep, ScanTiming};
pub use session::{Phase, SessionState, Urgency};
pub use slots::{Error as SlotError, Slot, Slots, CAPACITY};
