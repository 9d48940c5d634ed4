use std::{fmt, ops::Range, str::FromStr, time::Duration};

use crate::{
    digit::Digit,
    slots::{Slot, CAPACITY},
};

/// A non-empty run of digits to look for in the slot array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(Vec<Digit>);

impl Pattern {
    /// Validate a raw digit sequence.
    ///
    /// It must hold between 1 and [`CAPACITY`] values, each in `0..=9`.
    pub fn new(values: &[u8]) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::Empty);
        }
        if values.len() > CAPACITY {
            return Err(Error::TooLong {
                len: values.len(),
                max: CAPACITY,
            });
        }
        let digits = values
            .iter()
            .map(|&value| Digit::new(value).map_err(|_| Error::OutOfRange(value.to_string())))
            .collect::<Result<_, _>>()?;
        Ok(Self(digits))
    }

    pub(crate) fn from_digits(digits: Vec<Digit>) -> Self {
        debug_assert!(!digits.is_empty() && digits.len() <= CAPACITY);
        Self(digits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a pattern holds at least one digit.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digits(&self) -> &[Digit] {
        &self.0
    }

    /// Start indices of every window a left-to-right scan of `haystack` visits.
    fn windows(&self, haystack: &[Slot]) -> Range<usize> {
        0..(haystack.len() + 1).saturating_sub(self.len())
    }

    fn matches_at(&self, haystack: &[Slot], start: usize) -> bool {
        self.0
            .iter()
            .zip(&haystack[start..])
            .all(|(want, have)| *have == Some(*want))
    }

    /// Lowest start index at which this pattern appears contiguously in `haystack`.
    ///
    /// Empty slots match nothing.
    pub fn find(&self, haystack: &[Slot]) -> Option<usize> {
        self.windows(haystack)
            .find(|&start| self.matches_at(haystack, start))
    }

    /// `true` when this pattern appears somewhere in `haystack`.
    pub fn is_matched(&self, haystack: &[Slot]) -> bool {
        self.find(haystack).is_some()
    }

    /// The windows a visual scan would highlight, in order, ending at the first match.
    ///
    /// This is for presentation only: the last step is matched exactly when
    /// [`find`][Self::find] returns `Some`, at the same index.
    pub fn scan(&self, haystack: &[Slot]) -> Vec<ScanStep> {
        let mut steps = Vec::new();
        for start in self.windows(haystack) {
            let matched = self.matches_at(haystack, start);
            steps.push(ScanStep {
                start,
                len: self.len(),
                matched,
            });
            if matched {
                break;
            }
        }
        steps
    }
}

impl FromStr for Pattern {
    type Err = Error;

    /// Parse comma-separated digits, e.g. `"2, 1, 4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Empty);
        }
        let values = s
            .split(',')
            .map(str::trim)
            .map(|item| {
                item.parse::<u8>()
                    .map_err(|_| Error::OutOfRange(item.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&values)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, digit) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{digit}")?;
        }
        f.write_str("]")
    }
}

/// One highlighted window of a visual search scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStep {
    pub start: usize,
    pub len: usize,
    pub matched: bool,
}

/// Pacing for animating a [`Pattern::scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTiming {
    /// How long each window stays highlighted.
    pub highlight: Duration,
    /// Pause between a non-matching window and the next.
    pub gap: Duration,
}

impl Default for ScanTiming {
    fn default() -> Self {
        Self {
            highlight: Duration::from_millis(300),
            gap: Duration::from_millis(200),
        }
    }
}

impl ScanTiming {
    /// Wall time an animation of `steps` takes to play out.
    pub fn total(&self, steps: &[ScanStep]) -> Duration {
        steps
            .iter()
            .map(|step| {
                if step.matched {
                    self.highlight
                } else {
                    self.highlight + self.gap
                }
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("pattern must contain at least one digit")]
    Empty,
    #[error("pattern of length {len} is longer than the array ({max})")]
    TooLong { len: usize, max: usize },
    #[error("\"{0}\" is not a digit between 0 and 9")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn haystack(pattern: &str) -> Vec<Slot> {
        pattern
            .chars()
            .map(|ch| ch.to_digit(10).map(|value| Digit::new(value as u8).unwrap()))
            .collect()
    }

    fn pattern(values: &[u8]) -> Pattern {
        Pattern::new(values).unwrap()
    }

    #[rstest]
    #[case("1212______", &[1, 2], Some(0))]
    #[case("_37_______", &[3, 7], Some(1))]
    #[case("__________", &[0], None)]
    #[case("0123456789", &[7, 8, 9], Some(7))]
    #[case("0123456789", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], Some(0))]
    #[case("012345678_", &[8, 9], None)]
    #[case("3_7_______", &[3, 7], None)]
    #[case("________12", &[1, 2], Some(8))]
    fn find(#[case] hay: &str, #[case] needle: &[u8], #[case] expect: Option<usize>) {
        let hay = haystack(hay);
        let needle = pattern(needle);
        assert_eq!(needle.find(&hay), expect);
        // repeated lookups agree
        assert_eq!(needle.find(&hay), expect);
        assert_eq!(needle.is_matched(&hay), expect.is_some());
    }

    #[test]
    fn needle_longer_than_haystack_is_not_found() {
        let hay = haystack("12");
        assert_eq!(pattern(&[1, 2, 3]).find(&hay), None);
        assert!(pattern(&[1, 2, 3]).scan(&hay).is_empty());
    }

    #[test]
    fn scan_stops_at_first_match() {
        let hay = haystack("__1212____");
        let steps = pattern(&[1, 2]).scan(&hay);
        assert_eq!(steps.len(), 3);
        assert!(steps[..2].iter().all(|step| !step.matched));
        assert_eq!(
            steps.last(),
            Some(&ScanStep {
                start: 2,
                len: 2,
                matched: true
            })
        );
    }

    #[test]
    fn scan_without_match_visits_every_window() {
        let hay = haystack("__________");
        let steps = pattern(&[4, 4, 4]).scan(&hay);
        assert_eq!(steps.len(), 8);
        assert!(steps.iter().all(|step| !step.matched));
        assert_eq!(
            ScanTiming::default().total(&steps),
            Duration::from_millis(8 * 500)
        );
    }

    #[rstest]
    #[case("2,1,4", Ok(&[2, 1, 4][..]))]
    #[case(" 7 , 0 ", Ok(&[7, 0][..]))]
    #[case("", Err(Error::Empty))]
    #[case("   ", Err(Error::Empty))]
    #[case("1,,2", Err(Error::OutOfRange(String::new())))]
    #[case("1,x", Err(Error::OutOfRange("x".into())))]
    #[case("1,10", Err(Error::OutOfRange("10".into())))]
    #[case("-1", Err(Error::OutOfRange("-1".into())))]
    #[case("1,2,3,4,5,6,7,8,9,0,1", Err(Error::TooLong { len: 11, max: CAPACITY }))]
    fn parse(#[case] input: &str, #[case] expect: Result<&[u8], Error>) {
        let expect = expect.map(pattern);
        assert_eq!(input.parse::<Pattern>(), expect);
    }

    #[test]
    fn display() {
        assert_eq!(pattern(&[2, 1, 4]).to_string(), "[2,1,4]");
    }
}
