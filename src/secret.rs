use rand::Rng;

use crate::{config::PatternConfig, digit::Digit, sequence::Pattern};

/// Number of digits in the secret for `level`.
///
/// Grows by one per level from `base_len + 1`, capped at `max_len`.
pub fn secret_len(config: &PatternConfig, level: u32) -> usize {
    let level = usize::try_from(level).unwrap_or(usize::MAX);
    config.base_len.saturating_add(level).min(config.max_len)
}

/// Draw a fresh secret for `level`: each digit independently uniform in `0..=9`.
pub fn generate<R>(config: &PatternConfig, level: u32, rng: &mut R) -> Pattern
where
    R: Rng + ?Sized,
{
    let digits = (0..secret_len(config, level))
        .map(|_| Digit::random(&mut *rng))
        .collect();
    Pattern::from_digits(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    #[rstest]
    #[case(1, 3)]
    #[case(2, 4)]
    #[case(3, 4)]
    #[case(50, 4)]
    #[case(u32::MAX, 4)]
    fn length_grows_then_caps(#[case] level: u32, #[case] len: usize) {
        let config = PatternConfig::default();
        assert_eq!(secret_len(&config, level), len);

        let mut rng = StdRng::seed_from_u64(u64::from(level));
        assert_eq!(generate(&config, level, &mut rng).len(), len);
    }

    #[test]
    fn same_seed_same_secret() {
        let config = PatternConfig::default();
        let a = generate(&config, 2, &mut StdRng::seed_from_u64(7));
        let b = generate(&config, 2, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn every_digit_shows_up() {
        let config = PatternConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 10];
        for _ in 0..200 {
            for digit in generate(&config, 3, &mut rng).digits() {
                seen[usize::from(digit.get())] = true;
            }
        }
        assert!(seen.iter().all(|seen| *seen));
    }
}
