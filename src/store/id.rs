use chrono::Timelike;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::Clock;

/// Generates time-based, lexicographically sortable event IDs.
///
/// An ID is `<unix-seconds>-<nanosecond-of-second>-<digit-permutation>`, the
/// first two components zero-padded to 10 digits. IDs therefore sort in
/// creation order whenever two events are created at least a nanosecond
/// apart. The trailing permutation of `0-9` disambiguates creations within
/// the same nanosecond; two such creations drawing the same permutation is an
/// accepted low-probability collision, not a guarded invariant.
///
/// The generator owns its entropy and clock, constructed once at process
/// start, so tests can pin both.
pub struct IdGenerator {
    clock: Clock,
    rng: Mutex<StdRng>,
}

impl IdGenerator {
    /// Seeds the entropy source from the supplied clock.
    pub fn new(clock: Clock) -> Self {
        let seed = clock().timestamp() as u64;

        Self::with_seed(clock, seed)
    }

    /// Fixed-seed constructor for deterministic tests.
    pub fn with_seed(clock: Clock, seed: u64) -> Self {
        Self {
            clock,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn generate(&self) -> String {
        let mut digits = ['0', '9', '8', '7', '6', '5', '4', '3', '2', '1'];
        digits.shuffle(&mut *self.rng.lock());

        let suffix: String = digits.iter().collect();
        let now = (self.clock)();

        format!(
            "{:010}-{:010}-{}",
            now.timestamp(),
            now.nanosecond(),
            suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn fixed_clock() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap()
    }

    #[test]
    fn id_has_expected_shape() {
        let ids = IdGenerator::with_seed(fixed_clock, 7);
        let id = ids.generate();

        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "1700000000");
        assert_eq!(parts[1], "0123456789");

        // The suffix is a permutation of the full digit set.
        let suffix: HashSet<char> = parts[2].chars().collect();
        assert_eq!(parts[2].len(), 10);
        assert_eq!(suffix.len(), 10);
        assert!(suffix.iter().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn ids_differ_within_the_same_instant() {
        let ids = IdGenerator::with_seed(fixed_clock, 7);

        let generated: HashSet<String> = (0..50).map(|_| ids.generate()).collect();
        assert!(generated.len() > 1);
    }

    #[test]
    fn ids_sort_by_creation_time() {
        let earlier = IdGenerator::new(|| Utc.timestamp_opt(1_700_000_000, 5).unwrap());
        let later = IdGenerator::new(|| Utc.timestamp_opt(1_700_000_000, 6).unwrap());

        assert!(earlier.generate() < later.generate());

        let much_later = IdGenerator::new(|| Utc.timestamp_opt(1_800_000_000, 0).unwrap());
        assert!(later.generate() < much_later.generate());
    }
}
