//! Shuffle selection
//!
//! "Random without immediate repeat": each pick is uniform over the
//! playlist excluding the current index. There is no play-history memory,
//! so a track can come back sooner than others over a full cycle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random index picker
#[derive(Debug, Clone)]
pub struct ShufflePicker {
    rng: StdRng,
}

impl ShufflePicker {
    /// Seeded picker, or one seeded from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Pick an index in `[0, len)` different from `current` when `len > 1`
    ///
    /// Returns `None` for an empty playlist.
    pub fn pick(&mut self, len: usize, current: Option<usize>) -> Option<usize> {
        match len {
            0 => None,
            1 => Some(0),
            _ => loop {
                let candidate = self.rng.gen_range(0..len);
                if Some(candidate) != current {
                    break Some(candidate);
                }
            },
        }
    }
}

impl Default for ShufflePicker {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn never_repeats_current_index() {
        let mut picker = ShufflePicker::new(Some(7));
        let mut current = 0;

        for _ in 0..500 {
            let next = picker.pick(4, Some(current)).unwrap();
            assert_ne!(next, current);
            assert!(next < 4);
            current = next;
        }
    }

    #[test]
    fn single_track_picks_itself() {
        let mut picker = ShufflePicker::new(Some(1));
        assert_eq!(picker.pick(1, Some(0)), Some(0));
        assert_eq!(picker.pick(0, None), None);
    }

    #[test]
    fn reaches_every_other_index() {
        let mut picker = ShufflePicker::new(Some(42));
        let seen: HashSet<usize> = (0..200).filter_map(|_| picker.pick(5, Some(2))).collect();

        assert_eq!(seen, [0, 1, 3, 4].into_iter().collect());
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ShufflePicker::new(Some(99));
        let mut b = ShufflePicker::new(Some(99));

        for _ in 0..20 {
            assert_eq!(a.pick(10, Some(3)), b.pick(10, Some(3)));
        }
    }
}
