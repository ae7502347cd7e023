//! Seeded sequence generator backing all level-generation randomness.

const MULTIPLIER: u64 = 9_301;
const INCREMENT: u64 = 49_297;
const MODULUS: u64 = 233_280;

/// Reproducible pseudo-random sequence constructed from an integer seed.
///
/// The state advances through a linear congruential recurrence evaluated in
/// exact integer arithmetic, so a given seed yields a bit-identical sequence
/// on every platform. Floating point only enters when scaling the advanced
/// state into the unit interval.
#[derive(Clone, Debug)]
pub struct SequenceGenerator {
    state: u64,
}

impl SequenceGenerator {
    /// Creates a generator from any integer seed.
    ///
    /// Negative seeds are normalized into the generator's modulus, so every
    /// `i64` value produces a defined sequence.
    #[must_use]
    pub fn new(seed: i64) -> Self {
        Self {
            state: seed.rem_euclid(MODULUS as i64) as u64,
        }
    }

    /// Advances the recurrence and returns the next value in `[0, 1)`.
    #[must_use]
    pub fn next_unit(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Uniform integer draw in `[min, max_exclusive)`.
    #[must_use]
    pub fn range_int(&mut self, min: usize, max_exclusive: usize) -> usize {
        let span = (max_exclusive - min) as f64;
        (self.next_unit() * span) as usize + min
    }

    /// Shuffles the slice in place with Fisher-Yates, one draw per swap.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        for upper in (1..values.len()).rev() {
            let chosen = (self.next_unit() * (upper as f64 + 1.0)) as usize;
            values.swap(upper, chosen);
        }
    }
}
