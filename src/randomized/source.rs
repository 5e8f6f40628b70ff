use log::debug;
use rand::{self, Rng, SeedableRng, XorShiftRng};

/// A source of priorities for a `RandomizedTreap`.
pub trait RandomSource {
    /// Returns a value drawn uniformly from `[0, 1)`.
    fn next_priority(&mut self) -> f64;

    /// Resets the source so that it produces a reproducible sequence determined by `seed`.
    fn seed(&mut self, seed: u64);
}

/// A `RandomSource` backed by a xorshift generator.
///
/// # Examples
///
/// ```
/// use priority_treap::randomized::{RandomSource, XorShiftSource};
///
/// let mut a = XorShiftSource::with_seed(7);
/// let mut b = XorShiftSource::new();
/// b.seed(7);
///
/// let priority = a.next_priority();
/// assert!(0.0 <= priority && priority < 1.0);
/// assert_eq!(priority, b.next_priority());
/// ```
pub struct XorShiftSource {
    rng: XorShiftRng,
}

// Spreads a 64-bit seed over the 128-bit generator state with splitmix64 steps. The generator
// rejects an all-zero state.
fn expand_seed(seed: u64) -> [u32; 4] {
    let mut state = seed;
    let mut words = [0u32; 4];
    for pair in words.chunks_mut(2) {
        state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        pair[0] = z as u32;
        pair[1] = (z >> 32) as u32;
    }
    if words.iter().all(|&word| word == 0) {
        words[0] = 1;
    }
    words
}

impl XorShiftSource {
    /// Constructs a source seeded from the thread-local generator.
    pub fn new() -> Self {
        XorShiftSource {
            rng: rand::weak_rng(),
        }
    }

    /// Constructs a source that produces the sequence determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        XorShiftSource {
            rng: XorShiftRng::from_seed(expand_seed(seed)),
        }
    }
}

impl RandomSource for XorShiftSource {
    fn next_priority(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn seed(&mut self, seed: u64) {
        debug!("reseeding xorshift priority source with {}", seed);
        self.rng.reseed(expand_seed(seed));
    }
}

impl Default for XorShiftSource {
    fn default() -> Self {
        Self::new()
    }
}
