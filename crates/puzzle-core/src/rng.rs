//! Deterministic random stream for daily puzzle generation.
//!
//! The stream is a Lehmer (Park–Miller) generator: every client seeded with
//! the same day index draws the same sequence, so every player gets the same
//! puzzle. It must never be used for anything but puzzle content.

/// Park–Miller multiplier
const MULTIPLIER: u64 = 16807;
/// Park–Miller modulus (2^31 - 1)
const MODULUS: u64 = 2_147_483_647;

/// Seeded Park–Miller stream producing floats in `[0, 1)`
#[derive(Debug, Clone)]
pub struct DailyRng {
    seed: u64,
}

impl DailyRng {
    /// Create a stream from a seed. Zero is a fixed point of the recurrence,
    /// so it is replaced by one.
    pub fn new(seed: u64) -> Self {
        let seed = seed % MODULUS;
        Self {
            seed: if seed == 0 { 1 } else { seed },
        }
    }

    /// Create a stream seeded from OS entropy, for practice puzzles
    pub fn from_entropy() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: use the clock if getrandom fails
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(1);
            seed_bytes = nanos.to_le_bytes();
        });
        Self::new(u64::from_le_bytes(seed_bytes))
    }

    /// Current internal seed
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance the stream and return the next draw in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.seed = (MULTIPLIER * self.seed) % MODULUS;
        self.seed as f64 / MODULUS as f64
    }

    /// `floor(next() * bound)`, the usual way the puzzles pick an index
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64).floor() as usize
    }

    /// `floor(next() * scale + offset)` as a signed integer
    pub fn scaled(&mut self, scale: f64, offset: f64) -> i32 {
        (self.next_f64() * scale + offset).floor() as i32
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
