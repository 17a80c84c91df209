//! Linear congruential generator for synthetic benchmark data
//!
//! The generator is the classic 64-bit LCG with modulus 2^63. Every value is
//! produced from the previous state alone, so the same seed gives the same
//! bit-identical sequence on every platform.
//!
//! The state is threaded explicitly. Either call [next_double()] and keep the
//! returned state, or wrap the state in an [Lcg] and let it advance itself.

/// Multiplier of the recurrence `x' = (a * x + c) mod 2^63`
pub const LCG_MULTIPLIER: u64 = 2_806_196_910_506_780_709;

/// Increment of the recurrence `x' = (a * x + c) mod 2^63`
pub const LCG_INCREMENT: u64 = 1;

/// Reduction modulo 2^63 is a mask of the low 63 bits
const MODULUS_MASK: u64 = (1 << 63) - 1;

/// 2^63 as a float, for scaling states into the unit interval
const MODULUS: f64 = 9_223_372_036_854_775_808.0;

/// Advance an LCG state by one step
///
/// Returns the uniform value in `[0, 1)` and the new state.
///
/// ```rust
/// # use xstools_utils::next_double;
/// let (a, state) = next_double(42);
/// let (b, _) = next_double(state);
///
/// assert!((0.0..1.0).contains(&a));
/// assert_ne!(a, b);
///
/// // same state, same value
/// assert_eq!(next_double(42).0, a);
/// ```
pub fn next_double(state: u64) -> (f64, u64) {
    let next = LCG_MULTIPLIER
        .wrapping_mul(state)
        .wrapping_add(LCG_INCREMENT)
        & MODULUS_MASK;
    (next as f64 / MODULUS, next)
}

/// Owned LCG state
///
/// ```rust
/// # use xstools_utils::Lcg;
/// let mut rng = Lcg::new(42);
/// let values: Vec<f64> = (0..6).map(|_| rng.next_f64()).collect();
///
/// let mut replay = Lcg::new(42);
/// assert!(values.iter().all(|v| *v == replay.next_f64()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Start a new stream from `seed`
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Draw the next value in `[0, 1)` and advance the stream
    pub fn next_f64(&mut self) -> f64 {
        let (value, state) = next_double(self.state);
        self.state = state;
        value
    }

    /// Current state, i.e. the seed of the remaining stream
    pub fn state(&self) -> u64 {
        self.state
    }
}
