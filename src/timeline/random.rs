use crate::effects::transitions::TransitionKind;

/// Injectable source of randomness for uniform-mode transition selection.
///
/// The engine never reaches for an ambient global generator; callers pass a
/// source explicitly so tests can pin outcomes with a fixed seed.
pub trait RandomSource {
    /// Produce the next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform index in `0..bound`. `bound` must be > 0.
    ///
    /// The default modulo mapping carries a bias of at most `bound / 2^64`,
    /// negligible for the small sets drawn here.
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "next_index bound must be > 0");
        (self.next_u64() % bound as u64) as usize
    }

    /// Pick a transition kind uniformly from [`TransitionKind::ALL`].
    fn pick_transition(&mut self) -> TransitionKind {
        TransitionKind::ALL[self.next_index(TransitionKind::ALL.len())]
    }
}

/// SplitMix64 generator (Steele & Lea constants); the default
/// [`RandomSource`].
///
/// Deterministic for a given seed, which keeps quick-mode generation
/// reproducible the same way the composition seed keeps procedural
/// animation reproducible.
#[derive(Clone, Copy, Debug)]
pub struct SplitMix64(u64);

impl SplitMix64 {
    /// Construct a generator from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }
}

impl RandomSource for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/random.rs"]
mod tests;
