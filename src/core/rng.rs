//! Seeded random source for deck shuffles and match ids.
//!
//! Nothing in the engine touches ambient randomness. A match owns one
//! `GameRng`; replaying a match from the same seed and the same action
//! sequence reproduces every shuffle.
//!
//! ```
//! use shield_duel::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let mut left = vec![1, 2, 3, 4, 5];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::entity::InstanceId;
use crate::zones::ZoneCards;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Derive an independent stream for one purpose without advancing
    /// this one. The match id comes from the `"game-id"` stream.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);

        Self::new(hasher.finish())
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Return a shuffled copy of a zone.
    #[must_use]
    pub fn shuffled(&mut self, zone: &ZoneCards) -> ZoneCards {
        let mut cards: Vec<InstanceId> = zone.iter().copied().collect();
        self.shuffle(&mut cards);
        cards.into_iter().collect()
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG position.
///
/// The ChaCha8 word position restores the stream in O(1) no matter how
/// many values were drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

impl Serialize for GameRng {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        GameRngState::deserialize(deserializer).map(|state| GameRng::from_state(&state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.next_u64()).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_contexts_are_independent() {
        let rng = GameRng::new(42);
        let mut deck0 = rng.for_context("deck-0");
        let mut deck1 = rng.for_context("deck-1");

        assert_ne!(deck0.next_u64(), deck1.next_u64());

        let mut again = GameRng::new(42).for_context("deck-0");
        let mut deck0_fresh = rng.for_context("deck-0");
        assert_eq!(again.next_u64(), deck0_fresh.next_u64());
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=20).collect();
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffled_zone_keeps_cards() {
        let zone: ZoneCards = (0..12).map(InstanceId).collect();
        let mut a = GameRng::new(5);
        let mut b = GameRng::new(5);

        let shuffled = a.shuffled(&zone);

        assert_eq!(shuffled, b.shuffled(&zone));
        assert_eq!(shuffled.len(), 12);
        assert!(zone.iter().all(|id| shuffled.contains(id)));
    }

    #[test]
    fn test_state_round_trip_continues_stream() {
        let mut rng = GameRng::new(42);
        for _ in 0..37 {
            rng.next_u64();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.next_u64()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.next_u64()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_serde_uses_state() {
        let mut rng = GameRng::new(9);
        rng.next_u64();

        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: GameRng = serde_json::from_str(&json).unwrap();

        assert_eq!(rng.next_u64(), restored.next_u64());
    }
}
