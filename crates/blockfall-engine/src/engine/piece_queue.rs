use std::collections::VecDeque;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::PieceKind;

/// Lookahead queue of upcoming pieces.
///
/// Every kind is drawn uniformly at random from the queue's own generator.
/// Popping the head appends one freshly drawn kind, so the number of visible
/// upcoming pieces stays constant for the whole session.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceQueue, PieceSeed};
///
/// let mut queue = PieceQueue::with_seed(PieceSeed::from(7), 3);
/// let upcoming: Vec<_> = queue.next_pieces().collect();
///
/// let first = queue.pop_next();
/// assert_eq!(first, upcoming[0]);
/// assert_eq!(queue.next_pieces().count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    queue: VecDeque<PieceKind>,
}

/// Seed for deterministic piece generation.
///
/// Using the same seed will produce the same sequence of pieces, enabling
/// reproducible sessions and deterministic tests.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameSession, PieceSeed};
/// use rand::Rng as _;
///
/// // Generate a random seed
/// let seed: PieceSeed = rand::rng().random();
///
/// // Both sessions will have the same piece sequence
/// let session1 = GameSession::with_seed(GameConfig::default(), seed);
/// let session2 = GameSession::with_seed(GameConfig::default(), seed);
/// assert_eq!(session1.snapshot(), session2.snapshot());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::From,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct PieceSeed(u64);

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        PieceSeed(rng.random())
    }
}

impl PieceQueue {
    /// Creates a queue holding `lookahead` pieces drawn from `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `lookahead` is zero.
    #[must_use]
    pub fn with_seed(seed: PieceSeed, lookahead: usize) -> Self {
        assert!(lookahead > 0, "piece queue needs at least one lookahead slot");
        let mut rng = Pcg32::seed_from_u64(seed.0);
        let queue = (0..lookahead).map(|_| rng.random()).collect();
        Self { rng, queue }
    }

    /// Takes the head of the queue and refills the tail with a new random kind.
    pub fn pop_next(&mut self) -> PieceKind {
        let refill = self.rng.random();
        self.queue.push_back(refill);
        self.queue
            .pop_front()
            .expect("piece queue should never be empty")
    }

    /// Returns an iterator over the upcoming pieces, head first.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }

    /// Number of upcoming pieces kept in the queue.
    #[must_use]
    pub fn lookahead(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_lookahead_is_constant() {
        let mut queue = PieceQueue::with_seed(PieceSeed(1), 3);
        assert_eq!(queue.lookahead(), 3);
        for _ in 0..50 {
            queue.pop_next();
            assert_eq!(queue.lookahead(), 3);
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = PieceQueue::with_seed(PieceSeed(42), 4);
        let mut expected: VecDeque<_> = queue.next_pieces().collect();
        for _ in 0..30 {
            let popped = queue.pop_next();
            assert_eq!(Some(popped), expected.pop_front());
            expected.push_back(queue.next_pieces().last().unwrap());
            assert_eq!(queue.next_pieces().collect::<VecDeque<_>>(), expected);
        }
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let mut queue1 = PieceQueue::with_seed(PieceSeed(0x1234_5678), 3);
        let mut queue2 = PieceQueue::with_seed(PieceSeed(0x1234_5678), 3);
        for _ in 0..20 {
            assert_eq!(queue1.pop_next(), queue2.pop_next());
        }
    }

    #[test]
    fn test_all_kinds_eventually_drawn() {
        let mut queue = PieceQueue::with_seed(PieceSeed(9), 1);
        let kinds: HashSet<_> = (0..500).map(|_| queue.pop_next()).collect();
        assert_eq!(kinds.len(), PieceKind::LEN);
    }

    #[test]
    #[should_panic(expected = "lookahead")]
    fn test_zero_lookahead_panics() {
        let _ = PieceQueue::with_seed(PieceSeed(0), 0);
    }

    #[test]
    fn test_seed_serialization() {
        let seed = PieceSeed(12345);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "12345");
        let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_seed_from_str() {
        assert_eq!("987".parse::<PieceSeed>().unwrap(), PieceSeed(987));
        assert!("abc".parse::<PieceSeed>().is_err());
        assert_eq!(PieceSeed(987).to_string(), "987");
    }
}
