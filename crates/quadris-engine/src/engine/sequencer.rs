use std::collections::VecDeque;

use rand::{RngCore, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::core::shape::Shape;

use super::{
    config::ConfigError,
    entropy::{EntropyConfig, EntropySource, LfsrError, SequenceSeed},
};

/// Produces the shapes a game deals, one at a time.
///
/// Sequencers are values: cloning one gives an independent cursor that deals
/// the same shapes as the sequencer it was cloned from. This is what lets a
/// game state be branched freely.
pub trait Sequencer: Clone {
    /// Draws the next shape, advancing this sequencer.
    fn next_shape(&mut self) -> Shape;

    /// Draws the next shape without touching `self`, returning the advanced
    /// sequencer alongside it.
    #[must_use]
    fn next(&self) -> (Shape, Self) {
        let mut next = self.clone();
        let shape = next.next_shape();
        (shape, next)
    }

    /// Shape the next draw will return.
    #[must_use]
    fn peek_next(&self) -> Shape {
        self.next().0
    }
}

/// Deals shapes using the 7-bag randomization algorithm.
///
/// # 7-Bag System
///
/// 1. A "bag" holds one of each of the 7 shapes
/// 2. The bag is shuffled with the sequencer's random number generator
/// 3. Shapes are drawn in order from the bag
/// 4. A new shuffled bag is appended when 7 or fewer shapes remain queued
///
/// Every aligned run of 7 draws therefore contains each shape exactly once.
///
/// # Example
///
/// ```
/// use quadris_engine::{BagSequencer, Sequencer as _, Shape};
///
/// let mut bag = BagSequencer::default();
/// let mut first_bag: Vec<_> = (0..7).map(|_| bag.next_shape()).collect();
/// first_bag.sort_by_key(|shape| *shape as u8);
/// assert_eq!(first_bag, Shape::ALL);
///
/// let upcoming: Vec<_> = bag.upcoming().take(5).collect();
/// assert_eq!(upcoming.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagSequencer<R = EntropySource> {
    rng: R,
    bag: VecDeque<Shape>,
}

impl Default for BagSequencer {
    fn default() -> Self {
        Self::new(EntropySource::default())
    }
}

impl BagSequencer {
    /// Bag drawing from a PCG generator seeded with `seed`.
    #[must_use]
    pub fn with_seed(seed: SequenceSeed) -> Self {
        Self::new(EntropySource::Pcg(seed.to_rng()))
    }

    pub fn from_config(config: &EntropyConfig) -> Result<Self, LfsrError> {
        Ok(Self::new(EntropySource::from_config(config)?))
    }
}

impl<R> BagSequencer<R>
where
    R: RngCore + Clone,
{
    /// Creates a bag sequencer drawing its randomness from `rng`.
    ///
    /// The queue is filled with the first shuffled bag immediately.
    #[must_use]
    pub fn new(rng: R) -> Self {
        let mut this = Self {
            rng,
            bag: VecDeque::with_capacity(Shape::LEN * 2),
        };
        this.fill_bag();
        this
    }

    fn fill_bag(&mut self) {
        while self.bag.len() <= Shape::LEN {
            let mut new_bag = Shape::ALL;
            new_bag.shuffle(&mut self.rng);
            log::trace!("refilled shape bag: {new_bag:?}");
            self.bag.extend(new_bag);
        }
    }

    /// Shapes queued for the coming draws, in order.
    ///
    /// Always yields at least 7 shapes.
    pub fn upcoming(&self) -> impl Iterator<Item = Shape> + '_ {
        self.bag.iter().copied()
    }
}

impl<R> Sequencer for BagSequencer<R>
where
    R: RngCore + Clone,
{
    /// # Panics
    ///
    /// Panics if the bag is empty, which the refill after every draw rules out.
    fn next_shape(&mut self) -> Shape {
        let shape = self.bag.pop_front().expect("shape bag should never be empty");
        self.fill_bag();
        shape
    }

    fn peek_next(&self) -> Shape {
        self.bag[0]
    }
}

/// Deals a fixed list of shapes over and over.
///
/// # Example
///
/// ```
/// use quadris_engine::{FixedSequencer, Sequencer as _, Shape};
///
/// let mut fixed = FixedSequencer::new(vec![Shape::I, Shape::O])?;
/// assert_eq!(fixed.next_shape(), Shape::I);
/// assert_eq!(fixed.next_shape(), Shape::O);
/// assert_eq!(fixed.next_shape(), Shape::I);
/// # Ok::<(), quadris_engine::SequencerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSequencer {
    shapes: Vec<Shape>,
    index: usize,
}

impl FixedSequencer {
    pub fn new(shapes: Vec<Shape>) -> Result<Self, SequencerError> {
        if shapes.is_empty() {
            return Err(SequencerError::EmptySequence);
        }
        Ok(Self { shapes, index: 0 })
    }
}

impl Sequencer for FixedSequencer {
    fn next_shape(&mut self) -> Shape {
        let shape = self.shapes[self.index];
        self.index = (self.index + 1) % self.shapes.len();
        shape
    }

    fn peek_next(&self) -> Shape {
        self.shapes[self.index]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SequencerError {
    #[display("a fixed shape sequence needs at least one shape")]
    EmptySequence,
}

/// Sequencer chosen at run time, e.g. from a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum AnySequencer {
    Bag(BagSequencer),
    Fixed(FixedSequencer),
}

impl Default for AnySequencer {
    fn default() -> Self {
        Self::Bag(BagSequencer::default())
    }
}

impl AnySequencer {
    pub fn from_config(config: &SequencerConfig) -> Result<Self, ConfigError> {
        let sequencer = match config {
            SequencerConfig::Bag { entropy } => Self::Bag(BagSequencer::from_config(entropy)?),
            SequencerConfig::Fixed { shapes } => Self::Fixed(FixedSequencer::new(shapes.clone())?),
        };
        Ok(sequencer)
    }

    /// Shapes queued for the coming draws, as far as they are known.
    #[must_use]
    pub fn upcoming(&self, count: usize) -> Vec<Shape> {
        match self {
            Self::Bag(bag) => bag.upcoming().take(count).collect(),
            Self::Fixed(fixed) => {
                let mut fixed = fixed.clone();
                (0..count).map(|_| fixed.next_shape()).collect()
            }
        }
    }
}

impl Sequencer for AnySequencer {
    fn next_shape(&mut self) -> Shape {
        match self {
            Self::Bag(bag) => bag.next_shape(),
            Self::Fixed(fixed) => fixed.next_shape(),
        }
    }

    fn peek_next(&self) -> Shape {
        match self {
            Self::Bag(bag) => bag.peek_next(),
            Self::Fixed(fixed) => fixed.peek_next(),
        }
    }
}

/// How the shape sequence is produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SequencerConfig {
    Bag {
        #[serde(default)]
        entropy: EntropyConfig,
    },
    Fixed {
        shapes: Vec<Shape>,
    },
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::Bag {
            entropy: EntropyConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::engine::entropy::Lfsr16;

    fn assert_aligned_windows_are_bags(shapes: &[Shape]) {
        for window in shapes.chunks(Shape::LEN) {
            let unique: HashSet<_> = window.iter().collect();
            assert_eq!(unique.len(), Shape::LEN, "{window:?}");
        }
    }

    #[test]
    fn test_every_aligned_window_is_a_permutation() {
        let mut lfsr_bag = BagSequencer::default();
        let shapes: Vec<_> = (0..Shape::LEN * 20).map(|_| lfsr_bag.next_shape()).collect();
        assert_aligned_windows_are_bags(&shapes);

        let mut pcg_bag = BagSequencer::new(Pcg32::seed_from_u64(42));
        let shapes: Vec<_> = (0..Shape::LEN * 20).map(|_| pcg_bag.next_shape()).collect();
        assert_aligned_windows_are_bags(&shapes);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = SequenceSeed::from(0x1234_5678_9ABC_DEF0_1122_3344_5566_7788);
        let mut a = BagSequencer::with_seed(seed);
        let mut b = BagSequencer::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(a.next_shape(), b.next_shape());
        }

        let mut a = BagSequencer::new(Lfsr16::new(0x8988, &[1, 9]).unwrap());
        let mut b = a.clone();
        for _ in 0..50 {
            assert_eq!(a.next_shape(), b.next_shape());
        }
    }

    #[test]
    fn test_pure_next_leaves_sequencer_untouched() {
        let bag = BagSequencer::default();
        let (first, advanced) = bag.next();
        assert_eq!(bag.peek_next(), first);
        let (again, _) = bag.next();
        assert_eq!(again, first);
        assert_eq!(advanced.upcoming().count(), bag.upcoming().count() - 1);
    }

    #[test]
    fn test_peek_matches_next_draw() {
        let mut bag = BagSequencer::default();
        for _ in 0..30 {
            let peeked = bag.peek_next();
            assert_eq!(bag.upcoming().next(), Some(peeked));
            assert_eq!(bag.next_shape(), peeked);
        }
    }

    #[test]
    fn test_upcoming_always_holds_a_full_bag() {
        let mut bag = BagSequencer::default();
        for _ in 0..30 {
            assert!(bag.upcoming().count() > Shape::LEN);
            bag.next_shape();
        }
    }

    #[test]
    fn test_fixed_sequencer_cycles() {
        use Shape::{S, T, Z};

        let mut fixed = FixedSequencer::new(vec![S, Z, T]).unwrap();
        let shapes: Vec<_> = (0..7).map(|_| fixed.next_shape()).collect();
        assert_eq!(shapes, [S, Z, T, S, Z, T, S]);
        assert_eq!(fixed.peek_next(), Z);
    }

    #[test]
    fn test_fixed_sequencer_rejects_empty_list() {
        assert_eq!(
            FixedSequencer::new(vec![]),
            Err(SequencerError::EmptySequence)
        );
    }

    #[test]
    fn test_any_sequencer_from_config() {
        let config: SequencerConfig =
            serde_json::from_str(r#"{"kind": "fixed", "shapes": ["I", "O"]}"#).unwrap();
        let mut sequencer = AnySequencer::from_config(&config).unwrap();
        assert_eq!(sequencer.upcoming(3), [Shape::I, Shape::O, Shape::I]);
        assert_eq!(sequencer.next_shape(), Shape::I);
        assert_eq!(sequencer.next_shape(), Shape::O);

        let config: SequencerConfig = serde_json::from_str(r#"{"kind": "bag"}"#).unwrap();
        assert_eq!(config, SequencerConfig::default());
        let sequencer = AnySequencer::from_config(&config).unwrap();
        assert_eq!(sequencer, AnySequencer::default());
    }

    #[test]
    fn test_any_sequencer_config_errors() {
        let config = SequencerConfig::Fixed { shapes: vec![] };
        assert_eq!(
            AnySequencer::from_config(&config),
            Err(ConfigError::Sequencer(SequencerError::EmptySequence))
        );

        let config = SequencerConfig::Bag {
            entropy: EntropyConfig::Lfsr {
                seed: 0,
                taps: vec![1, 9],
            },
        };
        let err = AnySequencer::from_config(&config).unwrap_err();
        assert_eq!(err, ConfigError::Entropy(LfsrError::ZeroSeed));
        assert_eq!(err.to_string(), "invalid entropy source: LFSR seed must be non-zero");
    }
}
