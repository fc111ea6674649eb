use std::str::FromStr;

use arrayvec::ArrayVec;
use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::PieceKind;

/// Strategy used to pick the next piece type.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Randomizer {
    /// Every piece is drawn independently and uniformly from the seven kinds.
    #[default]
    #[display("uniform")]
    Uniform,
    /// Pieces are dealt from shuffled bags that each hold all seven kinds once.
    #[display("seven-bag")]
    SevenBag,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown randomizer {_0:?}, expected `uniform` or `seven-bag`")]
pub struct ParseRandomizerError(#[error(not(source))] String);

impl FromStr for Randomizer {
    type Err = ParseRandomizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Self::Uniform),
            "seven-bag" => Ok(Self::SevenBag),
            _ => Err(ParseRandomizerError(s.to_owned())),
        }
    }
}

/// Deterministic source of piece kinds.
///
/// Two generators built with the same seed and randomizer yield the same
/// sequence.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, Randomizer};
///
/// let mut a = PieceGenerator::new(Randomizer::SevenBag, Some(1));
/// let mut b = PieceGenerator::new(Randomizer::SevenBag, Some(1));
/// for _ in 0..14 {
///     assert_eq!(a.pop_next(), b.pop_next());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
    seed: u64,
    randomizer: Randomizer,
    bag: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl PieceGenerator {
    /// Creates a generator, drawing a random seed when `seed` is `None`.
    #[must_use]
    pub fn new(randomizer: Randomizer, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            randomizer,
            bag: ArrayVec::new(),
        }
    }

    /// The seed actually in use, including one drawn at random.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Draws the next piece kind.
    ///
    /// # Panics
    ///
    /// Panics if the bag is empty right after a refill (should never happen).
    pub fn pop_next(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => self.rng.random(),
            Randomizer::SevenBag => {
                if self.bag.is_empty() {
                    self.bag.extend(PieceKind::ALL);
                    self.bag.shuffle(&mut self.rng);
                }
                self.bag.pop().expect("piece bag should never be empty")
            }
        }
    }
}
