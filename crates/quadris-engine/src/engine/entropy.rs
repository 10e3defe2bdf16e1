use std::fmt::Write as _;

use rand::{
    Rng, RngCore, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 16-bit Fibonacci linear feedback shift register.
///
/// On every step the parity of the tapped bits (bit 0 is the least
/// significant) is shifted in at bit 15 and the whole register moves right by
/// one. The new register value is the output.
///
/// The register is a plain `Copy` value: copying it mid-stream gives two
/// registers that produce the same values from then on.
///
/// # Example
///
/// ```
/// use quadris_engine::Lfsr16;
///
/// let mut lfsr = Lfsr16::new(0x8988, &[1, 9])?;
/// assert_eq!(lfsr.next_value(), 0x44C4);
/// assert_eq!(lfsr.next_value(), 0x2262);
/// # Ok::<(), quadris_engine::LfsrError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr16 {
    state: u16,
    tap_mask: u16,
}

impl Default for Lfsr16 {
    fn default() -> Self {
        Self {
            state: Self::DEFAULT_SEED,
            tap_mask: Self::DEFAULT_TAPS
                .iter()
                .fold(0, |mask, &tap| mask | (1 << tap)),
        }
    }
}

impl Lfsr16 {
    pub const DEFAULT_SEED: u16 = 0xACE1;
    pub const DEFAULT_TAPS: [u8; 2] = [1, 9];

    /// Creates a register from a non-zero seed and at least two distinct taps
    /// in `0..16`.
    pub fn new(seed: u16, taps: &[u8]) -> Result<Self, LfsrError> {
        if seed == 0 {
            return Err(LfsrError::ZeroSeed);
        }
        if taps.len() < 2 {
            return Err(LfsrError::TooFewTaps { count: taps.len() });
        }
        let mut tap_mask = 0_u16;
        for &tap in taps {
            if tap >= 16 {
                return Err(LfsrError::TapOutOfRange { tap });
            }
            let bit = 1 << tap;
            if tap_mask & bit != 0 {
                return Err(LfsrError::DuplicateTap { tap });
            }
            tap_mask |= bit;
        }
        Ok(Self {
            state: seed,
            tap_mask,
        })
    }

    #[must_use]
    pub fn state(&self) -> u16 {
        self.state
    }

    /// Tapped bit positions as a mask.
    #[must_use]
    pub fn tap_mask(&self) -> u16 {
        self.tap_mask
    }

    /// Advances the register one step and returns the new state.
    pub fn next_value(&mut self) -> u16 {
        let feedback = u16::from((self.state & self.tap_mask).count_ones() % 2 == 1);
        self.state = (self.state >> 1) | (feedback << 15);
        self.state
    }
}

/// Two register steps make one `u32` so that range sampling sees a full word.
impl RngCore for Lfsr16 {
    fn next_u32(&mut self) -> u32 {
        let high = u32::from(self.next_value());
        let low = u32::from(self.next_value());
        (high << 16) | low
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(2) {
            let bytes = self.next_value().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LfsrError {
    #[display("LFSR seed must be non-zero")]
    ZeroSeed,
    #[display("LFSR tap {tap} is outside 0..16")]
    TapOutOfRange { tap: u8 },
    #[display("LFSR tap {tap} is given more than once")]
    DuplicateTap { tap: u8 },
    #[display("LFSR needs at least 2 taps, got {count}")]
    TooFewTaps { count: usize },
}

/// Seed for the PCG entropy source.
///
/// This is a 128-bit (16-byte) seed. Using the same seed produces the same
/// sequence of shapes, which makes games reproducible for debugging and
/// testing. It serializes as a 32-character hex string.
///
/// # Example
///
/// ```
/// use quadris_engine::{BagSequencer, SequenceSeed, Sequencer as _};
/// use rand::Rng as _;
///
/// let seed: SequenceSeed = rand::rng().random();
/// let mut a = BagSequencer::with_seed(seed);
/// let mut b = BagSequencer::with_seed(seed);
/// assert_eq!(a.next_shape(), b.next_shape());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceSeed([u8; 16]);

impl From<u128> for SequenceSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl SequenceSeed {
    #[must_use]
    pub fn to_rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl Serialize for SequenceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for SequenceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self::from(num))
    }
}

/// Allows generating random `SequenceSeed` values with `rng.random()`.
impl Distribution<SequenceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SequenceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SequenceSeed(seed)
    }
}

/// Where a bag sequencer gets its randomness from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntropyConfig {
    Lfsr {
        #[serde(default = "default_lfsr_seed")]
        seed: u16,
        #[serde(default = "default_lfsr_taps")]
        taps: Vec<u8>,
    },
    Pcg {
        seed: SequenceSeed,
    },
}

fn default_lfsr_seed() -> u16 {
    Lfsr16::DEFAULT_SEED
}

fn default_lfsr_taps() -> Vec<u8> {
    Lfsr16::DEFAULT_TAPS.to_vec()
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self::Lfsr {
            seed: default_lfsr_seed(),
            taps: default_lfsr_taps(),
        }
    }
}

/// Any of the supported random number generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntropySource {
    Lfsr(Lfsr16),
    Pcg(Pcg32),
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::Lfsr(Lfsr16::default())
    }
}

impl EntropySource {
    pub fn from_config(config: &EntropyConfig) -> Result<Self, LfsrError> {
        let source = match config {
            EntropyConfig::Lfsr { seed, taps } => Self::Lfsr(Lfsr16::new(*seed, taps)?),
            EntropyConfig::Pcg { seed } => Self::Pcg(seed.to_rng()),
        };
        Ok(source)
    }
}

impl RngCore for EntropySource {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Lfsr(rng) => rng.next_u32(),
            Self::Pcg(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Self::Lfsr(rng) => rng.next_u64(),
            Self::Pcg(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        match self {
            Self::Lfsr(rng) => rng.fill_bytes(dst),
            Self::Pcg(rng) => rng.fill_bytes(dst),
        }
    }
}
