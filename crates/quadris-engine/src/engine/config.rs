use serde::{Deserialize, Serialize};

use super::{
    entropy::LfsrError,
    game_state::Gravity,
    sequencer::{SequencerConfig, SequencerError},
};

/// Everything needed to start a game.
///
/// Missing fields fall back to their defaults, so `{}` is a valid
/// configuration: a 7-bag fed by the default LFSR, with naive gravity.
///
/// # Example
///
/// ```
/// use quadris_engine::{GameConfig, GameState};
///
/// let state = GameState::from_config(&GameConfig::default())?;
/// assert!(!state.is_game_over());
/// # Ok::<(), quadris_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub sequencer: SequencerConfig,
    pub gravity: Gravity,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
)]
pub enum ConfigError {
    #[display("invalid entropy source: {_0}")]
    Entropy(LfsrError),
    #[display("invalid sequencer: {_0}")]
    Sequencer(SequencerError),
}
