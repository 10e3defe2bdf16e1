use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use quadris_engine::{
    EntropyConfig, GameConfig, GameState, Gravity, Lfsr16, SequenceSeed, SequencerConfig,
};
use rand::Rng as _;

use crate::{app::App, util};

#[derive(Debug, Clone, Default, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Seed of the shape generator (random when omitted)
    ///
    /// The LFSR generator only accepts non-zero values that fit in 16 bits.
    #[clap(long)]
    seed: Option<u128>,
    /// LFSR tap positions, comma separated
    #[clap(long, value_delimiter = ',', conflicts_with = "pcg")]
    taps: Option<Vec<u8>>,
    /// Use the PCG generator instead of the 16-bit LFSR
    #[clap(long)]
    pcg: bool,
    /// Read the game configuration from a JSON file
    #[clap(long, conflicts_with_all = ["seed", "taps", "pcg"])]
    config: Option<PathBuf>,
}

impl CommandArgs {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        if let Some(path) = &self.config {
            return util::read_game_config_file(path);
        }

        let entropy = if self.pcg {
            let seed = self
                .seed
                .map_or_else(|| rand::rng().random(), SequenceSeed::from);
            EntropyConfig::Pcg { seed }
        } else {
            let seed = match self.seed {
                Some(seed) => u16::try_from(seed)
                    .with_context(|| format!("LFSR seed {seed} does not fit in 16 bits"))?,
                None => rand::rng().random_range(1..=u16::MAX),
            };
            let taps = self
                .taps
                .clone()
                .unwrap_or_else(|| Lfsr16::DEFAULT_TAPS.to_vec());
            EntropyConfig::Lfsr { seed, taps }
        };

        Ok(GameConfig {
            sequencer: SequencerConfig::Bag { entropy },
            gravity: Gravity::default(),
        })
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let config = args.game_config()?;
    let state = GameState::from_config(&config).context("Failed to start a game")?;

    let mut app = App::new(state);
    ratatui::run(|terminal| app.run(terminal))?;

    let state = app.state();
    println!(
        "Pieces: {}, Lines: {}",
        state.locked_pieces(),
        state.cleared_lines()
    );
    Ok(())
}
