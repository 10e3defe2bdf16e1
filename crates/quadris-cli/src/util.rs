use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use anyhow::Context;
use quadris_engine::GameConfig;

pub fn read_json<T, R>(file_kind: &str, reader: R) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    R: Read,
{
    let value = serde_json::from_reader(io::BufReader::new(reader))
        .with_context(|| format!("Failed to parse {file_kind} JSON"))?;
    Ok(value)
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;
    read_json(file_kind, file).with_context(|| format!("In file: {}", path.display()))
}

pub fn read_game_config_file<P>(path: P) -> anyhow::Result<GameConfig>
where
    P: AsRef<Path>,
{
    read_json_file("game config", path)
}

#[cfg(test)]
mod tests {
    use quadris_engine::{EntropyConfig, SequencerConfig};

    use super::*;

    #[test]
    fn test_read_game_config() {
        let json = br#"{"sequencer": {"kind": "bag", "entropy": {"kind": "lfsr", "seed": 7}}}"#;
        let config: GameConfig = read_json("game config", &json[..]).unwrap();
        assert_eq!(
            config.sequencer,
            SequencerConfig::Bag {
                entropy: EntropyConfig::Lfsr {
                    seed: 7,
                    taps: vec![1, 9]
                }
            }
        );
    }

    #[test]
    fn test_read_reports_parse_errors() {
        let err = read_json::<GameConfig, _>("game config", &b"{"[..]).unwrap_err();
        assert!(err.to_string().contains("game config"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_game_config_file("/nonexistent/quadris.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/quadris.json"));
    }
}
