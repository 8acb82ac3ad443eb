//! Run configuration loaded from a TOML file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use torus_snake_core::SessionConfig;

/// Ticks played per session when nothing else is configured.
const DEFAULT_MAX_TICKS: u32 = 1_000;

/// Everything the adapter needs to play a batch of sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct RunConfig {
    /// Engine parameters, forwarded to the world unchanged.
    pub(crate) session: SessionConfig,
    /// Adapter-side pacing and input.
    pub(crate) run: RunSettings,
}

/// Pacing and input owned by the adapter rather than the engine.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct RunSettings {
    /// Upper bound on ticks per session.
    pub(crate) max_ticks: u32,
    /// Pause between ticks in milliseconds; zero runs flat out.
    pub(crate) tick_ms: u64,
    /// Sessions played back to back.
    pub(crate) sessions: u32,
    /// Per-tick heading script.
    pub(crate) moves: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            tick_ms: 0,
            sessions: 1,
            moves: String::new(),
        }
    }
}

/// Reads the configuration file, or returns defaults when no path is given.
pub(crate) fn load(path: Option<&Path>) -> Result<RunConfig> {
    let Some(path) = path else {
        return Ok(RunConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&source).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse(source: &str) -> Result<RunConfig, toml::de::Error> {
    toml::from_str(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use torus_snake_core::CellCoord;

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let config = parse("").expect("empty file is valid");
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.run.sessions, 1);
        assert_eq!(config.session.grid_size, 20);
    }

    #[test]
    fn partial_tables_override_only_named_fields() {
        let config = parse(
            r#"
            [session]
            grid_size = 12
            obstacle_count = 4
            start = { x = 1, y = 1 }
            seed = 99

            [run]
            tick_ms = 50
            moves = "RRD."
            "#,
        )
        .expect("valid config");

        assert_eq!(config.session.grid_size, 12);
        assert_eq!(config.session.obstacle_count, 4);
        assert_eq!(config.session.start, CellCoord::new(1, 1));
        assert_eq!(config.session.seed, Some(99));
        assert_eq!(config.session.apple_count, 1);
        assert_eq!(config.run.tick_ms, 50);
        assert_eq!(config.run.moves, "RRD.");
        assert_eq!(config.run.max_ticks, DEFAULT_MAX_TICKS);
    }

    #[test]
    fn wrongly_typed_values_are_rejected() {
        assert!(parse("[run]\nsessions = \"many\"\n").is_err());
    }

    #[test]
    fn load_without_path_uses_defaults() {
        assert_eq!(load(None).expect("defaults"), RunConfig::default());
    }
}
