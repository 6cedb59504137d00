use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Clotho configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ClothoConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Weather forecast settings.
    #[serde(default)]
    pub forecast: ForecastToml,

    /// Board game settings.
    #[serde(default)]
    pub board: BoardToml,
}

impl ClothoConfig {
    /// Loads configuration from a TOML file, or built-in defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

/// Weather forecast settings (`[forecast]`).
///
/// The default matrix is the classic sunny/cloudy/rainy day cycle.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    /// Number of days to simulate.
    #[serde(default = "default_days")]
    pub days: usize,

    /// Initial weather state: "sunny", "cloudy" or "rainy".
    #[serde(default = "default_initial")]
    pub initial: String,

    /// Transition probabilities from a sunny day to [sunny, cloudy, rainy].
    #[serde(default = "default_sunny_row")]
    pub sunny: [f64; 3],

    /// Transition probabilities from a cloudy day to [sunny, cloudy, rainy].
    #[serde(default = "default_cloudy_row")]
    pub cloudy: [f64; 3],

    /// Transition probabilities from a rainy day to [sunny, cloudy, rainy].
    #[serde(default = "default_rainy_row")]
    pub rainy: [f64; 3],
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            days: default_days(),
            initial: default_initial(),
            sunny: default_sunny_row(),
            cloudy: default_cloudy_row(),
            rainy: default_rainy_row(),
        }
    }
}

fn default_days() -> usize {
    10
}
fn default_initial() -> String {
    "sunny".to_string()
}
fn default_sunny_row() -> [f64; 3] {
    [0.8, 0.15, 0.05]
}
fn default_cloudy_row() -> [f64; 3] {
    [0.2, 0.6, 0.2]
}
fn default_rainy_row() -> [f64; 3] {
    [0.1, 0.3, 0.6]
}

/// Board game settings (`[board]`).
///
/// The defaults describe the classic 100-square snake-and-ladder board.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardToml {
    /// Index of the terminal square.
    #[serde(default = "default_size")]
    pub size: u32,

    /// Number of equally likely die faces.
    #[serde(default = "default_die_faces")]
    pub die_faces: u32,

    /// Snake redirects as [head, tail] pairs.
    #[serde(default = "default_snakes")]
    pub snakes: Vec<(u32, u32)>,

    /// Ladder redirects as [foot, top] pairs.
    #[serde(default = "default_ladders")]
    pub ladders: Vec<(u32, u32)>,

    /// Overshoot policy: "stay" or "bounce".
    #[serde(default = "default_overshoot")]
    pub overshoot: String,

    /// Number of independent games.
    #[serde(default = "default_runs")]
    pub runs: usize,

    /// Per-game step ceiling.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for BoardToml {
    fn default() -> Self {
        Self {
            size: default_size(),
            die_faces: default_die_faces(),
            snakes: default_snakes(),
            ladders: default_ladders(),
            overshoot: default_overshoot(),
            runs: default_runs(),
            max_steps: default_max_steps(),
        }
    }
}

fn default_size() -> u32 {
    100
}
fn default_die_faces() -> u32 {
    6
}
fn default_snakes() -> Vec<(u32, u32)> {
    vec![
        (16, 6),
        (47, 26),
        (49, 11),
        (56, 53),
        (62, 19),
        (64, 60),
        (87, 24),
        (93, 73),
        (95, 75),
        (98, 78),
        (99, 90),
    ]
}
fn default_ladders() -> Vec<(u32, u32)> {
    vec![
        (1, 38),
        (4, 14),
        (9, 31),
        (21, 42),
        (28, 84),
        (36, 44),
        (51, 67),
        (71, 91),
        (80, 100),
    ]
}
fn default_overshoot() -> String {
    "stay".to_string()
}
fn default_runs() -> usize {
    1000
}
fn default_max_steps() -> usize {
    10_000
}
