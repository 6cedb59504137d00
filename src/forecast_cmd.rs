use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use clotho_chain::{Distribution, TransitionModel};
use clotho_sim::{run_chain, StopRule};

use crate::cli::ForecastArgs;
use crate::config::{ClothoConfig, ForecastToml};

/// Weather states of the day-cycle chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Weather {
    Sunny,
    Cloudy,
    Rainy,
}

impl Weather {
    /// All three states in row order.
    const ALL: [Weather; 3] = [Self::Sunny, Self::Cloudy, Self::Rainy];

    fn label(self) -> &'static str {
        match self {
            Weather::Sunny => "SUNNY",
            Weather::Cloudy => "CLOUDY",
            Weather::Rainy => "RAINY",
        }
    }

    fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sunny" => Ok(Weather::Sunny),
            "cloudy" => Ok(Weather::Cloudy),
            "rainy" => Ok(Weather::Rainy),
            _ => bail!("unknown weather state: {name} (expected sunny, cloudy or rainy)"),
        }
    }
}

/// Builds the weather transition model from the config rows.
fn build_model(cfg: &ForecastToml) -> Result<TransitionModel<Weather>> {
    let rows = [
        (Weather::Sunny, cfg.sunny),
        (Weather::Cloudy, cfg.cloudy),
        (Weather::Rainy, cfg.rainy),
    ];
    TransitionModel::from_rows(rows.into_iter().map(|(state, row)| {
        let dist = Distribution::from_pairs(Weather::ALL.into_iter().zip(row));
        (state, dist)
    }))
    .context("invalid weather transition matrix")
}

/// Run the `forecast` subcommand.
pub fn run(args: ForecastArgs) -> Result<()> {
    let config = ClothoConfig::load(args.config.as_deref())?;
    let days = args.days.unwrap_or(config.forecast.days);
    let initial = Weather::parse(&config.forecast.initial)?;
    let model = build_model(&config.forecast)?;

    let mut rng = match args.seed.or(config.seed) {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    info!(days, initial = initial.label(), "simulating weather chain");
    let record = run_chain(
        &model,
        initial,
        StopRule::FixedHorizon { steps: days },
        true,
        &mut rng,
    )?;

    let trajectory = record
        .trajectory()
        .expect("trajectory recording was enabled");
    for (day, state) in trajectory.iter().enumerate() {
        println!("Day {}: {}", day + 1, state.label());
    }
    Ok(())
}
