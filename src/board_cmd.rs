use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use clotho_chain::{BoardConfig, Overshoot};
use clotho_sim::{run_batch, BatchConfig, StopRule};

use crate::cli::BoardArgs;
use crate::config::{BoardToml, ClothoConfig};

fn parse_overshoot(name: &str) -> Result<Overshoot> {
    match name {
        "stay" => Ok(Overshoot::Stay),
        "bounce" => Ok(Overshoot::Bounce),
        _ => bail!("unknown overshoot policy: {name} (expected \"stay\" or \"bounce\")"),
    }
}

/// Builds the board configuration from the config table.
fn build_board(cfg: &BoardToml) -> Result<BoardConfig> {
    let overshoot = parse_overshoot(&cfg.overshoot)?;
    Ok(BoardConfig::new()
        .with_size(cfg.size)
        .with_die_faces(cfg.die_faces)
        .with_redirects(cfg.snakes.iter().copied())
        .with_redirects(cfg.ladders.iter().copied())
        .with_overshoot(overshoot))
}

/// Run the `board` subcommand.
pub fn run(args: BoardArgs) -> Result<()> {
    let config = ClothoConfig::load(args.config.as_deref())?;
    let n_runs = args.runs.unwrap_or(config.board.runs);

    let board = build_board(&config.board)?;
    let model = board.build().context("failed to derive board model")?;
    info!(
        size = config.board.size,
        n_states = model.n_states(),
        "derived board model"
    );

    let mut rng = match args.seed.or(config.seed) {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let rule = StopRule::Absorb {
        terminal: config.board.size,
        max_steps: config.board.max_steps,
    };
    let batch = BatchConfig::new(0, rule, n_runs);
    let result = run_batch(&model, &batch, &mut rng)?;

    for (game, record) in result.records().iter().enumerate() {
        match record.outcome().steps() {
            Some(steps) => println!("Game {}: finished in {steps} moves", game + 1),
            None => println!(
                "Game {}: gave up after {} moves",
                game + 1,
                config.board.max_steps
            ),
        }
    }

    match result.mean_steps() {
        Some(mean) => println!(
            "Average moves over {} finished games: {mean:.2} (sd {:.2}, {} unfinished)",
            result.n_runs() - result.n_failed(),
            result.sd_steps().unwrap_or(0.0),
            result.n_failed()
        ),
        None => println!(
            "No game finished within {} moves",
            config.board.max_steps
        ),
    }
    Ok(())
}
