//! Training data CLI
//!
//! Generates labelled positions, or encodes and evaluates single FENs.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use feature_planes::{FeatureEncoder, FeatureTensor, BOARD_SIZE};
use selfplay::{Datagen, DatagenConfig, DatagenError, EngineConfig, PositionEvaluator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "datagen", about = "Self-play training data for position evaluation models")]
struct Cli {
    /// TOML config file; built-in defaults otherwise
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// UCI engine binary, overriding the configured engine
    #[arg(long, global = true)]
    engine: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play self-play games and write one JSON sample per line
    Generate {
        /// Number of samples to write
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Seed for skill and game-length draws
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the feature planes of a position
    Encode {
        fen: String,
        /// Print the tensor as JSON instead of a grid
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a position in pawns from white's point of view
    Evaluate { fen: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DatagenConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DatagenConfig::default(),
    };
    if let Some(path) = cli.engine {
        config.engine = EngineConfig::Uci {
            path,
            args: Vec::new(),
        };
    }

    match cli.command {
        Commands::Generate {
            count,
            output,
            seed,
        } => generate(&config, count, output, seed),
        Commands::Encode { fen, json } => encode(&config, &fen, json),
        Commands::Evaluate { fen } => evaluate(&config, &fen),
    }
}

fn generate(
    config: &DatagenConfig,
    count: usize,
    output: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, count, engine = ?config.engine, "generating samples");

    let launcher = config.launcher(seed);
    let mut datagen = Datagen::new(&*launcher, config, seed)?;

    let mut out: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    while datagen.stats().samples < count {
        if let Some(sample) = datagen.next_sample()? {
            sample.write_line(&mut out).context("writing sample")?;
        }
    }
    out.flush().context("flushing output")?;

    info!("{}", datagen.stats().report());
    Ok(())
}

fn encode(config: &DatagenConfig, fen: &str, json: bool) -> Result<()> {
    let tensor = FeatureEncoder::new(config.encoder.clone()).encode_fen(fen)?;
    if json {
        println!("{}", serde_json::to_string(&tensor)?);
    } else {
        print!("{}", render(&tensor));
    }
    Ok(())
}

/// The three planes side by side, one byte per cell.
fn render(tensor: &FeatureTensor) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "{:<w$} | {:<w$} | {:<w$}\n",
        "strength",
        "king",
        "contest",
        w = BOARD_SIZE * 4 - 1
    ));
    for row in tensor.side_by_side() {
        let planes: Vec<String> = row
            .chunks(BOARD_SIZE)
            .map(|cells| {
                cells
                    .iter()
                    .map(|v| format!("{:>3}", v))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        text.push_str(&planes.join(" | "));
        text.push('\n');
    }
    text
}

fn evaluate(config: &DatagenConfig, fen: &str) -> Result<()> {
    let launcher = config.launcher(rand::random());
    let evaluator = PositionEvaluator::new(&*launcher);

    match evaluator.evaluate_fen(fen) {
        Ok(pawns) => println!("{:+.2}", pawns),
        Err(DatagenError::EvaluationUnavailable { mate_in, winner }) => {
            println!("{:?} mates in {}", winner, mate_in.abs());
        }
        Err(err) => bail!(err),
    }
    Ok(())
}
