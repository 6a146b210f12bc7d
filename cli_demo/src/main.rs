extern crate serde_derive;
extern crate unistroke;

use anyhow::{Context, Result};
use clap::Parser;
use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use unistroke::{GestureDefinition, Point, Recognizer, RecognizerConfig};

#[derive(Parser, Debug)]
#[command(name = "cli_demo")]
#[command(about = "Replays recorded strokes against a gesture library and times recognition")]
struct Args {
    /// JSON array of {"name", "points"} gesture definitions.
    #[arg(long)]
    library: PathBuf,

    /// JSON array of {"expected", "points"} recorded strokes.
    #[arg(long)]
    inputs: PathBuf,

    /// Optional recognizer config (JSON); defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of evaluation cycles over all inputs.
    #[arg(long, default_value_t = 1000)]
    iters: usize,
}

#[derive(Serialize, Deserialize)]
struct Input {
    expected: String,
    points: Vec<Vec<f64>>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("failed to parse {}", path.display()))
}

fn get_points(raw: &[Vec<f64>]) -> Vec<Point> {
    raw.iter()
        .filter(|pt| pt.len() >= 2)
        .map(|pt| Point { x: pt[0], y: pt[1] })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config: RecognizerConfig = match &args.config {
        Some(path) => read_json(path)?,
        None => RecognizerConfig::default(),
    };
    let library: Vec<GestureDefinition> = read_json(&args.library)?;
    let recognizer: Recognizer = Recognizer::with_gestures(config, library)?;
    info!(templates = recognizer.len(), "loaded gesture library");

    let inputs: Vec<Input> = read_json(&args.inputs)?;
    let strokes: Vec<(String, Vec<Point>)> = inputs
        .into_iter()
        .map(|input| {
            let points = get_points(&input.points);
            (input.expected, points)
        })
        .collect();
    info!(inputs = strokes.len(), iters = args.iters, "starting evaluation");

    let start = Instant::now();
    let mut guessed = 0usize;
    let mut rejected = 0usize;
    for _ in 0..args.iters {
        for (expected, points) in &strokes {
            match recognizer.recognize(points) {
                Ok(res) => {
                    if &res.name == expected {
                        guessed += 1;
                    }
                }
                Err(e) => {
                    debug!(expected = %expected, error = %e, "stroke rejected");
                    rejected += 1;
                }
            }
        }
    }
    let duration = start.elapsed();
    println!(
        "Finished in {:?}. Correct guesses: {} of {}. Rejected strokes: {}.",
        duration,
        guessed,
        strokes.len() * args.iters,
        rejected
    );
    Ok(())
}
