use anyhow::{bail, Context, Result};
use clap::Parser;
use detscore::evaluate_files;
use std::io;
use std::path::PathBuf;
use std::process;

/// Score object-detection predictions against ground-truth annotations.
#[derive(Parser, Debug)]
#[command(name = "detscore", version)]
struct Args {
    /// Ground-truth annotation file (JSON conversation records)
    ground_truth: PathBuf,

    /// Predictions file (one line per image: `<image_id> <payload>`)
    predictions: PathBuf,
}

fn main() {
    // Usage errors must exit with code 1; clap defaults to 2.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if !args.ground_truth.is_file() || !args.predictions.is_file() {
        bail!("both arguments must be valid file paths");
    }

    let stdout = io::stdout();
    evaluate_files(&args.ground_truth, &args.predictions, stdout.lock())
        .context("evaluation failed")?;
    Ok(())
}
