/// RTK sample renderer
///
/// Renders one of the sample scenes to a PPM file.
/// Usage:
///   rtk clock [--size N] [--marks N] [--mark-size N] [-o PATH] [--preview]
///   rtk projectile [--size N] [--gravity F] [--wind F] [--dt F] [-o PATH] [--preview]
///
/// Set RUST_LOG=debug for progress output.

use anyhow::Context;
use clap::Parser;
use rtk_terminal::cli::{RtkCli, SampleCommand};
use rtk_terminal::{print_preview, samples};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = RtkCli::parse();

    let (canvas, output, preview) = match &cli.sample {
        SampleCommand::Clock(args) => (
            samples::draw_clock(&args.config()).context("Failed to draw clock")?,
            &args.output,
            args.output_args.preview,
        ),
        SampleCommand::Projectile(args) => (
            samples::simulate_projectiles(&args.config())
                .context("Failed to simulate projectiles")?,
            &args.output,
            args.output_args.preview,
        ),
    };

    canvas
        .to_ppm()
        .save(output)
        .with_context(|| format!("Failed to save PPM to {}", output.display()))?;
    println!("Wrote {}", output.display());

    if preview {
        print_preview(&canvas, &output.display().to_string())?;
    }

    Ok(())
}
