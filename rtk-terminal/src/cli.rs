/// Command-line arguments for the sample drivers
use clap::{Args, Parser, Subcommand};
use rtk_core::Vector;
use std::path::PathBuf;

use crate::samples::{ClockConfig, Environment, ProjectileConfig};

/// Render the RTK sample scenes to PPM images.
#[derive(Debug, Parser)]
#[command(name = "rtk")]
pub struct RtkCli {
    #[command(subcommand)]
    pub sample: SampleCommand,
}

/// Sample scene to render
#[derive(Debug, Subcommand)]
pub enum SampleCommand {
    #[command(name = "clock")]
    /// Place hour marks on a clock face by repeated rotation.
    Clock(ClockArgs),

    #[command(name = "projectile")]
    /// Trace projectiles under gravity and wind.
    Projectile(ProjectileArgs),
}

/// Output options shared by every sample
#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(long)]
    /// Also print a preview of the image in the terminal.
    pub preview: bool,
}

#[derive(Debug, Args)]
pub struct ClockArgs {
    #[arg(long, default_value_t = 500)]
    /// Width and height of the canvas in pixels.
    pub size: usize,

    #[arg(long, default_value_t = 12)]
    /// Number of hour marks.
    pub marks: usize,

    #[arg(long, default_value_t = 20)]
    /// Side length of each mark in pixels.
    pub mark_size: usize,

    #[arg(short, long, default_value = "clock.ppm")]
    /// Path of the PPM file to write.
    pub output: PathBuf,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl ClockArgs {
    pub fn config(&self) -> ClockConfig {
        ClockConfig {
            size: self.size,
            marks: self.marks,
            mark_size: self.mark_size,
            ..ClockConfig::default()
        }
    }
}

#[derive(Debug, Args)]
pub struct ProjectileArgs {
    #[arg(long, default_value_t = 1000)]
    /// Width and height of the canvas in pixels.
    pub size: usize,

    #[arg(long, default_value_t = -0.1, allow_hyphen_values = true)]
    /// Vertical acceleration per unit time.
    pub gravity: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    /// Horizontal acceleration per unit time.
    pub wind: f64,

    #[arg(long, default_value_t = 0.001)]
    /// Simulation time step.
    pub dt: f64,

    #[arg(short, long, default_value = "projectile_path.ppm")]
    /// Path of the PPM file to write.
    pub output: PathBuf,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

impl ProjectileArgs {
    pub fn config(&self) -> ProjectileConfig {
        ProjectileConfig {
            size: self.size,
            dt: self.dt,
            environment: Environment {
                gravity: Vector::new(0.0, self.gravity, 0.0),
                wind: Vector::new(self.wind, 0.0, 0.0),
            },
            ..ProjectileConfig::default()
        }
    }
}
