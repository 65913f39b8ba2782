//! CLI for the imgretry reload throttler.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use imgretry_core::config;
use imgretry_core::navigation::MouseButton;

use commands::{run_limits, run_open, run_schedule, run_simulate, MAX_FAILURE_OFFSET_MS};

/// Top-level CLI for imgretry.
#[derive(Debug, Parser)]
#[command(name = "imgretry")]
#[command(about = "imgretry: throttled reloads for failed gallery images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Mouse button for `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ButtonArg {
    Primary,
    Middle,
    Secondary,
}

impl From<ButtonArg> for MouseButton {
    fn from(b: ButtonArg) -> Self {
        match b {
            ButtonArg::Primary => MouseButton::Primary,
            ButtonArg::Middle => MouseButton::Middle,
            ButtonArg::Secondary => MouseButton::Secondary,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Load a gallery of images against the simulated upstream queue and report retries.
    Simulate {
        /// Number of images in the initial burst (default from config).
        #[arg(long, value_name = "N")]
        images: Option<usize>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the reload slots a sequence of failures would get.
    Schedule {
        /// Failure times in milliseconds after page load, in arrival order (at most one year).
        #[arg(
            required = true,
            value_name = "MS",
            value_parser = clap::value_parser!(u64).range(..=MAX_FAILURE_OFFSET_MS)
        )]
        failures: Vec<u64>,
    },

    /// Show which description page a click on an image would open.
    Open {
        /// File title of the image, e.g. "File:Example.jpg".
        title: String,
        /// Button used for the click.
        #[arg(long, value_enum, default_value = "middle")]
        button: ButtonArg,
        /// Control key held.
        #[arg(long)]
        ctrl: bool,
        /// Command/meta key held.
        #[arg(long)]
        meta: bool,
    },

    /// Show the upstream queue limits and the reload interval.
    Limits,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Simulate { images, json } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_simulate(&cfg, images, json).await?
            }
            CliCommand::Schedule { failures } => run_schedule(&failures),
            CliCommand::Open {
                title,
                button,
                ctrl,
                meta,
            } => run_open(&title, button.into(), ctrl, meta)?,
            CliCommand::Limits => {
                let cfg = config::load_or_init()?;
                run_limits(&cfg)
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
