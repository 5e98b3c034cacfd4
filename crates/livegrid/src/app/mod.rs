//! CLI application layer and composition root wiring.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;
use tracing::debug;

pub mod commands;
pub mod error;
pub mod interactive;
pub mod session;
pub mod simulate;

use crate::adapters::presenter::OutputFormat;
use crate::adapters::presenter::create_presenter;
use crate::app::commands::Cli;
use crate::app::commands::Commands;
use crate::app::commands::GridArgs;
use crate::app::error::AppError;
use crate::app::error::exit_codes;
use crate::common::color_init;
use crate::common::telemetry;
use crate::common::telemetry::ConsoleMode;
use crate::infra::GridConfig;

const PROGRAM_NAME: &str = "livegrid";

pub struct Application;

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self) -> Result<i32> {
        let cli = Cli::parse();
        let format = cli.effective_format();
        let exit_code = match self.execute(cli) {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => self.handle_error(e, format),
        };
        Ok(exit_code)
    }

    fn execute(&self, cli: Cli) -> Result<(), AppError> {
        let console = match cli.command {
            Commands::Run(_) => ConsoleMode::Exclusive,
            _ => ConsoleMode::Shared,
        };
        let _telemetry =
            telemetry::init_tracing(if cli.verbose { "debug" } else { "warn" }, console);
        color_init(cli.no_color);
        let format = cli.effective_format();
        debug!(command = ?cli.command, format = ?format, "CLI command parsed");

        let presenter = create_presenter(format);
        match &cli.command {
            Commands::Run(args) => {
                let (config, seed) = resolve(&args.grid);
                let summary = interactive::run_interactive(&config, args, seed)?;
                presenter.present_summary(&summary);
            }
            Commands::Simulate(args) => {
                let (config, seed) = resolve(&args.grid);
                let summary = simulate::run_simulation(&config, args, seed)?;
                presenter.present_summary(&summary);
            }
            Commands::Completions { shell } => {
                let mut cmd = Cli::command();
                generate(*shell, &mut cmd, PROGRAM_NAME, &mut io::stdout());
            }
        }
        Ok(())
    }

    fn handle_error(&self, e: AppError, format: OutputFormat) -> i32 {
        debug!(error = %e, kind = e.kind(), "Command failed");
        create_presenter(format).present_error(&e.to_view());
        e.exit_code()
    }
}

/// Environment first, then command-line flags on top.
fn resolve(args: &GridArgs) -> (GridConfig, u64) {
    let config = args.apply(GridConfig::from_env());
    let seed = args.seed.unwrap_or_else(rand::random);
    (config, seed)
}
