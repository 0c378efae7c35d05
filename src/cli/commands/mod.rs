//! Command implementations for the sales pipeline CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and error handling for the CLI interface. Each command is
//! implemented in its own module:
//! - `validate`: stage one, raw zone -> processed zone
//! - `transform`: stage two, processed zone -> aggregates zone
//! - `generate`: synthetic raw-file generator for pipeline testing

pub mod generate;
pub mod shared;
pub mod transform;
pub mod validate;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the sales pipeline
///
/// Dispatches to the appropriate subcommand handler. Sequencing between the
/// stages is an external orchestration concern: a scheduler runs `validate`,
/// checks the exit status, and only then runs `transform`.
pub async fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Commands::Validate(stage_args) => validate::run_validate(stage_args).await.map(|_| ()),
        Commands::Transform(stage_args) => transform::run_transform(stage_args).await.map(|_| ()),
        Commands::Generate(generate_args) => generate::run_generate(generate_args).await,
    }
}
