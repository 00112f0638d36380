//! picon-xref CLI
//!
//! Cross-references picon logo files against the rytec channel list and
//! writes mapping reports.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;
mod spinner;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{CacheAction, Cli, Commands, ConfigAction};
use commands::cache::{run_cache_clear, run_cache_list};
use commands::config::{run_config_path, run_config_show};
use commands::normalize::run_normalize;
use commands::run::run_reconcile;
use commands::suggest::run_suggest;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = dispatch(cli) {
        // Printed even under --quiet.
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Run {
            xml,
            logos_file,
            output_dir,
            matching,
        } => {
            let settings = settings::load_settings()?;
            run_reconcile(
                &settings,
                &xml,
                logos_file.as_deref(),
                output_dir.as_deref(),
                &matching,
                quiet,
            )
        }
        Commands::Normalize { reference } => run_normalize(&reference),
        Commands::Suggest {
            reference,
            xml,
            matching,
        } => {
            let settings = settings::load_settings()?;
            run_suggest(&settings, &reference, &xml, &matching, quiet)
        }
        Commands::Cache { action } => match action {
            CacheAction::List => run_cache_list(),
            CacheAction::Clear => run_cache_clear(),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(&settings::load_settings()?),
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
        },
    }
}
