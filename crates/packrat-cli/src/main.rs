//! packrat CLI entry point: parse arguments, set up logging, dispatch.

use clap::Parser;
use miette::Result;
use packrat_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Resolve(resolve_args) => commands::resolve_execute(resolve_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Explain(explain_args) => commands::explain_execute(explain_args),
        cli::Command::Budget(budget_args) => commands::budget_execute(budget_args),
    };

    result.map_err(error::cli_error_to_miette)
}
