use clap::Parser;
use std::io::{self, IsTerminal};
use stockbench::cli::commands;
use stockbench::cli::{Cli, Commands};
use stockbench::logging::init_logging;
use stockbench::{HarnessError, StructuredError};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
        // Don't exit, just continue without logging
    }

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(&args, cli.json, cli.quiet),
        Commands::Catalog => commands::catalog::execute(cli.json),
        Commands::Version => commands::version::execute(cli.json),
        Commands::Completions(args) => commands::completions::execute(&args),
    };

    if let Err(e) = result {
        handle_error(&e, cli.json);
    }
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to
/// stderr. Otherwise, outputs human-readable error with optional color.
fn handle_error(err: &HarnessError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    // Determine output mode: JSON if --json flag or stdout is not a terminal
    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        // Output structured JSON to stderr
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        // Human-readable output with color if stderr is a terminal
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}
