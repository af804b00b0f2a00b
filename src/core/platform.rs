//! Process-level error handling and argument parsing.

/// Report a fatal application error and exit.
pub fn handle_error(error: anyhow::Error) {
    eprintln!();
    eprintln!("Error starting the reference viewer:");
    eprintln!("{error:#}");
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse the command line.
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::Parser;
    crate::core::cli::CliArgs::parse()
}
