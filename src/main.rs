//! ecc-hooks CLI entry point.

use clap::Parser;
use ecc_hooks::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    ecc_hooks::logging::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => cli::run_hook(args),
        Commands::Dispatch(args) => cli::run_dispatch(args),
        Commands::Session => cli::run_session(),
        Commands::Scan(args) => cli::run_scan(args),
        Commands::Init(args) => cli::run_init(args),
        Commands::CheckConfig(args) => cli::run_check_config(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
