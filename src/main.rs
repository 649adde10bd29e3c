//! randmovie - pick a random movie
//!
//! # Usage
//!
//! ```bash
//! # Any movie
//! randmovie
//!
//! # CLI mode with filters
//! randmovie find --from-year 1980 --to-year 1989 -g Horror
//! randmovie query -g Drama --json
//! randmovie genres
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use randmovie::cli::{Cli, Command, ExitCode, Output};
use randmovie::commands;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run_cli(cli).await.into()
}

/// Log to stderr so stdout stays parseable
fn init_tracing(verbose: bool) {
    let default = if verbose { "randmovie=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(mut cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let config = commands::load_config(&cli);

    match cli.command_or_default() {
        Command::Find(cmd) => commands::find_cmd(cmd, &config, &output).await,

        Command::Query(cmd) => commands::query_cmd(cmd, &config, &output),

        Command::Genres(cmd) => commands::genres_cmd(cmd, &output),
    }
}
