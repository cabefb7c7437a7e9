mod cli;
mod commands;
mod infra;
mod shared;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

fn main() -> ExitCode {
    let Cli { command } = Cli::parse();

    let result = match command {
        Commands::Scrape(args) => commands::scrape::run(&args),
        Commands::Config(config_cmd) => config_cmd.run(),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ytcomments", &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// Error messages already embed their cause, so only the outermost one is printed.
fn render_error(err: &anyhow::Error) -> String {
    format!("error: {err}")
}
