//! SongPair CLI - corpus building, dataset inspection, and MIDI decoding
//!
//! Logging goes through `tracing`; set `RUST_LOG` to change the level
//! (default `info`).

use clap::Parser;
use std::process::ExitCode;

use songpair_cli::commands;
use songpair_cli::commands::build::BuildArgs;

mod cli_args;

use cli_args::{Cli, Commands};

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Build {
            train,
            valid,
            split,
            seed,
            lyrics,
            notes,
            limit,
        } => commands::build::run(
            &config,
            &BuildArgs {
                train: &train,
                valid: &valid,
                split,
                seed,
                lyrics: &lyrics,
                notes: &notes,
                limit,
            },
        ),
        Commands::Inspect { input, seed } => commands::inspect::run(&config, &input, seed),
        Commands::Decode { input, id, output } => {
            commands::decode::run(&config, &input, id.as_deref(), &output)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
