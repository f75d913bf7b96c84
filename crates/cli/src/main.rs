use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};

mod run;

const DEFAULT_ENV_FILE: &str = "./.env";

#[derive(Parser, Debug)]
#[clap(author, version, about = "SquareGate - HTTP gateway for the Square payments API", long_about = None)]
struct Opts {
    /// Path to a .env file loaded before reading any other setting
    #[arg(long = "env-file", global = true, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// Start the gateway server
    Run(run::RunCommand),
}

#[tokio::main]
async fn main() {
    // Settings fall back to environment variables, so the .env file has to be
    // loaded before clap reads them.
    load_env_file(&env_file_from_args(std::env::args_os()));

    let opts: Opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            let _ = e.print();
            process::exit(e.exit_code());
        }
    };

    if let Err(e) = handle_command(opts).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Finds `--env-file <path>` or `--env-file=<path>` ahead of the full parse
fn env_file_from_args(args: impl IntoIterator<Item = OsString>) -> PathBuf {
    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        let Some(arg) = arg.to_str() else {
            continue;
        };
        if arg == "--env-file" {
            if let Some(path) = args.next() {
                return PathBuf::from(path);
            }
        } else if let Some(path) = arg.strip_prefix("--env-file=") {
            return PathBuf::from(path);
        }
    }
    PathBuf::from(DEFAULT_ENV_FILE)
}

fn load_env_file(env_file_path: &Path) {
    match dotenvy::from_path(env_file_path) {
        Ok(_) => {
            eprintln!("✓ Loaded environment from {}", env_file_path.display());
        }
        Err(e) if e.not_found() => {
            // .env file not found is fine, just continue silently
        }
        Err(e) => {
            eprintln!(
                "Warning: Failed to load .env file at {}: {}",
                env_file_path.display(),
                e
            );
        }
    }
}

async fn handle_command(opts: Opts) -> anyhow::Result<()> {
    match opts.command {
        Command::Run(cmd) => cmd.execute().await,
    }
}
