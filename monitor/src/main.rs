//! Rinzler Grid Monitor entry point

use clap::Parser;
use rinzler_monitor::cli::{check, serve, Cli, Commands};
use rinzler_monitor::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let exit_code = match cli.command {
        Some(Commands::Check(args)) => match check::execute(&args).await {
            Ok(true) => 0,
            Ok(false) => 1,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Some(Commands::Serve(args)) => run_serve(args).await,
        // No subcommand - default to serve
        None => match serve::ServeArgs::from_env() {
            Ok(args) => run_serve(args).await,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };

    // flush file logs before exiting
    drop(log_guard);
    std::process::exit(exit_code);
}

async fn run_serve(args: serve::ServeArgs) -> i32 {
    match serve::execute(&args).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            1
        }
    }
}
