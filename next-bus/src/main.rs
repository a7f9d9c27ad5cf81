use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use next_bus::cli::Args;
use next_bus::next_departure_countdown;
use next_bus::nextrip::NexTripClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the countdown
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Exits with a usage error before any request is made
    let args = Args::parse();

    let client = match NexTripClient::new(args.config()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: failed to create NexTrip client: {e}");
            return ExitCode::FAILURE;
        }
    };

    match next_departure_countdown(&client, &args.query()).await {
        Ok(countdown) => {
            println!("{countdown}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(kind = %e.kind(), "lookup failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
