use std::io::{self, Read};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tutor::config::Config;
use tutor::handler::Handler;
use tutor::http::HttpRequest;

#[derive(Parser)]
#[command(name = "tutor", version, about = "Solves a school task, step by step.")]
struct Cli {
    /// HTTP method of the invocation
    #[arg(short, long, default_value = "POST")]
    method: String,

    /// JSON request body, e.g. '{"question": "2+2=?", "subject": "Математика"}'.
    /// Read from stdin when omitted on a POST.
    #[arg(short, long)]
    body: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let body = match cli.body {
        Some(body) => Some(body),
        None if cli.method == "POST" => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Some(input)
        }
        None => None,
    };

    let config = Config::from_env();
    info!(?config, "configuration loaded");

    let handler = Handler::from_config(&config);
    let response = handler.handle(&HttpRequest::new(cli.method, body)).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
