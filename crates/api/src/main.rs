//! FIPE Pricer - Main Entry Point

use api::{init_logging, parse_request, predict_once, run_server, train, AppConfig, USAGE};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== FIPE Pricer v{} ===", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("serve") => run_server(&config).await?,
        Some("train") => {
            let report = train(&config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some("predict") => {
            let request = parse_request(&args[1..])?;
            let estimate = predict_once(&config, &request)?;
            println!("{}", serde_json::to_string_pretty(&estimate)?);
        }
        Some(other) => anyhow::bail!("unknown command '{}'\n{}", other, USAGE),
    }

    Ok(())
}
