//! Health check command - probes a running web front.

use std::time::Duration;

use crate::cli::HealthArgs;
use crate::output::{OutputFormat, print_json};

/// Run the health check command
pub async fn run(args: &HealthArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("http://{}:{}/health", args.host, args.port);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            let body: serde_json::Value = response.json().await?;
            let status = body.get("status").and_then(|s| s.as_str()).unwrap_or("");
            if status != "healthy" {
                eprintln!("unhealthy: web front returned status {status}");
                std::process::exit(1);
            }
            match format {
                OutputFormat::Json => print_json(&body)?,
                OutputFormat::Human => {
                    let session = body.get("session").and_then(|s| s.as_str()).unwrap_or("unknown");
                    println!("healthy: session {session}");
                }
            }
            Ok(())
        }
        Ok(response) => {
            eprintln!("unhealthy: web front returned HTTP status {}", response.status());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("unhealthy: failed to connect to {url}: {e}");
            std::process::exit(1);
        }
    }
}
