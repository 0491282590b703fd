//! Info command - shows the configured service endpoints and client storage.

use serde_json::json;

use crate::cli::InfoArgs;
use crate::client::client_config;
use crate::output::{OutputFormat, print_json, print_table};

/// Run the info command
pub async fn run(args: &InfoArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let config = client_config(&args.client)?;
    let storage = config
        .storage_path()
        .map_or_else(|| "memory".to_string(), |path| path.display().to_string());

    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = config
                .endpoints
                .entries()
                .iter()
                .map(|(service, url)| vec![service.to_string(), url.to_string()])
                .collect();
            print_table(&["SERVICE", "URL"], &rows);
            println!();
            println!("Storage:  {storage}");
            println!("Timeout:  {}s", config.timeout.as_secs());
        }
        OutputFormat::Json => {
            let endpoints: serde_json::Map<String, serde_json::Value> = config
                .endpoints
                .entries()
                .iter()
                .map(|(service, url)| (service.to_string(), json!(url.as_str())))
                .collect();
            print_json(&json!({
                "endpoints": endpoints,
                "storage": storage,
                "timeout_secs": config.timeout.as_secs(),
            }))?;
        }
    }

    Ok(())
}
