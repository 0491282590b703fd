//! Client configuration and storage construction shared by the commands.

use std::{path::PathBuf, sync::Arc, time::Duration};

use pragyan::{
    ClientConfig, ServiceEndpoints,
    storage::{CredentialStorage, FileStorage, MemoryStorage},
};

use crate::cli::ClientArgs;

/// Build the client configuration from command-line arguments.
pub fn client_config(args: &ClientArgs) -> pragyan::Result<ClientConfig> {
    let endpoints = ServiceEndpoints::parse(
        &args.auth_url,
        &args.transactions_url,
        &args.credit_cards_url,
        &args.gift_cards_url,
        &args.loans_url,
        &args.lockers_url,
    )?;
    let data_dir = if args.ephemeral {
        None
    } else {
        Some(args.data_dir.clone().unwrap_or_else(|| PathBuf::from(".")))
    };

    Ok(ClientConfig {
        endpoints,
        timeout: Duration::from_secs(args.timeout),
        data_dir,
    })
}

/// Open the credential storage the configuration asks for.
pub async fn open_storage(
    config: &ClientConfig,
) -> Result<Arc<dyn CredentialStorage>, Box<dyn std::error::Error>> {
    let Some(path) = config.storage_path() else {
        tracing::info!("Using in-memory client storage; the session ends with the process");
        return Ok(Arc::new(MemoryStorage::new()));
    };

    if let Some(dir) = &config.data_dir {
        tokio::fs::create_dir_all(dir).await?;
    }
    tracing::info!("Using client storage at {}", path.display());
    Ok(Arc::new(FileStorage::open(path)?))
}
