//! Session command - resume the persisted session once, or end it.

use std::sync::Arc;

use pragyan::{
    BankClient, Bootstrapper, SessionStore,
    session::{self, BootstrapOutcome, IdentityProvider},
};
use serde_json::json;

use crate::cli::{SessionArgs, SessionCommand};
use crate::client::{client_config, open_storage};
use crate::output::{OutputFormat, print_json};

/// Run the session command
pub async fn run(args: &SessionArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let config = client_config(&args.client)?;
    let storage = open_storage(&config).await?;
    let store = SessionStore::new();

    match args.command {
        SessionCommand::Show => {
            let bank = BankClient::new(&config, Arc::clone(&storage))?;
            let provider: Arc<dyn IdentityProvider> = Arc::new(bank.identity);
            let bootstrapper = Bootstrapper::new(store.clone(), storage, provider);
            let outcome = bootstrapper.run().await;
            let snapshot = store.snapshot();

            match format {
                OutputFormat::Human => {
                    println!("Status:    {}", describe(outcome));
                    if let Some(identity) = snapshot.identity() {
                        let role = if identity.is_admin() { "administrator" } else { "customer" };
                        println!("User:      {} ({})", identity.display_name(), identity.username);
                        println!("User ID:   {}", identity.id);
                        println!("Role:      {role}");
                    }
                }
                OutputFormat::Json => print_json(&json!({
                    "status": snapshot.status(),
                    "outcome": describe(outcome),
                    "identity": snapshot.identity(),
                    "admin": snapshot.is_admin(),
                }))?,
            }
        }
        SessionCommand::Logout => {
            session::end_session(&store, storage.as_ref());
            match format {
                OutputFormat::Human => println!("Signed out; the persisted credential was erased"),
                OutputFormat::Json => print_json(&json!({ "status": store.status() }))?,
            }
        }
    }

    Ok(())
}

fn describe(outcome: &BootstrapOutcome) -> String {
    match outcome {
        BootstrapOutcome::Anonymous => "signed out".to_string(),
        BootstrapOutcome::Authenticated(_) | BootstrapOutcome::AlreadyAuthenticated => {
            "signed in".to_string()
        }
        BootstrapOutcome::Rejected { reason } => format!("signed out ({reason})"),
        BootstrapOutcome::Resynchronized => "signed out (stale session dropped)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_reason_is_shown() {
        let outcome = BootstrapOutcome::Rejected {
            reason: "identity service unavailable".to_string(),
        };
        assert_eq!(describe(&outcome), "signed out (identity service unavailable)");
    }
}
