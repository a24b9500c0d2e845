//! Neberku CLI: contribute photos, videos and voice recordings to an event.
//!
//! Set NEBERKU_API_URL (or API_URL). Guests post anonymously; set
//! NEBERKU_API_TOKEN to send a bearer token.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use neberku_api_client::ApiClient;
use neberku_cli::{init_tracing, load_candidate, rejection_json, TracingObserver};
use neberku_core::models::{CandidateFile, EventMediaPolicy, GuestInfo};
use neberku_core::ClientConfig;
use neberku_upload::GuestUploadQuotaManager;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "neberku", about = "Neberku guest contribution CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which event to contribute to: its UUID or the guest contributor code.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct EventTarget {
    /// Event UUID
    #[arg(long)]
    event: Option<Uuid>,
    /// Contributor code from the guest invite
    #[arg(long)]
    code: Option<String>,
}

impl EventTarget {
    async fn event_id(&self, client: &ApiClient) -> anyhow::Result<Uuid> {
        match (&self.event, &self.code) {
            (Some(event), _) => Ok(*event),
            (None, Some(code)) => Ok(client.get_event_by_code(code).await?.id),
            (None, None) => anyhow::bail!("Pass --event or --code"),
        }
    }

    async fn resolve(&self, client: &ApiClient) -> anyhow::Result<(Uuid, EventMediaPolicy)> {
        match (&self.event, &self.code) {
            (Some(event), _) => Ok((*event, client.get_event_policy(*event).await?)),
            (None, Some(code)) => client.get_event_policy_by_code(code).await,
            (None, None) => anyhow::bail!("Pass --event or --code"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the media policy of an event
    Policy {
        #[command(flatten)]
        target: EventTarget,
    },
    /// Check files against an event's policy without submitting
    Check {
        #[command(flatten)]
        target: EventTarget,
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Submit a contribution with a wish and media files
    Contribute {
        #[command(flatten)]
        target: EventTarget,
        /// Guest name
        #[arg(long)]
        name: String,
        /// Guest phone number
        #[arg(long)]
        phone: String,
        /// Wish text
        #[arg(long)]
        wish: String,
        /// Propose all files in one batch instead of one at a time
        #[arg(long)]
        batch: bool,
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn load_all(paths: &[PathBuf]) -> anyhow::Result<Vec<CandidateFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(load_candidate(path).await?);
    }
    Ok(files)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Invalid configuration")?;
    let client = ApiClient::from_config(&config)
        .context("Failed to create API client. Check NEBERKU_API_URL (or API_URL)")?;

    match cli.command {
        Commands::Policy { target } => {
            let event = target.event_id(&client).await?;
            let response = client.get_event(event).await?;
            print_json(&response)?;
        }
        Commands::Check { target, files } => {
            let (event, policy) = target.resolve(&client).await?;
            let mut manager = GuestUploadQuotaManager::new(event, policy);
            manager.subscribe(Arc::new(TracingObserver));

            let candidates = load_all(&files).await?;
            match manager.propose_files(candidates) {
                Ok(outcome) => print_json(&serde_json::json!({
                    "outcome": outcome,
                    "selection": manager.snapshot(),
                }))?,
                Err(err) => {
                    print_json(&rejection_json(&err))?;
                    return Err(err).context("Files rejected by the event policy");
                }
            }
        }
        Commands::Contribute {
            target,
            name,
            phone,
            wish,
            batch,
            files,
        } => {
            let (event, policy) = target.resolve(&client).await?;
            let mut manager = GuestUploadQuotaManager::new(event, policy);
            manager.subscribe(Arc::new(TracingObserver));

            let candidates = load_all(&files).await?;
            if batch {
                if let Err(err) = manager.propose_files(candidates) {
                    print_json(&rejection_json(&err))?;
                    return Err(err).context("Files rejected by the event policy");
                }
            } else {
                for candidate in candidates {
                    let file_name = candidate.name.clone();
                    if let Err(err) = manager.propose_files([candidate]) {
                        tracing::warn!(file_name = %file_name, error = %err, "Skipping file");
                    }
                }
            }

            let guest = GuestInfo::new(name, phone);
            match manager.submit(&client, &guest, &wish).await {
                Ok(receipt) => print_json(&receipt)?,
                Err(err) => {
                    print_json(&rejection_json(&err))?;
                    return Err(err).context("Contribution was not submitted");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_accepts_event_or_code() {
        let event = Uuid::new_v4();
        let cli = Cli::try_parse_from(["neberku", "check", "--event", event.to_string().as_str(), "a.jpg"])
            .unwrap();
        let Commands::Check { target, files } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(target.event, Some(event));
        assert_eq!(target.code, None);
        assert_eq!(files, vec![PathBuf::from("a.jpg")]);

        let cli = Cli::try_parse_from(["neberku", "check", "--code", "WED-2026", "a.jpg"]).unwrap();
        let Commands::Check { target, .. } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(target.event, None);
        assert_eq!(target.code.as_deref(), Some("WED-2026"));
    }

    #[test]
    fn test_event_target_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["neberku", "policy"]).is_err());

        let event = Uuid::new_v4().to_string();
        assert!(
            Cli::try_parse_from(["neberku", "policy", "--event", event.as_str(), "--code", "WED-2026"])
                .is_err()
        );

        let cli = Cli::try_parse_from([
            "neberku", "contribute", "--code", "WED-2026", "--name", "Hanna", "--phone", "0911",
            "--wish", "Congratulations", "cake.jpg",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Contribute { target: EventTarget { code: Some(_), .. }, .. }
        ));
    }
}
