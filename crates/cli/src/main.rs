//! `qualytics-trigger` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`           — start the webhook server.
//! - `describe`        — print the node and credential descriptors as JSON.
//! - `test-credential` — run the credential connectivity test.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{AppState, NodeRegistration};
use engine::TracingLauncher;
use nodes::credentials::QualyticsApi;
use nodes::{InMemoryCredentialStore, QualyticsTrigger, WebhookNode};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "qualytics-trigger",
    about = "Starts workflows from Qualytics Flow Action webhooks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the webhook server.
    Serve {
        /// Listen address (overrides `bind` from the config file).
        #[arg(long, env = "QUALYTICS_TRIGGER_BIND")]
        bind: Option<String>,
        /// Path to the TOML config file.
        #[arg(long, env = "QUALYTICS_TRIGGER_CONFIG")]
        config: Option<PathBuf>,
        /// Webhook secret (overrides `credentials.qualyticsApi.webhookSecret`).
        #[arg(long, env = "QUALYTICS_WEBHOOK_SECRET", hide_env_values = true)]
        webhook_secret: Option<String>,
    },
    /// Print the node and credential descriptors as JSON.
    Describe,
    /// Run the `qualyticsApi` credential connectivity test.
    TestCredential,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, config, webhook_secret } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(secret) = webhook_secret {
                config.set_webhook_secret(secret);
            }
            let bind = config.bind_addr(bind);

            info!(
                authentication = config.trigger.authentication.as_str(),
                event = config.trigger.event.as_str(),
                "starting Qualytics trigger on {bind}"
            );

            let credentials = InMemoryCredentialStore::new(config.credentials);
            let state = AppState::new(Arc::new(credentials), Arc::new(TracingLauncher));
            let registration = NodeRegistration::new(
                Arc::new(QualyticsTrigger::new()),
                config.trigger.to_value(),
            );

            let router = api::build_router(state, vec![registration]);
            api::serve(&bind, router).await?;
        }
        Command::Describe => {
            let trigger = QualyticsTrigger::new();
            let out = json!({
                "node": trigger.description(),
                "credentials": [QualyticsApi::description()],
            });
            let text = serde_json::to_string_pretty(&out).context("cannot render descriptors")?;
            println!("{text}");
        }
        Command::TestCredential => {
            let test = QualyticsApi::description().test;
            info!("testing credential against {}", test.target());
            let result = test.run().await;
            println!("{}", serde_json::to_string(&result).context("cannot render result")?);
        }
    }

    Ok(())
}
