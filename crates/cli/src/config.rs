//! Server configuration loaded from a TOML file.
//!
//! ```toml
//! bind = "0.0.0.0:5678"
//!
//! [trigger]
//! authentication = "webhookSecret"
//! event = "qualytics.flow.triggered"
//!
//! [credentials.qualyticsApi]
//! webhookSecret = "s3cr3t"
//! ```
//!
//! Every section is optional; missing values fall back to the trigger's
//! defaults and an empty credential set.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use nodes::credentials::QualyticsApi;
use nodes::qualytics::TriggerParameters;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind: Option<String>,
    pub trigger: TriggerParameters,
    /// Credential records keyed by credential type name.
    pub credentials: HashMap<String, Value>,
}

impl Config {
    /// Load the config file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            debug!("no config file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        debug!(
            "loaded {} ({} credential record(s))",
            path.display(),
            config.credentials.len()
        );
        Ok(config)
    }

    /// Bind address: the explicit override, then the file, then the default.
    pub fn bind_addr(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_owned())
    }

    /// Replace the stored webhook secret, keeping any other fields of the
    /// `qualyticsApi` record.
    pub fn set_webhook_secret(&mut self, secret: String) {
        let record = self
            .credentials
            .entry(QualyticsApi::NAME.to_owned())
            .or_insert_with(|| json!({}));

        if !record.is_object() {
            *record = json!({});
        }
        if let Some(fields) = record.as_object_mut() {
            fields.insert("webhookSecret".to_owned(), Value::String(secret));
        }
    }
}
