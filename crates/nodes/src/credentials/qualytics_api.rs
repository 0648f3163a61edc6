//! The `qualyticsApi` credential: a single optional webhook secret.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{CredentialTestRequest, CredentialTypeDescription};
use crate::description::{HttpMethod, NodeProperty, PropertyType, TypeOptions};
use crate::CredentialError;

pub struct QualyticsApi;

impl QualyticsApi {
    pub const NAME: &'static str = "qualyticsApi";
    pub const TEST_BASE_URL: &'static str = "https://www.qualytics.io";

    pub fn description() -> CredentialTypeDescription {
        CredentialTypeDescription {
            name: Self::NAME,
            display_name: "Qualytics API",
            documentation_url: "https://docs.qualytics.io/integrations/n8n",
            icon: "file:../icons/qualytics.svg",
            properties: vec![NodeProperty {
                display_name: "Webhook Secret",
                name: "webhookSecret",
                kind: PropertyType::String,
                type_options: Some(TypeOptions { password: true }),
                options: Vec::new(),
                default: json!(""),
                description: "Optional secret to validate incoming webhook requests from \
                              Qualytics. Must match the secret configured in your Qualytics \
                              n8n integration.",
            }],
            test: CredentialTestRequest {
                base_url: Self::TEST_BASE_URL.to_owned(),
                url: "/",
                method: HttpMethod::Head,
                skip_ssl_certificate_validation: true,
            },
        }
    }
}

/// Decoded `qualyticsApi` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualyticsApiCredentials {
    #[serde(default)]
    webhook_secret: Option<String>,
}

impl QualyticsApiCredentials {
    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self { webhook_secret: Some(webhook_secret.into()) }
    }

    pub fn from_value(data: Value) -> Result<Self, CredentialError> {
        serde_json::from_value(data).map_err(|e| CredentialError::Malformed {
            credential_type: QualyticsApi::NAME.to_owned(),
            message: e.to_string(),
        })
    }

    /// The configured secret, empty when none is set.
    pub fn webhook_secret(&self) -> &str {
        self.webhook_secret.as_deref().unwrap_or_default()
    }

    /// Whether a request carrying `received` passes secret validation.
    ///
    /// An empty secret disables validation. Otherwise the header must equal
    /// the secret exactly (plain, case-sensitive string comparison).
    pub fn accepts(&self, received: Option<&str>) -> bool {
        let expected = self.webhook_secret();
        expected.is_empty() || received == Some(expected)
    }
}
