//! Typed node parameters for the Qualytics trigger.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::NodeError;

/// How inbound requests are authenticated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Authentication {
    #[default]
    None,
    WebhookSecret,
}

impl Authentication {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::WebhookSecret => "webhookSecret",
        }
    }
}

/// Which inbound events start a workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "qualytics.flow.triggered")]
    FlowTriggered,
}

impl EventFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::FlowTriggered => "qualytics.flow.triggered",
        }
    }

    /// Whether `body` passes the filter. A missing or non-string `event`
    /// field never matches a specific event.
    pub fn matches(self, body: &Value) -> bool {
        match self {
            Self::All => true,
            filter => body.get("event").and_then(Value::as_str) == Some(filter.as_str()),
        }
    }
}

/// The two settings a workflow author picks for the trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerParameters {
    pub authentication: Authentication,
    pub event: EventFilter,
}

impl TriggerParameters {
    /// Decode the node's parameter object. `null` yields the defaults.
    pub fn from_value(parameters: &Value) -> Result<Self, NodeError> {
        if parameters.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(parameters).map_err(|e| NodeError::InvalidParameters(e.to_string()))
    }

    pub fn to_value(self) -> Value {
        serde_json::json!({
            "authentication": self.authentication.as_str(),
            "event": self.event.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_none_and_all() {
        let params = TriggerParameters::from_value(&json!({})).unwrap();
        assert_eq!(params.authentication, Authentication::None);
        assert_eq!(params.event, EventFilter::All);

        assert_eq!(TriggerParameters::from_value(&Value::Null).unwrap(), params);
    }

    #[test]
    fn parses_host_option_values() {
        let params = TriggerParameters::from_value(&json!({
            "authentication": "webhookSecret",
            "event": "qualytics.flow.triggered",
        }))
        .unwrap();
        assert_eq!(params.authentication, Authentication::WebhookSecret);
        assert_eq!(params.event, EventFilter::FlowTriggered);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = TriggerParameters::from_value(&json!({ "event": "qualytics.other" })).unwrap_err();
        assert!(matches!(err, NodeError::InvalidParameters(_)));
    }

    #[test]
    fn to_value_round_trips_through_from_value() {
        let params = TriggerParameters {
            authentication: Authentication::WebhookSecret,
            event: EventFilter::FlowTriggered,
        };
        assert_eq!(TriggerParameters::from_value(&params.to_value()).unwrap(), params);
    }

    #[test]
    fn all_filter_passes_any_body() {
        for body in [json!({}), json!({ "event": "x" }), json!([1, 2]), json!("text"), Value::Null] {
            assert!(EventFilter::All.matches(&body));
        }
    }

    #[test]
    fn specific_filter_needs_exact_string_event() {
        let filter = EventFilter::FlowTriggered;
        assert!(filter.matches(&json!({ "event": "qualytics.flow.triggered" })));
        assert!(!filter.matches(&json!({ "event": "other" })));
        assert!(!filter.matches(&json!({ "event": "Qualytics.Flow.Triggered" })));
        assert!(!filter.matches(&json!({ "event": 7 })));
        assert!(!filter.matches(&json!({})));
        assert!(!filter.matches(&json!(["qualytics.flow.triggered"])));
    }
}
