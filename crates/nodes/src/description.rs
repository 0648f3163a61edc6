//! Declarative node and credential metadata.
//!
//! Descriptors carry no behaviour. The HTTP layer reads the webhook entries
//! to register routes; everything else is exposed for inspection (see the
//! `describe` CLI command) and serializes with camelCase keys.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Node description
// ---------------------------------------------------------------------------

/// Full metadata for one node type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeDescription {
    pub display_name: &'static str,
    /// Unique type name, also used as the node label on launched executions.
    pub name: &'static str,
    pub icon: &'static str,
    pub group: Vec<&'static str>,
    pub version: u32,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub defaults: NodeDefaults,
    pub usable_as_tool: bool,
    pub inputs: Vec<ConnectionType>,
    pub outputs: Vec<ConnectionType>,
    pub credentials: Vec<CredentialReference>,
    pub webhooks: Vec<WebhookDescription>,
    pub properties: Vec<NodeProperty>,
}

impl NodeTypeDescription {
    /// Look up a declared property by its parameter name.
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDefaults {
    pub name: &'static str,
}

/// Kind of connection point on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Main,
}

/// A credential type the node may ask for at run time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialReference {
    pub name: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

/// Visibility rule: show the owning element only when every listed
/// parameter currently holds one of the listed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayOptions {
    pub show: BTreeMap<&'static str, Vec<&'static str>>,
}

impl DisplayOptions {
    pub fn show_when(parameter: &'static str, values: &[&'static str]) -> Self {
        let mut show = BTreeMap::new();
        show.insert(parameter, values.to_vec());
        Self { show }
    }

    /// Evaluate the rule against a node's parameter object.
    pub fn is_visible(&self, parameters: &Value) -> bool {
        self.show.iter().all(|(name, allowed)| {
            parameters
                .get(*name)
                .and_then(Value::as_str)
                .is_some_and(|v| allowed.contains(&v))
        })
    }
}

// ---------------------------------------------------------------------------
// Webhooks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
}

/// When the host answers the webhook caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseMode {
    /// Reply as soon as the request has been accepted, before the workflow runs.
    OnReceived,
}

/// One inbound HTTP route owned by a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDescription {
    pub name: &'static str,
    pub http_method: HttpMethod,
    pub response_mode: ResponseMode,
    /// Route path relative to the server root, without a leading slash.
    pub path: &'static str,
}

impl WebhookDescription {
    /// Absolute route path as registered with the router.
    pub fn route(&self) -> String {
        format!("/{}", self.path.trim_start_matches('/'))
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Options,
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyOption {
    pub name: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeOptions {
    pub password: bool,
}

/// A user-configurable field on a node or credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    pub default: Value,
    pub description: &'static str,
}

impl NodeProperty {
    /// Whether `value` is one of the declared options. Free-form properties
    /// accept anything.
    pub fn allows(&self, value: &str) -> bool {
        self.kind != PropertyType::Options || self.options.iter().any(|o| o.value == value)
    }
}
