use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::SchemaVariant;
use crate::outputs::AuthOutputs;

/// The configuration document the frontend build feeds to Amplify. Keys
/// serialize in declaration order, so the emitted file diffs cleanly under
/// version control.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AmplifyConfig {
    pub project_region: String,
    pub cognito_region: String,
    pub user_pools_id: String,
    pub user_pools_web_client_id: String,

    /// Placeholder for federated login; never populated here.
    pub oauth: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_proxy_endpoint: Option<String>,
}

/// Pure mapping from resolved stack Outputs to the document. A stack-level
/// deployment uses one region for both the project and its Cognito pool, so
/// the same region lands in both fields.
pub fn synthesize(region: &str, outputs: &AuthOutputs, schema: SchemaVariant) -> AmplifyConfig {
    let api_proxy_endpoint = match schema {
        SchemaVariant::Minimal => None,
        SchemaVariant::Extended => Some(outputs.proxy_endpoint.clone()),
    };

    return AmplifyConfig {
        project_region: region.to_string(),
        cognito_region: region.to_string(),
        user_pools_id: outputs.user_pool_id.clone(),
        user_pools_web_client_id: outputs.user_pool_client_id.clone(),
        oauth: Map::new(),
        api_proxy_endpoint,
    };
}

impl AmplifyConfig {
    /// Two-space indentation, matching what the frontend repos keep under
    /// version control.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        return serde_json::to_string_pretty(self);
    }
}
