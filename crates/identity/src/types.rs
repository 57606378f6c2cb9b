use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
pub const DEFAULT_GRAPH_URL: &str = "https://graph.microsoft.com/v1.0/";

/// OAuth client credentials as they appear in `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthSettings {
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    #[serde(rename = "redirectURL")]
    pub redirect_url: String,
    pub scopes: Vec<String>,
    pub tenant: String,
    #[serde(default = "default_authority")]
    pub authority: String,
    #[serde(rename = "graphURL", default = "default_graph_url")]
    pub graph_url: String,
}

fn default_authority() -> String {
    DEFAULT_AUTHORITY.to_string()
}

fn default_graph_url() -> String {
    DEFAULT_GRAPH_URL.to_string()
}

impl OAuthSettings {
    pub fn authorize_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/authorize",
            self.authority.trim_end_matches('/'),
            self.tenant
        )
    }

    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority.trim_end_matches('/'),
            self.tenant
        )
    }
}

/// Signed-in user as reported by Microsoft Graph.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub profile: Value,
    pub organization: Value,
}
