use crate::auth::MicrosoftAuth;
use crate::error::{IdentityError, IdentityResult};
use crate::graph::GraphApi;
use crate::state::{StateLedger, STATE_TTL};
use crate::types::{Identity, OAuthSettings};
use oauth2::url::Url;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct IdentityOptions {
    /// Upper bound on every outbound call to the identity provider.
    pub timeout: Duration,
    pub validate_state: bool,
    pub state_ttl: Duration,
}

impl Default for IdentityOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            validate_state: true,
            state_ttl: STATE_TTL,
        }
    }
}

/// Drives the login redirect and the code-for-profile exchange.
pub struct IdentityClient {
    auth: MicrosoftAuth,
    graph: GraphApi,
    states: StateLedger,
    validate_state: bool,
}

impl IdentityClient {
    pub fn new(settings: &OAuthSettings, options: IdentityOptions) -> IdentityResult<Self> {
        Ok(Self {
            auth: MicrosoftAuth::new(settings, options.timeout)?,
            graph: GraphApi::new(&settings.graph_url, options.timeout)?,
            states: StateLedger::new(options.state_ttl),
            validate_state: options.validate_state,
        })
    }

    /// Returns the provider URL the browser should be redirected to.
    pub fn begin_login(&self) -> Url {
        let state = self.states.issue();
        debug!(outstanding = self.states.outstanding(), "Issued login state");
        self.auth.authorize_url(state)
    }

    pub async fn complete_exchange(
        &self,
        code: &str,
        state: Option<&str>,
    ) -> IdentityResult<Identity> {
        if self.validate_state {
            let known = state.map(|s| self.states.consume(s)).unwrap_or(false);
            if !known {
                return Err(IdentityError::InvalidState);
            }
        }

        let token = self.auth.exchange_code(code).await?;

        let profile = self.graph.me(&token).await?;
        let organization = self.graph.organization(&token).await?;

        info!("Completed Microsoft sign-in");
        Ok(Identity {
            profile,
            organization,
        })
    }
}
