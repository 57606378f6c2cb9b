use crate::error::{IdentityError, IdentityResult};
use crate::types::OAuthSettings;
use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::reqwest::async_http_client;
use oauth2::url::Url;
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl,
    RequestTokenError, Scope, TokenResponse, TokenUrl,
};
use std::time::Duration;

/// Authorization Code grant against a Microsoft identity platform tenant.
#[derive(Clone)]
pub struct MicrosoftAuth {
    client: BasicClient,
    scopes: Vec<Scope>,
    timeout: Duration,
}

impl MicrosoftAuth {
    pub fn new(settings: &OAuthSettings, timeout: Duration) -> IdentityResult<Self> {
        let auth_url = AuthUrl::new(settings.authorize_endpoint())
            .map_err(|e| IdentityError::Config(format!("authorize URL: {e}")))?;
        let token_url = TokenUrl::new(settings.token_endpoint())
            .map_err(|e| IdentityError::Config(format!("token URL: {e}")))?;
        let redirect_url = RedirectUrl::new(settings.redirect_url.clone())
            .map_err(|e| IdentityError::Config(format!("redirectURL: {e}")))?;

        let client = BasicClient::new(
            ClientId::new(settings.client_id.clone()),
            Some(ClientSecret::new(settings.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody)
        .set_redirect_uri(redirect_url);

        Ok(Self {
            client,
            scopes: settings.scopes.iter().cloned().map(Scope::new).collect(),
            timeout,
        })
    }

    /// Online access only, and always show the account picker.
    pub fn authorize_url(&self, state: String) -> Url {
        let (url, _) = self
            .client
            .authorize_url(move || CsrfToken::new(state))
            .add_scopes(self.scopes.iter().cloned())
            .add_extra_param("access_type", "online")
            .add_extra_param("prompt", "select_account")
            .url();
        url
    }

    /// Redeems `code` at the token endpoint and returns the bearer token.
    pub async fn exchange_code(&self, code: &str) -> IdentityResult<String> {
        let request = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client);

        let token = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| {
                IdentityError::Timeout(format!(
                    "token endpoint did not answer within {:?}",
                    self.timeout
                ))
            })?
            .map_err(describe_token_error)?;

        Ok(token.access_token().secret().clone())
    }
}

fn describe_token_error<RE>(err: RequestTokenError<RE, BasicErrorResponse>) -> IdentityError
where
    RE: std::error::Error + 'static,
{
    let msg = match err {
        RequestTokenError::ServerResponse(resp) => {
            let code = AsRef::<str>::as_ref(resp.error());
            match resp.error_description() {
                Some(desc) => format!("{code}: {desc}"),
                None => code.to_string(),
            }
        }
        RequestTokenError::Request(e) => format!("token request failed: {e}"),
        RequestTokenError::Parse(e, _) => format!("unreadable token response: {e}"),
        RequestTokenError::Other(msg) => msg,
    };
    IdentityError::Exchange(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_GRAPH_URL;
    use std::collections::HashMap;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(authority: &str) -> OAuthSettings {
        OAuthSettings {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            redirect_url: "http://localhost:42069/oauth/exchange".to_string(),
            scopes: vec!["User.Read".to_string(), "openid".to_string()],
            tenant: "contoso".to_string(),
            authority: authority.to_string(),
            graph_url: DEFAULT_GRAPH_URL.to_string(),
        }
    }

    #[test]
    fn authorize_url_carries_state_scopes_and_prompt() {
        let auth = MicrosoftAuth::new(
            &settings("https://login.microsoftonline.com"),
            Duration::from_secs(5),
        )
        .expect("auth");
        let url = auth.authorize_url("abcDEF0123456789".to_string());

        assert_eq!(url.host_str(), Some("login.microsoftonline.com"));
        assert_eq!(url.path(), "/contoso/oauth2/v2.0/authorize");

        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(query["state"], "abcDEF0123456789");
        assert_eq!(query["client_id"], "client-123");
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["scope"], "User.Read openid");
        assert_eq!(query["access_type"], "online");
        assert_eq!(query["prompt"], "select_account");
        assert_eq!(query["redirect_uri"], "http://localhost:42069/oauth/exchange");
    }

    #[test]
    fn invalid_redirect_url_is_a_config_error() {
        let mut bad = settings("https://login.microsoftonline.com");
        bad.redirect_url = "not a url".to_string();
        let result = MicrosoftAuth::new(&bad, Duration::from_secs(5));
        assert!(matches!(result, Err(IdentityError::Config(_))));
    }

    #[tokio::test]
    async fn exchange_returns_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contoso/oauth2/v2.0/token"))
            .and(body_string_contains("code=good-code"))
            .and(body_string_contains("client_secret=secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "bearer-xyz",
                "token_type": "bearer",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;

        let auth = MicrosoftAuth::new(&settings(&server.uri()), Duration::from_secs(5))
            .expect("auth");
        let token = auth.exchange_code("good-code").await.expect("token");
        assert_eq!(token, "bearer-xyz");
    }

    #[tokio::test]
    async fn rejected_code_is_an_exchange_error_with_provider_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contoso/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "AADSTS70008: The provided authorization code has expired."
            })))
            .mount(&server)
            .await;

        let auth = MicrosoftAuth::new(&settings(&server.uri()), Duration::from_secs(5))
            .expect("auth");
        let err = auth.exchange_code("stale").await.expect_err("should fail");
        match err {
            IdentityError::Exchange(msg) => {
                assert!(msg.starts_with("invalid_grant"));
                assert!(msg.contains("AADSTS70008"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_token_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contoso/oauth2/v2.0/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(5))
                    .set_body_json(serde_json::json!({
                        "access_token": "late",
                        "token_type": "bearer"
                    })),
            )
            .mount(&server)
            .await;

        let auth = MicrosoftAuth::new(&settings(&server.uri()), Duration::from_millis(200))
            .expect("auth");
        let err = auth.exchange_code("good-code").await.expect_err("should time out");
        match err {
            IdentityError::Timeout(msg) => assert!(msg.ends_with("within 200ms"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
