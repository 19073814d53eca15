//! Google OAuth 2.0 authorization-code flow with PKCE.
//!
//! A terminal cannot host the redirect, so the flow is split in two: the
//! user opens the authorization URL in a browser, then pastes the URL the
//! browser was redirected to (or just the `code` parameter) back into the
//! client.

use oauth2::basic::{
    BasicClient, BasicErrorResponse, BasicRevocationErrorResponse,
    BasicTokenIntrospectionResponse, BasicTokenResponse,
};
use oauth2::url::Url;
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet,
    EndpointSet, HttpRequest, HttpResponse, PkceCodeChallenge, PkceCodeVerifier, RedirectUrl,
    RequestTokenError, Scope, StandardRevocableToken, TokenResponse, TokenUrl,
};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::error::GoogleAuthError;
use crate::config::GoogleConfig;

/// Profile fields read from the userinfo endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// An authorization URL together with the secrets needed to redeem it.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingAuthorization {
    pub auth_url: String,
    pub state: String,
    verifier: String,
}

impl std::fmt::Debug for PendingAuthorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAuthorization")
            .field("auth_url", &self.auth_url)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

type ConfiguredClient = oauth2::Client<
    BasicErrorResponse,
    BasicTokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Failures of the HTTP round trip behind the token request.
#[derive(Debug, Error)]
enum TokenHttpError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("invalid token response: {0}")]
    Http(#[from] oauth2::http::Error),
    #[error("token request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
pub struct GoogleOAuth {
    config: GoogleConfig,
    http: Client,
}

impl GoogleOAuth {
    pub fn new(config: &GoogleConfig) -> Result<Self, GoogleAuthError> {
        if !config.is_enabled() {
            return Err(GoogleAuthError::NotConfigured);
        }
        let http = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(GoogleAuthError::Transport)?;
        Ok(Self {
            config: config.clone(),
            http,
        })
    }

    fn client(&self) -> Result<ConfiguredClient, GoogleAuthError> {
        let auth_url = AuthUrl::new(self.config.auth_url.clone())
            .map_err(|e| GoogleAuthError::invalid_url("auth_url", e))?;
        let token_url = TokenUrl::new(self.config.token_url.clone())
            .map_err(|e| GoogleAuthError::invalid_url("token_url", e))?;
        let redirect_url = RedirectUrl::new(self.config.redirect_url.clone())
            .map_err(|e| GoogleAuthError::invalid_url("redirect_url", e))?;

        let mut client = BasicClient::new(ClientId::new(self.config.client_id.clone()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url)
            .set_auth_type(AuthType::RequestBody);
        if let Some(secret) = &self.config.client_secret {
            client = client.set_client_secret(ClientSecret::new(secret.clone()));
        }
        Ok(client)
    }

    /// Build a fresh authorization URL with a random CSRF state and a
    /// SHA-256 PKCE challenge.
    pub fn authorization_request(&self) -> Result<PendingAuthorization, GoogleAuthError> {
        let client = self.client()?;

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
        let (url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        tracing::debug!(auth_url = %self.config.auth_url, "google authorization url generated");
        Ok(PendingAuthorization {
            auth_url: url.to_string(),
            state: csrf_state.secret().clone(),
            verifier: pkce_verifier.secret().clone(),
        })
    }

    /// Redeem an authorization code for an access token.
    pub async fn exchange_code(
        &self,
        pending: &PendingAuthorization,
        code: &str,
    ) -> Result<String, GoogleAuthError> {
        let client = self.client()?;
        let http = self.http.clone();
        let send = |request: HttpRequest| send_token_request(http.clone(), request);

        let token = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pending.verifier.clone()))
            .request_async(&send)
            .await
            .map_err(token_error)?;

        tracing::info!("google token received");
        Ok(token.access_token().secret().clone())
    }

    pub async fn fetch_profile(
        &self,
        access_token: &str,
    ) -> Result<GoogleProfile, GoogleAuthError> {
        let response = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(GoogleAuthError::Transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(GoogleAuthError::Transport)?;
        if !(200..300).contains(&status) {
            return Err(GoogleAuthError::TokenRejected { status, body });
        }

        let profile: GoogleProfile = serde_json::from_str(&body)
            .map_err(|e| GoogleAuthError::Malformed(format!("userinfo response: {}", e)))?;
        if profile.email.trim().is_empty() {
            return Err(GoogleAuthError::Malformed(
                "userinfo response has no email".to_string(),
            ));
        }
        tracing::info!(email = %profile.email, "google profile fetched");
        Ok(profile)
    }
}

/// Run one token request on its own task.
///
/// `oauth2` needs a `Send + Sync` future; only the join handle is held
/// across the await.
async fn send_token_request(
    http: Client,
    request: HttpRequest,
) -> Result<HttpResponse, TokenHttpError> {
    let task = tokio::spawn(async move {
        let request = reqwest::Request::try_from(request)?;
        let response = http.execute(request).await?;

        let mut builder = oauth2::http::Response::builder().status(response.status());
        for (name, value) in response.headers() {
            builder = builder.header(name, value);
        }
        let body = response.bytes().await?.to_vec();
        Ok::<_, TokenHttpError>(builder.body(body)?)
    });
    task.await?
}

fn token_error(err: RequestTokenError<TokenHttpError, BasicErrorResponse>) -> GoogleAuthError {
    match err {
        RequestTokenError::ServerResponse(response) => {
            tracing::warn!(error = %response.error(), "google token endpoint rejected the code");
            let reason = match response.error_description() {
                Some(description) => description.clone(),
                None => response.error().to_string(),
            };
            GoogleAuthError::CodeRejected { reason }
        }
        RequestTokenError::Request(TokenHttpError::Transport(e)) => GoogleAuthError::Transport(e),
        RequestTokenError::Request(e) => GoogleAuthError::Malformed(e.to_string()),
        RequestTokenError::Parse(e, _) => {
            GoogleAuthError::Malformed(format!("token response: {}", e))
        }
        RequestTokenError::Other(message) => GoogleAuthError::Malformed(message),
    }
}

/// Extract the authorization code from what the user pasted.
///
/// A full redirect URL must carry the expected `state`; a bare code is
/// accepted as is.
pub fn parse_redirect(input: &str, expected_state: &str) -> Result<String, GoogleAuthError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GoogleAuthError::MissingCode);
    }

    let Ok(url) = Url::parse(input) else {
        if input.chars().any(char::is_whitespace) {
            return Err(GoogleAuthError::MissingCode);
        }
        return Ok(input.to_string());
    };

    let mut code = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => {
                return Err(GoogleAuthError::Denied {
                    reason: value.into_owned(),
                })
            }
            _ => {}
        }
    }

    if state.as_deref() != Some(expected_state) {
        return Err(GoogleAuthError::StateMismatch);
    }
    code.filter(|c| !c.is_empty())
        .ok_or(GoogleAuthError::MissingCode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oauth() -> GoogleOAuth {
        GoogleOAuth::new(&GoogleConfig {
            client_id: "client-123".to_string(),
            ..GoogleConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn disabled_without_client_id() {
        assert!(matches!(
            GoogleOAuth::new(&GoogleConfig::default()),
            Err(GoogleAuthError::NotConfigured)
        ));
    }

    #[test]
    fn authorization_url_carries_pkce_and_scopes() {
        let pending = oauth().authorization_request().unwrap();
        let url = Url::parse(&pending.auth_url).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.clone());

        assert_eq!(get("client_id").as_deref(), Some("client-123"));
        assert_eq!(get("response_type").as_deref(), Some("code"));
        assert_eq!(get("scope").as_deref(), Some("openid email profile"));
        assert_eq!(get("code_challenge_method").as_deref(), Some("S256"));
        assert_eq!(get("state"), Some(pending.state.clone()));
        assert!(get("code_challenge").is_some());
    }

    #[test]
    fn each_request_gets_new_state() {
        let oauth = oauth();
        let a = oauth.authorization_request().unwrap();
        let b = oauth.authorization_request().unwrap();
        assert_ne!(a.state, b.state);
    }

    #[test]
    fn parse_redirect_checks_state() {
        let url = "http://127.0.0.1:8765/callback?code=abc&state=s1";
        assert_eq!(parse_redirect(url, "s1").unwrap(), "abc");
        assert!(matches!(
            parse_redirect(url, "other"),
            Err(GoogleAuthError::StateMismatch)
        ));
    }

    #[test]
    fn parse_redirect_accepts_bare_code() {
        assert_eq!(parse_redirect("  4/0Abc  ", "s").unwrap(), "4/0Abc");
        assert!(matches!(parse_redirect("", "s"), Err(GoogleAuthError::MissingCode)));
    }

    #[test]
    fn parse_redirect_reports_denial() {
        let url = "http://127.0.0.1:8765/callback?error=access_denied&state=s";
        assert!(matches!(
            parse_redirect(url, "s"),
            Err(GoogleAuthError::Denied { .. })
        ));
    }
}
