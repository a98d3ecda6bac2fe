use log::info;
use oauth2::{AccessToken, ClientId, ClientSecret, Scope, TokenUrl};
use reqwest::header::{HeaderValue, ACCEPT};
use serde::Deserialize;
use url::Url;

use crate::error::{HostawayError, Result};

const TOKEN_PATH: &str = "accessTokens";
const TOKEN_SCOPE: &str = "general";

/// Only `access_token` matters; `token_type`, `expires_in` and the response
/// Content-Type are not checked.
#[derive(Deserialize, Debug)]
struct TokenPayload {
    #[serde(default)]
    access_token: Option<String>,
}

/// Exchanges client credentials for a bearer token at `{base}accessTokens`.
pub(crate) struct Authenticator {
    token_url: TokenUrl,
    client_id: ClientId,
    client_secret: ClientSecret,
    scope: Scope,
    http: reqwest::Client,
}

impl Authenticator {
    pub(crate) fn new(
        base_url: &Url,
        client_id: &str,
        client_secret: &str,
        http: reqwest::Client,
    ) -> Result<Self> {
        let token_url = base_url
            .join(TOKEN_PATH)
            .map_err(|e| HostawayError::Config(format!("invalid token URL: {}", e)))?;

        Ok(Self {
            token_url: TokenUrl::from_url(token_url),
            client_id: ClientId::new(client_id.to_string()),
            client_secret: ClientSecret::new(client_secret.to_string()),
            scope: Scope::new(TOKEN_SCOPE.to_string()),
            http,
        })
    }

    pub(crate) async fn fetch_access_token(&self) -> Result<AccessToken> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.secret().as_str()),
            ("scope", self.scope.as_str()),
        ];

        let response = self
            .http
            .post(self.token_url.url().as_str())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                HostawayError::Authentication(format!("Failed to get Hostaway access token: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            HostawayError::Authentication(format!("Failed to get Hostaway access token: {}", e))
        })?;

        if !status.is_success() {
            return Err(HostawayError::Authentication(format!(
                "Failed to get Hostaway access token: status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let access_token = serde_json::from_str::<TokenPayload>(&body)
            .ok()
            .and_then(|payload| payload.access_token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                HostawayError::Authentication("No access_token returned from Hostaway.".to_string())
            })?;

        info!("Obtained Hostaway access token");
        Ok(AccessToken::new(access_token))
    }
}
