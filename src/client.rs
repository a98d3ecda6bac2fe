use log::debug;
use oauth2::AccessToken;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use url::Url;

use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::{HostawayError, Result};
use crate::resources::{Resource, ResourceKind};

const USER_AGENT: &str = concat!("hostaway-rs/", env!("CARGO_PKG_VERSION"));

/// Per-request extras for [`HostawayClient::request`].
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    /// Caller headers. `Authorization`, `Accept` and `Cache-Control` are always overwritten.
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn query<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            query: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ..Default::default()
        }
    }

    pub fn json(body: Value) -> Self {
        Self {
            json: Some(body),
            ..Default::default()
        }
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Authenticated Hostaway API client.
///
/// Holds one bearer token. The token is fetched on construction and fetched again
/// only when it is missing; expiry and 401 responses leave it untouched.
pub struct HostawayClient {
    config: ClientConfig,
    base_url: Url,
    http: reqwest::Client,
    authenticator: Authenticator,
    access_token: Mutex<Option<AccessToken>>,
}

impl HostawayClient {
    /// Validates credentials, builds the transport and authenticates immediately.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        if !config.has_credentials() {
            return Err(HostawayError::Authentication(
                "client_id and client_secret are required for Hostaway API.".to_string(),
            ));
        }

        let base_url = Url::parse(&config.base_uri())
            .map_err(|e| HostawayError::Config(format!("invalid base URI: {}", e)))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .build()
            .map_err(|e| HostawayError::Config(format!("failed to build HTTP client: {}", e)))?;

        let authenticator =
            Authenticator::new(&base_url, &config.client_id, &config.client_secret, http.clone())?;

        let client = Self {
            config,
            base_url,
            http,
            authenticator,
            access_token: Mutex::new(None),
        };
        client.authenticate().await?;

        Ok(client)
    }

    async fn authenticate(&self) -> Result<()> {
        let token = self.authenticator.fetch_access_token().await?;
        *self.access_token.lock().await = Some(token);
        Ok(())
    }

    /// Current token, authenticating first if none is held.
    async fn access_token(&self) -> Result<AccessToken> {
        let mut slot = self.access_token.lock().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let token = self.authenticator.fetch_access_token().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    pub async fn has_token(&self) -> bool {
        self.access_token.lock().await.is_some()
    }

    /// Drops the held token; the next request authenticates again.
    pub async fn invalidate_token(&self) {
        *self.access_token.lock().await = None;
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolves `path` under the base URI. Leading slashes are ignored.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| HostawayError::Api {
                message: format!("invalid request path '{}': {}", path, e),
                status: None,
            })
    }

    /// Sends an authenticated request.
    ///
    /// Returns `None` for an empty response body, otherwise the decoded JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<Value>> {
        let token = self.access_token().await?;
        let url = self.endpoint(path)?;

        let mut headers = options.headers;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token.secret())).map_err(|_| {
            HostawayError::Authentication("access token is not a valid header value".to_string())
        })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url).headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.json {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_body = response.text().await?;

        if !status.is_success() {
            let message = if response_body.is_empty() {
                status.to_string()
            } else {
                response_body
            };
            return Err(HostawayError::Api {
                message,
                status: Some(status.as_u16()),
            });
        }

        if response_body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&response_body)
            .map(Some)
            .map_err(|e| HostawayError::Api {
                message: format!("invalid JSON in response: {}", e),
                status: Some(status.as_u16()),
            })
    }

    /// Like [`request`](Self::request), decoding into `T`. An empty body decodes from `null`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let value = self.request(method, path, options).await?;
        serde_json::from_value(value.unwrap_or(Value::Null)).map_err(|e| HostawayError::Api {
            message: format!("unexpected response shape: {}", e),
            status: None,
        })
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Option<Value>> {
        self.request(Method::GET, path, RequestOptions::query(query.iter().copied()))
            .await
    }

    pub async fn get_as<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        self.request_as(Method::GET, path, RequestOptions::query(query.iter().copied()))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<Value>> {
        self.request(Method::POST, path, RequestOptions::json(to_json(body)?))
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<Value>> {
        self.request(Method::PUT, path, RequestOptions::json(to_json(body)?))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.request(Method::DELETE, path, RequestOptions::default())
            .await
    }

    pub fn resource(&self, kind: ResourceKind) -> Resource<'_> {
        Resource::new(self, kind.path())
    }

    pub fn listings(&self) -> Resource<'_> {
        self.resource(ResourceKind::Listings)
    }

    pub fn reservations(&self) -> Resource<'_> {
        self.resource(ResourceKind::Reservations)
    }

    pub fn messages(&self) -> Resource<'_> {
        self.resource(ResourceKind::Messages)
    }

    pub fn channels(&self) -> Resource<'_> {
        self.resource(ResourceKind::Channels)
    }

    pub fn calendar(&self) -> Resource<'_> {
        self.resource(ResourceKind::Calendar)
    }

    pub fn guests(&self) -> Resource<'_> {
        self.resource(ResourceKind::Guests)
    }

    pub fn tasks(&self) -> Resource<'_> {
        self.resource(ResourceKind::Tasks)
    }

    pub fn users(&self) -> Resource<'_> {
        self.resource(ResourceKind::Users)
    }

    /// Messages of one conversation: `conversations/{id}/messages`.
    pub fn conversation_messages(&self, conversation_id: impl std::fmt::Display) -> Resource<'_> {
        Resource::new(
            self,
            format!("{}/{}/messages", ResourceKind::Messages.path(), conversation_id),
        )
    }

    /// Calendar days of one listing: `listings/{id}/calendar`.
    pub fn listing_calendar(&self, listing_id: impl std::fmt::Display) -> Resource<'_> {
        Resource::new(
            self,
            format!("{}/{}/calendar", ResourceKind::Listings.path(), listing_id),
        )
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| HostawayError::Api {
        message: format!("failed to encode request body: {}", e),
        status: None,
    })
}
