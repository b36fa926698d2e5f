pub mod endpoints;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use crate::types::Envelope;

/// HTTP client wrapper for the console REST API.
#[derive(Debug, Clone)]
pub struct ConsoleHttpClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
    denial_messages: Vec<String>,
}

impl ConsoleHttpClient {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.server_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            denial_messages: config.denial_messages.clone(),
        }
    }

    /// Client with default settings against `base_url`.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(&ConsoleConfig {
            server_url: base_url.to_string(),
            ..Default::default()
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET an envelope from `/api/{endpoint}`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<Envelope<T>> {
        let url = self.url(endpoint);
        debug!(%url, ?query, "GET");
        let resp = self
            .authorize(self.client.get(&url).query(query))
            .send()
            .await?;
        self.read_envelope(resp).await
    }

    /// POST a JSON body to `/api/{endpoint}` and read the envelope.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Envelope> {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let resp = self
            .authorize(self.client.post(&url).query(query).json(body))
            .send()
            .await?;
        self.read_envelope(resp).await
    }

    /// POST without reading the response body.
    pub async fn post_discard(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<()> {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        self.authorize(self.client.post(&url).query(query))
            .send()
            .await?;
        Ok(())
    }

    async fn read_envelope<T: DeserializeOwned>(&self, resp: Response) -> Result<Envelope<T>> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            return Err(ConsoleError::Denied(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ConsoleError::Http {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope = resp.json::<Envelope<T>>().await?;
        if envelope.is_ok() {
            Ok(envelope)
        } else if envelope.is_denied(&self.denial_messages) {
            Err(ConsoleError::Denied(envelope.msg))
        } else {
            Err(ConsoleError::Server(envelope.msg))
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
