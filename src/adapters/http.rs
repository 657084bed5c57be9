use crate::domain::model::{Credentials, PostRecord, PublishedPost};
use crate::domain::ports::BlogApi;
use crate::utils::error::{PublishError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use url::Url;

/// reqwest-backed client for the codrspace v1 API.
#[derive(Debug, Clone)]
pub struct CodrspaceClient {
    client: Client,
    base_url: Url,
}

impl CodrspaceClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        // Url::join drops the last segment unless the base ends in '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| PublishError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| PublishError::ConfigError {
                message: format!("Cannot build API URL for '{}': {}", path, e),
            })
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        post: &PostRecord,
        credentials: &Credentials,
    ) -> Result<PublishedPost> {
        tracing::debug!("{} {}", method, url);

        let response = self
            .client
            .request(method, url.clone())
            .query(&credentials.query_params())
            .json(post)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(PublishError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl BlogApi for CodrspaceClient {
    async fn create_post(
        &self,
        post: &PostRecord,
        credentials: &Credentials,
    ) -> Result<PublishedPost> {
        let url = self.endpoint("post/")?;
        self.send(Method::POST, url, post, credentials).await
    }

    async fn update_post(
        &self,
        id: u64,
        post: &PostRecord,
        credentials: &Credentials,
    ) -> Result<PublishedPost> {
        let url = self.endpoint(&format!("post/{}/", id))?;
        self.send(Method::PUT, url, post, credentials).await
    }
}
