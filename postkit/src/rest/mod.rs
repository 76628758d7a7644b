pub mod endpoints;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::PostkitConfig;
use crate::error::{PostkitError, Result};

/// HTTP client wrapper for the posts REST API and its search companion.
#[derive(Debug, Clone)]
pub struct PostkitHttpClient {
    client: Client,
    base_url: String,
    search_url: String,
}

impl PostkitHttpClient {
    pub fn new(base_url: &str, search_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            search_url: search_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from configuration, applying the request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PostkitError::Url`] if a base URL does not parse, or
    /// [`PostkitError::Request`] if the underlying client cannot be built.
    pub fn from_config(config: &PostkitConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            search_url: config.search_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a JSON resource from the posts backend.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "GET");
        self.send(self.client.get(&url).query(query)).await
    }

    /// GET a JSON resource from the search backend.
    pub async fn get_search<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.search_url, path);
        debug!(%url, ?query, "GET (search)");
        self.send(self.client.get(&url).query(query)).await
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        self.send(self.client.post(&url).json(body)).await
    }

    /// PUT a JSON body and decode the JSON reply.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "PUT");
        self.send(self.client.put(&url).json(body)).await
    }

    /// DELETE a resource, discarding the reply body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "DELETE");
        let resp = self.client.delete(&url).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = check_status(request.send().await?).await?;
        resp.json::<T>().await.map_err(PostkitError::Request)
    }

    /// Get the posts backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the search backend base URL.
    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

/// Turn a non-2xx response into [`PostkitError::Http`] carrying the body text.
async fn check_status(resp: Response) -> Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    Err(PostkitError::Http { status, message })
}
