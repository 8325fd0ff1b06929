//! HTTP client for the basic-info and details services

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin JSON client shared by both services
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { client })
    }

    fn url(base: &str, path: &str) -> String {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, base: &str, path: &str) -> ClientResult<T> {
        self.get_with_query(base, path, &[]).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        base: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = Self::url(base, path);
        tracing::debug!(url = %url, ?query, "GET");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        base: &str,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = Self::url(base, path);
        tracing::debug!(url = %url, "POST");

        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Non-2xx statuses become [`ClientError::Status`]; a 2xx body that does
    /// not decode becomes [`ClientError::InvalidResponse`].
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        assert_eq!(
            HttpClient::url("http://localhost:4001/", "/basicInfo"),
            "http://localhost:4001/basicInfo"
        );
        assert_eq!(
            HttpClient::url("http://localhost:4002", "locations"),
            "http://localhost:4002/locations"
        );
    }
}
