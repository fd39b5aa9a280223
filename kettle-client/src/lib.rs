//! Kettle HTTP Client
//!
//! A small HTTP client for the job endpoints of a Kettle (Carte) server.
//!
//! The server answers with XML-ish text rather than JSON, so every call hands
//! back the raw response body and leaves decoding to the caller. The
//! [`KettleTransport`] trait is the seam the runner talks through, which lets
//! tests swap the network for a scripted server.
//!
//! # Example
//!
//! ```no_run
//! use kettle_client::{KettleClient, KettleTransport};
//! use kettle_core::dto::job::JobStatusRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = KettleClient::new("http://localhost:8080/pentaho/kettle")
//!         .with_basic_auth("admin", Some("password".to_string()));
//!
//!     let body = client.job_status(&JobStatusRequest::new("load_sales")).await?;
//!     println!("{}", body);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod transport;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use transport::KettleTransport;

use reqwest::{Client, RequestBuilder};

/// HTTP client for a Kettle server
///
/// Bound to one base URL (e.g. `http://localhost:8080/pentaho/kettle`); the
/// endpoint names are appended to it.
#[derive(Debug, Clone)]
pub struct KettleClient {
    /// Base URL of the Kettle web service, without trailing slash
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Basic auth credentials attached to every request
    credentials: Option<(String, Option<String>)>,
}

impl KettleClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Kettle web service
    ///
    /// # Example
    /// ```
    /// use kettle_client::KettleClient;
    ///
    /// let client = KettleClient::new("http://localhost:8080/pentaho/kettle");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use kettle_client::KettleClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = KettleClient::with_client("http://localhost:8080/pentaho/kettle", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials: None,
        }
    }

    /// Attach HTTP basic credentials to every request
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.credentials = Some((username.into(), password));
        self
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET request for an endpoint under the base URL
    fn get(&self, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, endpoint);
        let request = self.client.get(url);

        match &self.credentials {
            Some((username, password)) => request.basic_auth(username, password.as_ref()),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle a server response and return its body as text
    ///
    /// Non-success status codes become [`ClientError::ApiError`] carrying the
    /// body the server sent along.
    async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = KettleClient::new("http://localhost:8080/pentaho/kettle");
        assert_eq!(client.base_url(), "http://localhost:8080/pentaho/kettle");
        assert!(client.credentials.is_none());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = KettleClient::new("http://localhost:8080/pentaho/kettle/");
        assert_eq!(client.base_url(), "http://localhost:8080/pentaho/kettle");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = KettleClient::with_client("http://localhost:8081/kettle", http_client);
        assert_eq!(client.base_url(), "http://localhost:8081/kettle");
    }

    #[test]
    fn test_client_with_basic_auth() {
        let client = KettleClient::new("http://localhost:8080/kettle")
            .with_basic_auth("cluster", Some("cluster".to_string()));
        assert_eq!(
            client.credentials,
            Some(("cluster".to_string(), Some("cluster".to_string())))
        );
    }
}
