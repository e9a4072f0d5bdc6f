//! HTTP client abstraction for remote sources.

use crate::grab::GrabError;

/// Trait for HTTP client operations.
///
/// Allows injecting a preconfigured client (timeouts, proxies, headers)
/// or a stand-in during tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request, returning the response body.
    ///
    /// Responses with a client or server error status are failures.
    fn get(&self, url: &str) -> Result<Vec<u8>, GrabError>;

    /// Verifies that `url` is retrievable.
    ///
    /// The default implementation performs a full [`get`](Self::get).
    fn check(&self, url: &str) -> Result<(), GrabError> {
        self.get(url).map(|_| ())
    }
}

#[cfg(feature = "http")]
pub use self::reqwest_client::ReqwestClient;

#[cfg(feature = "http")]
mod reqwest_client {
    use super::HttpClient;
    use crate::grab::GrabError;
    use reqwest::blocking::{Client, Response};
    use std::sync::OnceLock;
    use std::time::Duration;

    /// [`HttpClient`] backed by a blocking [`reqwest`] client.
    ///
    /// Unless [provided](Self::from_client), the underlying client
    /// is built on first use, so constructing a `ReqwestClient`
    /// never performs network or TLS setup.
    #[derive(Default)]
    pub struct ReqwestClient {
        client: OnceLock<Client>,
        timeout: Option<Duration>,
    }

    impl ReqwestClient {
        /// Creates a client with no request timeout.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a client whose requests time out after `timeout`.
        pub fn with_timeout(timeout: Duration) -> Self {
            Self {
                client: OnceLock::new(),
                timeout: Some(timeout),
            }
        }

        /// Wraps an existing, fully configured client.
        pub fn from_client(client: Client) -> Self {
            Self {
                client: OnceLock::from(client),
                timeout: None,
            }
        }

        fn client(&self) -> Result<&Client, GrabError> {
            if let Some(client) = self.client.get() {
                return Ok(client);
            }

            let mut builder = Client::builder();
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| GrabError::Http(format!("Failed to create HTTP client: {e}")))?;

            // A concurrent initializer may win; either client is equivalent.
            Ok(self.client.get_or_init(|| client))
        }

        fn send(&self, url: &str) -> Result<Response, GrabError> {
            let response = self
                .client()?
                .get(url)
                .send()
                .map_err(|e| GrabError::Http(format!("Request failed: {e}")))?;

            let status = response.status();
            if status.is_client_error() || status.is_server_error() {
                return Err(GrabError::HttpStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }
            Ok(response)
        }
    }

    impl HttpClient for ReqwestClient {
        fn get(&self, url: &str) -> Result<Vec<u8>, GrabError> {
            self.send(url)?
                .bytes()
                .map(|bytes| bytes.to_vec())
                .map_err(|e| GrabError::Http(format!("Failed to read response: {e}")))
        }

        fn check(&self, url: &str) -> Result<(), GrabError> {
            // The body is not read; dropping the response closes the connection
            self.send(url).map(|_| ())
        }
    }
}
