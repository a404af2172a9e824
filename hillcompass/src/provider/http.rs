//! HTTP client abstraction for testability

use std::time::Duration;

use futures::future::BoxFuture;

use super::types::LookupError;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, LookupError>>;
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, LookupError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| LookupError::Http(format!("Request failed: {}", e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(LookupError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| LookupError::Http(format!("Failed to read response: {}", e)))
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Mock HTTP client for testing
    pub struct MockHttpClient {
        pub response: Result<Vec<u8>, LookupError>,
        pub requested: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.as_bytes().to_vec()),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn err(error: LookupError) -> Self {
            Self {
                response: Err(error),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, LookupError>> {
            self.requested.lock().push(url.to_string());
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockHttpClient::ok("[1,2]");
        let result = mock.get("http://example.com").await;
        assert_eq!(result.unwrap(), b"[1,2]".to_vec());
        assert_eq!(mock.requested.lock().as_slice(), ["http://example.com"]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockHttpClient::err(LookupError::Http("Test error".to_string()));
        assert!(mock.get("http://example.com").await.is_err());
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::new(Duration::from_secs(5)).is_ok());
    }
}
