//! Authenticated HTTP plumbing shared by the Drive and Sheets clients

use crate::config::{GoogleConfig, RetryConfig, SecretString};
use crate::domain::{DriveError, MedRoiError, Result};
use crate::log_retry_attempt;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Bearer-authenticated reqwest client with retry
#[derive(Clone)]
pub struct GoogleHttp {
    client: Client,
    access_token: SecretString,
    retry: RetryConfig,
}

impl GoogleHttp {
    /// Builds the client from the `[google]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no access token is configured or
    /// the HTTP client cannot be built.
    pub fn new(config: &GoogleConfig) -> Result<Self> {
        let access_token = config.access_token.clone().ok_or_else(|| {
            MedRoiError::Configuration("google.access_token is not set".to_string())
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                MedRoiError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            access_token,
            retry: config.retry.clone(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Adds the `Authorization` header to a request
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(
            reqwest::header::AUTHORIZATION,
            self.access_token.expose_secret().bearer(),
        )
    }

    /// Sends the request built by `build`, retrying transient failures
    ///
    /// `build` is called once per attempt. Non-2xx responses are mapped to
    /// [`DriveError`] and only transient ones are retried.
    pub async fn send_with_retry<F>(
        &self,
        operation: &str,
        build: F,
    ) -> std::result::Result<Response, DriveError>
    where
        F: Fn() -> RequestBuilder,
    {
        let max_retries = self.retry.max_retries;
        let mut attempt = 0;

        loop {
            let outcome = match self.authorize(build()).send().await {
                Ok(resp) => check_status(resp).await,
                Err(e) => Err(map_transport_error(e)),
            };

            match outcome {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_transient() && attempt < max_retries => {
                    attempt += 1;
                    let delay_ms = backoff_delay_ms(&self.retry, attempt);
                    log_retry_attempt!(attempt, max_retries, e);
                    tracing::debug!(operation, delay_ms, "Backing off before retry");
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Delay before the given 1-based retry attempt
pub fn backoff_delay_ms(retry: &RetryConfig, attempt: usize) -> u64 {
    let exponent = attempt.saturating_sub(1) as i32;
    let delay = retry.initial_delay_ms as f64 * retry.backoff_multiplier.powi(exponent);
    if delay.is_finite() {
        (delay as u64).min(retry.max_delay_ms)
    } else {
        retry.max_delay_ms
    }
}

async fn check_status(resp: Response) -> std::result::Result<Response, DriveError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED => DriveError::AuthenticationFailed(message),
        s if s.is_server_error() => DriveError::ServerError {
            status: s.as_u16(),
            message,
        },
        s => DriveError::ClientError {
            status: s.as_u16(),
            message,
        },
    })
}

fn map_transport_error(e: reqwest::Error) -> DriveError {
    if e.is_timeout() {
        DriveError::Timeout(e.to_string())
    } else {
        DriveError::ConnectionFailed(e.to_string())
    }
}

/// Deserializes a successful response body
pub async fn read_json<T: serde::de::DeserializeOwned>(
    resp: Response,
) -> std::result::Result<T, DriveError> {
    resp.json::<T>()
        .await
        .map_err(|e| DriveError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn retry(initial: u64, max: u64, multiplier: f64) -> RetryConfig {
        RetryConfig {
            max_retries: 3,
            initial_delay_ms: initial,
            max_delay_ms: max,
            backoff_multiplier: multiplier,
        }
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let config = retry(100, 1000, 2.0);
        assert_eq!(backoff_delay_ms(&config, 1), 100);
        assert_eq!(backoff_delay_ms(&config, 2), 200);
        assert_eq!(backoff_delay_ms(&config, 3), 400);
        assert_eq!(backoff_delay_ms(&config, 10), 1000);
    }

    #[test]
    fn test_new_requires_token() {
        let config = GoogleConfig::default();
        assert!(matches!(
            GoogleHttp::new(&config),
            Err(MedRoiError::Configuration(_))
        ));

        let config = GoogleConfig {
            access_token: Some(secret_string("ya29.t".to_string())),
            ..GoogleConfig::default()
        };
        assert!(GoogleHttp::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("GET", "/ping")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let config = GoogleConfig {
            access_token: Some(secret_string("ya29.t".to_string())),
            retry: RetryConfig {
                max_retries: 1,
                initial_delay_ms: 1,
                max_delay_ms: 1,
                backoff_multiplier: 1.0,
            },
            ..GoogleConfig::default()
        };
        let http = GoogleHttp::new(&config).unwrap();
        let url = format!("{}/ping", server.url());

        let err = http
            .send_with_retry("ping", || http.client().get(&url))
            .await
            .unwrap_err();
        assert!(matches!(err, DriveError::ServerError { status: 503, .. }));
        failing.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .match_header("authorization", "Bearer ya29.t")
            .with_status(401)
            .with_body("expired")
            .expect(1)
            .create_async()
            .await;

        let config = GoogleConfig {
            access_token: Some(secret_string("ya29.t".to_string())),
            ..GoogleConfig::default()
        };
        let http = GoogleHttp::new(&config).unwrap();
        let url = format!("{}/ping", server.url());

        let err = http
            .send_with_retry("ping", || http.client().get(&url))
            .await
            .unwrap_err();
        assert!(matches!(err, DriveError::AuthenticationFailed(m) if m == "expired"));
        mock.assert_async().await;
    }
}
