// src/health/messaging.rs
use super::probe::{DependencyProbe, ProbeError};
use crate::config::SecretString;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

pub const MESSAGING_API: &str = "api";

/// Calls the Telegram Bot API `getMe` endpoint; only HTTP 200 counts.
///
/// A fresh HTTP client is built for every check and dropped when the check
/// returns, so no connection outlives the request that opened it.
pub struct MessagingApiProbe {
    base_url: String,
    token: SecretString,
    timeout: Duration,
}

impl MessagingApiProbe {
    pub fn new(base_url: impl Into<String>, token: SecretString, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            timeout,
        }
    }

    fn endpoint(&self) -> Result<Url, ProbeError> {
        if self.token.is_empty() {
            return Err(ProbeError::Config("bot token is empty".into()));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProbeError::Config(format!("invalid API base URL: {}", e)))?;
        if url.cannot_be_a_base() {
            return Err(ProbeError::Config("API base URL cannot carry a path".into()));
        }

        // The token contains ':' so it cannot go through Url::join.
        let path = format!(
            "{}/bot{}/getMe",
            url.path().trim_end_matches('/'),
            self.token.expose_secret()
        );
        url.set_path(&path);
        Ok(url)
    }
}

#[async_trait]
impl DependencyProbe for MessagingApiProbe {
    fn name(&self) -> &'static str {
        MESSAGING_API
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn probe(&self) -> Result<(), ProbeError> {
        let url = self.endpoint()?;

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ProbeError::Http(e.without_url().to_string()))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| ProbeError::Http(e.without_url().to_string()))?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(ProbeError::UnexpectedStatus(status)),
        }
    }

    fn describe_error(&self, err: &ProbeError) -> String {
        self.token.scrub(&err.to_string())
    }
}
