//! Outbound call to the emissions calculation service.

use crate::config::Config;
use crate::models::{EmissionsResult, UsageInput};
use reqwest::{Client, StatusCode};
use std::fmt;

#[derive(Debug)]
pub enum CalcError {
    Transport(reqwest::Error),
    Status(StatusCode),
    Decode(serde_json::Error),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Transport(err) => write!(f, "calculation service unreachable: {err}"),
            CalcError::Status(status) => write!(f, "calculation service returned {status}"),
            CalcError::Decode(err) => write!(f, "malformed calculation response: {err}"),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::Transport(err) => Some(err),
            CalcError::Status(_) => None,
            CalcError::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for CalcError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

#[derive(Clone)]
pub struct CalcClient {
    client: Client,
    url: String,
}

impl CalcClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: config.service_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One POST, no retry.
    pub async fn calculate(&self, input: &UsageInput) -> Result<EmissionsResult, CalcError> {
        let response = self.client.post(&self.url).json(input).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CalcError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
