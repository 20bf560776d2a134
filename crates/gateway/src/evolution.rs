// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::GatewayError;
use async_trait::async_trait;
use tracing::debug;

/// Strips every non-digit character from a raw phone number.
///
/// The gateway addresses recipients by bare digits; stored numbers may
/// carry formatting such as `+55 (11) 91234-5678`.
#[must_use]
pub fn normalize_address(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Outbound text-message transport.
///
/// The dispatcher depends on this trait rather than a concrete HTTP
/// client so sweeps can be tested with an in-memory double.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Sends one text message to a bare-digit address.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure or a non-success
    /// response from the provider.
    async fn send_text(&self, address: &str, body: &str) -> Result<(), GatewayError>;
}

/// Connection settings for an Evolution API instance.
#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    /// Base URL of the Evolution API server, without a trailing slash.
    pub api_url: String,
    /// API key sent in the `apikey` header.
    pub api_key: String,
    /// Name of the WhatsApp instance to send through.
    pub instance_name: String,
}

impl EvolutionConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::MissingCredentials` naming the first
    /// variable that is unset or empty.
    pub fn from_env() -> Result<Self, GatewayError> {
        let config: Self = Self {
            api_url: std::env::var("EVOLUTION_API_URL").unwrap_or_default(),
            api_key: std::env::var("EVOLUTION_API_KEY").unwrap_or_default(),
            instance_name: std::env::var("EVOLUTION_INSTANCE_NAME").unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Verifies that every required value is present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::MissingCredentials` naming the first
    /// missing value.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.api_url.trim().is_empty() {
            return Err(GatewayError::MissingCredentials(String::from(
                "EVOLUTION_API_URL",
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::MissingCredentials(String::from(
                "EVOLUTION_API_KEY",
            )));
        }
        if self.instance_name.trim().is_empty() {
            return Err(GatewayError::MissingCredentials(String::from(
                "EVOLUTION_INSTANCE_NAME",
            )));
        }
        Ok(())
    }
}

/// Messaging gateway backed by an Evolution API server.
#[derive(Debug, Clone)]
pub struct EvolutionGateway {
    config: EvolutionConfig,
    client: reqwest::Client,
}

impl EvolutionGateway {
    /// Creates a gateway after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::MissingCredentials` when the configuration
    /// is incomplete.
    pub fn new(config: EvolutionConfig) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    pub(crate) fn send_url(&self) -> String {
        format!(
            "{}/message/sendText/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.instance_name
        )
    }
}

#[async_trait]
impl MessagingGateway for EvolutionGateway {
    async fn send_text(&self, address: &str, body: &str) -> Result<(), GatewayError> {
        let url: String = self.send_url();
        debug!("Sending text via {url}");

        let payload: serde_json::Value = serde_json::json!({
            "number": format!("{address}@s.whatsapp.net"),
            "text": body,
        });

        let response: reqwest::Response = self
            .client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status: u16 = response.status().as_u16();
            let body: String = response.text().await.unwrap_or_default();
            return Err(GatewayError::SendFailed { status, body });
        }

        Ok(())
    }
}
