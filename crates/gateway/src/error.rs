// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Represents errors from the outbound messaging gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required configuration value is absent or empty.
    #[error("Missing gateway credential: {0}")]
    MissingCredentials(String),
    /// The gateway answered with a non-success HTTP status.
    #[error("Gateway send failed ({status}): {body}")]
    SendFailed {
        /// HTTP status code returned by the gateway.
        status: u16,
        /// Response body text, for the delivery log.
        body: String,
    },
    /// The request never produced an HTTP response.
    #[error("Gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
