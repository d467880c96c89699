//! HTTP gateway to the ITIS SOLR endpoint.
//!
//! One GET per [`ItisClient::search`] call, no retries, no caching. The
//! three failure modes are normalized into [`ItisError::Transport`],
//! [`ItisError::RemoteStatus`], and [`ItisError::Decode`]; success returns
//! the envelope's `response` object unreshaped.

use tracing::debug;

use crate::config::ItisConfig;
use crate::error::{ItisError, Result};

use super::query::SearchSpec;
use super::record::{SearchPage, SolrEnvelope};

/// Client for the ITIS SOLR search endpoint.
///
/// Holds an HTTP connection pool and the endpoint configuration. Cheap to
/// clone behind an `Arc`; carries no per-request state.
#[derive(Debug)]
pub struct ItisClient {
    http: reqwest::Client,
    config: ItisConfig,
}

impl ItisClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ItisError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: ItisConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ItisError::Transport {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { http, config })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ItisConfig {
        &self.config
    }

    /// Executes one search against the remote index.
    ///
    /// Issues exactly one GET with the spec's canonical parameter set.
    /// Timeouts surface as [`ItisError::Transport`].
    ///
    /// # Errors
    ///
    /// [`ItisError::Transport`] when the network call cannot complete,
    /// [`ItisError::RemoteStatus`] on a non-success HTTP status, and
    /// [`ItisError::Decode`] when the body is not the expected envelope.
    pub async fn search(&self, spec: &SearchSpec) -> Result<SearchPage> {
        let params = spec.to_params();
        debug!(base_url = %self.config.base_url, params = ?params, "issuing ITIS search");

        let response = self
            .http
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ItisError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ItisError::RemoteStatus {
                status: status.as_u16(),
            });
        }

        let envelope: SolrEnvelope =
            response.json().await.map_err(|e| ItisError::Decode {
                message: e.to_string(),
            })?;

        debug!(
            num_found = envelope.response.num_found,
            returned = envelope.response.docs.len(),
            "ITIS search completed"
        );
        Ok(envelope.response)
    }
}
