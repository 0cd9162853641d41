// src/client.rs
use crate::error::{DiscoveryError, Result};
use crate::options::RequestOption;
use crate::service::{DomainDiscovery, DomainDiscoveryService};
use crate::session::Session;
use crate::types::{Config, DomainDiscoveryResponse, RawResponse, SearchTerms, DEFAULT_BASE_URL};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Overrides for [`Client::new`]. `None` fields fall back to the defaults.
#[derive(Default)]
pub struct ClientParams {
    pub http_client: Option<reqwest::Client>,
    pub domain_discovery_base_url: Option<Url>,
}

/// API client. Read-only after construction and safe to share between tasks.
#[derive(Clone)]
pub struct Client {
    pub domain_discovery: DomainDiscoveryService,
}

impl Client {
    pub fn new(api_key: impl Into<String>, params: ClientParams) -> Result<Self> {
        let session = match params.http_client {
            Some(client) => Session::with_client(client, &Config::default().user_agent),
            None => Session::new(&Config::default())?,
        };

        let base_url = match params.domain_discovery_base_url {
            Some(url) => url,
            None => parse_base_url(DEFAULT_BASE_URL)?,
        };

        Ok(Self::with_session(api_key.into(), session, base_url))
    }

    /// Client with the default HTTP settings and endpoint.
    pub fn basic(api_key: impl Into<String>) -> Result<Self> {
        Self::new(api_key, ClientParams::default())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| DiscoveryError::Config("API key is not set".to_string()))?;

        let session = Session::new(config)?;
        let base_url = parse_base_url(&config.base_url)?;

        Ok(Self::with_session(api_key, session, base_url))
    }

    fn with_session(api_key: String, session: Session, base_url: Url) -> Self {
        let api_key: Arc<str> = Arc::from(api_key);
        Self {
            domain_discovery: DomainDiscoveryService::new(session, api_key, base_url),
        }
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| DiscoveryError::Config(format!("Invalid base URL {:?}: {}", raw, e)))
}

#[async_trait]
impl DomainDiscovery for Client {
    async fn get(
        &self,
        cancel: &CancellationToken,
        domain_terms: Option<&SearchTerms>,
        subdomain_terms: Option<&SearchTerms>,
        options: &[RequestOption],
    ) -> Result<(DomainDiscoveryResponse, RawResponse)> {
        self.domain_discovery
            .get(cancel, domain_terms, subdomain_terms, options)
            .await
    }

    async fn get_raw(
        &self,
        cancel: &CancellationToken,
        domain_terms: Option<&SearchTerms>,
        subdomain_terms: Option<&SearchTerms>,
        options: &[RequestOption],
    ) -> Result<RawResponse> {
        self.domain_discovery
            .get_raw(cancel, domain_terms, subdomain_terms, options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_client_uses_default_endpoint() {
        let client = Client::basic("at_key").unwrap();
        assert_eq!(client.domain_discovery.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let err = Client::from_config(&Config::default()).err().unwrap();
        assert_eq!(err.to_string(), "configuration error: API key is not set");
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let config = Config {
            api_key: Some("at_key".to_string()),
            base_url: "::not-a-url".to_string(),
            ..Config::default()
        };
        assert!(matches!(Client::from_config(&config), Err(DiscoveryError::Config(_))));
    }
}
