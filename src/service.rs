// src/service.rs
use crate::decoder::{decode, ApiOutcome};
use crate::error::{DiscoveryError, Result};
use crate::options::{apply_all, RequestOption};
use crate::session::Session;
use crate::types::{DomainDiscoveryRequest, DomainDiscoveryResponse, RawResponse, SearchTerms};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Domains & Subdomains Discovery API.
#[async_trait]
pub trait DomainDiscovery: Send + Sync {
    /// Returns the parsed API response together with the raw one.
    ///
    /// The request always asks for JSON output, whatever `options` say.
    async fn get(
        &self,
        cancel: &CancellationToken,
        domain_terms: Option<&SearchTerms>,
        subdomain_terms: Option<&SearchTerms>,
        options: &[RequestOption],
    ) -> Result<(DomainDiscoveryResponse, RawResponse)>;

    /// Returns the raw API response with the body saved as bytes.
    async fn get_raw(
        &self,
        cancel: &CancellationToken,
        domain_terms: Option<&SearchTerms>,
        subdomain_terms: Option<&SearchTerms>,
        options: &[RequestOption],
    ) -> Result<RawResponse>;
}

#[derive(Clone)]
pub struct DomainDiscoveryService {
    session: Session,
    api_key: Arc<str>,
    base_url: Url,
}

impl DomainDiscoveryService {
    pub fn new(session: Session, api_key: Arc<str>, base_url: Url) -> Self {
        Self {
            session,
            api_key,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn request(
        &self,
        cancel: &CancellationToken,
        domain_terms: Option<&SearchTerms>,
        subdomain_terms: Option<&SearchTerms>,
        options: &[RequestOption],
    ) -> Result<RawResponse> {
        validate_terms(domain_terms, subdomain_terms)?;

        let mut request = DomainDiscoveryRequest::new(&self.api_key, domain_terms, subdomain_terms);
        apply_all(&mut request, options);

        debug!(
            "Domain discovery request: format={} since={:?}",
            request.output_format, request.since_date
        );

        self.session.post_json(&self.base_url, &request, cancel).await
    }
}

#[async_trait]
impl DomainDiscovery for DomainDiscoveryService {
    async fn get(
        &self,
        cancel: &CancellationToken,
        domain_terms: Option<&SearchTerms>,
        subdomain_terms: Option<&SearchTerms>,
        options: &[RequestOption],
    ) -> Result<(DomainDiscoveryResponse, RawResponse)> {
        let mut json_options = Vec::with_capacity(options.len() + 1);
        json_options.extend_from_slice(options);
        json_options.push(RequestOption::output_format("JSON"));

        let raw = self
            .request(cancel, domain_terms, subdomain_terms, &json_options)
            .await?;

        match decode(&raw.body) {
            Ok(ApiOutcome::Found(result)) => Ok((result, raw)),
            Ok(ApiOutcome::Failed(message)) => Err(DiscoveryError::Api(message)),
            Err(cause) => Err(DiscoveryError::Parse {
                cause,
                response: Box::new(raw),
            }),
        }
    }

    async fn get_raw(
        &self,
        cancel: &CancellationToken,
        domain_terms: Option<&SearchTerms>,
        subdomain_terms: Option<&SearchTerms>,
        options: &[RequestOption],
    ) -> Result<RawResponse> {
        let raw = self
            .request(cancel, domain_terms, subdomain_terms, options)
            .await?;

        if !raw.is_success() {
            return Err(DiscoveryError::Status {
                status: raw.status.as_u16(),
                response: Box::new(raw),
            });
        }

        Ok(raw)
    }
}

/// At least one Include term must be present across both term sets.
pub fn validate_terms(
    domain_terms: Option<&SearchTerms>,
    subdomain_terms: Option<&SearchTerms>,
) -> Result<()> {
    let included = [domain_terms, subdomain_terms]
        .iter()
        .flatten()
        .map(|terms| terms.include.len())
        .sum::<usize>();

    if included == 0 {
        return Err(DiscoveryError::InvalidArgument {
            name: "domainTerms/subdomainTerms".to_string(),
            message: "must contain at least one Include term".to_string(),
        });
    }

    Ok(())
}
