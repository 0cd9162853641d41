// src/types.rs
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://domains-subdomains-discovery.whoisxmlapi.com/api/v1";

/// A set of included and excluded search terms.
///
/// Each list holds at most 4 case-insensitive terms; the limit is enforced by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerms {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl SearchTerms {
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    pub fn include<I, S>(include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(include, Vec::<String>::new())
    }
}

/// Body of a single discovery request. Built fresh for every call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDiscoveryRequest<'a> {
    pub api_key: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<&'a SearchTerms>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<&'a SearchTerms>,

    /// JSON | XML
    #[serde(skip_serializing_if = "String::is_empty")]
    pub output_format: String,

    /// YYYY-MM-DD, empty means no lower bound.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub since_date: String,
}

impl<'a> DomainDiscoveryRequest<'a> {
    pub fn new(
        api_key: &'a str,
        domains: Option<&'a SearchTerms>,
        subdomains: Option<&'a SearchTerms>,
    ) -> Self {
        Self {
            api_key,
            domains,
            subdomains,
            output_format: "JSON".to_string(),
            since_date: String::new(),
        }
    }
}

/// Parsed result of a successful discovery request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDiscoveryResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domains_list: Vec<String>,

    #[serde(default)]
    pub domains_count: i64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Application-level error reported inside a well-formed response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorMessage {
    #[serde(default)]
    pub code: i64,

    #[serde(default, rename = "messages")]
    pub message: String,
}

impl ApiErrorMessage {
    pub fn is_empty(&self) -> bool {
        self.code == 0 && self.message.is_empty()
    }
}

/// The full captured HTTP response, body held in memory.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("domain-discovery-rust/{}", crate::VERSION),
            proxy: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
