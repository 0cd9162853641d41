// src/decoder.rs
use crate::error::ParseFailure;
use crate::types::{ApiErrorMessage, DomainDiscoveryResponse};
use serde::Deserialize;

/// A body may carry result fields, error fields, or both zero-valued.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(flatten)]
    result: DomainDiscoveryResponse,

    #[serde(flatten)]
    error: ApiErrorMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    Found(DomainDiscoveryResponse),
    Failed(ApiErrorMessage),
}

/// Decodes a JSON body. A non-zero `code` or non-empty `messages` wins over result fields.
pub fn decode(raw: &[u8]) -> Result<ApiOutcome, ParseFailure> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseFailure::Empty);
    }

    let response: ApiResponse = serde_json::from_slice(raw)?;

    if response.error.is_empty() {
        Ok(ApiOutcome::Found(response.result))
    } else {
        Ok(ApiOutcome::Failed(response.error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success() {
        let body = br#"{"domainsCount":5,"domainsList":["a.com","b.com","c.com","d.com","e.com"]}"#;
        match decode(body).unwrap() {
            ApiOutcome::Found(res) => {
                assert_eq!(res.domains_count, 5);
                assert_eq!(res.domains_list, vec!["a.com", "b.com", "c.com", "d.com", "e.com"]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_decode_api_error() {
        let outcome = decode(br#"{"code":499,"messages":"Test error message."}"#).unwrap();
        assert_eq!(
            outcome,
            ApiOutcome::Failed(ApiErrorMessage {
                code: 499,
                message: "Test error message.".to_string()
            })
        );
    }

    #[test]
    fn test_decode_hybrid_with_zero_error_fields() {
        let outcome = decode(br#"{"domainsCount":0,"domainsList":[],"code":0,"messages":""}"#).unwrap();
        assert_eq!(outcome, ApiOutcome::Found(DomainDiscoveryResponse::default()));
    }

    #[test]
    fn test_decode_message_without_code() {
        let outcome = decode(br#"{"domainsCount":1,"domainsList":["a.com"],"messages":"quota"}"#).unwrap();
        assert!(matches!(outcome, ApiOutcome::Failed(msg) if msg.code == 0 && msg.message == "quota"));
    }

    #[test]
    fn test_decode_null_list() {
        let outcome = decode(br#"{"domainsCount":0,"domainsList":null}"#).unwrap();
        assert_eq!(outcome, ApiOutcome::Found(DomainDiscoveryResponse::default()));
    }

    #[test]
    fn test_decode_truncated() {
        let err = decode(br#"{"domainsCount":5,"domainsList":["a.com","b.co"#).unwrap_err();
        assert_eq!(err, ParseFailure::UnexpectedEof);
        assert_eq!(err.to_string(), "unexpected EOF");
    }

    #[test]
    fn test_decode_empty_body() {
        assert_eq!(decode(b"").unwrap_err(), ParseFailure::Empty);
        assert_eq!(decode(b" \r\n").unwrap_err().to_string(), "EOF");
    }

    #[test]
    fn test_decode_xml() {
        let err = decode(br#"<?xml version="1.0" encoding="utf-8"?><>"#).unwrap_err();
        assert!(matches!(err, ParseFailure::Syntax(_)));
    }
}
