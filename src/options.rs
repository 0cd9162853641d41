// src/options.rs
use crate::types::DomainDiscoveryRequest;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Optional request parameter, applied to the draft request in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOption {
    /// Response output format, JSON | XML. Default: JSON.
    OutputFormat(String),
    /// Only return domains/subdomains discovered since the given date.
    SinceDate(NaiveDate),
}

impl RequestOption {
    pub fn output_format(format: impl Into<String>) -> Self {
        RequestOption::OutputFormat(format.into())
    }

    pub fn since_date(date: NaiveDate) -> Self {
        RequestOption::SinceDate(date)
    }

    /// The value is not checked against the formats the API accepts.
    pub fn apply(&self, request: &mut DomainDiscoveryRequest<'_>) {
        match self {
            RequestOption::OutputFormat(format) => {
                request.output_format = format.to_uppercase();
            }
            RequestOption::SinceDate(date) => {
                request.since_date = date.format(DATE_FORMAT).to_string();
            }
        }
    }
}

pub(crate) fn apply_all(request: &mut DomainDiscoveryRequest<'_>, options: &[RequestOption]) {
    for option in options {
        option.apply(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> DomainDiscoveryRequest<'static> {
        let mut request = DomainDiscoveryRequest::new("key", None, None);
        request.output_format.clear();
        request
    }

    #[test]
    fn test_output_format() {
        let mut request = draft();
        RequestOption::output_format("xml").apply(&mut request);
        assert_eq!(request.output_format, "XML");
    }

    #[test]
    fn test_output_format_is_idempotent() {
        let option = RequestOption::output_format("json");
        let mut once = draft();
        option.apply(&mut once);
        let mut twice = draft();
        option.apply(&mut twice);
        option.apply(&mut twice);
        assert_eq!(once.output_format, "JSON");
        assert_eq!(twice.output_format, once.output_format);
    }

    #[test]
    fn test_since_date() {
        let mut request = draft();
        RequestOption::since_date(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()).apply(&mut request);
        assert_eq!(request.since_date, "2021-01-01");
    }

    #[test]
    fn test_options_apply_in_order() {
        let mut request = draft();
        apply_all(
            &mut request,
            &[
                RequestOption::output_format("xml"),
                RequestOption::since_date(NaiveDate::from_ymd_opt(2022, 3, 9).unwrap()),
                RequestOption::output_format("json"),
            ],
        );
        assert_eq!(request.output_format, "JSON");
        assert_eq!(request.since_date, "2022-03-09");
    }
}
