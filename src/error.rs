// src/error.rs
use crate::types::{ApiErrorMessage, RawResponse};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid argument: \"{name}\" {message}")]
    InvalidArgument { name: String, message: String },

    #[error("cannot encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// Network failure, cancellation or an incomplete body. `response` is set once a
    /// status line has been received and holds whatever body was captured.
    #[error("cannot read response: {cause}")]
    Read {
        cause: ReadFailure,
        response: Option<Box<RawResponse>>,
    },

    #[error("cannot parse response: {cause}")]
    Parse {
        cause: ParseFailure,
        response: Box<RawResponse>,
    },

    #[error("API failed with status code: {status}")]
    Status {
        status: u16,
        response: Box<RawResponse>,
    },

    #[error("API error: [{}] {}", .0.code, .0.message)]
    Api(ApiErrorMessage),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("output error: {0}")]
    Output(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadFailure {
    /// The body ended before the declared Content-Length was reached.
    #[error("unexpected EOF")]
    UnexpectedEof,

    #[error("request canceled")]
    Canceled,

    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// Nothing but whitespace in the body.
    #[error("EOF")]
    Empty,

    #[error("unexpected EOF")]
    UnexpectedEof,

    #[error("{0}")]
    Syntax(String),
}

impl From<serde_json::Error> for ParseFailure {
    fn from(e: serde_json::Error) -> Self {
        if e.is_eof() {
            ParseFailure::UnexpectedEof
        } else {
            ParseFailure::Syntax(e.to_string())
        }
    }
}

impl DiscoveryError {
    /// The captured response attached to this error, if any.
    ///
    /// Argument and semantic API errors never carry one.
    pub fn raw_response(&self) -> Option<&RawResponse> {
        match self {
            DiscoveryError::Read { response, .. } => response.as_deref(),
            DiscoveryError::Parse { response, .. } | DiscoveryError::Status { response, .. } => {
                Some(response.as_ref())
            }
            _ => None,
        }
    }

    pub fn api_error(&self) -> Option<&ApiErrorMessage> {
        match self {
            DiscoveryError::Api(msg) => Some(msg),
            _ => None,
        }
    }
}

pub trait ErrorContext<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| DiscoveryError::Config(format!("{}: {}", f(), e)))
    }
}
