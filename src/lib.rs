// src/lib.rs
pub mod cli;
pub mod client;
pub mod config;
pub mod decoder;
pub mod error;
pub mod options;
pub mod output;
pub mod service;
pub mod session;
pub mod types;

pub use cli::Args;
pub use client::{Client, ClientParams};
pub use error::{DiscoveryError, ParseFailure, ReadFailure, Result};
pub use options::RequestOption;
pub use service::{DomainDiscovery, DomainDiscoveryService};
pub use types::{ApiErrorMessage, Config, DomainDiscoveryResponse, RawResponse, SearchTerms};

pub use tokio_util::sync::CancellationToken;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
