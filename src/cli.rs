use chrono::NaiveDate;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "domain-discovery",
    version,
    about = "Search newly discovered domains and subdomains",
    long_about = "Queries the Domains & Subdomains Discovery API for domain and subdomain names\nmatching the given include/exclude terms."
)]
pub struct Args {
    /// Domain term to include (up to 4, wildcards allowed)
    #[arg(short = 'i', long = "include", value_name = "TERM")]
    pub include: Vec<String>,

    /// Domain term to exclude (up to 4)
    #[arg(short = 'e', long = "exclude", value_name = "TERM")]
    pub exclude: Vec<String>,

    /// Subdomain term to include (up to 4)
    #[arg(long = "sub-include", value_name = "TERM")]
    pub sub_include: Vec<String>,

    /// Subdomain term to exclude (up to 4)
    #[arg(long = "sub-exclude", value_name = "TERM")]
    pub sub_exclude: Vec<String>,

    /// Only names discovered since this date (YYYY-MM-DD)
    #[arg(long = "since", value_name = "DATE")]
    pub since: Option<NaiveDate>,

    /// Response format requested from the API (only honoured with --raw)
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<String>,

    /// Print the response body as received
    #[arg(long = "raw")]
    pub raw: bool,

    /// Print the parsed result as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Output file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<String>,

    /// API key (overrides config and DOMAIN_DISCOVERY_API_KEY)
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "domain-discovery.toml")]
    pub config_path: String,

    /// Silent mode (errors only)
    #[arg(long = "silent")]
    pub silent: bool,

    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.silent {
            log::LevelFilter::Error
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
