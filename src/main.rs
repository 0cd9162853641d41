use anyhow::Result;
use clap::Parser;
use domain_discovery::cli::Args;
use domain_discovery::config;
use domain_discovery::output::OutputManager;
use domain_discovery::types::OutputFormat;
use domain_discovery::{CancellationToken, Client, DiscoveryError, DomainDiscovery, RequestOption, SearchTerms};
use log::{debug, error, info, warn};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level())
        .init();

    let mut config = config::load_config(&args.config_path)?;
    if let Some(api_key) = &args.api_key {
        config.api_key = Some(api_key.clone());
    }
    if let Some(secs) = args.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    config::validate_config(&config)?;

    let client = Client::from_config(&config)?;

    let domain_terms = terms(&args.include, &args.exclude);
    let subdomain_terms = terms(&args.sub_include, &args.sub_exclude);

    let mut options = Vec::new();
    if let Some(format) = &args.format {
        options.push(RequestOption::output_format(format.as_str()));
    }
    if let Some(date) = args.since {
        options.push(RequestOption::since_date(date));
    }

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, canceling request");
            on_signal.cancel();
        }
    });

    let format = if args.json { OutputFormat::Json } else { OutputFormat::Text };
    let output = OutputManager::new(format, args.output_file.clone());

    if args.raw {
        let response = client
            .get_raw(&cancel, domain_terms.as_ref(), subdomain_terms.as_ref(), &options)
            .await;

        match response {
            Ok(response) => output.write_raw(&response)?,
            Err(e) => exit_with(e),
        }
        return Ok(());
    }

    if args.format.is_some() {
        debug!("--format is ignored without --raw, the parsed result is always requested as JSON");
    }

    match client
        .get(&cancel, domain_terms.as_ref(), subdomain_terms.as_ref(), &options)
        .await
    {
        Ok((result, _)) => {
            output.write_result(&result)?;
            info!("{} domains matched", result.domains_count);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn terms(include: &[String], exclude: &[String]) -> Option<SearchTerms> {
    if include.is_empty() && exclude.is_empty() {
        None
    } else {
        Some(SearchTerms::new(include.iter().cloned(), exclude.iter().cloned()))
    }
}

fn exit_with(e: DiscoveryError) -> ! {
    if let Some(api_error) = e.api_error() {
        error!("API rejected the request (code {}): {}", api_error.code, api_error.message);
    } else {
        error!("{}", e);
    }

    if let Some(response) = e.raw_response() {
        debug!("Response body: {}", response.text());
    }

    process::exit(1);
}
