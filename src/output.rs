// src/output.rs
use crate::error::{DiscoveryError, Result};
use crate::types::{DomainDiscoveryResponse, OutputFormat, RawResponse};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct OutputManager {
    format: OutputFormat,
    file: Option<String>,
}

impl OutputManager {
    pub fn new(format: OutputFormat, file: Option<String>) -> Self {
        Self { format, file }
    }

    pub fn write_result(&self, result: &DomainDiscoveryResponse) -> Result<()> {
        self.with_writer(|writer| match self.format {
            OutputFormat::Text => write_text_output(writer, result),
            OutputFormat::Json => write_json_output(writer, result),
        })
    }

    /// Writes the body bytes exactly as received.
    pub fn write_raw(&self, response: &RawResponse) -> Result<()> {
        self.with_writer(|writer| writer.write_all(&response.body).map_err(output_error))
    }

    fn with_writer<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        match &self.file {
            Some(file_path) => {
                if let Some(parent) = Path::new(file_path).parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DiscoveryError::Output(format!("Failed to create directory: {}", e))
                    })?;
                }

                let mut file = File::create(file_path)
                    .map_err(|e| DiscoveryError::Output(format!("Failed to create file: {}", e)))?;
                f(&mut file)?;
                log::info!("Results written to: {}", file_path);
                Ok(())
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                f(&mut handle)?;
                handle.flush().map_err(output_error)
            }
        }
    }
}

fn write_text_output(writer: &mut dyn Write, result: &DomainDiscoveryResponse) -> Result<()> {
    for domain in &result.domains_list {
        writeln!(writer, "{}", domain).map_err(output_error)?;
    }
    Ok(())
}

fn write_json_output(writer: &mut dyn Write, result: &DomainDiscoveryResponse) -> Result<()> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| DiscoveryError::Output(format!("Failed to serialize JSON: {}", e)))?;
    writeln!(writer, "{}", json).map_err(output_error)
}

fn output_error(e: std::io::Error) -> DiscoveryError {
    DiscoveryError::Output(e.to_string())
}
