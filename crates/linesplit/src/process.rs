use crate::prelude::{eprintln, println, *};
use chrono::Utc;
use linesplit_core::envelope::{process, ProcessRequest, ProcessResponse};
use linesplit_core::Mode;
use tokio::io::AsyncReadExt;

#[derive(Debug, clap::Args)]
pub struct ProcessOptions {
    /// Text to process. Reads stdin when omitted or `-`
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Extraction mode
    #[arg(short, long, default_value = "auto", value_parser = ["auto", "hash", "space"])]
    pub mode: String,

    /// Output the full response envelope as JSON
    #[arg(long)]
    pub json: bool,

    /// Print size statistics after the result
    #[arg(long)]
    pub stats: bool,
}

pub async fn run(options: ProcessOptions, global: crate::Global) -> Result<()> {
    let text = match options.text.as_deref() {
        None | Some("-") => read_stdin().await?,
        Some(text) => text.to_string(),
    };

    if global.verbose {
        eprintln!("Mode: {}", options.mode);
        eprintln!("Input length: {} chars", text.chars().count());
    }

    let response = process_data(text.clone(), options.mode)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", response.result);

    if options.stats {
        output_stats(&response, &text);
    }

    Ok(())
}

/// Validate the input and run the transformation, returning the same envelope
/// the HTTP server would send.
pub fn process_data(text: String, mode: String) -> Result<ProcessResponse> {
    if text.is_empty() {
        return Err(Error::InvalidInput("provide a non-empty text field".to_string()).into());
    }

    let request = ProcessRequest { text, mode };
    let response =
        process(&request, Utc::now()).map_err(|e| Error::Processing(e.to_string()))?;

    Ok(response)
}

async fn read_stdin() -> Result<String> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read text from stdin")?;
    Ok(text)
}

fn output_stats(response: &ProcessResponse, text: &str) {
    let stats = &response.stats;
    let applied = response
        .mode
        .parse::<Mode>()
        .map(|mode| mode.resolve(text).to_string())
        .unwrap_or_else(|_| response.mode.clone());

    let percentage = match &stats.reduction_percentage {
        linesplit_core::ReductionPercentage::Zero(n) => n.to_string(),
        linesplit_core::ReductionPercentage::Formatted(s) => format!("{s}%"),
    };

    println!();
    let mut table = new_table();
    table.add_row(prettytable::row!["Mode", applied]);
    table.add_row(prettytable::row!["Original", stats.original_count]);
    table.add_row(prettytable::row!["Processed", stats.processed_count]);
    table.add_row(prettytable::row!["Hashes", stats.hash_count]);
    table.add_row(prettytable::row!["Lines", stats.line_count]);
    table.add_row(prettytable::row!["Reduction", stats.reduction]);
    table.add_row(prettytable::row!["Reduction %", percentage]);
    table.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_data_returns_envelope() {
        let response = process_data("#a b #c".to_string(), "auto".to_string()).unwrap();

        assert!(response.success);
        assert_eq!(response.result, "a\nc");
        assert_eq!(response.stats.line_count, 2);
    }

    #[test]
    fn test_process_data_rejects_empty_text() {
        let err = process_data(String::new(), "auto".to_string()).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn test_process_data_reports_unsupported_mode() {
        let err = process_data("x".to_string(), "bogus".to_string()).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }
}
