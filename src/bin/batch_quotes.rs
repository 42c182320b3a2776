//! Price a CSV file of quote requests
//!
//! Reads `reference,headcount,sector,ip2,ip3,ip4,deces,guarantee` rows, prices them
//! in parallel against one configuration snapshot and writes one output row per
//! input row, in input order.

use anyhow::{Context, Result};
use clap::Parser;
use premium_quote::config::JsonConfigStore;
use premium_quote::quote::{load_quote_rows, QuoteRow};
use premium_quote::{Quote, QuoteError, QuoteRequest, QuoteService};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "batch_quotes", about = "Price a CSV file of quote requests")]
struct Cli {
    /// Input CSV
    input: PathBuf,

    /// Output CSV
    #[arg(short, long, default_value = "quotes_output.csv")]
    output: PathBuf,

    #[arg(long, default_value = "config")]
    config_dir: PathBuf,
}

/// One output line; prices are blank and `error` is set when the row was rejected
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    reference: &'a str,
    standard_ttc: Option<f64>,
    premium_ttc: Option<f64>,
    ht: Option<f64>,
    taxes: Option<f64>,
    promo_applied: Option<bool>,
    fallback: Option<bool>,
    error: Option<String>,
}

fn output_row<'a>(row: &'a QuoteRow, quote: &Result<Quote, QuoteError>) -> OutputRow<'a> {
    match quote {
        Ok(quote) => OutputRow {
            reference: &row.reference,
            standard_ttc: Some(quote.pricing.standard_total),
            premium_ttc: Some(quote.pricing.premium_total),
            ht: Some(quote.pricing.net_amount),
            taxes: Some(quote.pricing.tax_amount),
            promo_applied: Some(quote.pricing.promotion_applied),
            fallback: Some(quote.fallback),
            error: None,
        },
        Err(e) => OutputRow {
            reference: &row.reference,
            standard_ttc: None,
            premium_ttc: None,
            ht: None,
            taxes: None,
            promo_applied: None,
            fallback: None,
            error: Some(e.to_string()),
        },
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading quote requests from {}...", cli.input.display());
    let rows = load_quote_rows(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    println!("Loaded {} rows in {:?}", rows.len(), start.elapsed());

    let requests: Vec<QuoteRequest> = rows.iter().map(QuoteRow::to_request).collect();

    let service = QuoteService::new(JsonConfigStore::new(&cli.config_dir));
    let price_start = Instant::now();
    let quotes = service.quote_batch(&requests);
    println!("Priced {} rows in {:?}", quotes.len(), price_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    for (row, quote) in rows.iter().zip(&quotes) {
        if let Err(e) = quote {
            log::warn!("Row {} rejected: {}", row.reference, e);
        }
        writer.serialize(output_row(row, quote))?;
    }
    writer.flush()?;

    let priced: Vec<&Quote> = quotes.iter().filter_map(|q| q.as_ref().ok()).collect();
    let total_standard: f64 = priced.iter().map(|q| q.pricing.standard_total).sum();
    let fallbacks = priced.iter().filter(|q| q.fallback).count();
    let rejected = quotes.len() - priced.len();
    println!("\nSummary:");
    println!("  Quotes:             {}", priced.len());
    println!("  Total standard TTC: {:.2}", total_standard);
    if rejected > 0 {
        println!("  Rejected rows:      {}", rejected);
    }
    if fallbacks > 0 {
        println!("  Fallback quotes:    {}", fallbacks);
    }
    println!("\nResults written to: {}", cli.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use premium_quote::config::StaticConfig;
    use premium_quote::quote::load_quote_rows_from_reader;

    fn write_rows(data: &str) -> String {
        let rows = load_quote_rows_from_reader(data.as_bytes()).unwrap();
        let requests: Vec<QuoteRequest> = rows.iter().map(QuoteRow::to_request).collect();
        let quotes = QuoteService::new(StaticConfig::default()).quote_batch(&requests);

        let mut writer = csv::Writer::from_writer(vec![]);
        for (row, quote) in rows.iter().zip(&quotes) {
            writer.serialize(output_row(row, quote)).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_rejected_rows_carry_an_error() {
        let output = write_rows(
            "\
reference,headcount,sector,ip2,ip3,ip4,deces,guarantee
Q-1,500,B,0,0,0,0,25000
Q-2,5,c,0,0,0,0,12345
Q-3,50,C,0,0,0,0,50000
",
        );
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "reference,standard_ttc,premium_ttc,ht,taxes,promo_applied,fallback,error");
        assert!(lines[1].starts_with("Q-1,,,,,,,"));
        assert!(lines[1].contains("500"));
        assert!(lines[2].starts_with("Q-2,,,,,,,"));
        assert!(lines[3].starts_with("Q-3,1495.48,1974.03,"));
        assert!(lines[3].ends_with(",false,false,"));
    }
}
