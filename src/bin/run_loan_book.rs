//! Amortize every loan of a CSV loan book
//!
//! Usage: run_loan_book [INPUT_CSV] [OUTPUT_CSV]
//!
//! Writes one summary row per loan. Loans with invalid terms are reported in the
//! Error column instead of failing the whole book. Batch execution honours the
//! ENGINE_PARALLEL environment variable.

use std::env;
use std::time::Instant;

use anyhow::{anyhow, Context};
use log::warn;
use serde::Serialize;

use loan_scenario_engine::loan::load_loan_book;
use loan_scenario_engine::CalculationRunner;

const DEFAULT_INPUT: &str = "data/sample_loan_book.csv";
const DEFAULT_OUTPUT: &str = "loan_book_summary.csv";

#[derive(Debug, Serialize)]
struct SummaryRow {
    #[serde(rename = "LoanId")]
    loan_id: String,
    #[serde(rename = "Principal")]
    principal: Option<f64>,
    #[serde(rename = "TenureMonths")]
    tenure_months: Option<u32>,
    #[serde(rename = "Emi")]
    emi: Option<f64>,
    #[serde(rename = "TotalInterest")]
    total_interest: Option<f64>,
    #[serde(rename = "TotalPayment")]
    total_payment: Option<f64>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let output_path = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let start = Instant::now();
    println!("Loading loans from {}...", input_path);
    let loans = load_loan_book(&input_path)
        .map_err(|e| anyhow!("failed to load {}: {}", input_path, e))?;
    println!("Loaded {} loans in {:?}", loans.len(), start.elapsed());

    let runner = CalculationRunner::from_env();
    let entries = runner.amortize_book(&loans);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path))?;

    let mut failed = 0usize;
    let mut total_principal = 0.0;
    let mut total_interest = 0.0;

    for entry in entries {
        let row = match entry.result {
            Ok(summary) => {
                total_principal += summary.principal;
                total_interest += summary.total_interest;
                SummaryRow {
                    loan_id: entry.loan_id,
                    principal: Some(summary.principal),
                    tenure_months: Some(summary.tenure_months),
                    emi: Some(summary.emi),
                    total_interest: Some(summary.total_interest),
                    total_payment: Some(summary.total_payment),
                    error: None,
                }
            }
            Err(e) => {
                warn!("loan {} skipped: {}", entry.loan_id, e);
                failed += 1;
                SummaryRow {
                    loan_id: entry.loan_id,
                    principal: None,
                    tenure_months: None,
                    emi: None,
                    total_interest: None,
                    total_payment: None,
                    error: Some(e.to_string()),
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", output_path);

    println!("\nBook Summary:");
    println!("  Loans amortized: {}", loans.len() - failed);
    println!("  Loans rejected:  {}", failed);
    println!("  Total principal: {:.2}", total_principal);
    println!("  Total interest:  {:.2}", total_interest);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
