//! Load a loan book from CSV

use super::LoanTerms;
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// Raw CSV row of a loan book
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "LoanId")]
    loan_id: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "AnnualRatePercent")]
    annual_rate_percent: f64,
    #[serde(rename = "TenureMonths")]
    tenure_months: u32,
}

impl CsvRow {
    fn to_record(self) -> LoanRecord {
        LoanRecord {
            loan_id: self.loan_id,
            terms: LoanTerms::new(self.principal, self.annual_rate_percent, self.tenure_months),
        }
    }
}

/// One loan of a book, identified by its id
///
/// Terms are not validated here; amortizing the record reports bad terms per loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: String,
    pub terms: LoanTerms,
}

/// Load all loans from a CSV file
pub fn load_loan_book<P: AsRef<Path>>(path: P) -> Result<Vec<LoanRecord>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load loans from any reader (e.g., string buffer, request body)
pub fn load_loan_book_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<LoanRecord>, Box<dyn Error>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanRecord>, Box<dyn Error>> {
    let mut loans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(row.to_record());
    }

    Ok(loans)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = "\
LoanId,Principal,AnnualRatePercent,TenureMonths
HL-001,5000000,8.5,240
PL-002,300000,14,36
ZR-003,1200,0,12
";

    #[test]
    fn test_load_from_reader() {
        let loans = load_loan_book_from_reader(BOOK.as_bytes()).unwrap();
        assert_eq!(loans.len(), 3);
        assert_eq!(loans[0].loan_id, "HL-001");
        assert_eq!(loans[0].terms.tenure_months, 240);
        assert_eq!(loans[2].terms.annual_rate_percent, 0.0);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let bad = "LoanId,Principal,AnnualRatePercent,TenureMonths\nX,abc,1,2\n";
        assert!(load_loan_book_from_reader(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_load_sample_book() {
        let loans = load_loan_book("data/sample_loan_book.csv").expect("Failed to load loan book");
        assert!(!loans.is_empty());
        assert!(loans.iter().all(|l| !l.loan_id.is_empty()));
    }
}
