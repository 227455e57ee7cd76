//! Reducing-balance loan amortization
//!
//! EMI computation, lazy month-by-month schedules, and loan book loading.

mod terms;
mod schedule;
mod amortization;
pub mod loader;

pub use terms::LoanTerms;
pub use schedule::{MonthRow, Schedule, YearRow, Yearly};
pub use amortization::{amortize, AmortizationResult, AmortizationSummary};
pub use loader::{load_loan_book, load_loan_book_from_reader, LoanRecord};
