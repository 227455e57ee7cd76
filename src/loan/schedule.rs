//! Month-by-month amortization schedule
//!
//! Rows are produced on demand, so a caller that only needs totals or the
//! first few months never pays for the whole tenure.

use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Months, NaiveDate};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::rates::MONTHS_PER_YEAR;

/// One installment of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    /// Installment number (1-indexed)
    pub index: u32,

    /// Interest charged on the opening balance
    pub interest: f64,

    /// Principal repaid by this installment
    pub principal_paid: f64,

    /// Installment amount (`interest + principal_paid`)
    pub payment: f64,

    /// Balance after this installment
    pub outstanding_after: f64,
}

impl MonthRow {
    /// Calendar due date, given the due date of the first installment
    pub fn due_date(&self, first_due: NaiveDate) -> Option<NaiveDate> {
        first_due.checked_add_months(Months::new(self.index.saturating_sub(1)))
    }
}

/// Lazy schedule iterator; single pass, O(1) state
#[derive(Debug, Clone)]
pub struct Schedule {
    emi: f64,
    monthly_rate: f64,
    tenure_months: u32,
    month: u32,
    outstanding: f64,
}

impl Schedule {
    pub(crate) fn new(principal: f64, emi: f64, monthly_rate: f64, tenure_months: u32) -> Self {
        Self {
            emi,
            monthly_rate,
            tenure_months,
            month: 0,
            outstanding: principal,
        }
    }

    /// Yield rows until `cancel` is raised; the flag is read once per row
    pub fn until_cancelled(mut self, cancel: &AtomicBool) -> impl Iterator<Item = MonthRow> + '_ {
        std::iter::from_fn(move || {
            if cancel.load(Ordering::Relaxed) {
                None
            } else {
                self.next()
            }
        })
    }

    /// Fold the remaining rows into 12-month buckets
    pub fn yearly(self) -> Yearly {
        Yearly { rows: self, year: 0 }
    }
}

impl Iterator for Schedule {
    type Item = MonthRow;

    fn next(&mut self) -> Option<MonthRow> {
        if self.month >= self.tenure_months {
            return None;
        }
        self.month += 1;

        let interest = self.outstanding * self.monthly_rate;
        let principal_paid = if self.month == self.tenure_months {
            // Last installment clears whatever drift has accumulated
            self.outstanding
        } else {
            (self.emi - interest).min(self.outstanding)
        };

        self.outstanding = if self.month == self.tenure_months {
            0.0
        } else {
            (self.outstanding - principal_paid).max(0.0)
        };

        let row = MonthRow {
            index: self.month,
            interest,
            principal_paid,
            payment: interest + principal_paid,
            outstanding_after: self.outstanding,
        };
        trace!(
            "month {}: interest={:.4} principal={:.4} outstanding={:.4}",
            row.index,
            row.interest,
            row.principal_paid,
            row.outstanding_after
        );
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.tenure_months - self.month) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Schedule {}

impl FusedIterator for Schedule {}

/// Totals for one loan year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    /// Loan year (1-indexed)
    pub year: u32,
    /// Months in this bucket (12, except possibly the last)
    pub months: u32,
    pub interest: f64,
    pub principal_paid: f64,
    pub outstanding_after: f64,
}

/// Year-by-year view over a [`Schedule`]
#[derive(Debug, Clone)]
pub struct Yearly {
    rows: Schedule,
    year: u32,
}

impl Iterator for Yearly {
    type Item = YearRow;

    fn next(&mut self) -> Option<YearRow> {
        let first = self.rows.next()?;
        self.year += 1;

        let mut bucket = YearRow {
            year: self.year,
            months: 1,
            interest: first.interest,
            principal_paid: first.principal_paid,
            outstanding_after: first.outstanding_after,
        };

        while bucket.months < MONTHS_PER_YEAR {
            match self.rows.next() {
                Some(row) => {
                    bucket.months += 1;
                    bucket.interest += row.interest;
                    bucket.principal_paid += row.principal_paid;
                    bucket.outstanding_after = row.outstanding_after;
                }
                None => break,
            }
        }

        Some(bucket)
    }
}

impl FusedIterator for Yearly {}
