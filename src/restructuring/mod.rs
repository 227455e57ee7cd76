//! Loan restructuring after a payment freeze (moratorium)
//!
//! Interest that accrues while installments are frozen is capitalized, and the
//! loan is re-amortized under one of two borrower policies:
//! - **FixedEmi**: keep the installment, extend the tenure
//! - **FixedTenure**: keep the end date, raise the installment

mod moratorium;

pub use moratorium::{restructure, MoratoriumInput, MoratoriumPolicy, MoratoriumResult};
