//! Investment growth calculators
//!
//! - SIP: fixed monthly contribution, invested at the start of each month
//! - Lumpsum: single deposit compounded monthly
//! - SWP: fixed monthly withdrawal from an invested corpus

mod sip;
mod lumpsum;
mod swp;

pub use sip::{future_value, SipInput, SipResult};
pub use lumpsum::{lumpsum_future_value, LumpsumInput, LumpsumResult};
pub use swp::{systematic_withdrawal, SwpInput, SwpResult};
