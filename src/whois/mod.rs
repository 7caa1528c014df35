//! Domain registration lookups over the WHOIS protocol (TCP port 43).
//!
//! Only the creation date is consumed downstream: see
//! [`domain_age_years`].

mod age;
mod client;
mod error;
mod types;

pub use age::{creation_date, domain_age_years, elapsed_years, parse_creation_date};
pub use client::{WhoisClient, WhoisLookup};
pub use error::WhoisError;
pub use types::{WhoisOptions, WhoisRecord, WhoisResponse};

#[cfg(test)]
mod tests;
