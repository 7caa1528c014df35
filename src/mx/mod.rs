//! DNS MX resolution.
//!
//! The public entry point is [`check_mx`], which queries a [`LookupMx`]
//! collaborator and returns the exchanges ordered by ascending preference.
//! An empty answer is reported as [`Error::NoRecords`].

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{LookupMx, check_mx};
pub use types::{MxRecord, MxStatus};
