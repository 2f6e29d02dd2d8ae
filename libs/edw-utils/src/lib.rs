#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Shared helpers for the EDW client crates.
//!
//! - [`Secret`] keeps credentials out of `Debug`/`Display` output and resolves
//!   `${VAR}` placeholders from the process environment on demand.
//! - [`parse_datestring`] turns the ISO-8601 variants emitted by upstream
//!   services into timestamps, as UTC or in a caller-chosen zone.

pub mod datestring;
pub mod secret;

pub use datestring::{DateStringError, parse_datestring, parse_datestring_in, parse_datestring_tz};
pub use secret::{Secret, SecretError};
