//! Error types for last-period checks.
//!
//! This module contains error types and the Result alias.

mod checklast_error;

pub use checklast_error::{CheckLastError, Result};
