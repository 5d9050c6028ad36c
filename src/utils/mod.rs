//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types for the problem bank
//! - Formatting reports

pub mod error;
pub mod report;

// Re-export commonly used items
pub use error::{BankError, BankResult};
pub use report::{FormatReport, FormatStats};
