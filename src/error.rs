//! Error types for schedule generation, projection, and loading

use thiserror::Error;

/// Errors that can occur while planning a repayment schedule
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("No accounts to schedule")]
    NoAccounts,

    #[error("Float frequency must be at least 1 month, got {0}")]
    InvalidFrequency(u32),

    #[error("Invalid account {id}: {reason}")]
    InvalidAccount { id: String, reason: String },

    #[error("Monthly payment {payment:.2} does not cover minimum payments of {minimums:.2}")]
    InsufficientPayment { payment: f64, minimums: f64 },

    #[error("Schedule did not converge within {0} months")]
    DidNotConverge(u32),

    #[error("Unknown repayment strategy: {0}")]
    UnknownStrategy(String),

    #[error("Profile not found for user {0}")]
    ProfileNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PlannerError>;
