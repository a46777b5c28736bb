//! Debt account data structure

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// A single debt account as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier, used to correlate payments back to the account
    pub id: String,

    /// Display label
    pub creditor: String,

    /// Remaining principal owed
    pub balance: f64,

    /// Nominal annual interest rate as a decimal (0.1349 = 13.49%)
    pub rate: f64,

    /// Contractual minimum monthly payment
    pub payment: f64,

    /// User-assigned priority, only used by the custom orderings
    #[serde(default)]
    pub custom: Option<f64>,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        creditor: impl Into<String>,
        balance: f64,
        rate: f64,
        payment: f64,
    ) -> Self {
        Self {
            id: id.into(),
            creditor: creditor.into(),
            balance,
            rate,
            payment,
            custom: None,
        }
    }

    /// Builder-style setter for the custom priority
    pub fn with_custom(mut self, custom: f64) -> Self {
        self.custom = Some(custom);
        self
    }

    /// One month of interest on the current balance
    pub fn monthly_interest(&self) -> f64 {
        self.balance * self.rate / 12.0
    }

    /// Whether the account still owes anything
    pub fn is_open(&self) -> bool {
        self.balance > 0.0
    }

    /// Custom priority with missing values treated as 0
    pub fn custom_or_default(&self) -> f64 {
        self.custom.unwrap_or(0.0)
    }

    /// Check the numeric fields are usable by the engine
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| PlannerError::InvalidAccount {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if !self.balance.is_finite() || self.balance < 0.0 {
            return Err(invalid("balance must be a non-negative amount"));
        }
        if !self.rate.is_finite() {
            return Err(invalid("rate must be a finite decimal"));
        }
        if !self.payment.is_finite() || self.payment < 0.0 {
            return Err(invalid("payment must be a non-negative amount"));
        }
        Ok(())
    }
}
