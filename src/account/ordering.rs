//! Repayment ordering strategies
//!
//! The engine sends each month's leftover budget to the LAST account in the
//! list, so every strategy sorts the account it wants paid off first to the end.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Account;
use crate::error::PlannerError;

/// Strategy for ordering accounts before scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Smallest balance first
    Snowball,
    /// Highest rate first
    Avalanche,
    /// Lowest custom priority first
    CustomAsc,
    /// Highest custom priority first
    CustomDesc,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Snowball,
        Strategy::Avalanche,
        Strategy::CustomAsc,
        Strategy::CustomDesc,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Snowball => "Snowball",
            Strategy::Avalanche => "Avalanche",
            Strategy::CustomAsc => "Custom (Ascending)",
            Strategy::CustomDesc => "Custom (Descending)",
        }
    }

    /// Identifier used in stored profiles and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
            Strategy::CustomAsc => "customAsc",
            Strategy::CustomDesc => "customDesc",
        }
    }

    fn compare(&self, a: &Account, b: &Account) -> Ordering {
        match self {
            Strategy::Snowball => cmp_f64(b.balance, a.balance),
            Strategy::Avalanche => cmp_f64(a.rate, b.rate),
            Strategy::CustomAsc => cmp_f64(b.custom_or_default(), a.custom_or_default()),
            Strategy::CustomDesc => cmp_f64(a.custom_or_default(), b.custom_or_default()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snowball" => Ok(Strategy::Snowball),
            "avalanche" => Ok(Strategy::Avalanche),
            "customAsc" | "custom-asc" => Ok(Strategy::CustomAsc),
            "customDesc" | "custom-desc" => Ok(Strategy::CustomDesc),
            other => Err(PlannerError::UnknownStrategy(other.to_string())),
        }
    }
}

// NaN compares equal so a bad value can't scramble the stable order
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Order accounts for scheduling. `None` keeps the given order.
pub fn order_accounts(mut accounts: Vec<Account>, strategy: Option<Strategy>) -> Vec<Account> {
    if let Some(strategy) = strategy {
        accounts.sort_by(|a, b| strategy.compare(a, b));
    }
    accounts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<Account> {
        vec![
            Account::new("a", "Store Card", 800.0, 0.24, 25.0).with_custom(2.0),
            Account::new("b", "Car Loan", 9000.0, 0.05, 250.0).with_custom(1.0),
            Account::new("c", "Visa", 2500.0, 0.19, 75.0).with_custom(3.0),
        ]
    }

    fn ids(accounts: &[Account]) -> Vec<&str> {
        accounts.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_snowball_puts_smallest_balance_last() {
        let ordered = order_accounts(accounts(), Some(Strategy::Snowball));
        assert_eq!(ids(&ordered), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_avalanche_puts_highest_rate_last() {
        let ordered = order_accounts(accounts(), Some(Strategy::Avalanche));
        assert_eq!(ids(&ordered), vec!["b", "c", "a"]);

        let mut accts = accounts();
        accts[0].rate = 0.01;
        let ordered = order_accounts(accts, Some(Strategy::Avalanche));
        assert_eq!(ids(&ordered), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_custom_orders() {
        let asc = order_accounts(accounts(), Some(Strategy::CustomAsc));
        assert_eq!(ids(&asc), vec!["c", "a", "b"]);

        let desc = order_accounts(accounts(), Some(Strategy::CustomDesc));
        assert_eq!(ids(&desc), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_custom_sorts_as_zero_and_is_stable() {
        let accts = vec![
            Account::new("x", "X", 1.0, 0.1, 1.0),
            Account::new("y", "Y", 1.0, 0.1, 1.0).with_custom(-1.0),
            Account::new("z", "Z", 1.0, 0.1, 1.0),
        ];
        let ordered = order_accounts(accts, Some(Strategy::CustomDesc));
        assert_eq!(ids(&ordered), vec!["y", "x", "z"]);
    }

    #[test]
    fn test_no_strategy_keeps_order() {
        let ordered = order_accounts(accounts(), None);
        assert_eq!(ids(&ordered), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_and_label() {
        assert_eq!("customAsc".parse::<Strategy>().unwrap(), Strategy::CustomAsc);
        assert_eq!("custom-desc".parse::<Strategy>().unwrap(), Strategy::CustomDesc);
        assert!(matches!(
            "fastest".parse::<Strategy>(),
            Err(PlannerError::UnknownStrategy(_))
        ));
        assert_eq!(Strategy::CustomDesc.to_string(), "Custom (Descending)");
        assert_eq!(serde_json::to_string(&Strategy::CustomAsc).unwrap(), "\"customAsc\"");
    }
}
