//! Working state carried from month to month during schedule generation

use chrono::{Datelike, Months, NaiveDate};

use crate::account::Account;

/// State of the simulation at a point in time
#[derive(Debug, Clone)]
pub struct ScheduleState {
    /// Months simulated so far (1-indexed once the first month starts)
    pub months_elapsed: u32,

    /// Date of the month currently being simulated
    pub payment_date: NaiveDate,

    /// Working copies of the accounts still being paid, in priority order.
    /// Always a prefix of the caller's list: payoffs are removed from the end.
    pub active: Vec<Account>,

    /// Initial debt less every month's leftover budget
    pub remaining_total: f64,

    /// Cumulative interest accrued across all accounts
    pub interest_paid: f64,

    /// Total balance owed at the start
    pub debt: f64,

    /// Set once the last account is paid off
    pub done: bool,
}

impl ScheduleState {
    /// Initialize state from the caller's accounts. The accounts are cloned so
    /// balances can be updated in place without touching caller data.
    pub fn from_accounts(accounts: &[Account], start_date: NaiveDate) -> Self {
        let debt: f64 = accounts.iter().map(|a| a.balance).sum();

        Self {
            months_elapsed: 0,
            payment_date: start_date,
            active: accounts.to_vec(),
            remaining_total: debt,
            interest_paid: 0.0,
            debt,
            done: false,
        }
    }

    /// Start the next month
    pub fn begin_month(&mut self) {
        self.months_elapsed += 1;
    }

    /// Move the payment date forward once the month has been recorded
    pub fn end_month(&mut self) {
        self.payment_date = self
            .payment_date
            .checked_add_months(Months::new(1))
            .unwrap_or(self.payment_date);
    }

    /// Whether another month needs to be simulated
    pub fn should_continue(&self) -> bool {
        !self.done && self.remaining_total + self.interest_paid > 0.0
    }
}

/// Format a date as `M/YY`, e.g. `3/27` for March 2027
pub fn month_label(date: NaiveDate) -> String {
    format!("{}/{:02}", date.month(), date.year().rem_euclid(100))
}

/// First day of the month following `date`
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}
