//! Schedule output structures and payment progress tracking

use std::io::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::state::{first_of_next_month, month_label};
use crate::account::Account;
use crate::error::Result;

/// One account's line item within a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Id of the account being paid
    pub account: String,
    pub amount: f64,
}

impl Payment {
    pub fn new(account: impl Into<String>, amount: f64) -> Self {
        Self {
            account: account.into(),
            amount,
        }
    }
}

/// All payments due in a calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    /// `M/YY` label
    pub month: String,

    /// Set by the user once the month has been paid; false when generated
    pub paid: bool,

    /// One entry per account, in the order the accounts were scheduled
    pub payments: Vec<Payment>,
}

impl MonthlyPayment {
    /// Total paid across every account this month
    pub fn total(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Amount paid to a given account this month
    pub fn amount_for(&self, account_id: &str) -> Option<f64> {
        self.payments
            .iter()
            .find(|p| p.account == account_id)
            .map(|p| p.amount)
    }
}

/// Complete repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Total balance owed at the start
    pub debt: f64,

    /// Interest accrued over the payoff horizon
    pub interest: f64,

    /// debt + interest
    pub total: f64,

    pub months_to_finish: u32,

    pub payments: Vec<MonthlyPayment>,
}

impl Schedule {
    /// Schedule for a portfolio with nothing owed
    pub fn empty() -> Self {
        Self {
            debt: 0.0,
            interest: 0.0,
            total: 0.0,
            months_to_finish: 0,
            payments: Vec::new(),
        }
    }

    /// Look up a month by its `M/YY` label
    pub fn month(&self, label: &str) -> Option<&MonthlyPayment> {
        self.payments.iter().find(|mp| mp.month == label)
    }

    pub fn month_mut(&mut self, label: &str) -> Option<&mut MonthlyPayment> {
        self.payments.iter_mut().find(|mp| mp.month == label)
    }

    /// Flip a month's paid flag, returning the new state
    pub fn toggle_paid(&mut self, label: &str) -> Option<bool> {
        let month = self.month_mut(label)?;
        month.paid = !month.paid;
        Some(month.paid)
    }

    /// Sum of every month marked paid
    pub fn total_paid_to_date(&self) -> f64 {
        self.payments
            .iter()
            .filter(|mp| mp.paid)
            .map(MonthlyPayment::total)
            .sum()
    }

    /// Fraction of the total cost paid so far, clamped to [0, 1]
    pub fn progress(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (self.total_paid_to_date() / self.total).clamp(0.0, 1.0)
    }

    /// The month due after `today`, if the schedule covers it
    pub fn next_payment(&self, today: NaiveDate) -> Option<&MonthlyPayment> {
        self.month(&month_label(first_of_next_month(today)))
    }

    /// Total paid to one account over the whole schedule
    pub fn paid_to_account(&self, account_id: &str) -> f64 {
        self.payments
            .iter()
            .filter_map(|mp| mp.amount_for(account_id))
            .sum()
    }
}

/// Write the schedule as CSV: one row per month with a column per account
pub fn write_schedule_csv<W: Write>(
    schedule: &Schedule,
    accounts: &[Account],
    writer: W,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Month".to_string()];
    header.extend(accounts.iter().map(|a| a.creditor.clone()));
    header.push("Total".to_string());
    header.push("Paid".to_string());
    wtr.write_record(&header)?;

    for month in &schedule.payments {
        let mut record = vec![month.month.clone()];
        record.extend(
            accounts
                .iter()
                .map(|a| format!("{:.2}", month.amount_for(&a.id).unwrap_or(0.0))),
        );
        record.push(format!("{:.2}", month.total()));
        record.push(month.paid.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn schedule() -> Schedule {
        let month = |label: &str, a: f64, b: f64| MonthlyPayment {
            month: label.to_string(),
            paid: false,
            payments: vec![Payment::new("a", a), Payment::new("b", b)],
        };

        Schedule {
            debt: 500.0,
            interest: 0.0,
            total: 500.0,
            months_to_finish: 3,
            payments: vec![
                month("11/26", 50.0, 150.0),
                month("12/26", 50.0, 150.0),
                month("1/27", 100.0, 0.0),
            ],
        }
    }

    #[test]
    fn test_monthly_total() {
        let s = schedule();
        assert_relative_eq!(s.payments[0].total(), 200.0);
        assert_eq!(s.payments[2].amount_for("b"), Some(0.0));
        assert_eq!(s.payments[2].amount_for("zzz"), None);
    }

    #[test]
    fn test_toggle_paid_tracks_progress() {
        let mut s = schedule();
        assert_eq!(s.progress(), 0.0);

        assert_eq!(s.toggle_paid("11/26"), Some(true));
        assert_relative_eq!(s.total_paid_to_date(), 200.0);
        assert_relative_eq!(s.progress(), 0.4);

        assert_eq!(s.toggle_paid("11/26"), Some(false));
        assert_eq!(s.total_paid_to_date(), 0.0);

        assert_eq!(s.toggle_paid("5/30"), None);
    }

    #[test]
    fn test_progress_clamped() {
        let mut s = schedule();
        s.total = 100.0;
        s.toggle_paid("11/26");
        assert_eq!(s.progress(), 1.0);

        assert_eq!(Schedule::empty().progress(), 0.0);
    }

    #[test]
    fn test_next_payment() {
        let s = schedule();
        let today = NaiveDate::from_ymd_opt(2026, 11, 20).unwrap();
        assert_eq!(s.next_payment(today).map(|m| m.month.as_str()), Some("12/26"));

        let late = NaiveDate::from_ymd_opt(2027, 6, 1).unwrap();
        assert!(s.next_payment(late).is_none());
    }

    #[test]
    fn test_paid_to_account() {
        let s = schedule();
        assert_relative_eq!(s.paid_to_account("a"), 200.0);
        assert_relative_eq!(s.paid_to_account("b"), 300.0);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(schedule()).unwrap();
        assert_eq!(json["monthsToFinish"], 3);
        assert_eq!(json["payments"][0]["payments"][1]["account"], "b");
    }

    #[test]
    fn test_write_schedule_csv() {
        let accounts = vec![
            Account::new("a", "Store Card", 200.0, 0.0, 50.0),
            Account::new("b", "Visa", 300.0, 0.0, 50.0),
        ];
        let mut out = Vec::new();
        write_schedule_csv(&schedule(), &accounts, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Month,Store Card,Visa,Total,Paid");
        assert_eq!(lines[1], "11/26,50.00,150.00,200.00,false");
        assert_eq!(lines.len(), 4);
    }
}
