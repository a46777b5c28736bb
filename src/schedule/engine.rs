//! Month-by-month debt repayment simulation
//!
//! Every open account accrues a month of interest and pays its minimum, or what
//! it owes if that is less. Whatever is left of the month's budget goes to the
//! last account in the list (the target). When the target is paid off its
//! overflow rolls onto the next target, so its former minimum payment keeps
//! working on the remaining debt.

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};

use super::ledger::{MonthlyPayment, Payment, Schedule};
use super::state::{first_of_next_month, month_label, ScheduleState};
use crate::account::Account;
use crate::error::{PlannerError, Result};

/// Upper bound on simulated months (100 years)
pub const DEFAULT_MAX_MONTHS: u32 = 1200;

/// Float frequency used when a profile does not set one
pub const DEFAULT_FLOAT_FREQUENCY: u32 = 2;

/// Periodic extra lump-sum payment ("income float")
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPolicy {
    /// Extra amount added to the budget
    pub amount: f64,
    /// Applied every `frequency`-th month, counting from month 1
    pub frequency: u32,
}

impl FloatPolicy {
    pub fn new(amount: f64, frequency: u32) -> Self {
        Self { amount, frequency }
    }

    /// No extra payments
    pub fn none() -> Self {
        Self::new(0.0, 1)
    }

    /// Float contribution for a 1-indexed month
    pub fn amount_for_month(&self, month: u32) -> f64 {
        if self.frequency > 0 && month % self.frequency == 0 {
            self.amount
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.frequency == 0 {
            return Err(PlannerError::InvalidFrequency(self.frequency));
        }
        Ok(())
    }
}

impl Default for FloatPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Configuration for a schedule run
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Total budget available for debt every month
    pub monthly_payment: f64,

    /// Extra periodic payment
    pub float: FloatPolicy,

    /// Date treated as "now"; the first scheduled month is the one after it.
    /// Uses the local date when unset.
    pub start_date: Option<NaiveDate>,

    /// Give up after this many months
    pub max_months: u32,
}

impl ScheduleConfig {
    pub fn new(monthly_payment: f64, float: FloatPolicy) -> Self {
        Self {
            monthly_payment,
            float,
            ..Default::default()
        }
    }

    /// First day of the first scheduled month
    pub fn first_payment_date(&self) -> NaiveDate {
        let today = self.start_date.unwrap_or_else(|| Local::now().date_naive());
        first_of_next_month(today)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            monthly_payment: 0.0,
            float: FloatPolicy::none(),
            start_date: None,
            max_months: DEFAULT_MAX_MONTHS,
        }
    }
}

/// Repayment schedule generator
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    config: ScheduleConfig,
}

impl ScheduleEngine {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Generate a schedule for accounts already in priority order.
    ///
    /// The last account receives any budget left after minimum payments.
    /// `accounts` is never modified.
    pub fn compute(&self, accounts: &[Account]) -> Result<Schedule> {
        self.validate(accounts)?;

        let mut state = ScheduleState::from_accounts(accounts, self.config.first_payment_date());
        if state.debt <= 0.0 {
            debug!("Nothing owed across {} accounts", accounts.len());
            return Ok(Schedule::empty());
        }

        let mut months = Vec::new();
        loop {
            state.begin_month();
            if state.months_elapsed > self.config.max_months {
                warn!(
                    "Schedule for {} accounts still open after {} months",
                    accounts.len(),
                    self.config.max_months
                );
                return Err(PlannerError::DidNotConverge(self.config.max_months));
            }

            let month = self.calculate_month(accounts, &mut state);
            months.push(month);
            state.end_month();

            if !state.should_continue() {
                break;
            }
        }

        info!(
            "Scheduled {} accounts: {} months, debt {:.2}, interest {:.2}",
            accounts.len(),
            state.months_elapsed,
            state.debt,
            state.interest_paid
        );

        Ok(Schedule {
            debt: state.debt,
            interest: state.interest_paid,
            total: state.debt + state.interest_paid,
            months_to_finish: state.months_elapsed,
            payments: months,
        })
    }

    fn validate(&self, accounts: &[Account]) -> Result<()> {
        if accounts.is_empty() {
            return Err(PlannerError::NoAccounts);
        }
        self.config.float.validate()?;

        for account in accounts {
            account.validate()?;
        }

        let minimums: f64 = accounts
            .iter()
            .filter(|a| a.is_open())
            .map(|a| a.payment)
            .sum();
        if !self.config.monthly_payment.is_finite() || self.config.monthly_payment < minimums {
            warn!(
                "Monthly payment {:.2} below minimums {:.2}",
                self.config.monthly_payment, minimums
            );
            return Err(PlannerError::InsufficientPayment {
                payment: self.config.monthly_payment,
                minimums,
            });
        }
        Ok(())
    }

    /// Simulate one month and return its line items
    fn calculate_month(&self, accounts: &[Account], state: &mut ScheduleState) -> MonthlyPayment {
        let month = state.months_elapsed;
        let mut budget =
            self.config.monthly_payment + self.config.float.amount_for_month(month);
        let mut payments: Vec<Payment> = Vec::with_capacity(accounts.len());

        // Minimum payments and interest. An account never pays more than it
        // owes; whatever it doesn't need stays in the budget for the target.
        for acct in state.active.iter_mut() {
            if acct.is_open() {
                let interest = acct.monthly_interest();
                state.interest_paid += interest;
                let owed = acct.balance + interest;
                let charge = acct.payment.min(owed);
                budget -= charge;
                acct.balance = (owed - charge).max(0.0);
                payments.push(Payment::new(acct.id.as_str(), charge));
            } else {
                payments.push(Payment::new(acct.id.as_str(), 0.0));
            }
        }

        // Leftover budget to the target, rolling onto the next target on payoff
        let extra = budget;
        while let Some(idx) = state.active.len().checked_sub(1) {
            let target = &mut state.active[idx];
            if target.is_open() {
                if budget <= 0.0 {
                    break;
                }
                let applied = budget.min(target.balance);
                target.balance -= applied;
                budget -= applied;
                payments[idx].amount += applied;
                if target.is_open() {
                    break;
                }
                debug!("Account {} paid off in month {}", target.id, month);
            }
            state.active.pop();
        }
        state.done = state.active.is_empty();

        // Accounts paid off in earlier months
        for acct in &accounts[payments.len()..] {
            payments.push(Payment::new(acct.id.as_str(), 0.0));
        }

        state.remaining_total -= extra;

        MonthlyPayment {
            month: month_label(state.payment_date),
            paid: false,
            payments,
        }
    }
}

/// Generate a schedule starting the month after today, with the default month cap
pub fn compute_schedule(
    accounts: &[Account],
    monthly_payment: f64,
    float_amount: f64,
    float_frequency: u32,
) -> Result<Schedule> {
    let config = ScheduleConfig::new(
        monthly_payment,
        FloatPolicy::new(float_amount, float_frequency),
    );
    ScheduleEngine::new(config).compute(accounts)
}
