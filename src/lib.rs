//! Debt Planner - repayment schedules and investment projections
//!
//! This library provides:
//! - Debt repayment schedules with snowball, avalanche, and custom orderings
//! - Payoff rollover and periodic extra "float" payments
//! - Compound-interest projections for monthly investment contributions
//! - Profile/storage interfaces and a planner that drives them

pub mod account;
pub mod error;
pub mod format;
pub mod investment;
pub mod planner;
pub mod profile;
pub mod schedule;
pub mod store;

// Re-export commonly used types
pub use account::{order_accounts, Account, Strategy};
pub use error::{PlannerError, Result};
pub use investment::{compute_projection, InvestmentProjector, InvestmentSchedule, InvestmentYear};
pub use planner::{compare_strategies, Planner};
pub use schedule::{
    compute_schedule, FloatPolicy, MonthlyPayment, Payment, Schedule, ScheduleConfig,
    ScheduleEngine,
};
