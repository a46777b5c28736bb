//! Debt repayment schedule generation and progress tracking

mod engine;
mod ledger;
mod state;

pub use engine::{
    compute_schedule, FloatPolicy, ScheduleConfig, ScheduleEngine, DEFAULT_FLOAT_FREQUENCY,
    DEFAULT_MAX_MONTHS,
};
pub use ledger::{write_schedule_csv, MonthlyPayment, Payment, Schedule};
pub use state::{first_of_next_month, month_label, ScheduleState};
