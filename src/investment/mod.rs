//! Compound-interest investment projection

mod projector;

pub use projector::{
    compute_projection, horizon_years, InvestmentConfig, InvestmentProjector, InvestmentSchedule,
    InvestmentSummary, InvestmentYear,
};
