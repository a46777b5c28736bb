//! Year-by-year growth of a monthly contribution
//!
//! Contributions land at the start of each month and interest is credited on
//! everything accumulated so far, including earlier interest.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schedule::FloatPolicy;

/// Amounts added during one projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentYear {
    /// Contributions made this year
    pub principal: f64,

    /// Interest credited in the final month of the year
    pub interest: f64,

    /// principal + interest
    pub total_added: f64,

    /// Cumulative principal and interest at year end
    pub total_value: f64,
}

/// Cumulative totals at the end of the projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSummary {
    pub principal: f64,
    pub interest: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSchedule {
    pub summary: InvestmentSummary,
    pub years: Vec<InvestmentYear>,
}

/// Configuration for an investment projection
#[derive(Debug, Clone)]
pub struct InvestmentConfig {
    /// Number of years to project
    pub years: u32,

    /// Nominal annual rate, compounded monthly
    pub annual_rate: f64,

    /// Amount contributed every month
    pub monthly_contribution: f64,

    /// Extra periodic contribution
    pub float: FloatPolicy,
}

/// Investment growth projector
#[derive(Debug, Clone)]
pub struct InvestmentProjector {
    config: InvestmentConfig,
}

impl InvestmentProjector {
    pub fn new(config: InvestmentConfig) -> Self {
        Self { config }
    }

    /// Run the projection for the configured number of years
    pub fn project(&self) -> Result<InvestmentSchedule> {
        self.config.float.validate()?;

        let monthly_rate = self.config.annual_rate / 12.0;
        let mut total_principal = 0.0;
        let mut total_interest = 0.0;
        let mut month = 0u32;
        let mut years = Vec::with_capacity(self.config.years as usize);

        for _year in 0..self.config.years {
            let mut yearly_principal = 0.0;
            let mut month_interest = 0.0;

            for _ in 0..12 {
                month += 1;
                let contribution =
                    self.config.monthly_contribution + self.config.float.amount_for_month(month);
                yearly_principal += contribution;
                total_principal += contribution;

                month_interest = (total_principal + total_interest) * monthly_rate;
                total_interest += month_interest;
            }

            // Only the last month's interest is recorded for the year
            years.push(InvestmentYear {
                principal: yearly_principal,
                interest: month_interest,
                total_added: yearly_principal + month_interest,
                total_value: total_principal + total_interest,
            });
        }

        debug!(
            "Projected {} years: principal {:.2}, interest {:.2}",
            self.config.years, total_principal, total_interest
        );

        Ok(InvestmentSchedule {
            summary: InvestmentSummary {
                principal: total_principal,
                interest: total_interest,
                value: total_principal + total_interest,
            },
            years,
        })
    }
}

/// Project a monthly contribution over `years`
pub fn compute_projection(
    years: u32,
    annual_rate: f64,
    monthly_contribution: f64,
    float_amount: f64,
    float_frequency: u32,
) -> Result<InvestmentSchedule> {
    InvestmentProjector::new(InvestmentConfig {
        years,
        annual_rate,
        monthly_contribution,
        float: FloatPolicy::new(float_amount, float_frequency),
    })
    .project()
}

/// Years between the current age and retirement, zero if already retired
pub fn horizon_years(current_age: u32, retirement_age: u32) -> u32 {
    retirement_age.saturating_sub(current_age)
}
