//! Planner that ties profiles, ordering, the schedule engine, and storage together
//!
//! The planner never holds session state of its own: it reads everything
//! through the injected [`ProfileProvider`] and writes through the
//! [`ScheduleStore`].

use chrono::NaiveDate;
use log::info;
use rayon::prelude::*;

use crate::account::{order_accounts, Account, Strategy};
use crate::error::Result;
use crate::profile::ProfileProvider;
use crate::schedule::{Schedule, ScheduleConfig, ScheduleEngine, DEFAULT_MAX_MONTHS};
use crate::store::ScheduleStore;

/// Builds and saves schedules for users
///
/// # Example
/// ```ignore
/// let planner = Planner::new(profiles, JsonScheduleStore::new("schedules")?);
/// let schedule = planner.plan("user-123")?;
/// ```
pub struct Planner<P, S> {
    profiles: P,
    store: S,
    start_date: Option<NaiveDate>,
    max_months: u32,
}

impl<P: ProfileProvider, S: ScheduleStore> Planner<P, S> {
    pub fn new(profiles: P, store: S) -> Self {
        Self {
            profiles,
            store,
            start_date: None,
            max_months: DEFAULT_MAX_MONTHS,
        }
    }

    /// Treat `date` as "today" instead of the local date
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }

    /// Order the user's accounts by their strategy, generate a schedule, and save it
    pub fn plan(&self, user_id: &str) -> Result<Schedule> {
        let profile = self.profiles.profile(user_id)?;
        let accounts = order_accounts(self.profiles.accounts(user_id)?, profile.strategy);

        let config = ScheduleConfig {
            start_date: self.start_date,
            max_months: self.max_months,
            ..profile.schedule_config()
        };
        let schedule = ScheduleEngine::new(config).compute(&accounts)?;
        self.store.save_schedule(user_id, &schedule)?;

        info!(
            "Planned {} for {}: {} months",
            profile
                .strategy
                .map(|s| s.label())
                .unwrap_or("stored order"),
            user_id,
            schedule.months_to_finish
        );
        Ok(schedule)
    }

    /// Most recently saved schedule for the user
    pub fn saved_schedule(&self, user_id: &str) -> Result<Option<Schedule>> {
        self.store.load_schedule(user_id)
    }

    /// Flip the paid flag on one month of the saved schedule and save it again.
    /// Returns the new flag, or `None` if there is no such month.
    pub fn toggle_paid(&self, user_id: &str, month: &str) -> Result<Option<bool>> {
        let Some(mut schedule) = self.store.load_schedule(user_id)? else {
            return Ok(None);
        };
        let paid = schedule.toggle_paid(month);
        if paid.is_some() {
            self.store.save_schedule(user_id, &schedule)?;
        }
        Ok(paid)
    }

    pub fn profiles(&self) -> &P {
        &self.profiles
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Run every strategy against the same accounts and config
pub fn compare_strategies(
    accounts: &[Account],
    config: &ScheduleConfig,
) -> Vec<(Strategy, Result<Schedule>)> {
    Strategy::ALL
        .par_iter()
        .map(|&strategy| {
            let ordered = order_accounts(accounts.to_vec(), Some(strategy));
            let engine = ScheduleEngine::new(config.clone());
            (strategy, engine.compute(&ordered))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::profile::{InMemoryProfiles, Profile};
    use crate::schedule::FloatPolicy;
    use crate::store::MemoryScheduleStore;

    fn accounts() -> Vec<Account> {
        vec![
            Account::new("visa", "Visa", 3000.0, 0.26, 90.0).with_custom(1.0),
            Account::new("car", "Auto Loan", 1500.0, 0.04, 60.0).with_custom(2.0),
            Account::new("store", "Store Card", 4000.0, 0.12, 80.0).with_custom(3.0),
        ]
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn planner() -> Planner<InMemoryProfiles, MemoryScheduleStore> {
        let mut profiles = InMemoryProfiles::new();
        let mut profile = Profile::new(500.0);
        profile.strategy = Some(Strategy::Snowball);
        profiles.insert("u1", profile, accounts());

        Planner::new(profiles, MemoryScheduleStore::new()).with_start_date(start())
    }

    #[test]
    fn test_plan_orders_and_saves() {
        let planner = planner();
        let schedule = planner.plan("u1").unwrap();

        // Snowball: the smallest balance is the target, so it is listed last
        let first_month: Vec<&str> = schedule.payments[0]
            .payments
            .iter()
            .map(|p| p.account.as_str())
            .collect();
        assert_eq!(first_month, vec!["store", "visa", "car"]);
        assert_eq!(schedule.payments[0].month, "11/26");

        assert_eq!(planner.saved_schedule("u1").unwrap(), Some(schedule));
    }

    #[test]
    fn test_plan_unknown_user() {
        assert!(matches!(
            planner().plan("ghost"),
            Err(PlannerError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn test_toggle_paid_persists() {
        let planner = planner();
        planner.plan("u1").unwrap();

        assert_eq!(planner.toggle_paid("u1", "11/26").unwrap(), Some(true));
        let saved = planner.saved_schedule("u1").unwrap().unwrap();
        assert!(saved.payments[0].paid);
        assert!(saved.total_paid_to_date() > 0.0);

        assert_eq!(planner.toggle_paid("u1", "1/99").unwrap(), None);
        assert_eq!(planner.toggle_paid("ghost", "11/26").unwrap(), None);
    }

    #[test]
    fn test_compare_strategies() {
        let config = ScheduleConfig {
            monthly_payment: 500.0,
            float: FloatPolicy::new(100.0, 3),
            start_date: Some(start()),
            max_months: DEFAULT_MAX_MONTHS,
        };
        let results = compare_strategies(&accounts(), &config);

        assert_eq!(results.len(), Strategy::ALL.len());
        let interest = |target: Strategy| {
            results
                .iter()
                .find(|(s, _)| *s == target)
                .and_then(|(_, r)| r.as_ref().ok())
                .map(|s| s.interest)
                .unwrap()
        };

        assert!(results.iter().all(|(_, r)| r.is_ok()));
        assert!(interest(Strategy::Avalanche) <= interest(Strategy::Snowball));
    }
}
