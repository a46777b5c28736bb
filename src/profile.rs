//! User payment profiles and the provider interface the planner reads them through

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::account::{Account, Strategy};
use crate::error::{PlannerError, Result};
use crate::schedule::{FloatPolicy, ScheduleConfig, DEFAULT_FLOAT_FREQUENCY};

fn default_frequency() -> u32 {
    DEFAULT_FLOAT_FREQUENCY
}

/// A user's payment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Total monthly budget for debt payments
    pub payment: f64,

    /// Extra periodic payment
    #[serde(default)]
    pub float: f64,

    /// Months between float payments
    #[serde(default = "default_frequency")]
    pub frequency: u32,

    /// Account ordering; `None` keeps the stored order
    #[serde(default)]
    pub strategy: Option<Strategy>,
}

impl Profile {
    pub fn new(payment: f64) -> Self {
        Self {
            payment,
            float: 0.0,
            frequency: DEFAULT_FLOAT_FREQUENCY,
            strategy: None,
        }
    }

    pub fn float_policy(&self) -> FloatPolicy {
        FloatPolicy::new(self.float, self.frequency)
    }

    /// Engine configuration for this profile
    pub fn schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig::new(self.payment, self.float_policy())
    }
}

/// Source of user profiles and their debt accounts
pub trait ProfileProvider {
    fn profile(&self, user_id: &str) -> Result<Profile>;

    fn accounts(&self, user_id: &str) -> Result<Vec<Account>>;
}

/// A user's profile together with their accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub profile: Profile,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// Profiles held in memory, keyed by user id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryProfiles {
    users: HashMap<String, UserRecord>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{ "<user id>": { "profile": {...}, "accounts": [...] } }` from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let profiles: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(profiles)
    }

    pub fn insert(&mut self, user_id: impl Into<String>, profile: Profile, accounts: Vec<Account>) {
        self.users
            .insert(user_id.into(), UserRecord { profile, accounts });
    }

    fn record(&self, user_id: &str) -> Result<&UserRecord> {
        self.users
            .get(user_id)
            .ok_or_else(|| PlannerError::ProfileNotFound(user_id.to_string()))
    }
}

impl ProfileProvider for InMemoryProfiles {
    fn profile(&self, user_id: &str) -> Result<Profile> {
        Ok(self.record(user_id)?.profile.clone())
    }

    fn accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        Ok(self.record(user_id)?.accounts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_from_json() {
        let profile: Profile = serde_json::from_str(r#"{ "payment": 650 }"#).unwrap();
        assert_eq!(profile.payment, 650.0);
        assert_eq!(profile.float, 0.0);
        assert_eq!(profile.frequency, DEFAULT_FLOAT_FREQUENCY);
        assert_eq!(profile.strategy, None);
    }

    #[test]
    fn test_profile_with_strategy() {
        let profile: Profile = serde_json::from_str(
            r#"{ "payment": 650, "float": 200, "frequency": 6, "strategy": "avalanche" }"#,
        )
        .unwrap();
        assert_eq!(profile.strategy, Some(Strategy::Avalanche));

        let config = profile.schedule_config();
        assert_eq!(config.monthly_payment, 650.0);
        assert_eq!(config.float, FloatPolicy::new(200.0, 6));
    }

    #[test]
    fn test_profile_json_has_no_schedule() {
        let mut profile = Profile::new(500.0);
        profile.strategy = Some(Strategy::CustomAsc);

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("schedule").is_none());
        assert_eq!(json["strategy"], "customAsc");

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_in_memory_provider() {
        let mut profiles = InMemoryProfiles::new();
        profiles.insert(
            "u1",
            Profile::new(300.0),
            vec![Account::new("a", "Card", 1000.0, 0.2, 30.0)],
        );

        assert_eq!(profiles.profile("u1").unwrap().payment, 300.0);
        assert_eq!(profiles.accounts("u1").unwrap().len(), 1);
        assert!(matches!(
            profiles.profile("nobody"),
            Err(PlannerError::ProfileNotFound(ref id)) if id == "nobody"
        ));
    }

    #[test]
    fn test_in_memory_from_json() {
        let json = r#"{
            "u1": {
                "profile": { "payment": 400, "strategy": "snowball" },
                "accounts": [
                    { "id": "a", "creditor": "Card", "balance": 900, "rate": 0.2, "payment": 30 }
                ]
            }
        }"#;
        let profiles: InMemoryProfiles = serde_json::from_str(json).unwrap();
        let accounts = profiles.accounts("u1").unwrap();
        assert_eq!(accounts[0].custom, None);
        assert_eq!(profiles.profile("u1").unwrap().strategy, Some(Strategy::Snowball));
    }
}
