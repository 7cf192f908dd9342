use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// Redirection of the job's stdout, i.e. where the kickstart record lands.
pub const OUTPUT_KEY: &str = "output";

/// Scheduler-submit profile. Condor submit keys are case-insensitive, so they
/// are stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Profile", into = "Profile")]
pub struct Condor {
    profile: Profile,
}

impl Condor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.profile.get(&normalize_key(key))
    }

    pub fn construct(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        self.profile.set(normalize_key(key), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.profile.remove(&normalize_key(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.profile.iter()
    }

    pub fn len(&self) -> usize {
        self.profile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

impl From<Profile> for Condor {
    fn from(raw: Profile) -> Self {
        let mut condor = Condor::new();
        for (k, v) in raw.iter() {
            condor.construct(k, v);
        }
        condor
    }
}

impl From<Condor> for Profile {
    fn from(condor: Condor) -> Self {
        condor.profile
    }
}
