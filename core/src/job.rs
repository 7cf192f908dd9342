use serde::{Deserialize, Serialize};

use crate::namespace::{Condor, Dagman};

/// One task instance of the workflow, as handed over by the planner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,

    /// Directives for the batch scheduler's submit file.
    #[serde(default)]
    pub condor: Condor,

    /// Directives for the DAG execution manager.
    #[serde(default)]
    pub dagman: Dagman,
}

impl Job {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
