use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PostScriptError, Result};

/// Turns on debug instrumentation for the postscripts.
pub const POSTSCRIPT_DEBUG_KEY: &str = "pegasus.exitcode.debug";

/// Path of the properties file written into the submit directory.
pub const SUBMIT_PROPERTIES_KEY: &str = "pegasus.properties.submit";

/// Installation root; default tool paths live under `<home>/bin`.
pub const PEGASUS_HOME_KEY: &str = "pegasus.home";

/// Postscript kind used for jobs that do not name one.
pub const POSTSCRIPT_IMPL_KEY: &str = "pegasus.exitcode.impl";

/// Planner properties as an opaque string map with typed lookups.
///
/// Blank values are treated the same as missing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Applies a `key=value` assignment, as given on the command line.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            PostScriptError::InvalidArgument(format!(
                "property assignment '{assignment}' is not of the form key=value"
            ))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(PostScriptError::InvalidArgument(format!(
                "property assignment '{assignment}' has an empty key"
            )));
        }
        self.set(key, value.trim());
        Ok(())
    }

    /// Whether postscript debugging is enabled. Defaults to `false`.
    pub fn postscript_debug(&self) -> Result<bool> {
        self.boolean(POSTSCRIPT_DEBUG_KEY, false)
    }

    pub fn properties_in_submit_directory(&self) -> Option<&str> {
        self.get(SUBMIT_PROPERTIES_KEY)
    }

    pub fn pegasus_home(&self) -> Option<&str> {
        self.get(PEGASUS_HOME_KEY)
    }

    pub fn default_postscript_kind(&self) -> Option<&str> {
        self.get(POSTSCRIPT_IMPL_KEY)
    }

    fn boolean(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
            Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
            Some(v) => Err(PostScriptError::Config(format!(
                "property {key} must be true or false, got '{v}'"
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
