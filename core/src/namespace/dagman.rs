use serde::{Deserialize, Serialize};

use super::profile::Profile;
use crate::error::{PostScriptError, Result};

pub const PRE_SCRIPT_KEY: &str = "PRE";
pub const PRE_SCRIPT_ARGUMENTS_KEY: &str = "PRE.ARGUMENTS";
/// Path of the postscript. Before enablement it may name the postscript kind.
pub const POST_SCRIPT_KEY: &str = "POST";
pub const POST_SCRIPT_ARGUMENTS_KEY: &str = "POST.ARGUMENTS";
/// Prefix of the per-kind postscript path keys, e.g. `POST.PATH.EXITCODE`.
pub const POST_SCRIPT_PATH_PREFIX: &str = "POST.PATH";
/// Output file of the job that the postscript parses.
pub const OUTPUT_KEY: &str = "OUTPUT";
pub const RETRY_KEY: &str = "RETRY";
pub const CATEGORY_KEY: &str = "CATEGORY";
pub const PRIORITY_KEY: &str = "PRIORITY";
pub const ABORT_DAG_ON_KEY: &str = "ABORT-DAG-ON";
pub const MAXPRE_KEY: &str = "MAXPRE";
pub const MAXPOST_KEY: &str = "MAXPOST";
pub const MAXJOBS_KEY: &str = "MAXJOBS";
pub const MAXIDLE_KEY: &str = "MAXIDLE";

const KNOWN_KEYS: &[&str] = &[
    PRE_SCRIPT_KEY,
    PRE_SCRIPT_ARGUMENTS_KEY,
    POST_SCRIPT_KEY,
    POST_SCRIPT_ARGUMENTS_KEY,
    OUTPUT_KEY,
    RETRY_KEY,
    CATEGORY_KEY,
    PRIORITY_KEY,
    ABORT_DAG_ON_KEY,
    MAXPRE_KEY,
    MAXPOST_KEY,
    MAXJOBS_KEY,
    MAXIDLE_KEY,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCheck {
    Valid,
    Unknown,
}

/// Returns the profile key holding the tool path override for `kind`.
pub fn post_script_path_key(kind: &str) -> String {
    normalize_key(&format!("{POST_SCRIPT_PATH_PREFIX}.{kind}"))
}

/// Classifies a (normalized) key against the DAGMan namespace.
pub fn check_key(key: &str) -> KeyCheck {
    let path_prefix = format!("{POST_SCRIPT_PATH_PREFIX}.");
    if KNOWN_KEYS.contains(&key) || (key.starts_with(&path_prefix) && key.len() > path_prefix.len())
    {
        KeyCheck::Valid
    } else {
        KeyCheck::Unknown
    }
}

/// Execution-manager profile, consumed by DAGMan when the workflow runs.
/// DAGMan keys are case-insensitive and stored upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Profile", into = "Profile")]
pub struct Dagman {
    profile: Profile,
}

impl Dagman {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.profile.get(&normalize_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.profile.contains_key(&normalize_key(key))
    }

    /// Plain insert without namespace validation.
    pub fn construct(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        self.profile.set(normalize_key(key), value)
    }

    /// Inserts after checking `key` against the namespace. Unknown keys are
    /// reported and still inserted.
    pub fn check_key_in_ns(&mut self, key: &str, value: impl Into<String>) -> Result<KeyCheck> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(PostScriptError::InvalidArgument(
                "dagman profile key must not be empty".to_string(),
            ));
        }

        let check = check_key(&key);
        if check == KeyCheck::Unknown {
            tracing::warn!("unknown key {} in dagman namespace", key);
        }
        self.profile.set(key, value);
        Ok(check)
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

pub fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

impl From<Profile> for Dagman {
    fn from(raw: Profile) -> Self {
        let mut dagman = Dagman::new();
        for (k, v) in raw.iter() {
            dagman.construct(k, v);
        }
        dagman
    }
}

impl From<Dagman> for Profile {
    fn from(dagman: Dagman) -> Self {
        dagman.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut dagman = Dagman::new();
        dagman.construct("post.arguments", "-f");
        assert_eq!(dagman.get(POST_SCRIPT_ARGUMENTS_KEY), Some("-f"));
        assert_eq!(dagman.get("Post.Arguments"), Some("-f"));
    }

    #[test]
    fn test_check_key() {
        assert_eq!(check_key(POST_SCRIPT_KEY), KeyCheck::Valid);
        assert_eq!(check_key("POST.PATH.EXITCODE"), KeyCheck::Valid);
        assert_eq!(check_key("POST.PATH."), KeyCheck::Unknown);
        assert_eq!(check_key("FOO"), KeyCheck::Unknown);
    }

    #[test]
    fn test_unknown_key_is_still_inserted() {
        let mut dagman = Dagman::new();
        let check = dagman.check_key_in_ns("custom", "value").unwrap();
        assert_eq!(check, KeyCheck::Unknown);
        assert_eq!(dagman.get("CUSTOM"), Some("value"));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let mut dagman = Dagman::new();
        assert!(matches!(
            dagman.check_key_in_ns("  ", "value"),
            Err(PostScriptError::InvalidArgument(_))
        ));
        assert!(dagman.is_empty());
    }

    #[test]
    fn test_post_script_path_key() {
        assert_eq!(post_script_path_key("exitcode"), "POST.PATH.EXITCODE");
    }
}
