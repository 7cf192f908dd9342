use std::collections::HashMap;
use std::sync::Arc;

use gridstart_core::namespace::dagman::{normalize_key, post_script_path_key, POST_SCRIPT_KEY};
use gridstart_core::postscript::PostScript;
use gridstart_core::{Job, PostScriptError, Properties, Result};

use crate::postscript::{exitcode, exitpost, NoPostScript, PostScriptKind, UserPostScript};

pub fn build_postscript(
    kind: PostScriptKind,
    properties: &Properties,
    path: Option<&str>,
    submit_dir: &str,
) -> Result<Arc<dyn PostScript>> {
    match kind {
        PostScriptKind::ExitCode => Ok(Arc::new(exitcode::initialize(
            properties, path, submit_dir,
        )?)),
        PostScriptKind::ExitPost => Ok(Arc::new(exitpost::initialize(
            properties, path, submit_dir,
        )?)),
        PostScriptKind::User => Ok(Arc::new(UserPostScript::initialize(path)?)),
        PostScriptKind::None => Ok(Arc::new(NoPostScript)),
    }
}

/// Picks and initializes the postscript for each job of a workflow.
///
/// A job names its postscript kind in its DAGMan `POST` profile and may pin the
/// tool through `POST.PATH.<kind>`. Initialized postscripts are reused across
/// jobs with the same kind and path.
pub struct PostScriptFactory {
    properties: Properties,
    submit_dir: String,
    default_kind: Option<PostScriptKind>,
    path_override: Option<String>,
    cache: HashMap<(PostScriptKind, Option<String>), Arc<dyn PostScript>>,
}

impl PostScriptFactory {
    pub fn new(properties: Properties, submit_dir: impl Into<String>) -> Self {
        Self {
            properties,
            submit_dir: submit_dir.into(),
            default_kind: None,
            path_override: None,
            cache: HashMap::new(),
        }
    }

    /// Kind for jobs that do not name one. Takes precedence over the
    /// `pegasus.exitcode.impl` property.
    pub fn with_default_kind(mut self, kind: Option<PostScriptKind>) -> Self {
        self.default_kind = kind;
        self
    }

    /// Tool path for jobs without a `POST.PATH.<kind>` profile.
    pub fn with_path(mut self, path: Option<String>) -> Self {
        self.path_override = path.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn default_kind(&self) -> Result<PostScriptKind> {
        if let Some(kind) = self.default_kind {
            return Ok(kind);
        }
        match self.properties.default_postscript_kind() {
            Some(kind) => kind.parse(),
            None => Ok(PostScriptKind::ExitCode),
        }
    }

    pub fn kind_for(&self, job: &Job) -> Result<PostScriptKind> {
        match non_blank(job.dagman.get(POST_SCRIPT_KEY)) {
            Some(kind) => kind.parse().map_err(|e: PostScriptError| match e {
                PostScriptError::Config(msg) => {
                    PostScriptError::Config(format!("job {}: {msg}", job.name))
                }
                other => other,
            }),
            None => self.default_kind(),
        }
    }

    pub fn load(&mut self, kind: PostScriptKind, path: Option<&str>) -> Result<Arc<dyn PostScript>> {
        let key = (kind, path.map(str::to_owned));
        if let Some(ps) = self.cache.get(&key) {
            return Ok(Arc::clone(ps));
        }

        let ps = build_postscript(kind, &self.properties, path, &self.submit_dir)?;
        tracing::debug!(kind = %kind, path = ?path, "loaded postscript");
        self.cache.insert(key, Arc::clone(&ps));
        Ok(ps)
    }

    /// Installs the job's postscript under `POST`. Returns whether one was
    /// installed.
    pub fn enable(&mut self, job: &mut Job) -> Result<bool> {
        self.enable_as(job, None, POST_SCRIPT_KEY)
    }

    /// Like [`enable`](Self::enable), with the kind forced to `kind` when given
    /// and the tool path written under `key`.
    pub fn enable_as(
        &mut self,
        job: &mut Job,
        kind: Option<PostScriptKind>,
        key: &str,
    ) -> Result<bool> {
        let kind = match kind {
            Some(kind) => kind,
            None => self.kind_for(job)?,
        };
        let path = non_blank(job.dagman.get(&post_script_path_key(kind.as_str())))
            .map(str::to_owned)
            .or_else(|| self.path_override.clone());

        let ps = self.load(kind, path.as_deref())?;
        let constructed = ps.construct(job, key)?;
        if !constructed && normalize_key(key) == POST_SCRIPT_KEY {
            // POST may still carry the kind name.
            job.dagman.remove(POST_SCRIPT_KEY);
        }

        tracing::info!(
            job = %job.name,
            postscript = ps.short_describe(),
            constructed,
            "postscript enabled"
        );
        Ok(constructed)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstart_core::namespace::dagman::POST_SCRIPT_ARGUMENTS_KEY;
    use gridstart_core::properties::{PEGASUS_HOME_KEY, POSTSCRIPT_IMPL_KEY};
    use pretty_assertions::assert_eq;

    fn factory() -> PostScriptFactory {
        PostScriptFactory::new(
            Properties::new().with(PEGASUS_HOME_KEY, "/opt/pegasus"),
            "/sub/dir",
        )
    }

    #[test]
    fn test_defaults_to_exitcode() {
        let mut factory = factory();
        let mut job = Job::new("job1");

        assert!(factory.enable(&mut job).unwrap());
        assert_eq!(job.dagman.get(POST_SCRIPT_KEY), Some("/opt/pegasus/bin/exitcode"));
        assert_eq!(job.dagman.get(POST_SCRIPT_ARGUMENTS_KEY), Some(""));
    }

    #[test]
    fn test_job_selects_kind_and_path() {
        let mut factory = factory();
        let mut job = Job::new("job1");
        job.dagman.construct("POST", "exitpost");
        job.dagman.construct("POST.PATH.EXITPOST", "/site/bin/exitpost");

        factory.enable(&mut job).unwrap();
        assert_eq!(job.dagman.get(POST_SCRIPT_KEY), Some("/site/bin/exitpost"));
    }

    #[test]
    fn test_default_kind_from_properties() {
        let mut factory = PostScriptFactory::new(
            Properties::new()
                .with(PEGASUS_HOME_KEY, "/opt/pegasus")
                .with(POSTSCRIPT_IMPL_KEY, "exitpost"),
            "/sub/dir",
        );
        assert_eq!(factory.default_kind(), Ok(PostScriptKind::ExitPost));

        let mut job = Job::new("job1");
        factory.enable(&mut job).unwrap();
        assert_eq!(job.dagman.get(POST_SCRIPT_KEY), Some("/opt/pegasus/bin/exitpost"));
    }

    #[test]
    fn test_explicit_default_kind_wins_over_properties() {
        let factory = PostScriptFactory::new(
            Properties::new().with(POSTSCRIPT_IMPL_KEY, "exitpost"),
            "/sub",
        )
        .with_default_kind(Some(PostScriptKind::None));
        assert_eq!(factory.default_kind(), Ok(PostScriptKind::None));
    }

    #[test]
    fn test_none_removes_kind_marker() {
        let mut factory = factory();
        let mut job = Job::new("job1");
        job.dagman.construct("POST", "none");
        job.dagman.construct("RETRY", "2");

        assert!(!factory.enable(&mut job).unwrap());
        assert!(!job.dagman.contains_key(POST_SCRIPT_KEY));
        assert_eq!(job.dagman.get("RETRY"), Some("2"));
    }

    #[test]
    fn test_unknown_kind_names_the_job() {
        let mut factory = factory();
        let mut job = Job::new("job7");
        job.dagman.construct("POST", "bogus");

        let err = factory.enable(&mut job).unwrap_err();
        assert_eq!(
            err,
            PostScriptError::Config("job job7: unknown postscript type 'bogus'".to_string())
        );
    }

    #[test]
    fn test_user_kind_needs_path() {
        let mut factory = factory();
        let mut job = Job::new("job1");
        job.dagman.construct("POST", "user");
        assert!(factory.enable(&mut job).is_err());

        let mut factory = factory.with_path(Some("/home/me/check.sh".to_string()));
        factory.enable(&mut job).unwrap();
        assert_eq!(job.dagman.get(POST_SCRIPT_KEY), Some("/home/me/check.sh"));
    }

    #[test]
    fn test_forced_kind_and_key() {
        let mut factory = factory();
        let mut job = Job::new("job1");
        job.dagman.construct("POST", "none");

        assert!(factory
            .enable_as(&mut job, Some(PostScriptKind::ExitCode), "POST.PATH.EXITCODE")
            .unwrap());
        assert_eq!(job.dagman.get("POST.PATH.EXITCODE"), Some("/opt/pegasus/bin/exitcode"));
        assert_eq!(job.dagman.get(POST_SCRIPT_KEY), Some("none"));
    }

    #[test]
    fn test_instances_are_cached() {
        let mut factory = factory();
        let first = factory.load(PostScriptKind::ExitCode, None).unwrap();
        let second = factory.load(PostScriptKind::ExitCode, None).unwrap();
        let other = factory
            .load(PostScriptKind::ExitCode, Some("/x/exitcode"))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[test]
    fn test_missing_home_fails_enablement() {
        let mut factory = PostScriptFactory::new(Properties::new(), "/sub");
        let mut job = Job::new("job1");
        assert!(matches!(
            factory.enable(&mut job),
            Err(PostScriptError::Config(_))
        ));
        assert!(job.dagman.is_empty());
    }
}
