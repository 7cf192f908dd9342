use crate::error::{PostScriptError, Result};
use crate::job::Job;
use crate::namespace::{condor, dagman};
use crate::properties::Properties;

use super::format::{
    append_arguments, append_property, post_script_log_file, DEBUG_VERBOSITY, LOG_DEFAULT_PROPERTY,
    USER_PROPERTIES_PROPERTY, VERBOSE_PROPERTY,
};
use super::traits::{PostScript, ToolPathStrategy};

/// Postscript that parses the kickstart record of a job.
///
/// Built once per enablement pass by [`KickstartPostScript::initialize`] and
/// immutable afterwards; [`PostScript::construct`] is then called once per job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickstartPostScript {
    kind: String,
    tool_path: String,
    debug: bool,
    extra_properties: String,
    submit_dir: String,
}

impl KickstartPostScript {
    /// Resolves the tool path, the debug flag and the extra properties.
    ///
    /// `explicit_path` wins over the strategy's default path; the strategy is
    /// not consulted at all in that case.
    pub fn initialize(
        strategy: &dyn ToolPathStrategy,
        properties: &Properties,
        explicit_path: Option<&str>,
        submit_dir: impl Into<String>,
    ) -> Result<Self> {
        let tool_path = match explicit_path {
            Some(path) => path.to_string(),
            None => strategy.default_path(properties)?,
        };
        if tool_path.trim().is_empty() {
            return Err(PostScriptError::Config(format!(
                "empty tool path for postscript {}",
                strategy.name()
            )));
        }

        let debug_enabled = properties.postscript_debug()?;
        let extra_properties = post_script_properties(properties);
        let submit_dir = submit_dir.into();

        tracing::debug!(
            kind = strategy.name(),
            tool_path = %tool_path,
            debug = debug_enabled,
            submit_dir = %submit_dir,
            "postscript initialized"
        );

        Ok(Self {
            kind: strategy.name().to_string(),
            tool_path,
            debug: debug_enabled,
            extra_properties,
            submit_dir,
        })
    }

    pub fn tool_path(&self) -> &str {
        &self.tool_path
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Properties handed to every invocation, e.g.
    /// `-Dpegasus.user.properties=/sub/dir/pegasus.properties`.
    pub fn extra_properties(&self) -> &str {
        self.extra_properties.trim_start()
    }

    pub fn submit_dir(&self) -> &str {
        &self.submit_dir
    }

    fn extra_options(&self, job: &Job) -> String {
        let mut options = String::new();
        if self.debug {
            append_property(&mut options, LOG_DEFAULT_PROPERTY, post_script_log_file(job));
            append_property(&mut options, VERBOSE_PROPERTY, DEBUG_VERBOSITY);
        }
        options.push_str(&self.extra_properties);
        options
    }
}

impl PostScript for KickstartPostScript {
    fn construct(&self, job: &mut Job, key: &str) -> Result<bool> {
        validate_target(job, key)?;

        // The postscript reads whatever file the job's stdout went to.
        if let Some(output) = job.condor.get(condor::OUTPUT_KEY).map(str::to_owned) {
            job.dagman.construct(dagman::OUTPUT_KEY, output);
        }

        // Extra options go first so the job's own arguments can override them.
        let extra_options = self.extra_options(job);
        let arguments = append_arguments(
            &extra_options,
            job.dagman.get(dagman::POST_SCRIPT_ARGUMENTS_KEY),
        );
        job.dagman
            .construct(dagman::POST_SCRIPT_ARGUMENTS_KEY, arguments);

        tracing::debug!(job = %job.name, "Postscript constructed is {}", self.tool_path);
        job.dagman.check_key_in_ns(key, self.tool_path.as_str())?;

        Ok(true)
    }

    fn short_describe(&self) -> &str {
        &self.kind
    }
}

/// Rejects jobs and keys a postscript cannot be installed for.
pub fn validate_target(job: &Job, key: &str) -> Result<()> {
    if job.name.trim().is_empty() {
        return Err(PostScriptError::InvalidArgument(
            "job has no name".to_string(),
        ));
    }

    let key = dagman::normalize_key(key);
    if key.is_empty() {
        return Err(PostScriptError::InvalidArgument(format!(
            "empty postscript key for job {}",
            job.name
        )));
    }
    if key == dagman::POST_SCRIPT_ARGUMENTS_KEY || key == dagman::OUTPUT_KEY {
        return Err(PostScriptError::InvalidArgument(format!(
            "postscript key {key} is reserved"
        )));
    }
    Ok(())
}

fn post_script_properties(properties: &Properties) -> String {
    let mut sb = String::new();
    if let Some(path) = properties.properties_in_submit_directory() {
        append_property(&mut sb, USER_PROPERTIES_PROPERTY, path);
    }
    sb
}
