use std::fmt::Display;

use crate::job::Job;

/// Suffix of the log file a postscript writes in debug mode.
pub const EXITCODE_OUTPUT_SUFFIX: &str = "exit.log";

pub const LOG_DEFAULT_PROPERTY: &str = "pegasus.log.default";
pub const VERBOSE_PROPERTY: &str = "pegasus.verbose";
pub const USER_PROPERTIES_PROPERTY: &str = "pegasus.user.properties";

/// Verbosity the postscript runs with when debugging is on.
pub const DEBUG_VERBOSITY: u8 = 5;

/// Appends ` -D<key>=<value>` to `buf`.
pub fn append_property(buf: &mut String, key: &str, value: impl Display) {
    use std::fmt::Write;
    // Writing into a String cannot fail.
    let _ = write!(buf, " -D{key}={value}");
}

/// Name of the postscript log file for `job`, relative to the submit directory.
pub fn post_script_log_file(job: &Job) -> String {
    format!("{}.{}", job.name(), EXITCODE_OUTPUT_SUFFIX)
}

/// Puts `existing` after the extra options, separated by one space. The
/// existing arguments are kept verbatim; blank ones count as absent.
pub fn append_arguments(extra_options: &str, existing: Option<&str>) -> String {
    let extra_options = extra_options.trim();
    match existing.filter(|args| !args.trim().is_empty()) {
        Some(args) if extra_options.is_empty() => args.to_string(),
        Some(args) => format!("{extra_options} {args}"),
        None => extra_options.to_string(),
    }
}

/// Joins argument segments with single spaces, skipping empty ones.
pub fn join_arguments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
