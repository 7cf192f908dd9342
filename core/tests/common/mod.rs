use gridstart_core::postscript::{FnToolPath, KickstartPostScript};
use gridstart_core::properties::{POSTSCRIPT_DEBUG_KEY, SUBMIT_PROPERTIES_KEY};
use gridstart_core::{Job, Properties, Result};

pub const TOOL_PATH: &str = "/opt/bin/exitcode";
pub const SUBMIT_DIR: &str = "/sub/dir";
pub const SUBMIT_PROPERTIES: &str = "/sub/dir/pegasus.properties";

pub fn properties(debug: bool, submit_properties: bool) -> Properties {
    let mut props = Properties::new().with(POSTSCRIPT_DEBUG_KEY, debug.to_string());
    if submit_properties {
        props.set(SUBMIT_PROPERTIES_KEY, SUBMIT_PROPERTIES);
    }
    props
}

pub fn postscript(props: &Properties) -> KickstartPostScript {
    let strategy = FnToolPath::new("exitcode", |_: &Properties| -> Result<String> {
        Ok(TOOL_PATH.to_string())
    });
    KickstartPostScript::initialize(&strategy, props, None, SUBMIT_DIR)
        .expect("postscript initializes")
}

pub fn job_with_arguments(name: &str, arguments: Option<&str>) -> Job {
    let mut job = Job::new(name);
    if let Some(args) = arguments {
        job.dagman
            .construct(gridstart_core::namespace::dagman::POST_SCRIPT_ARGUMENTS_KEY, args);
    }
    job
}
