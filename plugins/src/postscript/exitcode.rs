use gridstart_core::postscript::{KickstartPostScript, ToolPathStrategy};
use gridstart_core::{Properties, Result};

use super::installed_tool;

/// The exitcode client shipped with the planner.
pub struct ExitCodeStrategy;

impl ToolPathStrategy for ExitCodeStrategy {
    fn name(&self) -> &str {
        "exitcode"
    }

    fn default_path(&self, properties: &Properties) -> Result<String> {
        installed_tool(properties, "exitcode")
    }
}

pub fn initialize(
    properties: &Properties,
    path: Option<&str>,
    submit_dir: &str,
) -> Result<KickstartPostScript> {
    KickstartPostScript::initialize(&ExitCodeStrategy, properties, path, submit_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstart_core::postscript::PostScript;
    use gridstart_core::{Job, PostScriptError};

    #[test]
    fn test_default_path_under_pegasus_home() {
        let props = Properties::new().with("pegasus.home", "/opt/pegasus");
        let ps = initialize(&props, None, "/sub").unwrap();
        assert_eq!(ps.tool_path(), "/opt/pegasus/bin/exitcode");
        assert_eq!(ps.short_describe(), "exitcode");
    }

    #[test]
    fn test_missing_home_is_config_error() {
        let err = initialize(&Properties::new(), None, "/sub").unwrap_err();
        assert!(matches!(err, PostScriptError::Config(_)));
    }

    #[test]
    fn test_override_without_home() {
        let ps = initialize(&Properties::new(), Some("/opt/bin/exitcode"), "/sub").unwrap();
        let mut job = Job::new("job1");
        assert!(ps.construct(&mut job, "POST").unwrap());
        assert_eq!(job.dagman.get("POST"), Some("/opt/bin/exitcode"));
    }
}
