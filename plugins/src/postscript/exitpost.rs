use gridstart_core::postscript::{KickstartPostScript, ToolPathStrategy};
use gridstart_core::{Properties, Result};

use super::installed_tool;

/// exitpost: parses the kickstart record and also archives the job output.
pub struct ExitPostStrategy;

impl ToolPathStrategy for ExitPostStrategy {
    fn name(&self) -> &str {
        "exitpost"
    }

    fn default_path(&self, properties: &Properties) -> Result<String> {
        installed_tool(properties, "exitpost")
    }
}

pub fn initialize(
    properties: &Properties,
    path: Option<&str>,
    submit_dir: &str,
) -> Result<KickstartPostScript> {
    KickstartPostScript::initialize(&ExitPostStrategy, properties, path, submit_dir)
}
