pub mod exitcode;
pub mod exitpost;
pub mod none;
pub mod user;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use gridstart_core::{PostScriptError, Properties, Result};

pub use exitcode::ExitCodeStrategy;
pub use exitpost::ExitPostStrategy;
pub use none::NoPostScript;
pub use user::UserPostScript;

/// The postscripts a job can be enabled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostScriptKind {
    ExitCode,
    ExitPost,
    User,
    None,
}

impl PostScriptKind {
    pub const ALL: [PostScriptKind; 4] = [
        PostScriptKind::ExitCode,
        PostScriptKind::ExitPost,
        PostScriptKind::User,
        PostScriptKind::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostScriptKind::ExitCode => "exitcode",
            PostScriptKind::ExitPost => "exitpost",
            PostScriptKind::User => "user",
            PostScriptKind::None => "none",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            PostScriptKind::ExitCode => "parses the kickstart record with <pegasus.home>/bin/exitcode",
            PostScriptKind::ExitPost => "parses the kickstart record with <pegasus.home>/bin/exitpost",
            PostScriptKind::User => "runs a user supplied postscript without extra arguments",
            PostScriptKind::None => "no postscript is run for the job",
        }
    }
}

impl fmt::Display for PostScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostScriptKind {
    type Err = PostScriptError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        PostScriptKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PostScriptError::Config(format!("unknown postscript type '{s}'")))
    }
}

/// `<pegasus.home>/bin/<tool>`
pub(crate) fn installed_tool(properties: &Properties, tool: &str) -> Result<String> {
    let home = properties.pegasus_home().ok_or_else(|| {
        PostScriptError::Config(format!(
            "pegasus.home is not set, cannot locate default {tool}"
        ))
    })?;
    Ok(Path::new(home)
        .join("bin")
        .join(tool)
        .to_string_lossy()
        .into_owned())
}
