use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostScriptError {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T, E = PostScriptError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("postscript failed: {0}")]
    PostScript(#[from] PostScriptError),
    #[error("config error: {0}")]
    Config(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
