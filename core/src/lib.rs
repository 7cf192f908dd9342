//! gridstart-core: post-execution verification directives for workflow jobs.
//!
//! A postscript is the command DAGMan runs after a job finishes, to decide from
//! the job's kickstart record whether it really succeeded. This crate resolves
//! the tool path and arguments for that command and writes them into the job's
//! DAGMan profile.

pub mod config;
pub mod error;
pub mod job;
pub mod namespace;
pub mod postscript;
pub mod properties;

pub use error::{PostScriptError, Result};
pub use job::Job;
pub use properties::Properties;
