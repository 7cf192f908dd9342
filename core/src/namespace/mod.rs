//! Profile namespaces attached to a job.

pub mod condor;
pub mod dagman;
pub mod profile;

pub use condor::Condor;
pub use dagman::{Dagman, KeyCheck};
pub use profile::Profile;
