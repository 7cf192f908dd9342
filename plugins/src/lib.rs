pub mod factory;
pub mod postscript;

pub use factory::{build_postscript, PostScriptFactory};
pub use postscript::PostScriptKind;
