pub mod format;
pub mod kickstart;
pub mod traits;

pub use format::{append_arguments, append_property, join_arguments, post_script_log_file};
pub use kickstart::{validate_target, KickstartPostScript};
pub use traits::*;
