pub mod cli;
pub mod construct;
pub mod kinds;
