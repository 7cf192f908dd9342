//! gridstart-cli library - exposes the commands for unit tests

pub mod commands;
