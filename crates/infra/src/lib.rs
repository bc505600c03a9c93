//! Infrastructure layer: command log storage.

pub mod command_log;
