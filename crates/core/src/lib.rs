//! `editrelay-core` — shared building blocks for the edit relay.
//!
//! This crate contains **pure** primitives (no infrastructure concerns): the
//! command record, its identifier, and the relay error model.

pub mod command;
pub mod error;
pub mod id;

pub use command::Command;
pub use error::{RelayError, RelayResult};
pub use id::CommandId;
