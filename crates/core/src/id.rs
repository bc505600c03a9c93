//! Strongly-typed identifiers used across the relay.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Identifier of a command in the log.
///
/// Ids are positive and strictly increasing in the order appends are
/// accepted. An id is never reused, even after the command it named has
/// been evicted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(u64);

impl CommandId {
    /// The first id handed out by a fresh log.
    pub const FIRST: CommandId = CommandId(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The id immediately after this one, or `None` at the end of the range.
    pub fn next(&self) -> Option<CommandId> {
        self.0.checked_add(1).map(CommandId)
    }
}

impl core::fmt::Display for CommandId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for CommandId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<CommandId> for u64 {
    fn from(value: CommandId) -> Self {
        value.0
    }
}

impl FromStr for CommandId {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RelayError::invalid_marker(format!(
                "CommandId: expected decimal digits, got {s:?}"
            )));
        }
        let value = s
            .parse::<u64>()
            .map_err(|e| RelayError::invalid_marker(format!("CommandId: {e}")))?;
        Ok(Self(value))
    }
}
