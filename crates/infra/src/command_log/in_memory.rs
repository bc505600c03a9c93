use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value as JsonValue;

use editrelay_core::{Command, CommandId};

use super::r#trait::CommandLog;

/// Retention bound used when none is configured.
pub const DEFAULT_MAX_COMMANDS: usize = 500;

#[derive(Debug, Default)]
struct LogState {
    /// Last id handed out; 0 means none yet.
    last_id: u64,
    /// Retained commands, ascending by id.
    commands: VecDeque<Command>,
}

/// In-memory command log.
///
/// Holds at most `max_commands` entries; each append past the bound evicts
/// the single oldest command. Nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryCommandLog {
    state: RwLock<LogState>,
    max_commands: usize,
}

impl InMemoryCommandLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_COMMANDS)
    }

    /// Create a log retaining at most `max_commands` entries (at least 1).
    pub fn with_capacity(max_commands: usize) -> Self {
        let max_commands = max_commands.max(1);
        Self {
            state: RwLock::new(LogState::default()),
            max_commands,
        }
    }

    // Every mutation leaves the state consistent, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, LogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryCommandLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLog for InMemoryCommandLog {
    fn append(&self, payload: JsonValue) -> CommandId {
        let mut state = self.write();

        state.last_id += 1;
        let id = CommandId::new(state.last_id);
        state.commands.push_back(Command::new(id, payload));

        if state.commands.len() > self.max_commands {
            if let Some(evicted) = state.commands.pop_front() {
                tracing::trace!(evicted = %evicted.id, "command evicted");
            }
        }

        id
    }

    fn commands_since(&self, min_id: CommandId) -> Vec<Command> {
        let state = self.read();
        let start = state.commands.partition_point(|c| c.id < min_id);
        state.commands.range(start..).cloned().collect()
    }

    fn len(&self) -> usize {
        self.read().commands.len()
    }

    fn last_id(&self) -> Option<CommandId> {
        match self.read().last_id {
            0 => None,
            id => Some(CommandId::new(id)),
        }
    }

    fn oldest_id(&self) -> Option<CommandId> {
        self.read().commands.front().map(|c| c.id)
    }

    fn capacity(&self) -> usize {
        self.max_commands
    }
}
