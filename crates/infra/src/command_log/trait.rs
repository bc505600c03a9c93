use std::sync::Arc;

use serde_json::Value as JsonValue;

use editrelay_core::{Command, CommandId};

/// Ordered, bounded, concurrency-safe store of commands.
///
/// ## Append Semantics
///
/// `append()`:
/// - Assigns the next id (last issued + 1, starting at 1)
/// - Inserts the command at the end of the sequence
/// - Drops exactly one command from the front if the retention bound is exceeded
///
/// The three steps happen as one atomic step with respect to every other
/// operation on the log, so two concurrent appends never share an id and a
/// reader never observes id N without every retained id below N.
///
/// ## Query Semantics
///
/// `commands_since()`:
/// - Returns every retained command with `id >= min_id`, ascending
/// - Returns an empty vector when `min_id` is past the newest id
/// - Returns an empty (or partial) vector when the requested range was
///   already evicted; this is not reported as an error
///
/// Both operations are total: the log never fails.
pub trait CommandLog: Send + Sync {
    /// Append an opaque payload and return the id it was assigned.
    fn append(&self, payload: JsonValue) -> CommandId;

    /// All retained commands with `id >= min_id`, ordered by id.
    fn commands_since(&self, min_id: CommandId) -> Vec<Command>;

    /// Number of retained commands.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest id ever issued (survives eviction), `None` before the first append.
    fn last_id(&self) -> Option<CommandId>;

    /// Lowest id still retained.
    fn oldest_id(&self) -> Option<CommandId>;

    /// Maximum number of commands retained at once.
    fn capacity(&self) -> usize;
}

impl<L> CommandLog for Arc<L>
where
    L: CommandLog + ?Sized,
{
    fn append(&self, payload: JsonValue) -> CommandId {
        (**self).append(payload)
    }

    fn commands_since(&self, min_id: CommandId) -> Vec<Command> {
        (**self).commands_since(min_id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn last_id(&self) -> Option<CommandId> {
        (**self).last_id()
    }

    fn oldest_id(&self) -> Option<CommandId> {
        (**self).oldest_id()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }
}
