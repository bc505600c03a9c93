//! Append-only, size-bounded command log.
//!
//! This module defines the storage boundary used by the request layer and an
//! in-memory implementation that lives for the process lifetime.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{DEFAULT_MAX_COMMANDS, InMemoryCommandLog};
pub use r#trait::CommandLog;
