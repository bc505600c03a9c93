//! The command record stored by the log.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::id::CommandId;

/// One opaque edit operation submitted by a client.
///
/// The payload is never inspected; it is kept exactly as decoded and handed
/// back to pollers under the `data` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: CommandId,

    #[serde(rename = "data")]
    pub payload: JsonValue,
}

impl Command {
    pub fn new(id: CommandId, payload: JsonValue) -> Self {
        Self { id, payload }
    }
}
