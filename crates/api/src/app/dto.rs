use serde::Serialize;

use editrelay_core::{Command, CommandId};

// -------------------------
// Response DTOs
// -------------------------

/// Body of `GET /commandsSince/{id}`.
#[derive(Debug, Serialize)]
pub struct CommandsResponse {
    pub commands: Vec<Command>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub commands: usize,
    pub capacity: usize,
    pub last_id: Option<CommandId>,
    pub oldest_id: Option<CommandId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commands_envelope_shape() {
        let body = CommandsResponse {
            commands: vec![
                Command::new(CommandId::new(1), json!({ "x": 1 })),
                Command::new(CommandId::new(2), json!("two")),
            ],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "commands": [ { "id": 1, "data": { "x": 1 } }, { "id": 2, "data": "two" } ] })
        );
    }

    #[test]
    fn empty_envelope_still_has_commands_key() {
        let body = CommandsResponse { commands: vec![] };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"commands":[]}"#);
    }
}
