//! Request-handling logic between HTTP and the command log.

use std::path::PathBuf;
use std::sync::Arc;

use editrelay_core::{Command, CommandId, RelayError, RelayResult};
use editrelay_infra::command_log::{CommandLog, InMemoryCommandLog};

use crate::config::RelayConfig;

/// Submission size limit used when none is configured (2 MiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 2 * 1024 * 1024;

/// Shared state handed to every handler.
pub struct AppServices {
    pub sync: SyncService,
    pub script_path: PathBuf,
}

/// Build services around a fresh in-memory log sized from `config`.
pub fn build_services(config: &RelayConfig) -> AppServices {
    let log: Arc<dyn CommandLog> = Arc::new(InMemoryCommandLog::with_capacity(config.max_commands));
    build_services_with_log(config, log)
}

/// Build services around an existing log.
pub fn build_services_with_log(config: &RelayConfig, log: Arc<dyn CommandLog>) -> AppServices {
    AppServices {
        sync: SyncService::new(log).with_max_payload_bytes(config.max_payload_bytes),
        script_path: config.script_path.clone(),
    }
}

/// Validates submissions and polls, then forwards them to the command log.
///
/// Stateless apart from the log itself: every validation happens before the
/// log is touched, so a rejected request never consumes an id.
pub struct SyncService {
    log: Arc<dyn CommandLog>,
    max_payload_bytes: u64,
}

impl SyncService {
    pub fn new(log: Arc<dyn CommandLog>) -> Self {
        Self {
            log,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }

    pub fn with_max_payload_bytes(mut self, max: u64) -> Self {
        self.max_payload_bytes = max;
        self
    }

    pub fn log(&self) -> &Arc<dyn CommandLog> {
        &self.log
    }

    pub fn max_payload_bytes(&self) -> u64 {
        self.max_payload_bytes
    }

    /// Reject a declared size above the limit. Exactly the limit is accepted.
    pub fn check_size(&self, declared: u64) -> RelayResult<()> {
        if declared > self.max_payload_bytes {
            return Err(RelayError::PayloadTooLarge {
                declared,
                limit: self.max_payload_bytes,
            });
        }
        Ok(())
    }

    /// Validate and decode `raw`, then append it to the log.
    pub fn submit(&self, raw: &[u8], declared_size: u64) -> RelayResult<CommandId> {
        self.check_size(declared_size)?;
        self.check_size(raw.len() as u64)?;

        let payload: serde_json::Value =
            serde_json::from_slice(raw).map_err(|e| RelayError::malformed(e.to_string()))?;

        let id = self.log.append(payload);
        tracing::debug!(command_id = %id, bytes = raw.len(), "command accepted");
        Ok(id)
    }

    /// Commands strictly after `marker`, the last id the caller has seen.
    ///
    /// `marker` must be plain decimal digits. A marker too large for an id is
    /// past everything and yields nothing.
    pub fn poll(&self, marker: &str) -> RelayResult<Vec<Command>> {
        let marker = match marker.parse::<CommandId>() {
            Ok(m) => m,
            Err(_) if is_decimal(marker) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        Ok(self.poll_since(marker))
    }

    /// Equivalent to `commands_since(marker + 1)`.
    pub fn poll_since(&self, marker: CommandId) -> Vec<Command> {
        match marker.next() {
            Some(min_id) => self.log.commands_since(min_id),
            None => Vec::new(),
        }
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MIB: u64 = 1024 * 1024;

    fn service_with_capacity(max_commands: usize) -> SyncService {
        SyncService::new(Arc::new(InMemoryCommandLog::with_capacity(max_commands)))
    }

    fn submit_json(service: &SyncService, value: serde_json::Value) -> CommandId {
        let raw = serde_json::to_vec(&value).unwrap();
        service.submit(&raw, raw.len() as u64).unwrap()
    }

    fn ids(commands: &[Command]) -> Vec<u64> {
        commands.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn submit_then_poll_scenario() {
        let service = service_with_capacity(500);
        assert_eq!(submit_json(&service, json!({ "x": 1 })), CommandId::new(1));
        assert_eq!(submit_json(&service, json!({ "x": 2 })), CommandId::new(2));
        assert_eq!(submit_json(&service, json!({ "x": 3 })), CommandId::new(3));

        let all = service.poll("0").unwrap();
        assert_eq!(ids(&all), vec![1, 2, 3]);
        assert_eq!(all[1].payload, json!({ "x": 2 }));

        let after_two = service.poll("2").unwrap();
        assert_eq!(after_two, vec![Command::new(CommandId::new(3), json!({ "x": 3 }))]);
    }

    #[test]
    fn poll_never_returns_the_marker_itself() {
        let service = service_with_capacity(500);
        for i in 0..5 {
            submit_json(&service, json!(i));
        }
        for marker in 0..5u64 {
            let got = service.poll_since(CommandId::new(marker));
            assert!(got.iter().all(|c| c.id.get() > marker));
            assert_eq!(got, service.log().commands_since(CommandId::new(marker + 1)));
        }
    }

    #[test]
    fn poll_at_or_past_newest_is_empty() {
        let service = service_with_capacity(500);
        submit_json(&service, json!("a"));
        submit_json(&service, json!("b"));

        assert!(service.poll("2").unwrap().is_empty());
        assert!(service.poll("3").unwrap().is_empty());
        assert!(service.poll(&u64::MAX.to_string()).unwrap().is_empty());
        assert!(service.poll("184467440737095516150000").unwrap().is_empty());
    }

    #[test]
    fn bounded_log_scenario() {
        let service = service_with_capacity(2);
        submit_json(&service, json!({ "n": 1 }));
        submit_json(&service, json!({ "n": 2 }));
        submit_json(&service, json!({ "n": 3 }));

        let all = service.poll("0").unwrap();
        assert_eq!(ids(&all), vec![2, 3]);
        assert_eq!(all[0].payload, json!({ "n": 2 }));
    }

    #[test]
    fn oversized_declaration_is_rejected_before_parsing() {
        let service = service_with_capacity(500);
        // Not JSON at all: the size check must win.
        let err = service.submit(b"{{{", 3 * MIB).unwrap_err();
        assert_eq!(
            err,
            RelayError::PayloadTooLarge {
                declared: 3 * MIB,
                limit: 2 * MIB
            }
        );
        assert!(service.log().is_empty());
    }

    #[test]
    fn exact_limit_is_accepted() {
        let service = service_with_capacity(500).with_max_payload_bytes(7);
        assert!(service.submit(b"[1,2,3]", 7).is_ok());
        assert!(matches!(
            service.submit(b"[1,2,34]", 8),
            Err(RelayError::PayloadTooLarge { declared: 8, limit: 7 })
        ));
    }

    #[test]
    fn body_longer_than_limit_is_rejected_even_with_small_declaration() {
        let service = service_with_capacity(500).with_max_payload_bytes(4);
        let err = service.submit(b"[1,2,3]", 2).unwrap_err();
        assert!(matches!(err, RelayError::PayloadTooLarge { declared: 7, limit: 4 }));
    }

    #[test]
    fn malformed_payload_consumes_no_id() {
        let service = service_with_capacity(500);
        let err = service.submit(b"{\"x\":", 5).unwrap_err();
        assert!(matches!(err, RelayError::MalformedPayload(_)));
        assert!(service.log().is_empty());
        assert_eq!(service.log().last_id(), None);

        assert_eq!(submit_json(&service, json!({ "ok": true })), CommandId::new(1));
    }

    #[test]
    fn any_json_value_is_accepted() {
        let service = service_with_capacity(500);
        for raw in ["null", "1", "\"text\"", "[]", "{}", "[{\"a\":[1,{\"b\":null}]}]"] {
            assert!(service.submit(raw.as_bytes(), raw.len() as u64).is_ok(), "{raw}");
        }
        assert_eq!(service.log().len(), 6);
    }

    #[test]
    fn invalid_markers_are_rejected() {
        let service = service_with_capacity(500);
        for bad in ["", "-1", "abc", "1.5", "0x10", " 3"] {
            assert!(
                matches!(service.poll(bad), Err(RelayError::InvalidMarker(_))),
                "{bad:?}"
            );
        }
    }
}
