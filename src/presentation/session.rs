//! UI-side view of the current sync attempt.

use crate::domain::error::SyncError;
use crate::domain::models::{AppEvent, StatusMessage, SyncPhase};

#[derive(Debug, Default)]
pub struct SyncSession {
    pub phase: SyncPhase,
    /// Status messages of the current press, oldest first
    pub log: Vec<StatusMessage>,
    pub last_result: Option<Result<(), SyncError>>,
    in_flight: bool,
}

impl SyncSession {
    pub fn is_busy(&self) -> bool {
        self.in_flight || self.phase.is_busy()
    }

    /// Start a new attempt; returns false if one is already running
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.in_flight = true;
        self.log.clear();
        self.last_result = None;
        true
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Phase(phase) => self.phase = phase,
            AppEvent::LogMessage(msg) => self.log.push(msg),
            AppEvent::Finished(result) => {
                self.in_flight = false;
                self.last_result = Some(result);
            }
        }
    }

    /// The worker went away without finishing
    pub fn abandon(&mut self) {
        self.in_flight = false;
        self.phase = SyncPhase::Aborted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::MessageSeverity;

    #[test]
    fn test_single_attempt_per_press() {
        let mut session = SyncSession::default();
        assert!(session.begin());
        assert!(!session.begin());

        session.apply(AppEvent::Phase(SyncPhase::Scanning));
        assert!(!session.begin());

        session.apply(AppEvent::Phase(SyncPhase::Done));
        // Still waiting for Finished
        assert!(session.is_busy());

        session.apply(AppEvent::Finished(Ok(())));
        assert!(!session.is_busy());
        assert!(session.begin());
    }

    #[test]
    fn test_begin_clears_previous_log() {
        let mut session = SyncSession::default();
        session.begin();
        session.apply(AppEvent::LogMessage(StatusMessage::new(
            "Scanning for device: 'AS7341_ESP32_BLE'...",
            MessageSeverity::Info,
        )));
        session.apply(AppEvent::Finished(Err(SyncError::MissingAddress)));
        assert_eq!(session.log.len(), 1);
        assert_eq!(session.last_result, Some(Err(SyncError::MissingAddress)));

        session.begin();
        assert!(session.log.is_empty());
        assert!(session.last_result.is_none());
    }

    #[test]
    fn test_abandon() {
        let mut session = SyncSession::default();
        session.begin();
        session.apply(AppEvent::Phase(SyncPhase::Connecting));
        session.abandon();
        assert!(!session.is_busy());
        assert_eq!(session.phase, SyncPhase::Aborted);
    }
}
