use crate::domain::error::SyncError;
use crate::domain::timezone::TimezoneRule;

/// A peripheral seen during one scan window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    pub name: String,
    /// Colon-separated MAC, e.g. `AA:BB:CC:DD:EE:FF`
    pub address: String,
    pub signal_strength: Option<i16>,
}

/// Progress of a single button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Scanning,
    Found,
    NotFound,
    Connecting,
    Connected,
    Writing,
    Done,
    Aborted,
}

impl SyncPhase {
    /// Whether `next` is a legal successor of `self`
    pub fn can_advance_to(self, next: SyncPhase) -> bool {
        use SyncPhase::*;

        match (self, next) {
            (Idle | Done | NotFound | Aborted, Scanning) => true,
            (Scanning, Found | NotFound) => true,
            (Found, Connecting) => true,
            (Connecting, Connected) => true,
            (Connected, Writing) => true,
            (Writing, Done) => true,
            (Scanning | Found | Connecting | Connected | Writing, Aborted) => true,
            _ => false,
        }
    }

    /// True while a sync attempt is in flight
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Scanning | Self::Found | Self::Connecting | Self::Connected | Self::Writing
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Scanning => "SCANNING...",
            Self::Found => "DEVICE FOUND",
            Self::NotFound => "NOT FOUND",
            Self::Connecting => "CONNECTING...",
            Self::Connected => "CONNECTED",
            Self::Writing => "SENDING TIME...",
            Self::Done => "SYNCED",
            Self::Aborted => "FAILED",
        }
    }
}

/// Events sent from the Bluetooth worker to the UI
#[derive(Debug, Clone)]
pub enum AppEvent {
    Phase(SyncPhase),
    LogMessage(StatusMessage),
    Finished(Result<(), SyncError>),
}

/// Commands sent from the UI to the Bluetooth worker
#[derive(Debug, Clone, Copy)]
pub enum SyncCommand {
    Sync { timezone: &'static TimezoneRule },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
    pub severity: MessageSeverity,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>, severity: MessageSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Error,
}
