//! Sync Service Module
//!
//! Runs one time-sync attempt: scan for the target by name, connect, write
//! the sync message once, and release the connection.

use crate::domain::error::{SyncError, SyncResult};
use crate::domain::message::SyncMessage;
use crate::domain::models::{AppEvent, MessageSeverity, StatusMessage, SyncPhase};
use crate::domain::timezone::TimezoneRule;
use crate::infrastructure::bluetooth::protocol;
use crate::infrastructure::bluetooth::radio::{Radio, RadioLink};
use chrono::{Local, NaiveDateTime};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Source of the local wall-clock time written to the device
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

pub struct SyncService<R: Radio> {
    radio: R,
    event_sender: mpsc::UnboundedSender<AppEvent>,
    device_name: String,
    scan_window: Duration,
    clock: Clock,
    phase: SyncPhase,
}

impl<R: Radio> SyncService<R> {
    pub fn new(
        radio: R,
        event_sender: mpsc::UnboundedSender<AppEvent>,
        device_name: impl Into<String>,
        scan_window: Duration,
    ) -> Self {
        Self {
            radio,
            event_sender,
            device_name: device_name.into(),
            scan_window,
            clock: Box::new(|| Local::now().naive_local()),
            phase: SyncPhase::Idle,
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Full flow for one button press
    pub async fn run(&mut self, rule: &TimezoneRule) -> SyncResult<()> {
        let result = match self.discover().await {
            Ok(address) => self.send_time(Some(&address), rule).await,
            Err(e) => Err(e),
        };

        if result.is_err() && self.phase.is_busy() {
            self.set_phase(SyncPhase::Aborted);
        }

        let _ = self.event_sender.send(AppEvent::Finished(result.clone()));
        result
    }

    /// Scan once and return the address of the first peripheral whose name
    /// matches exactly
    pub async fn discover(&mut self) -> SyncResult<String> {
        self.set_phase(SyncPhase::Scanning);
        info!(
            "Scanning {:?} for '{}' (service {})",
            self.scan_window,
            self.device_name,
            protocol::SERVICE_UUID
        );
        self.send_log(
            format!("Scanning for device: '{}'...", self.device_name),
            MessageSeverity::Info,
        );

        let devices = match self.radio.scan(self.scan_window).await {
            Ok(devices) => devices,
            Err(e) => return Err(self.fail(SyncError::RadioUnavailable(e.to_string()))),
        };
        info!("Scan finished, {} devices seen", devices.len());
        for d in &devices {
            debug!("  {:?} [{}] {:?} dBm", d.name, d.address, d.signal_strength);
        }

        // Several peripherals may share the name; the first one seen wins
        match devices.into_iter().find(|d| d.name == self.device_name) {
            Some(device) => {
                self.set_phase(SyncPhase::Found);
                self.send_log(
                    format!("Device '{}' found: {}", self.device_name, device.address),
                    MessageSeverity::Success,
                );
                Ok(device.address)
            }
            None => {
                self.set_phase(SyncPhase::NotFound);
                Err(self.fail(SyncError::NotFound {
                    name: self.device_name.clone(),
                }))
            }
        }
    }

    /// Connect to `address` and write the current time with `rule`
    pub async fn send_time(
        &mut self,
        address: Option<&str>,
        rule: &TimezoneRule,
    ) -> SyncResult<()> {
        let Some(address) = address.filter(|a| !a.is_empty()) else {
            return Err(self.fail(SyncError::MissingAddress));
        };

        self.set_phase(SyncPhase::Connecting);
        self.send_log(
            format!("Connecting to {}...", address),
            MessageSeverity::Info,
        );

        let mut link = match self.radio.connect(address).await {
            Ok(link) => link,
            Err(e) => {
                return Err(self.fail(SyncError::ConnectFailed {
                    address: address.to_string(),
                    reason: e.to_string(),
                }))
            }
        };

        let result = self.write_time(&mut link, address, rule).await;

        if let Err(e) = link.close().await {
            warn!("Failed to release connection to {}: {}", address, e);
        }

        if result.is_ok() {
            self.set_phase(SyncPhase::Done);
            self.send_log("Time successfully sent to device!", MessageSeverity::Success);
        }
        result
    }

    async fn write_time(
        &mut self,
        link: &mut R::Link,
        address: &str,
        rule: &TimezoneRule,
    ) -> SyncResult<()> {
        if !link.is_connected().await {
            return Err(self.fail(SyncError::ConnectFailed {
                address: address.to_string(),
                reason: "not connected".to_string(),
            }));
        }
        self.set_phase(SyncPhase::Connected);
        self.send_log(
            format!("Connected to {} ({})", self.device_name, address),
            MessageSeverity::Success,
        );

        let message = SyncMessage::new((self.clock)(), rule);
        self.set_phase(SyncPhase::Writing);
        self.send_log(format!("Sending time: {}", message), MessageSeverity::Info);
        info!("Writing '{}' to {}", message, protocol::TIME_CHAR_UUID);

        link.write(
            protocol::service_uuid(),
            protocol::time_char_uuid(),
            &message.into_bytes(),
        )
        .await
        .map_err(|e| self.fail(SyncError::WriteFailed(e.to_string())))
    }

    fn set_phase(&mut self, next: SyncPhase) {
        if !self.phase.can_advance_to(next) {
            warn!("Ignoring phase change {:?} -> {:?}", self.phase, next);
            return;
        }
        self.phase = next;
        let _ = self.event_sender.send(AppEvent::Phase(next));
    }

    /// Report an error to the log and the UI, handing it back to the caller
    fn fail(&self, err: SyncError) -> SyncError {
        match err.severity() {
            MessageSeverity::Warning => warn!("{}", err),
            _ => error!("{}", err),
        }
        self.send_log(err.to_string(), err.severity());
        err
    }

    fn send_log(&self, message: impl Into<String>, severity: MessageSeverity) {
        let _ = self
            .event_sender
            .send(AppEvent::LogMessage(StatusMessage::new(message, severity)));
    }
}
