//! Bluetooth Module
//!
//! Discovers the time-sync peripheral and writes the current time to it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 SyncService                   │
//! │  (scan -> connect -> write, one per press)    │
//! └──────────────────────┬───────────────────────┘
//!                        │  Radio / RadioLink
//!            ┌───────────┴───────────┐
//!            ▼                       ▼
//!     ┌─────────────┐         ┌─────────────┐
//!     │    WinRT    │         │  btleplug   │
//!     │  (Windows)  │         │ (elsewhere) │
//!     └─────────────┘         └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`protocol`] - UUIDs, target name, scan window, address helpers
//! - [`radio`] - Traits the service drives
//! - [`service`] - The sync flow

pub mod protocol;
pub mod radio;
pub mod service;

#[cfg(not(windows))]
mod btle;
#[cfg(windows)]
mod winrt;

#[cfg(not(windows))]
pub use btle::BtleRadio as PlatformRadio;
#[cfg(windows)]
pub use winrt::WinRtRadio as PlatformRadio;

pub use service::SyncService;
