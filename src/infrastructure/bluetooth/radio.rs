//! Radio seam
//!
//! The sync flow only needs two capabilities from a BLE stack: a bounded
//! discovery sweep and a connection that accepts one characteristic write.

use crate::domain::models::DiscoveredDevice;
use anyhow::Result;
use std::time::Duration;
use uuid::Uuid;

#[allow(async_fn_in_trait)]
pub trait Radio {
    type Link: RadioLink;

    /// Listen for advertisements for `window` and return everything seen,
    /// in the order it was first seen
    async fn scan(&mut self, window: Duration) -> Result<Vec<DiscoveredDevice>>;

    /// Open a connection-scoped session to `address`
    async fn connect(&mut self, address: &str) -> Result<Self::Link>;
}

#[allow(async_fn_in_trait)]
pub trait RadioLink {
    async fn is_connected(&self) -> bool;

    async fn write(&mut self, service: Uuid, characteristic: Uuid, payload: &[u8]) -> Result<()>;

    /// Release the session
    async fn close(self) -> Result<()>;
}
