//! btleplug backend
//!
//! Used on every platform except Windows. Talks to the first adapter the
//! system reports. Only peripherals that emit an event during the scan window
//! count as seen; BlueZ keeps stale devices in `peripherals()` across runs.

use crate::domain::models::DiscoveredDevice;
use crate::infrastructure::bluetooth::radio::{Radio, RadioLink};
use anyhow::Result;
use btleplug::api::{
    BDAddr, Central, CentralEvent, Manager as _, Peripheral as _, ScanFilter, WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral, PeripheralId};
use futures::StreamExt;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Default)]
pub struct BtleRadio {
    adapter: Option<Adapter>,
    /// Address shown to the user -> peripheral id, from the latest scan only
    seen: HashMap<String, PeripheralId>,
}

impl BtleRadio {
    pub fn new() -> Self {
        Self::default()
    }

    async fn adapter(&mut self) -> Result<Adapter> {
        if let Some(adapter) = &self.adapter {
            return Ok(adapter.clone());
        }

        let manager = Manager::new().await?;
        let adapter = manager
            .adapters()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No Bluetooth adapter found"))?;

        info!("Using adapter: {}", adapter.adapter_info().await?);
        self.adapter = Some(adapter.clone());
        Ok(adapter)
    }
}

/// Remember `item` unless it is already present, keeping first-seen order
fn record_seen<T: PartialEq>(seen: &mut Vec<T>, item: T) {
    if !seen.contains(&item) {
        seen.push(item);
    }
}

/// CoreBluetooth hides MACs and reports all zeroes; fall back to the
/// platform id so every peripheral keeps a distinct address
fn display_address(address: BDAddr, fallback: impl FnOnce() -> String) -> String {
    if address == BDAddr::from([0u8; 6]) {
        fallback()
    } else {
        address.to_string()
    }
}

impl Radio for BtleRadio {
    type Link = BtleLink;

    async fn scan(&mut self, window: Duration) -> Result<Vec<DiscoveredDevice>> {
        let adapter = self.adapter().await?;
        self.seen.clear();

        let mut events = adapter.events().await?;
        adapter.start_scan(ScanFilter::default()).await?;

        let deadline = tokio::time::Instant::now() + window;
        let mut order: Vec<PeripheralId> = Vec::new();
        loop {
            match tokio::time::timeout_at(deadline, events.next()).await {
                Ok(Some(
                    CentralEvent::DeviceDiscovered(id) | CentralEvent::DeviceUpdated(id),
                )) => record_seen(&mut order, id),
                Ok(Some(_)) => {}
                Ok(None) => {
                    tokio::time::sleep_until(deadline).await;
                    break;
                }
                Err(_) => break,
            }
        }
        adapter.stop_scan().await?;

        let mut devices = Vec::new();
        for id in order {
            let peripheral = adapter.peripheral(&id).await?;
            let Some(props) = peripheral.properties().await? else {
                continue;
            };
            let address = display_address(props.address, || format!("{:?}", id));
            let device = DiscoveredDevice {
                name: props.local_name.unwrap_or_default(),
                address: address.clone(),
                signal_strength: props.rssi,
            };
            debug!("Seen {:?}", device);
            self.seen.insert(address, id);
            devices.push(device);
        }

        Ok(devices)
    }

    async fn connect(&mut self, address: &str) -> Result<BtleLink> {
        let adapter = self.adapter().await?;

        let id = self
            .seen
            .get(address)
            .ok_or_else(|| anyhow::anyhow!("Peripheral {} not seen in the last scan", address))?;
        let peripheral = adapter.peripheral(id).await?;

        // Service discovery happens in `write` so a failure there still goes
        // through `close`
        peripheral.connect().await?;

        Ok(BtleLink { peripheral })
    }
}

pub struct BtleLink {
    peripheral: Peripheral,
}

impl RadioLink for BtleLink {
    async fn is_connected(&self) -> bool {
        self.peripheral.is_connected().await.unwrap_or(false)
    }

    async fn write(&mut self, service: Uuid, characteristic: Uuid, payload: &[u8]) -> Result<()> {
        self.peripheral.discover_services().await?;

        let target = self
            .peripheral
            .characteristics()
            .into_iter()
            .find(|c| c.service_uuid == service && c.uuid == characteristic)
            .ok_or_else(|| anyhow::anyhow!("Characteristic {} not found", characteristic))?;

        self.peripheral
            .write(&target, payload, WriteType::WithResponse)
            .await?;
        Ok(())
    }

    async fn close(self) -> Result<()> {
        self.peripheral.disconnect().await?;
        Ok(())
    }
}
