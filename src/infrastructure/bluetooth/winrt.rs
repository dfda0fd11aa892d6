//! WinRT backend
//!
//! Discovery uses an active `BluetoothLEAdvertisementWatcher`; the write goes
//! through the GATT service of a `BluetoothLEDevice`.

use crate::domain::models::DiscoveredDevice;
use crate::infrastructure::bluetooth::protocol::{format_address, parse_address};
use crate::infrastructure::bluetooth::radio::{Radio, RadioLink};
use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;
use windows::core::GUID;
use windows::Devices::Bluetooth::Advertisement::{
    BluetoothLEAdvertisementReceivedEventArgs, BluetoothLEAdvertisementWatcher,
    BluetoothLEScanningMode,
};
use windows::Devices::Bluetooth::GenericAttributeProfile::{
    GattCommunicationStatus, GattDeviceService, GattSession,
};
use windows::Devices::Bluetooth::{
    BluetoothCacheMode, BluetoothConnectionStatus, BluetoothLEDevice,
};
use windows::Foundation::TypedEventHandler;
use windows::Storage::Streams::DataWriter;

fn to_guid(uuid: Uuid) -> GUID {
    GUID::from_u128(uuid.as_u128())
}

#[derive(Default)]
pub struct WinRtRadio;

impl WinRtRadio {
    pub fn new() -> Self {
        Self
    }
}

impl Radio for WinRtRadio {
    type Link = WinRtLink;

    async fn scan(&mut self, window: Duration) -> Result<Vec<DiscoveredDevice>> {
        let seen: Arc<Mutex<Vec<DiscoveredDevice>>> = Arc::default();

        let watcher = BluetoothLEAdvertisementWatcher::new()?;
        watcher.SetScanningMode(BluetoothLEScanningMode::Active)?;

        let sink = seen.clone();
        let handler = TypedEventHandler::new(
            move |_: windows::core::Ref<BluetoothLEAdvertisementWatcher>,
                  args: windows::core::Ref<BluetoothLEAdvertisementReceivedEventArgs>| {
                if let Some(args) = args.as_ref() {
                    let name = args.Advertisement()?.LocalName()?.to_string();
                    let address = format_address(args.BluetoothAddress()?);
                    let rssi = args.RawSignalStrengthInDBm()?;

                    if let Ok(mut devices) = sink.lock() {
                        match devices.iter_mut().find(|d| d.address == address) {
                            // Scan responses carry the name the first advertisement may lack
                            Some(existing) => {
                                if existing.name.is_empty() {
                                    existing.name = name;
                                }
                                existing.signal_strength = Some(rssi);
                            }
                            None => devices.push(DiscoveredDevice {
                                name,
                                address,
                                signal_strength: Some(rssi),
                            }),
                        }
                    }
                }
                Ok(())
            },
        );

        watcher.Received(&handler)?;
        watcher.Start()?;
        tokio::time::sleep(window).await;
        watcher.Stop()?;

        let devices = seen
            .lock()
            .map_err(|_| anyhow::anyhow!("Lock error"))?
            .clone();
        Ok(devices)
    }

    async fn connect(&mut self, address: &str) -> Result<WinRtLink> {
        let device = BluetoothLEDevice::FromBluetoothAddressAsync(parse_address(address)?)?.await?;
        info!("Device opened: {:?}", device.Name()?);

        let session = match open_session(&device).await {
            Ok(session) => session,
            Err(e) => {
                let _ = device.Close();
                return Err(e);
            }
        };

        match open_service(&device).await {
            Ok(service) => Ok(WinRtLink {
                device,
                session,
                service,
            }),
            Err(e) => {
                let _ = session.Close();
                let _ = device.Close();
                Err(e)
            }
        }
    }
}

/// Keeps the link up for as long as the session lives
async fn open_session(device: &BluetoothLEDevice) -> Result<GattSession> {
    let device_id = device.BluetoothDeviceId()?;
    let session = GattSession::FromDeviceIdAsync(&device_id)?.await?;
    session.SetMaintainConnection(true)?;
    info!("GattSession created, MaintainConnection set");
    Ok(session)
}

/// Uncached lookup so the device is actually contacted
async fn open_service(device: &BluetoothLEDevice) -> Result<GattDeviceService> {
    let service_uuid = to_guid(super::protocol::service_uuid());
    let services_result = device
        .GetGattServicesForUuidWithCacheModeAsync(service_uuid, BluetoothCacheMode::Uncached)?
        .await?;

    if services_result.Status()? != GattCommunicationStatus::Success {
        error!(
            "Failed to get GATT services: {:?}",
            services_result.Status()?
        );
        anyhow::bail!("Failed to get GATT services");
    }

    let services = services_result.Services()?;
    if services.Size()? == 0 {
        anyhow::bail!("Time sync service not found");
    }
    Ok(services.GetAt(0)?)
}

pub struct WinRtLink {
    device: BluetoothLEDevice,
    session: GattSession,
    service: GattDeviceService,
}

impl RadioLink for WinRtLink {
    async fn is_connected(&self) -> bool {
        self.device
            .ConnectionStatus()
            .map(|s| s == BluetoothConnectionStatus::Connected)
            .unwrap_or(false)
    }

    async fn write(&mut self, service: Uuid, characteristic: Uuid, payload: &[u8]) -> Result<()> {
        if self.service.Uuid()? != to_guid(service) {
            anyhow::bail!("Session is bound to a different service");
        }

        let chars_result = self
            .service
            .GetCharacteristicsForUuidWithCacheModeAsync(
                to_guid(characteristic),
                BluetoothCacheMode::Uncached,
            )?
            .await?;
        if chars_result.Status()? != GattCommunicationStatus::Success {
            anyhow::bail!("Failed to get characteristics: {:?}", chars_result.Status()?);
        }

        let characteristics = chars_result.Characteristics()?;
        if characteristics.Size()? == 0 {
            anyhow::bail!("Characteristic {} not found", characteristic);
        }
        let target = characteristics.GetAt(0)?;

        let writer = DataWriter::new()?;
        writer.WriteBytes(payload)?;
        let buffer = writer.DetachBuffer()?;

        let status = target.WriteValueAsync(&buffer)?.await?;
        if status != GattCommunicationStatus::Success {
            anyhow::bail!("Write returned status: {:?}", status);
        }
        Ok(())
    }

    async fn close(self) -> Result<()> {
        let service = self.service.Close();
        let session = self.session.Close();
        let device = self.device.Close();
        service?;
        session?;
        device?;
        Ok(())
    }
}
