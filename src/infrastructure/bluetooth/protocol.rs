//! Time Sync Protocol
//!
//! GATT identifiers and constants shared by every radio backend.

use anyhow::Result;
use std::time::Duration;
use uuid::Uuid;

/// Time sync service UUID
pub const SERVICE_UUID: &str = "12345678-1234-5678-1234-56789abcdef0";

/// Characteristic the sync message is written to
pub const TIME_CHAR_UUID: &str = "12345678-1234-5678-1234-56789abcdef1";

/// Advertised local name of the peripheral
pub const TARGET_DEVICE_NAME: &str = "AS7341_ESP32_BLE";

/// How long a discovery sweep listens for advertisements
pub const SCAN_WINDOW: Duration = Duration::from_secs(5);

pub fn service_uuid() -> Uuid {
    Uuid::from_u128(0x12345678_1234_5678_1234_56789abcdef0)
}

pub fn time_char_uuid() -> Uuid {
    Uuid::from_u128(0x12345678_1234_5678_1234_56789abcdef1)
}

/// Render a 48-bit Bluetooth address as `AA:BB:CC:DD:EE:FF`
#[cfg_attr(not(windows), allow(dead_code))]
pub fn format_address(address: u64) -> String {
    let bytes = address.to_be_bytes();
    bytes[2..]
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Parse `AA:BB:CC:DD:EE:FF` (separators optional) into a 48-bit address
#[cfg_attr(not(windows), allow(dead_code))]
pub fn parse_address(address: &str) -> Result<u64> {
    let hex: String = address
        .chars()
        .filter(|c| !matches!(c, ':' | '-'))
        .collect();

    if hex.len() != 12 {
        anyhow::bail!("Invalid Bluetooth address: {}", address);
    }

    Ok(u64::from_str_radix(&hex, 16)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_constants_agree() {
        assert_eq!(Uuid::parse_str(SERVICE_UUID).unwrap(), service_uuid());
        assert_eq!(Uuid::parse_str(TIME_CHAR_UUID).unwrap(), time_char_uuid());
    }

    #[test]
    fn test_format_address() {
        assert_eq!(format_address(0xAABBCCDDEEFF), "AA:BB:CC:DD:EE:FF");
        assert_eq!(format_address(0x000000000001), "00:00:00:00:00:01");
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("AA:BB:CC:DD:EE:FF").unwrap(), 0xAABBCCDDEEFF);
        assert_eq!(parse_address("aabbccddeeff").unwrap(), 0xAABBCCDDEEFF);
        assert!(parse_address("").is_err());
        assert!(parse_address("AA:BB:CC").is_err());
        assert!(parse_address("GG:BB:CC:DD:EE:FF").is_err());
    }
}
