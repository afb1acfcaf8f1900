use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use soundtouch_api::models::DeviceInfo;
use soundtouch_api::Endpoint;

/// A SoundTouch device seen during an mDNS browse.
///
/// The endpoint is ready to hand to a `SoundTouchClient`. `device_info`
/// is only populated when the discovery run verifies devices; a device
/// that announced itself but failed the probe keeps `None` there.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredDevice {
    /// Address and ports for talking to the device.
    pub endpoint: Endpoint,
    /// Instance name from the service announcement, e.g. "Kitchen".
    pub friendly_name: String,
    /// TXT properties carried on the announcement.
    pub txt: BTreeMap<String, String>,
    /// Identity read from `/info` when verification is enabled.
    pub device_info: Option<DeviceInfo>,
}

impl DiscoveredDevice {
    /// Map key for this device, in the form `"host:port"`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.endpoint.host, self.endpoint.port)
    }
}

impl fmt::Display for DiscoveredDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.friendly_name, self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitchen() -> DiscoveredDevice {
        DiscoveredDevice {
            endpoint: Endpoint::new("192.168.1.80"),
            friendly_name: "Kitchen".to_string(),
            txt: BTreeMap::new(),
            device_info: None,
        }
    }

    #[test]
    fn test_key_is_host_and_api_port() {
        assert_eq!(kitchen().key(), "192.168.1.80:8090");
    }

    #[test]
    fn test_display_names_device_and_endpoint() {
        assert_eq!(kitchen().to_string(), "Kitchen (192.168.1.80:8090)");
    }

    #[test]
    fn test_serializes_for_export() {
        let mut device = kitchen();
        device
            .txt
            .insert("MAC".to_string(), "9070658C9D4A".to_string());

        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(value["endpoint"]["host"], "192.168.1.80");
        assert_eq!(value["friendly_name"], "Kitchen");
        assert_eq!(value["txt"]["MAC"], "9070658C9D4A");
        assert!(value["device_info"].is_null());
    }
}
