use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml};

/// One network interface in a `/netStats` report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkStatusInterface {
    /// Interface name, e.g. `eth0` or `wlan0`.
    pub name: Option<String>,
    /// Connection kind, e.g. `Wired` or `Wireless`.
    pub kind: Option<String>,
    /// MAC address of the interface.
    pub mac_address: Option<String>,
    /// SSID the interface is associated with, for wireless interfaces.
    pub ssid: Option<String>,
    /// Signal strength indicator, e.g. `good` or `marginal`.
    pub rssi: Option<String>,
    /// Radio frequency in kilohertz, for wireless interfaces.
    pub frequency_khz: Option<String>,
    /// True when the interface is up and running.
    pub is_running: bool,
    /// IPv4 addresses bound to the interface.
    pub bindings: Vec<String>,
}

impl NetworkStatusInterface {
    fn parse(elm: &Element) -> NetworkStatusInterface {
        let bindings = match xml::child(elm, "bindings") {
            Some(node) => xml::element_children(node)
                .filter_map(|b| xml::find_text(b, "ipv4address"))
                .collect(),
            None => Vec::new(),
        };
        NetworkStatusInterface {
            name: xml::find_text(elm, "name"),
            kind: xml::find_text(elm, "kind"),
            mac_address: xml::find_text(elm, "mac-addr"),
            ssid: xml::find_text(elm, "ssid"),
            rssi: xml::find_text(elm, "rssi"),
            frequency_khz: xml::find_text(elm, "frequencyKHz"),
            is_running: xml::find_bool(elm, "running"),
            bindings,
        }
    }
}

impl fmt::Display for NetworkStatusInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NetworkStatusInterface: name=\"{}\" kind=\"{}\" running={}",
            self.name.as_deref().unwrap_or(""),
            self.kind.as_deref().unwrap_or(""),
            self.is_running
        )
    }
}

/// Network health report from `/netStats`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkStatus {
    /// Device identifier the report covers.
    pub device_id: Option<String>,
    /// Manufacturer serial number.
    pub serial_number: Option<String>,
    /// Interfaces, wired and wireless.
    pub interfaces: Vec<NetworkStatusInterface>,
}

impl FromXml for NetworkStatus {
    const ROOT: &'static str = "networkStats";

    fn from_xml(root: &Element) -> Result<Self> {
        let device = xml::child(root, "devices").and_then(|d| xml::child(d, "device"));
        let (device_id, serial_number, interfaces) = match device {
            Some(dev) => {
                let interfaces = match xml::child(dev, "interfaces") {
                    Some(node) => xml::element_children(node)
                        .map(NetworkStatusInterface::parse)
                        .collect(),
                    None => Vec::new(),
                };
                (
                    xml::attr(dev, "deviceID"),
                    xml::find_text(dev, "deviceSerialNumber"),
                    interfaces,
                )
            }
            None => (None, None, Vec::new()),
        };
        Ok(NetworkStatus {
            device_id,
            serial_number,
            interfaces,
        })
    }
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NetworkStatus: deviceId={} ({} interfaces)",
            self.device_id.as_deref().unwrap_or(""),
            self.interfaces.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NET_STATS_XML: &str = r#"
        <networkStats>
            <devices>
                <device deviceID="9070658C9D4A">
                    <deviceSerialNumber>069428P81770853AE</deviceSerialNumber>
                    <interfaces>
                        <interface>
                            <name>wlan0</name>
                            <mac-addr>9070658C9D4A</mac-addr>
                            <kind>Wireless</kind>
                            <ssid>HomeNet</ssid>
                            <rssi>good</rssi>
                            <frequencyKHz>2452000</frequencyKHz>
                            <running>true</running>
                            <bindings>
                                <binding>
                                    <ipv4address>192.168.1.80</ipv4address>
                                </binding>
                            </bindings>
                        </interface>
                        <interface>
                            <name>eth0</name>
                            <mac-addr>9070658C9D4B</mac-addr>
                            <kind>Wired</kind>
                            <running>false</running>
                        </interface>
                    </interfaces>
                </device>
            </devices>
        </networkStats>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_device_identity() {
        let stats = NetworkStatus::from_xml(&parse(NET_STATS_XML)).unwrap();
        assert_eq!(stats.device_id.as_deref(), Some("9070658C9D4A"));
        assert_eq!(stats.serial_number.as_deref(), Some("069428P81770853AE"));
    }

    #[test]
    fn test_parses_interfaces() {
        let stats = NetworkStatus::from_xml(&parse(NET_STATS_XML)).unwrap();
        assert_eq!(stats.interfaces.len(), 2);
        let wlan = &stats.interfaces[0];
        assert_eq!(wlan.name.as_deref(), Some("wlan0"));
        assert_eq!(wlan.ssid.as_deref(), Some("HomeNet"));
        assert!(wlan.is_running);
        assert_eq!(wlan.bindings, vec!["192.168.1.80".to_string()]);
        assert!(!stats.interfaces[1].is_running);
    }
}
