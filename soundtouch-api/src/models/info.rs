use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml};

/// One internal hardware or firmware component of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Component {
    /// Component category, e.g. `SCM` or `PackagedProduct`.
    pub category: Option<String>,
    /// Installed firmware version.
    pub software_version: Option<String>,
    /// Manufacturer serial number.
    pub serial_number: Option<String>,
}

/// One network interface listed in a device's `/info` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceNetworkInfo {
    /// Interface type, e.g. `SCM` or `SMSC`.
    pub interface_type: Option<String>,
    /// IPv4 address bound to the interface.
    pub ip_address: Option<String>,
    /// MAC address of the interface.
    pub mac_address: Option<String>,
}

/// Static identity of a device, read once per client from `/info`.
///
/// The device id doubles as the primary MAC address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceInfo {
    /// MAC-derived device identifier.
    pub device_id: Option<String>,
    /// User-assigned friendly name.
    pub name: Option<String>,
    /// Product type, e.g. `SoundTouch 10`.
    pub device_type: Option<String>,
    /// Hardware module type.
    pub module_type: Option<String>,
    /// Hardware variant.
    pub variant: Option<String>,
    /// Variant operating mode.
    pub variant_mode: Option<String>,
    /// Country code the device was provisioned for.
    pub country_code: Option<String>,
    /// Region code the device was provisioned for.
    pub region_code: Option<String>,
    /// Account UUID registered with the streaming backend.
    pub streaming_account_uuid: Option<String>,
    /// URL of the streaming backend.
    pub streaming_url: Option<String>,
    /// Internal components with their firmware versions.
    pub components: Vec<Component>,
    /// Network interfaces and their addresses.
    pub network_info: Vec<DeviceNetworkInfo>,
}

impl DeviceInfo {
    /// The device's primary MAC address, identical to the device id.
    pub fn mac_address(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// IPv4 address of the first network interface that reports one.
    pub fn ip_address(&self) -> Option<&str> {
        self.network_info
            .iter()
            .find_map(|n| n.ip_address.as_deref())
    }
}

impl FromXml for DeviceInfo {
    const ROOT: &'static str = "info";

    fn from_xml(root: &Element) -> Result<Self> {
        let components = match xml::child(root, "components") {
            Some(node) => xml::children(node, "component")
                .map(|c| Component {
                    category: xml::find_text(c, "componentCategory"),
                    software_version: xml::find_text(c, "softwareVersion"),
                    serial_number: xml::find_text(c, "serialNumber"),
                })
                .collect(),
            None => Vec::new(),
        };
        let network_info = xml::children(root, "networkInfo")
            .map(|n| DeviceNetworkInfo {
                interface_type: xml::attr(n, "type"),
                ip_address: xml::find_text(n, "ipAddress"),
                mac_address: xml::find_text(n, "macAddress"),
            })
            .collect();
        Ok(DeviceInfo {
            device_id: xml::attr(root, "deviceID"),
            name: xml::find_text(root, "name"),
            device_type: xml::find_text(root, "type"),
            module_type: xml::find_text(root, "moduleType"),
            variant: xml::find_text(root, "variant"),
            variant_mode: xml::find_text(root, "variantMode"),
            country_code: xml::find_text(root, "countryCode"),
            region_code: xml::find_text(root, "regionCode"),
            streaming_account_uuid: xml::find_text(root, "margeAccountUUID"),
            streaming_url: xml::find_text(root, "margeURL"),
            components,
            network_info,
        })
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DeviceInfo: id={} name=\"{}\" type=\"{}\"",
            self.device_id.as_deref().unwrap_or(""),
            self.name.as_deref().unwrap_or(""),
            self.device_type.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO_XML: &str = r#"
        <info deviceID="9070658C9D4A">
            <name>Kitchen Speaker</name>
            <type>SoundTouch 10</type>
            <margeAccountUUID>5598851</margeAccountUUID>
            <components>
                <component>
                    <componentCategory>SCM</componentCategory>
                    <softwareVersion>27.0.6.46330.5043500</softwareVersion>
                    <serialNumber>F8166EF4</serialNumber>
                </component>
                <component>
                    <componentCategory>PackagedProduct</componentCategory>
                    <serialNumber>069428P81770853AE</serialNumber>
                </component>
            </components>
            <margeURL>https://streaming.bose.com</margeURL>
            <networkInfo type="SCM">
                <macAddress>9070658C9D4A</macAddress>
                <ipAddress>192.168.1.80</ipAddress>
            </networkInfo>
            <networkInfo type="SMSC">
                <macAddress>9070658C9D4B</macAddress>
                <ipAddress>192.168.1.80</ipAddress>
            </networkInfo>
            <moduleType>sm2</moduleType>
            <variant>rhino</variant>
            <variantMode>normal</variantMode>
            <countryCode>US</countryCode>
            <regionCode>US</regionCode>
        </info>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_identity() {
        let info = DeviceInfo::from_xml(&parse(INFO_XML)).unwrap();
        assert_eq!(info.device_id.as_deref(), Some("9070658C9D4A"));
        assert_eq!(info.name.as_deref(), Some("Kitchen Speaker"));
        assert_eq!(info.device_type.as_deref(), Some("SoundTouch 10"));
        assert_eq!(info.country_code.as_deref(), Some("US"));
        assert_eq!(info.mac_address(), Some("9070658C9D4A"));
    }

    #[test]
    fn test_parses_components() {
        let info = DeviceInfo::from_xml(&parse(INFO_XML)).unwrap();
        assert_eq!(info.components.len(), 2);
        assert_eq!(info.components[0].category.as_deref(), Some("SCM"));
        assert_eq!(
            info.components[0].software_version.as_deref(),
            Some("27.0.6.46330.5043500")
        );
        assert_eq!(info.components[1].software_version, None);
    }

    #[test]
    fn test_parses_network_interfaces() {
        let info = DeviceInfo::from_xml(&parse(INFO_XML)).unwrap();
        assert_eq!(info.network_info.len(), 2);
        assert_eq!(info.network_info[0].interface_type.as_deref(), Some("SCM"));
        assert_eq!(info.ip_address(), Some("192.168.1.80"));
    }

    #[test]
    fn test_streaming_metadata() {
        let info = DeviceInfo::from_xml(&parse(INFO_XML)).unwrap();
        assert_eq!(info.streaming_account_uuid.as_deref(), Some("5598851"));
        assert_eq!(
            info.streaming_url.as_deref(),
            Some("https://streaming.bose.com")
        );
    }
}
