use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml};

/// Feature set a device advertises, read once per client from
/// `/capabilities`.
///
/// Beyond the coarse booleans, the document carries an ordered list of
/// capability names with the endpoint path each one is served at. That
/// list is the authority on whether an endpoint-gated call is legal for
/// this device.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Capabilities {
    /// Device identifier the capabilities were read from.
    pub device_id: Option<String>,
    /// True when the device supports bcoreset.
    pub bcoreset_capable: bool,
    /// True when the device has a front-panel clock display.
    pub clock_display: bool,
    /// True when power saving can be disabled.
    pub disable_power_saving: bool,
    /// True when the device supports lightswitch pairing.
    pub lightswitch: bool,
    /// True when the device can form a left/right stereo pair.
    pub lr_stereo_capable: bool,
    /// True when the network stack runs wired and wireless concurrently.
    pub dual_mode: bool,
    /// True when the WebSocket API proxy is available on port 8080.
    pub ws_api_proxy: bool,
    /// Named extended capabilities and the endpoint path serving each,
    /// in document order.
    pub extended: Vec<(String, String)>,
}

impl Capabilities {
    /// True when the device serves the given endpoint path.
    pub fn supports_path(&self, path: &str) -> bool {
        self.extended.iter().any(|(_, url)| url == path)
    }

    /// Endpoint path registered for the given capability name.
    pub fn url_for(&self, name: &str) -> Option<&str> {
        self.extended
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.as_str())
    }
}

impl FromXml for Capabilities {
    const ROOT: &'static str = "capabilities";

    fn from_xml(root: &Element) -> Result<Self> {
        let (dual_mode, ws_api_proxy) = match xml::child(root, "networkConfig") {
            Some(net) => (
                xml::find_bool(net, "dualMode"),
                xml::find_bool(net, "wsapiproxy"),
            ),
            None => (false, false),
        };
        let extended = xml::children(root, "capability")
            .filter_map(|c| {
                let name = xml::attr(c, "name")?;
                let url = xml::attr(c, "url")?;
                Some((name, url))
            })
            .collect();
        Ok(Capabilities {
            device_id: xml::attr(root, "deviceID"),
            bcoreset_capable: xml::find_bool(root, "bcoresetCapable"),
            clock_display: xml::find_bool(root, "clockDisplay"),
            disable_power_saving: xml::find_bool(root, "disablePowerSaving"),
            lightswitch: xml::find_bool(root, "lightswitch"),
            lr_stereo_capable: xml::find_bool(root, "lrStereoCapable"),
            dual_mode,
            ws_api_proxy,
            extended,
        })
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Capabilities: lrStereo={} wsApiProxy={} ({} extended)",
            self.lr_stereo_capable,
            self.ws_api_proxy,
            self.extended.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPABILITIES_XML: &str = r#"
        <capabilities deviceID="9070658C9D4A">
            <networkConfig>
                <dualMode>true</dualMode>
                <wsapiproxy>true</wsapiproxy>
            </networkConfig>
            <lightswitch>false</lightswitch>
            <clockDisplay>false</clockDisplay>
            <lrStereoCapable>true</lrStereoCapable>
            <bcoresetCapable>false</bcoresetCapable>
            <disablePowerSaving>true</disablePowerSaving>
            <capability name="audiodspcontrols" url="/audiodspcontrols" />
            <capability name="audioproducttonecontrols" url="/audioproducttonecontrols" />
            <capability name="systemtimeout" url="/systemtimeout" />
        </capabilities>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_coarse_flags() {
        let caps = Capabilities::from_xml(&parse(CAPABILITIES_XML)).unwrap();
        assert!(caps.lr_stereo_capable);
        assert!(caps.disable_power_saving);
        assert!(!caps.lightswitch);
        assert!(!caps.clock_display);
    }

    #[test]
    fn test_parses_nested_network_config() {
        let caps = Capabilities::from_xml(&parse(CAPABILITIES_XML)).unwrap();
        assert!(caps.dual_mode);
        assert!(caps.ws_api_proxy);
    }

    #[test]
    fn test_extended_map_preserves_order() {
        let caps = Capabilities::from_xml(&parse(CAPABILITIES_XML)).unwrap();
        assert_eq!(caps.extended.len(), 3);
        assert_eq!(caps.extended[0].0, "audiodspcontrols");
        assert_eq!(caps.url_for("systemtimeout"), Some("/systemtimeout"));
    }

    #[test]
    fn test_supports_path() {
        let caps = Capabilities::from_xml(&parse(CAPABILITIES_XML)).unwrap();
        assert!(caps.supports_path("/audiodspcontrols"));
        assert!(!caps.supports_path("/rebroadcastlatencymode"));
    }

    #[test]
    fn test_missing_network_config() {
        let caps = Capabilities::from_xml(&parse("<capabilities/>")).unwrap();
        assert!(!caps.dual_mode);
        assert!(!caps.ws_api_proxy);
        assert!(caps.extended.is_empty());
    }
}
