use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml, ToXml};

/// Bass tone state of a device.
///
/// Legal levels are device-specific; read [`BassCapabilities`] for the
/// range before setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bass {
    /// Device identifier the state was read from.
    pub device_id: Option<String>,
    /// Level currently applied.
    pub actual: i32,
    /// Level the device is moving toward.
    pub target: i32,
}

impl Bass {
    /// Creates a bass change request for the given level.
    pub fn new(level: i32) -> Self {
        Bass {
            device_id: None,
            actual: level,
            target: level,
        }
    }
}

impl FromXml for Bass {
    const ROOT: &'static str = "bass";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(Bass {
            device_id: xml::attr(root, "deviceID"),
            actual: xml::find_int_or(root, "actualbass", 0)?,
            target: xml::find_int_or(root, "targetbass", 0)?,
        })
    }
}

impl ToXml for Bass {
    fn to_element(&self, _request_body_only: bool) -> Element {
        xml::text_element("bass", &self.target.to_string())
    }
}

impl fmt::Display for Bass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bass: actual={} target={}", self.actual, self.target)
    }
}

/// Bass adjustment range advertised by a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BassCapabilities {
    /// Device identifier the capabilities were read from.
    pub device_id: Option<String>,
    /// True when the device supports bass adjustment at all.
    pub is_available: bool,
    /// Lowest accepted level.
    pub minimum: i32,
    /// Highest accepted level.
    pub maximum: i32,
    /// Factory default level.
    pub default: i32,
}

impl BassCapabilities {
    /// True when the given level falls inside the advertised range.
    pub fn accepts(&self, level: i32) -> bool {
        self.is_available && (self.minimum..=self.maximum).contains(&level)
    }
}

impl FromXml for BassCapabilities {
    const ROOT: &'static str = "bassCapabilities";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(BassCapabilities {
            device_id: xml::attr(root, "deviceID"),
            is_available: xml::find_bool(root, "bassAvailable"),
            minimum: xml::find_int_or(root, "bassMin", 0)?,
            maximum: xml::find_int_or(root, "bassMax", 0)?,
            default: xml::find_int_or(root, "bassDefault", 0)?,
        })
    }
}

impl fmt::Display for BassCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BassCapabilities: available={} min={} max={} default={}",
            self.is_available, self.minimum, self.maximum, self.default
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_negative_levels() {
        let xml = r#"<bass deviceID="AA"><targetbass>-4</targetbass><actualbass>-4</actualbass></bass>"#;
        let bass = Bass::from_xml(&parse(xml)).unwrap();
        assert_eq!(bass.actual, -4);
        assert_eq!(bass.target, -4);
    }

    #[test]
    fn test_request_body_is_bare_level() {
        assert_eq!(Bass::new(-4).to_request_body().unwrap(), "<bass>-4</bass>");
    }

    #[test]
    fn test_capabilities_range_check() {
        let xml = r#"<bassCapabilities deviceID="AA"><bassAvailable>true</bassAvailable><bassMin>-9</bassMin><bassMax>0</bassMax><bassDefault>0</bassDefault></bassCapabilities>"#;
        let caps = BassCapabilities::from_xml(&parse(xml)).unwrap();
        assert!(caps.is_available);
        assert!(caps.accepts(-9));
        assert!(caps.accepts(0));
        assert!(!caps.accepts(-10));
        assert!(!caps.accepts(1));
    }

    #[test]
    fn test_unavailable_accepts_nothing() {
        let xml = r#"<bassCapabilities><bassAvailable>false</bassAvailable><bassMin>-9</bassMin><bassMax>0</bassMax></bassCapabilities>"#;
        let caps = BassCapabilities::from_xml(&parse(xml)).unwrap();
        assert!(!caps.accepts(0));
    }
}
