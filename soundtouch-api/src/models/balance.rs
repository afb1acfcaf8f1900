use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml, ToXml};

/// Left/right balance state of a stereo-paired device.
///
/// Unlike bass, the adjustment range rides on the same document as the
/// current levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    /// Device identifier the state was read from.
    pub device_id: Option<String>,
    /// True when the device supports balance adjustment.
    pub is_available: bool,
    /// Lowest accepted level.
    pub minimum: i32,
    /// Highest accepted level.
    pub maximum: i32,
    /// Factory default level.
    pub default: i32,
    /// Level currently applied.
    pub actual: i32,
    /// Level the device is moving toward.
    pub target: i32,
}

impl Balance {
    /// Creates a balance change request for the given level.
    pub fn new(level: i32) -> Self {
        Balance {
            target: level,
            actual: level,
            ..Balance::default()
        }
    }
}

impl FromXml for Balance {
    const ROOT: &'static str = "balance";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(Balance {
            device_id: xml::attr(root, "deviceID"),
            is_available: xml::find_bool(root, "balanceAvailable"),
            minimum: xml::find_int_or(root, "balanceMin", 0)?,
            maximum: xml::find_int_or(root, "balanceMax", 0)?,
            default: xml::find_int_or(root, "balanceDefault", 0)?,
            actual: xml::find_int_or(root, "actualBalance", 0)?,
            target: xml::find_int_or(root, "targetBalance", 0)?,
        })
    }
}

impl ToXml for Balance {
    fn to_element(&self, _request_body_only: bool) -> Element {
        xml::text_element("balance", &self.target.to_string())
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Balance: available={} actual={} target={}",
            self.is_available, self.actual, self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_state() {
        let xml = r#"<balance deviceID="AA"><balanceAvailable>true</balanceAvailable><balanceMin>-7</balanceMin><balanceMax>7</balanceMax><balanceDefault>0</balanceDefault><targetBalance>2</targetBalance><actualBalance>2</actualBalance></balance>"#;
        let balance = Balance::from_xml(&Element::parse(xml.as_bytes()).unwrap()).unwrap();
        assert!(balance.is_available);
        assert_eq!(balance.minimum, -7);
        assert_eq!(balance.maximum, 7);
        assert_eq!(balance.actual, 2);
    }

    #[test]
    fn test_request_body_is_bare_level() {
        assert_eq!(
            Balance::new(-3).to_request_body().unwrap(),
            "<balance>-3</balance>"
        );
    }
}
