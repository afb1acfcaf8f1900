use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, FromXml, ToXml};

/// Volume state of a device.
///
/// Target and actual differ briefly while a ramp is in progress; the
/// device reports both. A plain level in 0..=100 serves as the POST body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Volume {
    /// Device identifier the state was read from.
    pub device_id: Option<String>,
    /// Level currently applied to the amplifier.
    pub actual: u8,
    /// Level the device is ramping toward.
    pub target: u8,
    /// True when output is muted.
    pub is_muted: bool,
}

impl Volume {
    /// Creates a volume change request.
    ///
    /// # Arguments
    ///
    /// * `level` - Level in 0..=100
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the level exceeds 100.
    pub fn new(level: u8) -> Result<Self> {
        if level > 100 {
            return Err(SoundTouchError::InvalidArgument(format!(
                "volume level must be in 0..=100, got {}",
                level
            )));
        }
        Ok(Volume {
            device_id: None,
            actual: level,
            target: level,
            is_muted: false,
        })
    }
}

impl FromXml for Volume {
    const ROOT: &'static str = "volume";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(Volume {
            device_id: xml::attr(root, "deviceID"),
            actual: xml::find_int_or(root, "actualvolume", 0)?,
            target: xml::find_int_or(root, "targetvolume", 0)?,
            is_muted: xml::find_bool(root, "muteenabled"),
        })
    }
}

impl ToXml for Volume {
    fn to_element(&self, _request_body_only: bool) -> Element {
        // The set endpoint takes a bare level, not the full state.
        xml::text_element("volume", &self.target.to_string())
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Volume: actual={} target={} muted={}",
            self.actual, self.target, self.is_muted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOLUME_XML: &str = r#"<volume deviceID="9070658C9D4A"><targetvolume>42</targetvolume><actualvolume>42</actualvolume><muteenabled>false</muteenabled></volume>"#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_state() {
        let volume = Volume::from_xml(&parse(VOLUME_XML)).unwrap();
        assert_eq!(volume.device_id.as_deref(), Some("9070658C9D4A"));
        assert_eq!(volume.actual, 42);
        assert_eq!(volume.target, 42);
        assert!(!volume.is_muted);
    }

    #[test]
    fn test_request_body_is_bare_level() {
        let body = Volume::new(42).unwrap().to_request_body().unwrap();
        assert_eq!(body, "<volume>42</volume>");
    }

    #[test]
    fn test_rejects_level_above_100() {
        assert!(matches!(
            Volume::new(101),
            Err(SoundTouchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_non_numeric_level_is_malformed() {
        let xml = r#"<volume><actualvolume>loud</actualvolume></volume>"#;
        assert!(matches!(
            Volume::from_xml(&parse(xml)),
            Err(SoundTouchError::MalformedXml { .. })
        ));
    }
}
