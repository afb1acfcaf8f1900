use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml, ToXml};

/// Attributes of one attachable speaker position.
///
/// The element tag names the position (`rear`, `subwoofer01`,
/// `subwoofer02`). Booleans are tri-state: firmware omits attributes that
/// do not apply to the product, and that absence is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeakerAttributeAndSetting {
    /// Tag the speaker position rides under.
    pub control_name: String,
    /// True when a speaker is currently attached and active.
    pub active: Option<bool>,
    /// True when the position is available on this product.
    pub available: Option<bool>,
    /// True when the position can be toggled.
    pub controllable: Option<bool>,
    /// True when the attached speaker is wireless.
    pub wireless: Option<bool>,
}

impl SpeakerAttributeAndSetting {
    pub(crate) fn parse(elm: &Element) -> SpeakerAttributeAndSetting {
        SpeakerAttributeAndSetting {
            control_name: elm.name.clone(),
            active: xml::attr_bool_opt(elm, "active"),
            available: xml::attr_bool_opt(elm, "available"),
            controllable: xml::attr_bool_opt(elm, "controllable"),
            wireless: xml::attr_bool_opt(elm, "wireless"),
        }
    }

    /// True when the device reported at least one attribute for this
    /// position.
    pub fn is_any_set(&self) -> bool {
        self.active.is_some()
            || self.available.is_some()
            || self.controllable.is_some()
            || self.wireless.is_some()
    }
}

impl ToXml for SpeakerAttributeAndSetting {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new(&self.control_name);
        if let Some(v) = self.active {
            xml::set_attr_display(&mut elm, "active", v);
        }
        if let Some(v) = self.available {
            xml::set_attr_display(&mut elm, "available", v);
        }
        if let Some(v) = self.controllable {
            xml::set_attr_display(&mut elm, "controllable", v);
        }
        if let Some(v) = self.wireless {
            xml::set_attr_display(&mut elm, "wireless", v);
        }
        elm
    }
}

impl fmt::Display for SpeakerAttributeAndSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: active={:?} available={:?} controllable={:?} wireless={:?}",
            self.control_name, self.active, self.available, self.controllable, self.wireless
        )
    }
}

/// Attachable-speaker report of soundbar-class products.
///
/// Whether the device accepts these attributes back in a POST body is
/// undocumented, so the crate treats the record as read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AudioSpeakerAttributeAndSetting {
    /// Rear speaker pair position.
    pub rear: Option<SpeakerAttributeAndSetting>,
    /// First subwoofer position.
    pub subwoofer01: Option<SpeakerAttributeAndSetting>,
    /// Second subwoofer position.
    pub subwoofer02: Option<SpeakerAttributeAndSetting>,
}

impl FromXml for AudioSpeakerAttributeAndSetting {
    const ROOT: &'static str = "audiospeakerattributeandsetting";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(AudioSpeakerAttributeAndSetting {
            rear: xml::child(root, "rear").map(SpeakerAttributeAndSetting::parse),
            subwoofer01: xml::child(root, "subwoofer01").map(SpeakerAttributeAndSetting::parse),
            subwoofer02: xml::child(root, "subwoofer02").map(SpeakerAttributeAndSetting::parse),
        })
    }
}

impl fmt::Display for AudioSpeakerAttributeAndSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AudioSpeakerAttributeAndSetting: rear={} sub01={} sub02={}",
            self.rear.is_some(),
            self.subwoofer01.is_some(),
            self.subwoofer02.is_some()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEAKERS_XML: &str = r#"
        <audiospeakerattributeandsetting>
            <rear available="false" active="false" wireless="false" controllable="false" />
            <subwoofer01 available="true" active="true" wireless="true" controllable="false" />
            <subwoofer02 />
        </audiospeakerattributeandsetting>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_positions() {
        let speakers = AudioSpeakerAttributeAndSetting::from_xml(&parse(SPEAKERS_XML)).unwrap();
        let sub = speakers.subwoofer01.unwrap();
        assert_eq!(sub.active, Some(true));
        assert_eq!(sub.wireless, Some(true));
        assert_eq!(sub.controllable, Some(false));
        assert!(sub.is_any_set());
    }

    #[test]
    fn test_absent_attributes_stay_unset() {
        let speakers = AudioSpeakerAttributeAndSetting::from_xml(&parse(SPEAKERS_XML)).unwrap();
        let sub02 = speakers.subwoofer02.unwrap();
        assert_eq!(sub02.active, None);
        assert!(!sub02.is_any_set());
    }

    #[test]
    fn test_emit_skips_unset_attributes() {
        let setting = SpeakerAttributeAndSetting {
            control_name: "rear".to_string(),
            active: Some(true),
            available: None,
            controllable: None,
            wireless: None,
        };
        let elm = setting.to_element(true);
        assert_eq!(elm.attributes.len(), 1);
        assert_eq!(elm.attributes.get("active").map(String::as_str), Some("true"));
    }
}
