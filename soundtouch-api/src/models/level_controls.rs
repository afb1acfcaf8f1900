use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, FromXml, ToXml};

/// A single named level control: current value plus its range.
///
/// The element tag is the control's name (`bass`, `treble`,
/// `frontCenterSpeakerLevel`, ...). Range fields are read-only; request
/// bodies carry only the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlLevelInfo {
    /// Tag the control rides under.
    pub control_name: String,
    /// Current level.
    pub value: i32,
    /// Lowest accepted level.
    pub min_value: i32,
    /// Highest accepted level.
    pub max_value: i32,
    /// Granularity of adjustment.
    pub step: i32,
}

impl ControlLevelInfo {
    pub(crate) fn parse(elm: &Element) -> Result<ControlLevelInfo> {
        Ok(ControlLevelInfo {
            control_name: elm.name.clone(),
            value: xml::attr_int_or(elm, "value", 0)?,
            min_value: xml::attr_int_or(elm, "minValue", 0)?,
            max_value: xml::attr_int_or(elm, "maxValue", 0)?,
            step: xml::attr_int_or(elm, "step", 1)?,
        })
    }

    /// Replaces the value after checking it against the advertised range.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the level falls outside min..=max.
    pub fn set_value(&mut self, level: i32) -> Result<()> {
        if !(self.min_value..=self.max_value).contains(&level) {
            return Err(SoundTouchError::InvalidArgument(format!(
                "{} level must be in {}..={}, got {}",
                self.control_name, self.min_value, self.max_value, level
            )));
        }
        self.value = level;
        Ok(())
    }
}

impl ToXml for ControlLevelInfo {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new(&self.control_name);
        xml::set_attr_display(&mut elm, "value", self.value);
        if !request_body_only {
            xml::set_attr_display(&mut elm, "minValue", self.min_value);
            xml::set_attr_display(&mut elm, "maxValue", self.max_value);
            xml::set_attr_display(&mut elm, "step", self.step);
        }
        elm
    }
}

impl fmt::Display for ControlLevelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: value={} range={}..={} step={}",
            self.control_name, self.value, self.min_value, self.max_value, self.step
        )
    }
}

/// Bass and treble controls of soundbar-class products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioProductToneControls {
    /// Bass control.
    pub bass: ControlLevelInfo,
    /// Treble control.
    pub treble: ControlLevelInfo,
}

impl FromXml for AudioProductToneControls {
    const ROOT: &'static str = "audioproducttonecontrols";

    fn from_xml(root: &Element) -> Result<Self> {
        let bass = xml::child(root, "bass").ok_or_else(|| SoundTouchError::MalformedXml {
            tag: "bass".to_string(),
            text: "missing bass control".to_string(),
        })?;
        let treble = xml::child(root, "treble").ok_or_else(|| SoundTouchError::MalformedXml {
            tag: "treble".to_string(),
            text: "missing treble control".to_string(),
        })?;
        Ok(AudioProductToneControls {
            bass: ControlLevelInfo::parse(bass)?,
            treble: ControlLevelInfo::parse(treble)?,
        })
    }
}

impl ToXml for AudioProductToneControls {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("audioproducttonecontrols");
        xml::push_child(&mut elm, self.bass.to_element(request_body_only));
        xml::push_child(&mut elm, self.treble.to_element(request_body_only));
        elm
    }
}

impl fmt::Display for AudioProductToneControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AudioProductToneControls: bass={} treble={}",
            self.bass.value, self.treble.value
        )
    }
}

/// Speaker level controls of soundbar-class products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioProductLevelControls {
    /// Front-center speaker level.
    pub front_center_speaker_level: ControlLevelInfo,
    /// Rear surround speakers level.
    pub rear_surround_speakers_level: ControlLevelInfo,
}

impl FromXml for AudioProductLevelControls {
    const ROOT: &'static str = "audioproductlevelcontrols";

    fn from_xml(root: &Element) -> Result<Self> {
        let front = xml::child(root, "frontCenterSpeakerLevel").ok_or_else(|| {
            SoundTouchError::MalformedXml {
                tag: "frontCenterSpeakerLevel".to_string(),
                text: "missing level control".to_string(),
            }
        })?;
        let rear = xml::child(root, "rearSurroundSpeakersLevel").ok_or_else(|| {
            SoundTouchError::MalformedXml {
                tag: "rearSurroundSpeakersLevel".to_string(),
                text: "missing level control".to_string(),
            }
        })?;
        Ok(AudioProductLevelControls {
            front_center_speaker_level: ControlLevelInfo::parse(front)?,
            rear_surround_speakers_level: ControlLevelInfo::parse(rear)?,
        })
    }
}

impl ToXml for AudioProductLevelControls {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("audioproductlevelcontrols");
        xml::push_child(
            &mut elm,
            self.front_center_speaker_level.to_element(request_body_only),
        );
        xml::push_child(
            &mut elm,
            self.rear_surround_speakers_level.to_element(request_body_only),
        );
        elm
    }
}

impl fmt::Display for AudioProductLevelControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AudioProductLevelControls: frontCenter={} rearSurround={}",
            self.front_center_speaker_level.value, self.rear_surround_speakers_level.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TONE_XML: &str = r#"
        <audioproducttonecontrols>
            <bass value="0" minValue="-100" maxValue="100" step="10" />
            <treble value="20" minValue="-100" maxValue="100" step="10" />
        </audioproducttonecontrols>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_tone_controls() {
        let tone = AudioProductToneControls::from_xml(&parse(TONE_XML)).unwrap();
        assert_eq!(tone.bass.value, 0);
        assert_eq!(tone.treble.value, 20);
        assert_eq!(tone.bass.min_value, -100);
        assert_eq!(tone.bass.step, 10);
    }

    #[test]
    fn test_set_value_respects_range() {
        let mut tone = AudioProductToneControls::from_xml(&parse(TONE_XML)).unwrap();
        assert!(tone.bass.set_value(50).is_ok());
        assert_eq!(tone.bass.value, 50);
        assert!(matches!(
            tone.bass.set_value(150),
            Err(SoundTouchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_request_body_carries_value_only() {
        let tone = AudioProductToneControls::from_xml(&parse(TONE_XML)).unwrap();
        let body = tone.to_request_body().unwrap();
        assert!(body.contains("value=\"0\""));
        assert!(!body.contains("minValue"));
        assert!(!body.contains("step"));
    }

    #[test]
    fn test_missing_control_is_malformed() {
        let xml = r#"<audioproducttonecontrols><bass value="0"/></audioproducttonecontrols>"#;
        assert!(matches!(
            AudioProductToneControls::from_xml(&parse(xml)),
            Err(SoundTouchError::MalformedXml { .. })
        ));
    }

    #[test]
    fn test_parses_level_controls() {
        let xml = r#"
            <audioproductlevelcontrols>
                <frontCenterSpeakerLevel value="0" minValue="-12" maxValue="12" step="1" />
                <rearSurroundSpeakersLevel value="-2" minValue="-12" maxValue="12" step="1" />
            </audioproductlevelcontrols>
        "#;
        let levels = AudioProductLevelControls::from_xml(&parse(xml)).unwrap();
        assert_eq!(levels.front_center_speaker_level.value, 0);
        assert_eq!(levels.rear_surround_speakers_level.value, -2);
    }
}
