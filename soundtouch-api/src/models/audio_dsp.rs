use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml, ToXml};

use super::wire_enum;

wire_enum! {
    /// DSP listening mode of soundbar-class products.
    AudioMode {
        Normal => "AUDIO_MODE_NORMAL",
        Dialog => "AUDIO_MODE_DIALOG",
        Direct => "AUDIO_MODE_DIRECT",
        Night => "AUDIO_MODE_NIGHT",
        Unspecified => "AUDIO_MODE_UNSPECIFIED",
    }
}

/// DSP state of a soundbar-class product.
///
/// Everything rides on attributes. The supported-modes listing is
/// read-only and therefore left out of request bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AudioDspControls {
    /// Active listening mode.
    pub audio_mode: Option<AudioMode>,
    /// Audio delay in milliseconds applied to stay in sync with video.
    pub video_sync_audio_delay: i32,
    /// Modes the product supports, as reported.
    pub supported_audio_modes: Vec<AudioMode>,
}

impl AudioDspControls {
    /// Creates a mode change request.
    pub fn new(audio_mode: AudioMode) -> Self {
        AudioDspControls {
            audio_mode: Some(audio_mode),
            ..AudioDspControls::default()
        }
    }

    /// True when the product reports the given mode as selectable.
    pub fn supports_mode(&self, mode: AudioMode) -> bool {
        self.supported_audio_modes.contains(&mode)
    }
}

impl FromXml for AudioDspControls {
    const ROOT: &'static str = "audiodspcontrols";

    fn from_xml(root: &Element) -> Result<Self> {
        let supported_audio_modes = xml::attr(root, "supportedaudiomodes")
            .map(|list| {
                list.split('|')
                    .filter_map(|token| AudioMode::from_str(token).ok())
                    .collect()
            })
            .unwrap_or_default();
        Ok(AudioDspControls {
            audio_mode: xml::attr(root, "audiomode")
                .as_deref()
                .and_then(|m| AudioMode::from_str(m).ok()),
            video_sync_audio_delay: xml::attr_int_or(root, "videosyncaudiodelay", 0)?,
            supported_audio_modes,
        })
    }
}

impl ToXml for AudioDspControls {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("audiodspcontrols");
        xml::set_attr_opt(&mut elm, "audiomode", self.audio_mode.map(|m| m.as_str()));
        xml::set_attr_display(&mut elm, "videosyncaudiodelay", self.video_sync_audio_delay);
        if !request_body_only && !self.supported_audio_modes.is_empty() {
            let list = self
                .supported_audio_modes
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join("|");
            xml::set_attr_opt(&mut elm, "supportedaudiomodes", Some(&list));
        }
        elm
    }
}

impl fmt::Display for AudioDspControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AudioDspControls: mode={} videoSyncAudioDelay={}",
            self.audio_mode.map(|m| m.as_str()).unwrap_or(""),
            self.video_sync_audio_delay
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DSP_XML: &str = r#"<audiodspcontrols audiomode="AUDIO_MODE_NORMAL" videosyncaudiodelay="0" supportedaudiomodes="AUDIO_MODE_NORMAL|AUDIO_MODE_DIALOG" />"#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_attributes() {
        let dsp = AudioDspControls::from_xml(&parse(DSP_XML)).unwrap();
        assert_eq!(dsp.audio_mode, Some(AudioMode::Normal));
        assert_eq!(dsp.video_sync_audio_delay, 0);
        assert_eq!(
            dsp.supported_audio_modes,
            vec![AudioMode::Normal, AudioMode::Dialog]
        );
        assert!(dsp.supports_mode(AudioMode::Dialog));
        assert!(!dsp.supports_mode(AudioMode::Night));
    }

    #[test]
    fn test_request_body_omits_supported_modes() {
        let dsp = AudioDspControls::from_xml(&parse(DSP_XML)).unwrap();
        let body = dsp.to_request_body().unwrap();
        assert!(body.contains("audiomode=\"AUDIO_MODE_NORMAL\""));
        assert!(!body.contains("supportedaudiomodes"));
    }

    #[test]
    fn test_full_element_is_superset_of_request_body() {
        let dsp = AudioDspControls::from_xml(&parse(DSP_XML)).unwrap();
        let full = dsp.to_element(false);
        let body = dsp.to_element(true);
        for key in body.attributes.keys() {
            assert!(full.attributes.contains_key(key));
        }
        assert!(full.attributes.contains_key("supportedaudiomodes"));
    }
}
