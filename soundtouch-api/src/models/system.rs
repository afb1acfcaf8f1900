use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml, ToXml};

/// Power-saving timeout configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemTimeout {
    /// True when the device powers itself down after inactivity.
    pub is_powersaving_enabled: bool,
}

impl FromXml for SystemTimeout {
    const ROOT: &'static str = "systemtimeout";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(SystemTimeout {
            is_powersaving_enabled: xml::find_bool(root, "powersaving_enabled"),
        })
    }
}

impl fmt::Display for SystemTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SystemTimeout: powersavingEnabled={}",
            self.is_powersaving_enabled
        )
    }
}

/// Rebroadcast latency configuration for zone playback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RebroadcastLatencyMode {
    /// Latency mode, e.g. `SYNC_TO_ZONE` or `SYNC_TO_ROOM`.
    pub mode: Option<String>,
    /// True when the mode can be changed.
    pub controllable: bool,
}

impl RebroadcastLatencyMode {
    /// Creates a latency mode change request.
    ///
    /// # Arguments
    ///
    /// * `mode` - Latency mode to apply, e.g. `SYNC_TO_ZONE`
    pub fn new(mode: impl Into<String>) -> Self {
        RebroadcastLatencyMode {
            mode: Some(mode.into()),
            controllable: true,
        }
    }
}

impl FromXml for RebroadcastLatencyMode {
    const ROOT: &'static str = "rebroadcastlatencymode";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(RebroadcastLatencyMode {
            mode: xml::attr(root, "mode"),
            controllable: xml::attr_bool(root, "controllable"),
        })
    }
}

impl ToXml for RebroadcastLatencyMode {
    fn to_element(&self, _request_body_only: bool) -> Element {
        // controllable is device-reported state, never sent back.
        let mut elm = Element::new("rebroadcastlatencymode");
        xml::set_attr_opt(&mut elm, "mode", self.mode.as_deref());
        elm
    }
}

impl fmt::Display for RebroadcastLatencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RebroadcastLatencyMode: mode=\"{}\" controllable={}",
            self.mode.as_deref().unwrap_or(""),
            self.controllable
        )
    }
}

/// Bluetooth adapter details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlueToothInfo {
    /// MAC address of the bluetooth adapter.
    pub mac_address: Option<String>,
    /// Free-form adapter status text, when the device reports one.
    pub track_info: Option<String>,
}

impl FromXml for BlueToothInfo {
    const ROOT: &'static str = "BluetoothInfo";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(BlueToothInfo {
            mac_address: xml::attr(root, "BluetoothMACAddress"),
            track_info: xml::own_text(root),
        })
    }
}

impl fmt::Display for BlueToothInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BlueToothInfo: mac={}",
            self.mac_address.as_deref().unwrap_or("")
        )
    }
}

/// Raw descriptive text for the playing track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    /// Device identifier the text was read from.
    pub device_id: Option<String>,
    /// Uninterpreted track description.
    pub track_info: Option<String>,
}

impl FromXml for TrackInfo {
    const ROOT: &'static str = "trackInfo";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(TrackInfo {
            device_id: xml::attr(root, "deviceID"),
            track_info: xml::own_text(root),
        })
    }
}

impl fmt::Display for TrackInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrackInfo: \"{}\"",
            self.track_info.as_deref().unwrap_or("")
        )
    }
}
