use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml};

/// Clock display configuration.
///
/// Firmware sometimes nests the payload under a second `clockConfig`
/// element; both shapes parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClockConfig {
    /// Display brightness in 0..=255.
    pub brightness_level: u32,
    /// Time rendering, e.g. `TIME_FORMAT_12HOUR_ID`.
    pub time_format: Option<String>,
    /// Timezone identifier the device was provisioned with.
    pub timezone_info: Option<String>,
    /// True when the user overrides the network-provided time.
    pub user_enable: bool,
    /// Minutes of user offset from UTC.
    pub user_offset_minute: i32,
    /// User-provided UTC time in epoch seconds.
    pub user_utc_time: u64,
}

impl FromXml for ClockConfig {
    const ROOT: &'static str = "clockConfig";

    fn from_xml(root: &Element) -> Result<Self> {
        let node = xml::self_or_child(root, Self::ROOT).unwrap_or(root);
        // The attributes ride on the inner element when the wrapper shape
        // is used; fall through to it when the matched node is bare.
        let node = if node.attributes.is_empty() {
            xml::child(node, Self::ROOT).unwrap_or(node)
        } else {
            node
        };
        Ok(ClockConfig {
            brightness_level: xml::attr_int_or(node, "brightnessLevel", 0)?,
            time_format: xml::attr(node, "timeFormat"),
            timezone_info: xml::attr(node, "timezoneInfo"),
            user_enable: xml::attr_bool(node, "userEnable"),
            user_offset_minute: xml::attr_int_or(node, "userOffsetMinute", 0)?,
            user_utc_time: xml::attr_int_or(node, "userUtcTime", 0)?,
        })
    }
}

impl fmt::Display for ClockConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClockConfig: timezone=\"{}\" format=\"{}\" brightness={}",
            self.timezone_info.as_deref().unwrap_or(""),
            self.time_format.as_deref().unwrap_or(""),
            self.brightness_level
        )
    }
}

/// Broken-down local time as the device displays it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalTime {
    pub year: u32,
    pub month: u32,
    pub day_of_month: u32,
    pub day_of_week: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Current time state of the clock display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClockTime {
    /// Device UTC time in epoch seconds.
    pub utc_time: u64,
    /// Epoch seconds of the last successful time sync.
    pub utc_sync_time: u64,
    /// Display brightness in 0..=255.
    pub brightness: u32,
    /// Non-zero when the clock lost its time source.
    pub clock_error: u32,
    /// True when music cues are enabled.
    pub cue_music: bool,
    /// Time rendering, e.g. `TIME_FORMAT_12HOUR_ID`.
    pub time_format: Option<String>,
    /// Broken-down local time.
    pub local_time: Option<LocalTime>,
}

impl FromXml for ClockTime {
    const ROOT: &'static str = "clockTime";

    fn from_xml(root: &Element) -> Result<Self> {
        let local_time = match xml::child(root, "localTime") {
            Some(node) => Some(LocalTime {
                year: xml::attr_int_or(node, "year", 0)?,
                month: xml::attr_int_or(node, "month", 0)?,
                day_of_month: xml::attr_int_or(node, "dayOfMonth", 0)?,
                day_of_week: xml::attr_int_or(node, "dayOfWeek", 0)?,
                hour: xml::attr_int_or(node, "hour", 0)?,
                minute: xml::attr_int_or(node, "minute", 0)?,
                second: xml::attr_int_or(node, "second", 0)?,
            }),
            None => None,
        };
        Ok(ClockTime {
            utc_time: xml::attr_int_or(root, "utcTime", 0)?,
            utc_sync_time: xml::attr_int_or(root, "utcSyncTime", 0)?,
            brightness: xml::attr_int_or(root, "brightness", 0)?,
            clock_error: xml::attr_int_or(root, "clockError", 0)?,
            cue_music: xml::attr_bool(root, "cueMusic"),
            time_format: xml::attr(root, "timeFormat"),
            local_time,
        })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.local_time {
            Some(lt) => write!(
                f,
                "ClockTime: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                lt.year, lt.month, lt.day_of_month, lt.hour, lt.minute, lt.second
            ),
            None => write!(f, "ClockTime: utcTime={}", self.utc_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_clock_config_flat_shape() {
        let xml = r#"<clockConfig timezoneInfo="America/Chicago" userEnable="false" timeFormat="TIME_FORMAT_12HOUR_ID" userOffsetMinute="0" brightnessLevel="70" userUtcTime="0" />"#;
        let config = ClockConfig::from_xml(&parse(xml)).unwrap();
        assert_eq!(config.timezone_info.as_deref(), Some("America/Chicago"));
        assert_eq!(config.brightness_level, 70);
        assert!(!config.user_enable);
    }

    #[test]
    fn test_clock_config_wrapped_shape() {
        let xml = r#"<clockConfig><clockConfig timezoneInfo="Europe/Berlin" timeFormat="TIME_FORMAT_24HOUR_ID" brightnessLevel="50" /></clockConfig>"#;
        let config = ClockConfig::from_xml(&parse(xml)).unwrap();
        assert_eq!(config.timezone_info.as_deref(), Some("Europe/Berlin"));
        assert_eq!(config.time_format.as_deref(), Some("TIME_FORMAT_24HOUR_ID"));
    }

    #[test]
    fn test_clock_time() {
        let xml = r#"
            <clockTime utcTime="1701219123" cueMusic="0" timeFormat="TIME_FORMAT_12HOUR_ID" brightness="70" clockError="0" utcSyncTime="1701219000">
                <localTime year="2023" month="11" dayOfMonth="28" dayOfWeek="2" hour="18" minute="52" second="3" />
            </clockTime>
        "#;
        let time = ClockTime::from_xml(&parse(xml)).unwrap();
        assert_eq!(time.utc_time, 1701219123);
        assert_eq!(time.brightness, 70);
        let local = time.local_time.unwrap();
        assert_eq!(local.year, 2023);
        assert_eq!(local.hour, 18);
    }
}
