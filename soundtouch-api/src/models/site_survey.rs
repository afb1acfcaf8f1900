use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml};

/// One wireless network found by a site survey.
///
/// Equality and ordering use the SSID, case-insensitive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SurveyResultItem {
    /// Network name.
    pub ssid: Option<String>,
    /// True when the network requires authentication.
    pub secure: bool,
    /// Received signal strength, in dBm.
    pub signal_strength: Option<i32>,
    /// Security protocols the network offers, e.g. `WPA2_PSK`.
    pub security_types: Vec<String>,
}

impl SurveyResultItem {
    pub(crate) fn parse(elm: &Element) -> Result<SurveyResultItem> {
        let security_types = match xml::child(elm, "securityTypes") {
            Some(node) => xml::children(node, "type")
                .filter_map(xml::own_text)
                .collect(),
            None => Vec::new(),
        };
        Ok(SurveyResultItem {
            ssid: xml::attr(elm, "ssid"),
            secure: xml::attr_bool(elm, "secure"),
            signal_strength: xml::attr_int(elm, "signalStrength")?,
            security_types,
        })
    }

    fn sort_key(&self) -> String {
        self.ssid
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }
}

impl PartialEq for SurveyResultItem {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for SurveyResultItem {}

impl PartialOrd for SurveyResultItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SurveyResultItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for SurveyResultItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SurveyResultItem: ssid=\"{}\" secure={}",
            self.ssid.as_deref().unwrap_or(""),
            self.secure
        )?;
        if let Some(strength) = self.signal_strength {
            write!(f, " signalStrength={}", strength)?;
        }
        Ok(())
    }
}

/// Wireless networks visible to the device, sorted by SSID.
///
/// Surveying drops the device off the network for a moment, so results
/// are best read while on a wired connection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformWirelessSiteSurveyResponse {
    /// Networks, sorted case-insensitively by SSID.
    pub items: Vec<SurveyResultItem>,
}

impl PerformWirelessSiteSurveyResponse {
    /// Network with the given SSID, case-sensitive.
    pub fn find_by_ssid(&self, ssid: &str) -> Option<&SurveyResultItem> {
        self.items.iter().find(|i| i.ssid.as_deref() == Some(ssid))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromXml for PerformWirelessSiteSurveyResponse {
    const ROOT: &'static str = "performWirelessSiteSurveyResponse";

    fn from_xml(root: &Element) -> Result<Self> {
        let node = xml::self_or_child(root, Self::ROOT).unwrap_or(root);
        let mut items = match xml::child(node, "items") {
            Some(wrapper) => xml::children(wrapper, "item")
                .map(SurveyResultItem::parse)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        items.sort();
        Ok(PerformWirelessSiteSurveyResponse { items })
    }
}

impl fmt::Display for PerformWirelessSiteSurveyResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PerformWirelessSiteSurveyResponse: ({} items)",
            self.items.len()
        )
    }
}

impl<'a> IntoIterator for &'a PerformWirelessSiteSurveyResponse {
    type Item = &'a SurveyResultItem;
    type IntoIter = std::slice::Iter<'a, SurveyResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
