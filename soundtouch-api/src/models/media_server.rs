use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml};

/// One UPnP media server the device can reach on the LAN.
///
/// Equality and ordering use the friendly name, case-insensitive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaServer {
    /// UUID the server announces over UPnP.
    pub server_id: Option<String>,
    /// MAC address of the server.
    pub mac_address: Option<String>,
    /// IPv4 address of the server.
    pub ip_address: Option<String>,
    /// Manufacturer reported by the server.
    pub manufacturer: Option<String>,
    /// Model name reported by the server.
    pub model_name: Option<String>,
    /// Display name of the server.
    pub friendly_name: Option<String>,
    /// Model description reported by the server.
    pub model_description: Option<String>,
    /// URL of the server's UPnP device description document.
    pub location: Option<String>,
}

impl MediaServer {
    pub(crate) fn parse(elm: &Element) -> MediaServer {
        MediaServer {
            server_id: xml::attr(elm, "id"),
            mac_address: xml::attr(elm, "mac"),
            ip_address: xml::attr(elm, "ip"),
            manufacturer: xml::attr(elm, "manufacturer"),
            model_name: xml::attr(elm, "model_name"),
            friendly_name: xml::attr(elm, "friendly_name"),
            model_description: xml::attr(elm, "model_description"),
            location: xml::attr(elm, "location"),
        }
    }

    fn sort_key(&self) -> String {
        self.friendly_name
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }
}

impl PartialEq for MediaServer {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for MediaServer {}

impl PartialOrd for MediaServer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MediaServer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for MediaServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MediaServer: name=\"{}\"",
            self.friendly_name.as_deref().unwrap_or("")
        )?;
        if let Some(ip) = &self.ip_address {
            write!(f, " ip={}", ip)?;
        }
        if let Some(id) = &self.server_id {
            write!(f, " id={}", id)?;
        }
        Ok(())
    }
}

/// UPnP media servers visible to the device, sorted by friendly name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaServerList {
    /// Servers, sorted case-insensitively by friendly name.
    pub items: Vec<MediaServer>,
}

impl MediaServerList {
    /// Server with the given friendly name, case-sensitive.
    pub fn find_by_name(&self, friendly_name: &str) -> Option<&MediaServer> {
        self.items
            .iter()
            .find(|s| s.friendly_name.as_deref() == Some(friendly_name))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromXml for MediaServerList {
    const ROOT: &'static str = "ListMediaServersResponse";

    fn from_xml(root: &Element) -> Result<Self> {
        let node = xml::self_or_child(root, Self::ROOT).unwrap_or(root);
        let mut items: Vec<MediaServer> = xml::children(node, "media_server")
            .map(MediaServer::parse)
            .collect();
        items.sort();
        Ok(MediaServerList { items })
    }
}

impl fmt::Display for MediaServerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediaServerList: ({} items)", self.items.len())
    }
}

impl<'a> IntoIterator for &'a MediaServerList {
    type Item = &'a MediaServer;
    type IntoIter = std::slice::Iter<'a, MediaServer>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVERS_XML: &str = r#"
        <ListMediaServersResponse>
            <media_server id="8f2e5f74-6d9c-4006-b89a-8b9e5bf98a42" ip="192.168.1.3" manufacturer="Plex, Inc." model_name="Plex Media Server" friendly_name="Plex Media Server: Tower" model_description="Plex Media Server" location="http://192.168.1.3:32469/DeviceDescription.xml"/>
            <media_server id="47c3d688-91db-4351-81eb-e8a55b29f02a" mac="9070658C9D4A" ip="192.168.1.4" manufacturer="Synology" model_name="DS918+" friendly_name="Family NAS" model_description="Synology DLNA server" location="http://192.168.1.4:50001/desc/device.xml"/>
        </ListMediaServersResponse>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_servers() {
        let list = MediaServerList::from_xml(&parse(SERVERS_XML)).unwrap();
        assert_eq!(list.len(), 2);

        let nas = list.find_by_name("Family NAS").unwrap();
        assert_eq!(
            nas.server_id.as_deref(),
            Some("47c3d688-91db-4351-81eb-e8a55b29f02a")
        );
        assert_eq!(nas.mac_address.as_deref(), Some("9070658C9D4A"));
        assert_eq!(nas.ip_address.as_deref(), Some("192.168.1.4"));
        assert_eq!(nas.manufacturer.as_deref(), Some("Synology"));
        assert_eq!(
            nas.location.as_deref(),
            Some("http://192.168.1.4:50001/desc/device.xml")
        );
    }

    #[test]
    fn test_sorts_by_friendly_name() {
        let list = MediaServerList::from_xml(&parse(SERVERS_XML)).unwrap();
        let names: Vec<_> = list
            .items
            .iter()
            .filter_map(|s| s.friendly_name.as_deref())
            .collect();
        assert_eq!(names, ["Family NAS", "Plex Media Server: Tower"]);
    }

    #[test]
    fn test_missing_mac_is_none() {
        let list = MediaServerList::from_xml(&parse(SERVERS_XML)).unwrap();
        let plex = list.find_by_name("Plex Media Server: Tower").unwrap();
        assert_eq!(plex.mac_address, None);
    }

    #[test]
    fn test_empty_listing() {
        let list = MediaServerList::from_xml(&parse("<ListMediaServersResponse/>")).unwrap();
        assert!(list.is_empty());
    }
}
