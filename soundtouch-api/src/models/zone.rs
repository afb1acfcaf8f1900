use std::fmt;

use serde::Serialize;
use xmltree::{Element, XMLNode};

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, FromXml, ToXml};

/// One device playing in a multiroom zone.
///
/// The device id rides as the member element's text; the address is an
/// attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneMember {
    /// Device identifier of the member.
    pub device_id: String,
    /// IPv4 address of the member.
    pub ip_address: Option<String>,
    /// Role within the zone, when the device reports one.
    pub role: Option<String>,
}

impl ZoneMember {
    /// Creates a member entry.
    ///
    /// # Arguments
    ///
    /// * `ip_address` - IPv4 address of the member device
    /// * `device_id` - Device identifier of the member device
    pub fn new(ip_address: impl Into<String>, device_id: impl Into<String>) -> Self {
        ZoneMember {
            device_id: device_id.into(),
            ip_address: Some(ip_address.into()),
            role: None,
        }
    }

    fn parse(elm: &Element) -> ZoneMember {
        ZoneMember {
            device_id: xml::own_text(elm).unwrap_or_default(),
            ip_address: xml::attr(elm, "ipaddress"),
            role: xml::attr(elm, "role"),
        }
    }
}

impl ToXml for ZoneMember {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new("member");
        xml::set_attr_opt(&mut elm, "ipaddress", self.ip_address.as_deref());
        xml::set_attr_opt(&mut elm, "role", self.role.as_deref());
        if !self.device_id.is_empty() {
            elm.children.push(XMLNode::Text(self.device_id.clone()));
        }
        elm
    }
}

impl fmt::Display for ZoneMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZoneMember: deviceId={}", self.device_id)?;
        if let Some(ip) = &self.ip_address {
            write!(f, " ip={}", ip)?;
        }
        Ok(())
    }
}

/// A multiroom zone: one master device plus the members it controls.
///
/// # Example
///
/// ```
/// use soundtouch_api::models::{Zone, ZoneMember};
///
/// let mut zone = Zone::new("9070658C9D4A", Some("192.168.1.80"));
/// zone.add_member(ZoneMember::new("192.168.1.81", "38D269B8E2F1")).unwrap();
/// assert_eq!(zone.members.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Zone {
    /// Device identifier of the zone master.
    pub master_device_id: Option<String>,
    /// IPv4 address of the zone master.
    pub master_ip_address: Option<String>,
    /// True when the reporting device is itself the master.
    pub is_zone_master: bool,
    /// Devices playing under the master's control.
    pub members: Vec<ZoneMember>,
}

impl Zone {
    /// Creates a zone rooted at the given master device.
    ///
    /// # Arguments
    ///
    /// * `master_device_id` - Device identifier of the master
    /// * `master_ip_address` - IPv4 address of the master, required for
    ///   the master to announce itself to members
    pub fn new(master_device_id: impl Into<String>, master_ip_address: Option<&str>) -> Self {
        Zone {
            master_device_id: Some(master_device_id.into()),
            master_ip_address: master_ip_address.map(str::to_string),
            is_zone_master: master_ip_address.is_some(),
            members: Vec::new(),
        }
    }

    /// Appends a member after validating it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the member has no device id, or its device
    /// id equals the master's. The master never lists itself as a member.
    pub fn add_member(&mut self, member: ZoneMember) -> Result<()> {
        if member.device_id.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "zone member did not specify a device id".to_string(),
            ));
        }
        if Some(member.device_id.as_str()) == self.master_device_id.as_deref() {
            return Err(SoundTouchError::InvalidArgument(format!(
                "zone member device id cannot be the master device id: {}",
                member.device_id
            )));
        }
        self.members.push(member);
        Ok(())
    }

    /// True when the given device id is the master or one of the members.
    pub fn contains(&self, device_id: &str) -> bool {
        self.master_device_id.as_deref() == Some(device_id)
            || self.members.iter().any(|m| m.device_id == device_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromXml for Zone {
    const ROOT: &'static str = "zone";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(Zone {
            master_device_id: xml::attr(root, "master"),
            master_ip_address: xml::attr(root, "senderIPAddress"),
            is_zone_master: xml::attr_bool(root, "senderIsMaster"),
            members: xml::children(root, "member").map(ZoneMember::parse).collect(),
        })
    }
}

impl ToXml for Zone {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("zone");
        xml::set_attr_opt(&mut elm, "master", self.master_device_id.as_deref());
        xml::set_attr_opt(&mut elm, "senderIPAddress", self.master_ip_address.as_deref());
        if self.is_zone_master {
            xml::set_attr_display(&mut elm, "senderIsMaster", "true");
        }
        for member in &self.members {
            xml::push_child(&mut elm, member.to_element(request_body_only));
        }
        elm
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zone: master={} ({} members)",
            self.master_device_id.as_deref().unwrap_or(""),
            self.members.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE_XML: &str = r#"
        <zone master="9070658C9D4A" senderIPAddress="192.168.1.80" senderIsMaster="true">
            <member ipaddress="192.168.1.81">38D269B8E2F1</member>
            <member ipaddress="192.168.1.82">689E19653E96</member>
        </zone>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_members_from_text() {
        let zone = Zone::from_xml(&parse(ZONE_XML)).unwrap();
        assert_eq!(zone.master_device_id.as_deref(), Some("9070658C9D4A"));
        assert!(zone.is_zone_master);
        assert_eq!(zone.members.len(), 2);
        assert_eq!(zone.members[0].device_id, "38D269B8E2F1");
        assert_eq!(zone.members[0].ip_address.as_deref(), Some("192.168.1.81"));
    }

    #[test]
    fn test_rejects_member_without_device_id() {
        let mut zone = Zone::new("9070658C9D4A", Some("192.168.1.80"));
        let member = ZoneMember {
            device_id: String::new(),
            ip_address: Some("192.168.1.81".to_string()),
            role: None,
        };
        assert!(matches!(
            zone.add_member(member),
            Err(SoundTouchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_master_as_member() {
        let mut zone = Zone::new("9070658C9D4A", Some("192.168.1.80"));
        assert!(matches!(
            zone.add_member(ZoneMember::new("192.168.1.80", "9070658C9D4A")),
            Err(SoundTouchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_emit_matches_wire_format() {
        let mut zone = Zone::new("ABC", None);
        zone.add_member(ZoneMember::new("192.168.1.2", "DEF")).unwrap();
        let body = zone.to_request_body().unwrap();
        assert_eq!(
            body,
            r#"<zone master="ABC"><member ipaddress="192.168.1.2">DEF</member></zone>"#
        );
    }

    #[test]
    fn test_contains() {
        let zone = Zone::from_xml(&parse(ZONE_XML)).unwrap();
        assert!(zone.contains("9070658C9D4A"));
        assert!(zone.contains("689E19653E96"));
        assert!(!zone.contains("FFFFFFFFFFFF"));
    }
}
