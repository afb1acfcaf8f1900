use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use xmltree::Element;

use crate::error::{Result, SoundTouchError};
use crate::xml::{self, FromXml, ToXml};

use super::wire_enum;

wire_enum! {
    /// Position of a device within a stereo pair.
    GroupRoleKind {
        Left => "LEFT",
        Right => "RIGHT",
        Normal => "NORMAL",
    }
}

wire_enum! {
    /// Lifecycle state the device reports for a stereo pair.
    GroupStatus {
        Unknown => "GROUP_UNKNOWN",
        Connecting => "GROUP_CONNECTING",
        Ok => "GROUP_OK",
        OkMargeOnly => "GROUP_OK_MARGE_ONLY",
        MargeRequestFailed => "GROUP_MARGE_REQUEST_FAILED",
        PeerRequestFailed => "GROUP_PEER_REQUEST_FAILED",
        Error => "GROUP_ERROR",
    }
}

/// One speaker's assignment within a stereo pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRole {
    /// Device identifier of the speaker.
    pub device_id: String,
    /// Channel the speaker plays.
    pub role: GroupRoleKind,
    /// IPv4 address of the speaker.
    pub ip_address: String,
}

impl GroupRole {
    /// Creates a role assignment.
    pub fn new(
        device_id: impl Into<String>,
        role: GroupRoleKind,
        ip_address: impl Into<String>,
    ) -> Self {
        GroupRole {
            device_id: device_id.into(),
            role,
            ip_address: ip_address.into(),
        }
    }

    fn parse(elm: &Element) -> GroupRole {
        GroupRole {
            device_id: xml::find_text(elm, "deviceId").unwrap_or_default(),
            role: xml::find_text(elm, "role")
                .as_deref()
                .and_then(|r| GroupRoleKind::from_str(r).ok())
                .unwrap_or(GroupRoleKind::Normal),
            ip_address: xml::find_text(elm, "ipAddress").unwrap_or_default(),
        }
    }
}

impl ToXml for GroupRole {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new("groupRole");
        xml::push_text_child_opt(&mut elm, "deviceId", Some(&self.device_id));
        xml::push_text_child_opt(&mut elm, "role", Some(self.role.as_str()));
        xml::push_text_child_opt(&mut elm, "ipAddress", Some(&self.ip_address));
        elm
    }
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GroupRole: deviceId={} role={} ip={}",
            self.device_id, self.role, self.ip_address
        )
    }
}

/// A stereo pair of devices acting as one speaker.
///
/// Only products that support pairing (the ST-10 family) accept group
/// requests; everything else answers with a device error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Group {
    /// Device-assigned group identifier, absent until the pair exists.
    pub group_id: Option<u32>,
    /// Display name of the pair.
    pub name: Option<String>,
    /// Device identifier of the controlling speaker.
    pub master_device_id: Option<String>,
    /// IPv4 address of the controlling speaker.
    pub sender_ip_address: Option<String>,
    /// Pairing state.
    pub status: Option<GroupStatus>,
    /// Channel assignments, one per speaker.
    pub roles: Vec<GroupRole>,
}

impl Group {
    /// Creates a pairing request.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name for the pair
    /// * `master_device_id` - Device identifier of the controlling speaker
    /// * `sender_ip_address` - IPv4 address of the controlling speaker
    pub fn new(
        name: impl Into<String>,
        master_device_id: impl Into<String>,
        sender_ip_address: impl Into<String>,
    ) -> Self {
        Group {
            group_id: None,
            name: Some(name.into()),
            master_device_id: Some(master_device_id.into()),
            sender_ip_address: Some(sender_ip_address.into()),
            status: None,
            roles: Vec::new(),
        }
    }

    /// Appends a role after validating it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the role lacks a device id or an address;
    /// the master cannot address a speaker without both.
    pub fn add_role(&mut self, role: GroupRole) -> Result<()> {
        if role.device_id.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "group role did not specify a device id".to_string(),
            ));
        }
        if role.ip_address.is_empty() {
            return Err(SoundTouchError::InvalidArgument(
                "group role did not specify an ip address".to_string(),
            ));
        }
        self.roles.push(role);
        Ok(())
    }
}

impl FromXml for Group {
    const ROOT: &'static str = "group";

    fn from_xml(root: &Element) -> Result<Self> {
        let roles = match xml::child(root, "roles") {
            Some(node) => xml::children(node, "groupRole").map(GroupRole::parse).collect(),
            None => Vec::new(),
        };
        Ok(Group {
            group_id: xml::attr_int(root, "id")?,
            name: xml::find_text(root, "name"),
            master_device_id: xml::find_text(root, "masterDeviceId"),
            sender_ip_address: xml::find_text(root, "senderIPAddress"),
            status: xml::find_text(root, "status")
                .as_deref()
                .and_then(|s| GroupStatus::from_str(s).ok()),
            roles,
        })
    }
}

impl ToXml for Group {
    fn to_element(&self, request_body_only: bool) -> Element {
        let mut elm = Element::new("group");
        if let Some(id) = self.group_id {
            xml::set_attr_display(&mut elm, "id", id);
        }
        xml::push_text_child_opt(&mut elm, "name", self.name.as_deref());
        xml::push_text_child_opt(&mut elm, "masterDeviceId", self.master_device_id.as_deref());
        xml::push_text_child_opt(&mut elm, "senderIPAddress", self.sender_ip_address.as_deref());
        xml::push_text_child_opt(&mut elm, "status", self.status.map(|s| s.as_str()));
        let mut roles = Element::new("roles");
        for role in &self.roles {
            xml::push_child(&mut roles, role.to_element(request_body_only));
        }
        xml::push_child(&mut elm, roles);
        elm
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Group: name=\"{}\" master={} ({} roles)",
            self.name.as_deref().unwrap_or(""),
            self.master_device_id.as_deref().unwrap_or(""),
            self.roles.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUP_XML: &str = r#"
        <group id="141794810">
            <name>Den Pair</name>
            <masterDeviceId>9070658C9D4A</masterDeviceId>
            <senderIPAddress>192.168.1.80</senderIPAddress>
            <status>GROUP_OK</status>
            <roles>
                <groupRole>
                    <deviceId>9070658C9D4A</deviceId>
                    <role>LEFT</role>
                    <ipAddress>192.168.1.80</ipAddress>
                </groupRole>
                <groupRole>
                    <deviceId>38D269B8E2F1</deviceId>
                    <role>RIGHT</role>
                    <ipAddress>192.168.1.81</ipAddress>
                </groupRole>
            </roles>
        </group>
    "#;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_pair() {
        let group = Group::from_xml(&parse(GROUP_XML)).unwrap();
        assert_eq!(group.group_id, Some(141794810));
        assert_eq!(group.name.as_deref(), Some("Den Pair"));
        assert_eq!(group.status, Some(GroupStatus::Ok));
        assert_eq!(group.roles.len(), 2);
        assert_eq!(group.roles[0].role, GroupRoleKind::Left);
        assert_eq!(group.roles[1].device_id, "38D269B8E2F1");
    }

    #[test]
    fn test_add_role_validations() {
        let mut group = Group::new("Den Pair", "AA", "192.168.1.80");
        assert!(matches!(
            group.add_role(GroupRole::new("", GroupRoleKind::Left, "192.168.1.80")),
            Err(SoundTouchError::InvalidArgument(_))
        ));
        assert!(matches!(
            group.add_role(GroupRole::new("AA", GroupRoleKind::Left, "")),
            Err(SoundTouchError::InvalidArgument(_))
        ));
        assert!(group
            .add_role(GroupRole::new("AA", GroupRoleKind::Left, "192.168.1.80"))
            .is_ok());
    }

    #[test]
    fn test_emit_always_includes_roles_wrapper() {
        let group = Group::new("Den Pair", "AA", "192.168.1.80");
        let elm = group.to_element(true);
        assert!(elm.get_child("roles").is_some());
        let body = group.to_request_body().unwrap();
        assert!(body.contains("<roles />") || body.contains("<roles/>") || body.contains("<roles></roles>"));
    }

    #[test]
    fn test_role_emit_order() {
        let role = GroupRole::new("AA", GroupRoleKind::Right, "192.168.1.81");
        let body = crate::xml::element_to_string(&role.to_element(true)).unwrap();
        assert_eq!(
            body,
            "<groupRole><deviceId>AA</deviceId><role>RIGHT</role><ipAddress>192.168.1.81</ipAddress></groupRole>"
        );
    }
}
