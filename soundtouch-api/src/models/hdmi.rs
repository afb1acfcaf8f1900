use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{self, FromXml, ToXml};

use super::wire_enum;

wire_enum! {
    /// HDMI-CEC behavior of soundbar-class products.
    CecMode {
        On => "CEC_MODE_ON",
        Off => "CEC_MODE_OFF",
        Alternate => "CEC_MODE_ALTERNATE",
        Fine => "CEC_MODE_FINE",
    }
}

/// HDMI-CEC setting, both the readback and the change request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductCecHdmiControl {
    /// Active CEC mode.
    pub cec_mode: Option<CecMode>,
}

impl ProductCecHdmiControl {
    /// Creates a mode change request.
    pub fn new(cec_mode: CecMode) -> Self {
        ProductCecHdmiControl {
            cec_mode: Some(cec_mode),
        }
    }
}

impl FromXml for ProductCecHdmiControl {
    const ROOT: &'static str = "productcechdmicontrol";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(ProductCecHdmiControl {
            cec_mode: xml::attr(root, "cecmode")
                .as_deref()
                .and_then(|m| CecMode::from_str(m).ok()),
        })
    }
}

impl ToXml for ProductCecHdmiControl {
    fn to_element(&self, _request_body_only: bool) -> Element {
        let mut elm = Element::new("productcechdmicontrol");
        xml::set_attr_opt(&mut elm, "cecmode", self.cec_mode.map(|m| m.as_str()));
        elm
    }
}

impl fmt::Display for ProductCecHdmiControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProductCecHdmiControl: cecMode={}",
            self.cec_mode.map(|m| m.as_str()).unwrap_or("")
        )
    }
}

/// HDMI input assignment of soundbar-class products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductHdmiAssignmentControls {
    /// Input routed to HDMI 1.
    pub hdmi_input_selection_01: Option<String>,
}

impl FromXml for ProductHdmiAssignmentControls {
    const ROOT: &'static str = "producthdmiassignmentcontrols";

    fn from_xml(root: &Element) -> Result<Self> {
        Ok(ProductHdmiAssignmentControls {
            hdmi_input_selection_01: xml::attr(root, "hdmiinputselection_01"),
        })
    }
}

impl fmt::Display for ProductHdmiAssignmentControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProductHdmiAssignmentControls: hdmi01=\"{}\"",
            self.hdmi_input_selection_01.as_deref().unwrap_or("")
        )
    }
}
