//! XML decoding and encoding helpers shared by the model types.
//!
//! The SoundTouch Web API speaks one XML dialect everywhere: small documents
//! with data spread across attributes, child text nodes, and the occasional
//! self-closing presence flag. The helpers here capture those conventions in
//! one place so the model types stay declarative.

use std::fmt::Display;
use std::str::FromStr;

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{Result, SoundTouchError};

/// Decode a record from a device XML document.
pub trait FromXml: Sized {
    /// The root tag this record decodes from.
    const ROOT: &'static str;

    /// Construct the record from a parsed element.
    ///
    /// Missing optional nodes leave fields unset; numeric text that fails to
    /// parse is an error.
    fn from_xml(root: &Element) -> Result<Self>;
}

/// Encode a record into device XML.
pub trait ToXml {
    /// Build the element tree.
    ///
    /// When `request_body_only` is set, read-only descriptive fields the
    /// device reports but does not accept are omitted.
    fn to_element(&self, request_body_only: bool) -> Element;

    /// Serialize the request-body projection to a UTF-8 string without an
    /// XML declaration.
    fn to_request_body(&self) -> Result<String> {
        let elm = self.to_element(true);
        element_to_string(&elm)
    }
}

/// Serialize an element without an XML declaration.
pub fn element_to_string(elm: &Element) -> Result<String> {
    let mut buf = Vec::new();
    let config = EmitterConfig::new().write_document_declaration(false);
    elm.write_with_config(&mut buf, config)
        .map_err(|e| SoundTouchError::MalformedXml {
            tag: elm.name.clone(),
            text: e.to_string(),
        })?;
    String::from_utf8(buf).map_err(|e| SoundTouchError::MalformedXml {
        tag: elm.name.clone(),
        text: e.to_string(),
    })
}

/// First direct child with the given tag. Duplicate tags take the first.
pub(crate) fn child<'a>(elm: &'a Element, tag: &str) -> Option<&'a Element> {
    elm.get_child(tag)
}

/// The element itself when its name matches, otherwise its first matching
/// child. Mirrors how device documents sometimes nest the payload under a
/// second copy of the root tag (`clockConfig`) and sometimes do not.
pub(crate) fn self_or_child<'a>(elm: &'a Element, tag: &str) -> Option<&'a Element> {
    if elm.name == tag {
        Some(elm)
    } else {
        elm.get_child(tag)
    }
}

/// All direct children with the given tag, in document order.
pub(crate) fn children<'a>(elm: &'a Element, tag: &'a str) -> impl Iterator<Item = &'a Element> {
    elm.children.iter().filter_map(move |node| match node {
        XMLNode::Element(e) if e.name == tag => Some(e),
        _ => None,
    })
}

/// All direct element children regardless of tag, in document order.
pub(crate) fn element_children(elm: &Element) -> impl Iterator<Item = &Element> {
    elm.children.iter().filter_map(|node| match node {
        XMLNode::Element(e) => Some(e),
        _ => None,
    })
}

/// Text of the first matching direct child, `None` when the child is absent
/// or empty.
pub(crate) fn find_text(elm: &Element, tag: &str) -> Option<String> {
    child(elm, tag)
        .and_then(|c| c.get_text())
        .map(|t| t.into_owned())
}

/// Element's own text, `None` when empty.
pub(crate) fn own_text(elm: &Element) -> Option<String> {
    elm.get_text().map(|t| t.into_owned())
}

/// Attribute value, `None` when absent.
pub(crate) fn attr(elm: &Element, name: &str) -> Option<String> {
    elm.attributes.get(name).cloned()
}

/// Boolean text: `true`, `1`, `yes`, and `on` (case-insensitive) are true;
/// anything else is false.
pub(crate) fn parse_bool(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Boolean from a child's text; absent children are false.
pub(crate) fn find_bool(elm: &Element, tag: &str) -> bool {
    find_text(elm, tag).map(|t| parse_bool(&t)).unwrap_or(false)
}

/// Boolean from an attribute; absent attributes are false.
pub(crate) fn attr_bool(elm: &Element, name: &str) -> bool {
    attr(elm, name).map(|t| parse_bool(&t)).unwrap_or(false)
}

/// Boolean from an attribute, distinguishing absent from false.
pub(crate) fn attr_bool_opt(elm: &Element, name: &str) -> Option<bool> {
    attr(elm, name).map(|t| parse_bool(&t))
}

/// Presence flag: a bare `<skipEnabled />` counts as true, a populated node
/// falls back to boolean text, and an absent node is false.
pub(crate) fn find_flag(elm: &Element, tag: &str) -> bool {
    match child(elm, tag) {
        None => false,
        Some(c) => match c.get_text() {
            None => true,
            Some(t) => parse_bool(&t),
        },
    }
}

/// Strictly parsed integer from a child's text. Absent or empty children
/// yield `None`; non-numeric text is `MalformedXml` naming the tag.
pub(crate) fn find_int<T: FromStr>(elm: &Element, tag: &str) -> Result<Option<T>> {
    match find_text(elm, tag) {
        None => Ok(None),
        Some(text) => parse_int(&text, tag).map(Some),
    }
}

/// Strictly parsed integer from a child's text with a caller default.
pub(crate) fn find_int_or<T: FromStr>(elm: &Element, tag: &str, default: T) -> Result<T> {
    Ok(find_int(elm, tag)?.unwrap_or(default))
}

/// Strictly parsed integer from an attribute. Absent attributes yield
/// `None`; non-numeric text is `MalformedXml` naming the attribute.
pub(crate) fn attr_int<T: FromStr>(elm: &Element, name: &str) -> Result<Option<T>> {
    match attr(elm, name) {
        None => Ok(None),
        Some(text) => parse_int(&text, name).map(Some),
    }
}

/// Strictly parsed integer from an attribute with a caller default.
pub(crate) fn attr_int_or<T: FromStr>(elm: &Element, name: &str, default: T) -> Result<T> {
    Ok(attr_int(elm, name)?.unwrap_or(default))
}

/// Strictly parsed integer from the element's own text with a caller
/// default for absent or empty text.
pub(crate) fn own_int_or<T: FromStr>(elm: &Element, default: T) -> Result<T> {
    match own_text(elm) {
        None => Ok(default),
        Some(text) => parse_int(&text, &elm.name),
    }
}

fn parse_int<T: FromStr>(text: &str, tag: &str) -> Result<T> {
    text.trim()
        .parse::<T>()
        .map_err(|_| SoundTouchError::MalformedXml {
            tag: tag.to_string(),
            text: text.to_string(),
        })
}

/// Build an element holding only text.
pub(crate) fn text_element(tag: &str, text: &str) -> Element {
    let mut elm = Element::new(tag);
    elm.children.push(XMLNode::Text(text.to_string()));
    elm
}

/// Set an attribute when the value is present and non-empty.
pub(crate) fn set_attr_opt(elm: &mut Element, name: &str, value: Option<&str>) {
    if let Some(v) = value {
        if !v.is_empty() {
            elm.attributes.insert(name.to_string(), v.to_string());
        }
    }
}

/// Append a text child when the value is present and non-empty.
pub(crate) fn push_text_child_opt(elm: &mut Element, tag: &str, value: Option<&str>) {
    if let Some(v) = value {
        if !v.is_empty() {
            elm.children.push(XMLNode::Element(text_element(tag, v)));
        }
    }
}

/// Append a pre-built child element.
pub(crate) fn push_child(elm: &mut Element, node: Element) {
    elm.children.push(XMLNode::Element(node));
}

/// Set a numeric attribute.
pub(crate) fn set_attr_display<T: Display>(elm: &mut Element, name: &str, value: T) {
    elm.attributes.insert(name.to_string(), value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_find_text_takes_first_duplicate() {
        let root = parse("<a><b>one</b><b>two</b></a>");
        assert_eq!(find_text(&root, "b"), Some("one".to_string()));
    }

    #[test]
    fn test_find_text_missing_child() {
        let root = parse("<a><b>one</b></a>");
        assert_eq!(find_text(&root, "c"), None);
    }

    #[test]
    fn test_self_or_child_matches_root() {
        let root = parse(r#"<clockConfig timeFormat="TIME_FORMAT_12HOUR_ID"/>"#);
        let node = self_or_child(&root, "clockConfig").unwrap();
        assert_eq!(
            attr(node, "timeFormat"),
            Some("TIME_FORMAT_12HOUR_ID".to_string())
        );
    }

    #[test]
    fn test_self_or_child_descends_into_wrapper() {
        let root = parse(r#"<clockConfig><clockConfig timeFormat="TIME_FORMAT_24HOUR_ID"/></clockConfig>"#);
        let node = self_or_child(&root, "clockConfig").unwrap();
        // Root matches first; its own attributes are empty here, which is
        // why the models try the root's attributes before descending.
        assert_eq!(node.name, "clockConfig");
    }

    #[rstest::rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("True", true)]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("YES", true)]
    #[case("on", true)]
    #[case("On", true)]
    #[case("false", false)]
    #[case("0", false)]
    #[case("off", false)]
    #[case("", false)]
    #[case("maybe", false)]
    fn test_parse_bool_forms(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(parse_bool(text), expected);
    }

    #[test]
    fn test_find_flag_presence() {
        let root = parse("<nowPlaying><skipEnabled/></nowPlaying>");
        assert!(find_flag(&root, "skipEnabled"));
        assert!(!find_flag(&root, "skipPreviousEnabled"));
    }

    #[test]
    fn test_find_flag_with_text() {
        let root = parse("<nowPlaying><favoriteEnabled>true</favoriteEnabled></nowPlaying>");
        assert!(find_flag(&root, "favoriteEnabled"));

        let root = parse("<nowPlaying><favoriteEnabled>false</favoriteEnabled></nowPlaying>");
        assert!(!find_flag(&root, "favoriteEnabled"));
    }

    #[test]
    fn test_find_int_strict() {
        let root = parse("<volume><actualvolume>25</actualvolume></volume>");
        assert_eq!(find_int::<u8>(&root, "actualvolume").unwrap(), Some(25));

        let root = parse("<volume><actualvolume>loud</actualvolume></volume>");
        match find_int::<u8>(&root, "actualvolume") {
            Err(SoundTouchError::MalformedXml { tag, text }) => {
                assert_eq!(tag, "actualvolume");
                assert_eq!(text, "loud");
            }
            other => panic!("Expected MalformedXml, got {:?}", other),
        }
    }

    #[test]
    fn test_find_int_missing_is_none() {
        let root = parse("<volume/>");
        assert_eq!(find_int::<u8>(&root, "actualvolume").unwrap(), None);
        assert_eq!(find_int_or::<u8>(&root, "actualvolume", 7).unwrap(), 7);
    }

    #[test]
    fn test_attr_int_strict() {
        let root = parse(r#"<preset id="3"/>"#);
        assert_eq!(attr_int::<u8>(&root, "id").unwrap(), Some(3));

        let root = parse(r#"<preset id="three"/>"#);
        assert!(matches!(
            attr_int::<u8>(&root, "id"),
            Err(SoundTouchError::MalformedXml { .. })
        ));
    }

    #[test]
    fn test_attr_and_text_on_same_node() {
        // The nowPlaying time node carries the total as an attribute and
        // the position as text.
        let root = parse(r#"<nowPlaying><time total="265">15</time></nowPlaying>"#);
        let time = child(&root, "time").unwrap();
        assert_eq!(attr_int::<u32>(time, "total").unwrap(), Some(265));
        assert_eq!(own_text(time), Some("15".to_string()));
    }

    #[test]
    fn test_element_to_string_has_no_declaration() {
        let elm = text_element("name", "Kitchen Speaker");
        let xml = element_to_string(&elm).unwrap();
        assert_eq!(xml, "<name>Kitchen Speaker</name>");
    }

    proptest! {
        #[test]
        fn prop_int_round_trip(v in any::<i32>()) {
            let xml = format!("<root><n>{}</n></root>", v);
            let root = parse(&xml);
            prop_assert_eq!(find_int::<i32>(&root, "n").unwrap(), Some(v));
        }

        #[test]
        fn prop_non_numeric_text_is_malformed(s in "[a-zA-Z][a-zA-Z ]{0,16}") {
            let xml = format!("<root><n>{}</n></root>", s);
            let root = parse(&xml);
            prop_assert!(
                matches!(
                    find_int::<i64>(&root, "n"),
                    Err(SoundTouchError::MalformedXml { .. })
                ),
                "expected MalformedXml error"
            );
        }

        #[test]
        fn prop_bool_accepts_any_case_of_true_forms(
            form in prop::sample::select(vec!["true", "1", "yes", "on"]),
            upper in any::<bool>(),
        ) {
            let text = if upper { form.to_uppercase() } else { form.to_string() };
            prop_assert!(parse_bool(&text));
        }
    }
}
