//! Encoder and decoder for the XML dialect spoken by the payment API.
//!
//! Encoding wraps a parameter tree in `<xml>...</xml>` with no escaping.
//! Decoding only understands flat `<tag><![CDATA[value]]></tag>` pairs and
//! collects every such pair regardless of depth, so a nested tree does not
//! survive `decode(encode(tree))`.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

const ROOT_TAG: &str = "xml";

static CDATA_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<.*?><!\[CDATA\[(.*?)\]\]></(.*?)>").expect("CDATA pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    Scalar(String),
    /// Children in insertion order.
    Mapping(Vec<(String, XmlValue)>),
    /// Repeats the enclosing tag once per item.
    Sequence(Vec<XmlValue>),
}

impl XmlValue {
    pub fn mapping() -> Self {
        XmlValue::Mapping(Vec::new())
    }

    /// Appends a child; a no-op on scalars and sequences.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<XmlValue>) -> Self {
        if let XmlValue::Mapping(entries) = &mut self {
            entries.push((key.into(), value.into()));
        }
        self
    }
}

impl From<&str> for XmlValue {
    fn from(value: &str) -> Self {
        XmlValue::Scalar(value.to_string())
    }
}

impl From<String> for XmlValue {
    fn from(value: String) -> Self {
        XmlValue::Scalar(value)
    }
}

macro_rules! scalar_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for XmlValue {
            fn from(value: $t) -> Self {
                XmlValue::Scalar(value.to_string())
            }
        })*
    };
}

scalar_from_number!(i32, i64, u32, u64, usize, f64);

impl<T: Into<XmlValue>> From<Vec<T>> for XmlValue {
    fn from(items: Vec<T>) -> Self {
        XmlValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// Encodes `value` under the `xml` root tag.
pub fn encode(value: &XmlValue) -> String {
    encode_element(ROOT_TAG, value)
}

/// UTF-8 bytes of [`encode`], ready for a request body.
pub fn encode_bytes(value: &XmlValue) -> Vec<u8> {
    encode(value).into_bytes()
}

pub fn encode_element(tag: &str, value: &XmlValue) -> String {
    match value {
        XmlValue::Scalar(text) => format!("<{tag}>{text}</{tag}>"),
        XmlValue::Mapping(entries) => {
            let inner: String = entries
                .iter()
                .map(|(key, child)| encode_element(key, child))
                .collect();
            format!("<{tag}>{inner}</{tag}>")
        }
        XmlValue::Sequence(items) if items.is_empty() => format!("<{tag}></{tag}>"),
        XmlValue::Sequence(items) => items
            .iter()
            .map(|item| encode_element(tag, item))
            .collect(),
    }
}

/// Collects every `<tag><![CDATA[value]]></tag>` pair into a flat map.
///
/// The key is taken from the closing tag. Later duplicates win. Text that
/// does not match is skipped.
pub fn decode(xml: &str) -> HashMap<String, String> {
    CDATA_PAIR
        .captures_iter(xml)
        .map(|caps| (caps[2].to_string(), caps[1].to_string()))
        .collect()
}
