//! Parameter packages: the string-keyed binding blobs exchanged with the
//! native input subsystem.
//!
//! # Wire format
//!
//! ```text
//! engine:sdl,port:0,modifier:engine$0keyboard$1code$025
//! ```
//!
//! Pairs are `key:value`, separated by `,` and emitted in key order. Keys and
//! values are escaped so that nested packages can be stored as plain values:
//!
//! | Character | Escape |
//! |-----------|--------|
//! | `:`       | `$0`   |
//! | `,`       | `$1`   |
//! | `$`       | `$2`   |

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const KEY_VALUE_SEPARATOR: char = ':';
const PARAM_SEPARATOR: char = ',';
const ESCAPE_CHARACTER: char = '$';

/// Errors produced when parsing a serialized package strictly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// A `,`-separated part did not contain exactly one `:`.
    #[error("invalid key pair '{0}'")]
    InvalidKeyPair(String),
}

/// Ordered `field -> value` mapping describing a physical input binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParamPackage {
    data: BTreeMap<String, String>,
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            KEY_VALUE_SEPARATOR => out.push_str("$0"),
            PARAM_SEPARATOR => out.push_str("$1"),
            ESCAPE_CHARACTER => out.push_str("$2"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ESCAPE_CHARACTER {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('0') => {
                chars.next();
                out.push(KEY_VALUE_SEPARATOR);
            }
            Some('1') => {
                chars.next();
                out.push(PARAM_SEPARATOR);
            }
            Some('2') => {
                chars.next();
                out.push(ESCAPE_CHARACTER);
            }
            // Unknown escapes are kept verbatim
            _ => out.push(c),
        }
    }
    out
}

impl ParamPackage {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a serialized package.
    ///
    /// Malformed input is logged and yields an empty package, matching how
    /// the native input subsystem treats corrupt bindings. Use
    /// [`str::parse`] when the error needs to be observed.
    pub fn parse(serialized: &str) -> Self {
        match serialized.parse() {
            Ok(package) => package,
            Err(e) => {
                tracing::error!("Discarding parameter package '{}': {}", serialized, e);
                Self::default()
            }
        }
    }

    /// Serialize to the wire format. The empty package serializes to `""`.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.data {
            if !out.is_empty() {
                out.push(PARAM_SEPARATOR);
            }
            out.push_str(&escape(key));
            out.push(KEY_VALUE_SEPARATOR);
            out.push_str(&escape(value));
        }
        out
    }

    /// Get a string field, or `default` if absent.
    pub fn get(&self, field: &str, default: &str) -> String {
        self.data
            .get(field)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Get an integer field.
    ///
    /// Returns `default` when the field is absent or does not parse.
    pub fn get_int(&self, field: &str, default: i32) -> i32 {
        let Some(raw) = self.data.get(field) else {
            return default;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            tracing::error!("Field '{}' is not an integer: '{}'", field, raw);
            default
        })
    }

    /// Get a float field.
    ///
    /// Returns `default` when the field is absent or does not parse.
    pub fn get_float(&self, field: &str, default: f32) -> f32 {
        let Some(raw) = self.data.get(field) else {
            return default;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            tracing::error!("Field '{}' is not a float: '{}'", field, raw);
            default
        })
    }

    /// Get a boolean field (`1`/`0`, also accepts `true`/`false`).
    pub fn get_bool(&self, field: &str, default: bool) -> bool {
        match self.data.get(field).map(String::as_str) {
            None => default,
            Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(raw) => {
                tracing::error!("Field '{}' is not a boolean: '{}'", field, raw);
                default
            }
        }
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.data.insert(field.into(), value.into());
    }

    pub fn set_int(&mut self, field: impl Into<String>, value: i32) {
        self.set(field, value.to_string());
    }

    pub fn set_float(&mut self, field: impl Into<String>, value: f32) {
        self.set(field, value.to_string());
    }

    pub fn set_bool(&mut self, field: impl Into<String>, value: bool) {
        self.set(field, if value { "1" } else { "0" });
    }

    pub fn has(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }

    /// Remove a field, returning its previous value.
    pub fn erase(&mut self, field: &str) -> Option<String> {
        self.data.remove(field)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Iterate over `(field, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for ParamPackage {
    type Err = ParamError;

    fn from_str(serialized: &str) -> Result<Self, Self::Err> {
        let mut data = BTreeMap::new();
        if serialized.is_empty() {
            return Ok(Self { data });
        }

        for pair in serialized.split(PARAM_SEPARATOR) {
            let mut parts = pair.split(KEY_VALUE_SEPARATOR);
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(ParamError::InvalidKeyPair(pair.to_string()));
            };
            data.insert(unescape(key), unescape(value));
        }

        Ok(Self { data })
    }
}

impl fmt::Display for ParamPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<K, V> FromIterator<(K, V)> for ParamPackage
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for ParamPackage {
    fn from(data: BTreeMap<String, String>) -> Self {
        Self { data }
    }
}

impl From<ParamPackage> for BTreeMap<String, String> {
    fn from(package: ParamPackage) -> Self {
        package.data
    }
}

// Packages are stored in config files in their wire form.
impl Serialize for ParamPackage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ParamPackage::serialize(self))
    }
}

impl<'de> Deserialize<'de> for ParamPackage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_package_serializes_to_empty_string() {
        assert_eq!(ParamPackage::new().serialize(), "");
        assert!(ParamPackage::parse("").is_empty());
    }

    #[test]
    fn serialize_orders_fields_by_key() {
        let package: ParamPackage = [("port", "0"), ("engine", "sdl"), ("axis_x", "1")]
            .into_iter()
            .collect();
        assert_eq!(package.serialize(), "axis_x:1,engine:sdl,port:0");
    }

    #[test]
    fn nested_package_is_escaped() {
        let inner: ParamPackage = [("engine", "keyboard"), ("code", "25")].into_iter().collect();
        let mut outer = ParamPackage::new();
        outer.set("engine", "analog_from_button");
        outer.set("modifier", inner.serialize());

        assert_eq!(
            outer.serialize(),
            "engine:analog_from_button,modifier:code$025$1engine$0keyboard"
        );

        let parsed = ParamPackage::parse(&outer.serialize());
        assert_eq!(ParamPackage::parse(&parsed.get("modifier", "")), inner);
    }

    #[test]
    fn escape_character_roundtrips() {
        let mut package = ParamPackage::new();
        package.set("price", "$2 is not an escape");
        let parsed = ParamPackage::parse(&package.serialize());
        assert_eq!(parsed.get("price", ""), "$2 is not an escape");
    }

    #[test]
    fn unknown_escape_kept_literally() {
        let package = ParamPackage::parse("key:a$9b$");
        assert_eq!(package.get("key", ""), "a$9b$");
    }

    #[test]
    fn malformed_input_yields_empty_package() {
        assert!(ParamPackage::parse("engine:sdl,garbage").is_empty());
        assert!(ParamPackage::parse("a:b:c").is_empty());
    }

    #[test]
    fn strict_parse_reports_bad_pair() {
        let err = "engine:sdl,garbage".parse::<ParamPackage>().unwrap_err();
        assert_eq!(err, ParamError::InvalidKeyPair("garbage".to_string()));
    }

    #[test]
    fn get_returns_default_when_absent() {
        let package = ParamPackage::parse("engine:sdl");
        assert_eq!(package.get("port", "7"), "7");
        assert_eq!(package.get("engine", "none"), "sdl");
    }

    #[test]
    fn numeric_getters_fall_back_on_garbage() {
        let package = ParamPackage::parse("axis:two,threshold:0.5,port:3");
        assert_eq!(package.get_int("axis", -1), -1);
        assert_eq!(package.get_int("port", -1), 3);
        assert!((package.get_float("threshold", 0.0) - 0.5).abs() < f32::EPSILON);
        assert!((package.get_float("axis", 1.5) - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn bool_accessors() {
        let mut package = ParamPackage::new();
        package.set_bool("toggle", true);
        package.set_bool("turbo", false);
        assert_eq!(package.get("toggle", ""), "1");
        assert!(package.get_bool("toggle", false));
        assert!(!package.get_bool("turbo", true));
        assert!(package.get_bool("missing", true));

        let package = ParamPackage::parse("inverted:true");
        assert!(package.get_bool("inverted", false));
    }

    #[test]
    fn erase_and_clear() {
        let mut package = ParamPackage::parse("a:1,b:2");
        assert_eq!(package.erase("a").as_deref(), Some("1"));
        assert!(!package.has("a"));
        assert_eq!(package.len(), 1);
        package.clear();
        assert!(package.is_empty());
    }

    #[test]
    fn serde_uses_wire_form() {
        let package = ParamPackage::parse("engine:sdl,port:0");
        let json = serde_json::to_string(&package).unwrap();
        assert_eq!(json, "\"engine:sdl,port:0\"");
        let back: ParamPackage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, package);
    }

    #[test]
    fn serde_rejects_malformed_package() {
        assert!(serde_json::from_str::<ParamPackage>("\"nope\"").is_err());
    }
}
