#![forbid(unsafe_code)]

//! The settings tree and its leaf classification.
//!
//! A theme's settings form an arbitrarily nested mapping whose leaves are a
//! small closed set of shapes: hex colors, CSS variable references, pixel
//! quantities, plain strings, bare numbers, and lists of those. Modeling the
//! tree as a tagged sum type (rather than raw JSON) means malformed leaves
//! are caught at the deserialization boundary instead of deep inside the
//! reconciler.
//!
//! String leaves are classified on entry: `#6644FF` becomes [`SettingsValue::Hex`],
//! `var(--g-color-primary-normal)` becomes [`SettingsValue::Link`], `16px`
//! becomes [`SettingsValue::Pixels`], anything else [`SettingsValue::Text`].
//! Classification is deterministic, so serialization round-trips the original
//! string exactly.

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex_lite::Regex;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// An insertion-ordered settings mapping.
///
/// Key order is load-bearing: flattened CSS variables must come out in stable
/// source order across edit/merge/reapply cycles.
pub type SettingsMap = IndexMap<String, SettingsValue>;

/// Nesting depth cap for settings trees.
///
/// Keys are plain identifiers so cycles cannot occur, but recursion over
/// hostile input is still bounded: deeper subtrees are compared and copied
/// atomically by the reconciler, and rejected by the boundary validator.
pub(crate) const MAX_TREE_DEPTH: usize = 64;

/// A single value in a settings tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsValue {
    /// Hex color, e.g. `#6644FF`.
    Hex(String),
    /// CSS variable reference, e.g. `var(--g-color-primary-normal)`.
    Link(String),
    /// Pixel quantity carrying its unit, e.g. `16px`.
    Pixels(String),
    /// Any other string.
    Text(String),
    /// Bare number; rendered with a `px` suffix in CSS variable output.
    Number(f64),
    /// Ordered list, e.g. a font-family fallback stack.
    List(Vec<SettingsValue>),
    /// Nested settings.
    Map(SettingsMap),
}

// Leaf patterns matching the recognized settings schema.
fn hex_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#(([\da-fA-F]{3}){1,2}|([\da-fA-F]{4}){1,2})$").unwrap())
}

fn link_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^var\(\s*--[-\w]+\s*\)$").unwrap())
}

fn pixels_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d*px$").unwrap())
}

impl SettingsValue {
    /// Classify a string leaf into hex / link / pixels / plain text.
    pub fn classify(input: &str) -> Self {
        let trimmed = input.trim();
        if hex_pattern().is_match(trimmed) {
            Self::Hex(input.to_string())
        } else if link_pattern().is_match(trimmed) {
            Self::Link(input.to_string())
        } else if pixels_pattern().is_match(trimmed) {
            Self::Pixels(input.to_string())
        } else {
            Self::Text(input.to_string())
        }
    }

    /// The nested map, if this value is one.
    pub fn as_map(&self) -> Option<&SettingsMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// The underlying string of a string-shaped leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Hex(s) | Self::Link(s) | Self::Pixels(s) | Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for SettingsValue {
    fn from(value: &str) -> Self {
        Self::classify(value)
    }
}

impl From<String> for SettingsValue {
    fn from(value: String) -> Self {
        Self::classify(&value)
    }
}

impl From<f64> for SettingsValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for SettingsValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Vec<&str>> for SettingsValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(SettingsValue::from).collect())
    }
}

impl From<SettingsMap> for SettingsValue {
    fn from(map: SettingsMap) -> Self {
        Self::Map(map)
    }
}

impl Serialize for SettingsValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Hex(s) | Self::Link(s) | Self::Pixels(s) | Self::Text(s) => {
                serializer.serialize_str(s)
            }
            Self::Number(n) => {
                // Integral values serialize without a fraction so trees
                // round-trip byte-for-byte through JSON.
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for SettingsValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = SettingsValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number, list, or nested settings object")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(SettingsValue::classify(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(SettingsValue::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(SettingsValue::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(SettingsValue::Number(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Err(E::invalid_type(de::Unexpected::Bool(v), &self))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Err(E::invalid_type(de::Unexpected::Unit, &self))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(SettingsValue::List(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = SettingsMap::new();
                while let Some((key, value)) = access.next_entry::<String, SettingsValue>()? {
                    map.insert(key, value);
                }
                Ok(SettingsValue::Map(map))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// The settings tree of a theme: global knobs plus per-component-category
/// overrides. Both sections default to empty, which is how partial override
/// trees represent "nothing changed here".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub global: SettingsMap,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub components: SettingsMap,
}

impl ThemeSettings {
    /// True when neither section holds any settings.
    ///
    /// An empty tree serializes as `{}`, which downstream storage treats as
    /// the delete signal for a variant's overrides.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.components.is_empty()
    }

    /// View the tree as a single root map keyed by section name.
    ///
    /// Empty sections are omitted, mirroring the serialized form.
    pub fn to_root(&self) -> SettingsMap {
        let mut root = SettingsMap::new();
        if !self.global.is_empty() {
            root.insert("global".to_string(), SettingsValue::Map(self.global.clone()));
        }
        if !self.components.is_empty() {
            root.insert(
                "components".to_string(),
                SettingsValue::Map(self.components.clone()),
            );
        }
        root
    }

    /// Rebuild a tree from a root map keyed by section name.
    ///
    /// Top-level keys other than `global` and `components` are dropped; the
    /// reconciler would discard them against any base theme anyway.
    pub fn from_root(mut root: SettingsMap) -> Self {
        let section = |value: Option<SettingsValue>| match value {
            Some(SettingsValue::Map(map)) => map,
            _ => SettingsMap::new(),
        };
        Self {
            global: section(root.shift_remove("global")),
            components: section(root.shift_remove("components")),
        }
    }
}

/// A named theme: display metadata plus its settings tree.
///
/// Base themes are immutable process-wide constants; overrides are partial
/// [`ThemeSettings`] owned by the editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub settings: ThemeSettings,
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_hex() {
        assert_eq!(
            SettingsValue::classify("#6644FF"),
            SettingsValue::Hex("#6644FF".into())
        );
        assert_eq!(
            SettingsValue::classify("#f0c"),
            SettingsValue::Hex("#f0c".into())
        );
        assert_eq!(
            SettingsValue::classify("#6644FF80"),
            SettingsValue::Hex("#6644FF80".into())
        );
    }

    #[test]
    fn classify_link() {
        assert_eq!(
            SettingsValue::classify("var(--g-color-primary-normal)"),
            SettingsValue::Link("var(--g-color-primary-normal)".into())
        );
        assert_eq!(
            SettingsValue::classify("var( --module-background )"),
            SettingsValue::Link("var( --module-background )".into())
        );
    }

    #[test]
    fn classify_pixels() {
        assert_eq!(
            SettingsValue::classify("16px"),
            SettingsValue::Pixels("16px".into())
        );
    }

    #[test]
    fn classify_plain_text() {
        assert_eq!(
            SettingsValue::classify("Fira Mono"),
            SettingsValue::Text("Fira Mono".into())
        );
        // Near misses stay plain text.
        assert_eq!(
            SettingsValue::classify("#6644F"),
            SettingsValue::Text("#6644F".into())
        );
        assert_eq!(
            SettingsValue::classify("var(main)"),
            SettingsValue::Text("var(main)".into())
        );
        assert_eq!(
            SettingsValue::classify("16 px"),
            SettingsValue::Text("16 px".into())
        );
    }

    #[test]
    fn deserialize_classifies_leaves() {
        let settings: ThemeSettings = serde_json::from_str(
            r##"{
                "global": {
                    "border": { "width": 2 },
                    "color": { "primary": { "normal": "#6644FF" } },
                    "font": { "size": "16px", "family": { "sans": ["Inter", "sans-serif"] } }
                }
            }"##,
        )
        .unwrap();

        let border = settings.global["border"].as_map().unwrap();
        assert_eq!(border["width"], SettingsValue::Number(2.0));

        let color = settings.global["color"].as_map().unwrap();
        let primary = color["primary"].as_map().unwrap();
        assert_eq!(primary["normal"], SettingsValue::Hex("#6644FF".into()));

        let font = settings.global["font"].as_map().unwrap();
        assert_eq!(font["size"], SettingsValue::Pixels("16px".into()));
    }

    #[test]
    fn deserialize_rejects_booleans_and_null() {
        assert!(serde_json::from_str::<SettingsValue>("true").is_err());
        assert!(serde_json::from_str::<SettingsValue>("null").is_err());
    }

    #[test]
    fn json_round_trip_preserves_order_and_integers() {
        let source = r##"{"global":{"border":{"width":2,"radius":6},"color":{"primary":{"normal":"#6644FF"}}}}"##;
        let settings: ThemeSettings = serde_json::from_str(source).unwrap();
        assert_eq!(serde_json::to_string(&settings).unwrap(), source);
    }

    #[test]
    fn empty_settings_serialize_as_empty_object() {
        let settings = ThemeSettings::default();
        assert!(settings.is_empty());
        assert_eq!(serde_json::to_string(&settings).unwrap(), "{}");
    }

    #[test]
    fn root_round_trip() {
        let settings: ThemeSettings = serde_json::from_str(
            r##"{"global":{"border":{"width":2}},"components":{"module":{"background":{"normal":"#18222F"}}}}"##,
        )
        .unwrap();
        assert_eq!(ThemeSettings::from_root(settings.to_root()), settings);
    }

    #[test]
    fn from_root_drops_unknown_sections() {
        let mut root = SettingsMap::new();
        root.insert("globalx".into(), SettingsValue::Map(SettingsMap::new()));
        assert!(ThemeSettings::from_root(root).is_empty());
    }
}
