#![forbid(unsafe_code)]

//! Boundary validation for submitted override JSON.
//!
//! Overrides arrive from the transport layer as arbitrary JSON. Before
//! anything is persisted or handed to the reconciler, the whole submission is
//! checked against the recognized settings schema: color slots must hold hex
//! colors or variable links, metric slots pixel amounts, font families
//! strings or string lists, and component subtrees only string-shaped leaves.
//! The first violation aborts validation and must block persistence entirely
//! — a submission is applied whole or not at all.
//!
//! Validation is deliberately shape-level. Which variant names are known is
//! the reconciler's concern; unknown variants pass through here and are
//! skipped there.

use serde_json::Value as Json;
use thiserror::Error;

use crate::store::ThemeOverrides;
use crate::value::{MAX_TREE_DEPTH, SettingsValue};

/// A submitted leaf or subtree that does not match the settings schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolationError {
    #[error("expected a settings object at {path:?}")]
    ExpectedObject { path: String },
    #[error("expected a hex color or variable link at {path:?}")]
    ExpectedColor { path: String },
    #[error("expected a pixel amount at {path:?}")]
    ExpectedPixels { path: String },
    #[error("expected a string or list of strings at {path:?}")]
    ExpectedString { path: String },
    #[error("unrecognized settings key at {path:?}")]
    UnknownKey { path: String },
    #[error("unsupported value at {path:?}: {reason}")]
    UnsupportedValue { path: String, reason: String },
    #[error("settings nested too deeply at {path:?}")]
    TooDeep { path: String },
}

/// Validate a full override submission: a mapping from variant name to a
/// partial settings tree.
pub fn validate_overrides(json: &Json) -> Result<(), SchemaViolationError> {
    let variants = as_object(json, "")?;
    for (variant, settings) in variants {
        validate_theme_settings(settings, variant)?;
    }
    Ok(())
}

/// Validate and convert a submission into typed per-variant override trees.
pub fn parse_overrides(json: Json) -> Result<ThemeOverrides, SchemaViolationError> {
    validate_overrides(&json)?;
    serde_json::from_value(json).map_err(|err| SchemaViolationError::UnsupportedValue {
        path: String::new(),
        reason: err.to_string(),
    })
}

/// Validate one variant's (possibly partial) settings tree.
pub fn validate_theme_settings(json: &Json, path: &str) -> Result<(), SchemaViolationError> {
    let sections = as_object(json, path)?;
    for (key, value) in sections {
        let section_path = join(path, key);
        match key.as_str() {
            "global" => validate_global(value, &section_path)?,
            "components" => validate_components(value, &section_path)?,
            _ => return Err(SchemaViolationError::UnknownKey { path: section_path }),
        }
    }
    Ok(())
}

fn validate_global(json: &Json, path: &str) -> Result<(), SchemaViolationError> {
    for (key, value) in as_object(json, path)? {
        let key_path = join(path, key);
        match key.as_str() {
            "font" => validate_font(value, &key_path)?,
            "color" => validate_color_roles(value, &key_path)?,
            "border" => validate_metrics(value, &key_path, &["width", "radius"])?,
            _ => return Err(SchemaViolationError::UnknownKey { path: key_path }),
        }
    }
    Ok(())
}

fn validate_font(json: &Json, path: &str) -> Result<(), SchemaViolationError> {
    for (key, value) in as_object(json, path)? {
        let key_path = join(path, key);
        match key.as_str() {
            "size" => expect_pixels(value, &key_path)?,
            "family" => {
                for (family, stack) in as_object(value, &key_path)? {
                    let family_path = join(&key_path, family);
                    match family.as_str() {
                        "sans" | "serif" | "mono" => expect_string_or_list(stack, &family_path)?,
                        _ => {
                            return Err(SchemaViolationError::UnknownKey { path: family_path });
                        }
                    }
                }
            }
            _ => return Err(SchemaViolationError::UnknownKey { path: key_path }),
        }
    }
    Ok(())
}

fn validate_color_roles(json: &Json, path: &str) -> Result<(), SchemaViolationError> {
    for (role, slots) in as_object(json, path)? {
        let role_path = join(path, role);
        let extra_slots: &[&str] = match role.as_str() {
            "primary" | "secondary" | "success" | "warning" | "danger" | "border" => &[],
            "foreground" => &["invert"],
            "background" => &["page", "invert"],
            _ => return Err(SchemaViolationError::UnknownKey { path: role_path }),
        };
        for (slot, value) in as_object(slots, &role_path)? {
            let slot_path = join(&role_path, slot);
            let known = matches!(slot.as_str(), "normal" | "accent" | "subtle")
                || extra_slots.contains(&slot.as_str());
            if !known {
                return Err(SchemaViolationError::UnknownKey { path: slot_path });
            }
            expect_color(value, &slot_path)?;
        }
    }
    Ok(())
}

fn validate_metrics(json: &Json, path: &str, keys: &[&str]) -> Result<(), SchemaViolationError> {
    for (key, value) in as_object(json, path)? {
        let key_path = join(path, key);
        if !keys.contains(&key.as_str()) {
            return Err(SchemaViolationError::UnknownKey { path: key_path });
        }
        expect_pixels(value, &key_path)?;
    }
    Ok(())
}

fn validate_components(json: &Json, path: &str) -> Result<(), SchemaViolationError> {
    for (category, subtree) in as_object(json, path)? {
        validate_sub_property(subtree, &join(path, category), 0)?;
    }
    Ok(())
}

// Component subtrees are open-ended: any key, string-shaped leaves, nested
// objects of the same shape.
fn validate_sub_property(json: &Json, path: &str, depth: usize) -> Result<(), SchemaViolationError> {
    if depth >= MAX_TREE_DEPTH {
        return Err(SchemaViolationError::TooDeep {
            path: path.to_string(),
        });
    }
    for (key, value) in as_object(json, path)? {
        let key_path = join(path, key);
        match value {
            Json::String(_) => {}
            Json::Object(_) => validate_sub_property(value, &key_path, depth + 1)?,
            other => {
                return Err(SchemaViolationError::UnsupportedValue {
                    path: key_path,
                    reason: json_kind(other).to_string(),
                });
            }
        }
    }
    Ok(())
}

// ── Leaf expectations ───────────────────────────────────────────────────

fn expect_color(json: &Json, path: &str) -> Result<(), SchemaViolationError> {
    match json {
        Json::String(s)
            if matches!(
                SettingsValue::classify(s),
                SettingsValue::Hex(_) | SettingsValue::Link(_)
            ) =>
        {
            Ok(())
        }
        _ => Err(SchemaViolationError::ExpectedColor {
            path: path.to_string(),
        }),
    }
}

fn expect_pixels(json: &Json, path: &str) -> Result<(), SchemaViolationError> {
    match json {
        // Editor number fields submit bare numbers; the flattener adds the unit.
        Json::Number(_) => Ok(()),
        Json::String(s) if matches!(SettingsValue::classify(s), SettingsValue::Pixels(_)) => Ok(()),
        _ => Err(SchemaViolationError::ExpectedPixels {
            path: path.to_string(),
        }),
    }
}

fn expect_string_or_list(json: &Json, path: &str) -> Result<(), SchemaViolationError> {
    let ok = match json {
        Json::String(_) => true,
        Json::Array(items) => items.iter().all(Json::is_string),
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(SchemaViolationError::ExpectedString {
            path: path.to_string(),
        })
    }
}

fn as_object<'a>(
    json: &'a Json,
    path: &str,
) -> Result<&'a serde_json::Map<String, Json>, SchemaViolationError> {
    json.as_object()
        .ok_or_else(|| SchemaViolationError::ExpectedObject {
            path: path.to_string(),
        })
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
