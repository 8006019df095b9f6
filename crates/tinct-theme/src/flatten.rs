#![forbid(unsafe_code)]

//! Flattening between nested settings trees and flat path tables.
//!
//! Two projections exist, with different join characters and different lossiness:
//!
//! - CSS variables: dash-joined paths, `global` under the `--g-` prefix and
//!   `components` under `--`, values rendered (numbers gain a `px` unit,
//!   lists become comma-joined fallback stacks).
//! - Field values: dot-joined paths over the full tree including section
//!   names, raw values, lists reduced to their first element so a
//!   single-valued form field has something to show. [`unflatten`] inverts
//!   this projection for trees without list reduction in play.

use indexmap::IndexMap;

use crate::value::{SettingsMap, SettingsValue, ThemeSettings};

/// Flatten one section into `path → leaf` entries, joined with `join`.
fn flatten_map(map: &SettingsMap, join: &str) -> IndexMap<String, SettingsValue> {
    let mut out = IndexMap::new();
    for (key, value) in map {
        match value {
            SettingsValue::Map(nested) => {
                for (sub_key, leaf) in flatten_map(nested, join) {
                    out.insert(format!("{key}{join}{sub_key}"), leaf);
                }
            }
            leaf => {
                out.insert(key.clone(), leaf.clone());
            }
        }
    }
    out
}

/// Render a leaf for CSS variable output.
///
/// Bare numbers pick up a `px` unit; lists join with commas (preserving
/// element order, which is what makes font-family fallback stacks work);
/// every string shape passes through unchanged.
fn render_css_value(value: &SettingsValue) -> String {
    match value {
        SettingsValue::Number(n) => format!("{}px", format_number(*n)),
        SettingsValue::List(items) => items
            .iter()
            .map(render_list_element)
            .collect::<Vec<_>>()
            .join(","),
        SettingsValue::Hex(s)
        | SettingsValue::Link(s)
        | SettingsValue::Pixels(s)
        | SettingsValue::Text(s) => s.clone(),
        // Flattening never emits map leaves.
        SettingsValue::Map(_) => String::new(),
    }
}

/// List elements render plain: no px suffix, nested lists splice inline.
fn render_list_element(value: &SettingsValue) -> String {
    match value {
        SettingsValue::Number(n) => format_number(*n),
        SettingsValue::List(items) => items
            .iter()
            .map(render_list_element)
            .collect::<Vec<_>>()
            .join(","),
        other => render_css_value(other),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Flatten a settings tree into ordered CSS custom-property declarations.
///
/// All `global` lines come first (prefix `--g-`, source key order), then all
/// `components` lines (prefix `--`). Line shape: `--g-border-width: 2px;`.
pub fn resolve_theme_variables(settings: &ThemeSettings) -> Vec<String> {
    let mut lines = Vec::new();
    for (path, value) in flatten_map(&settings.global, "-") {
        lines.push(format!("--g-{path}: {};", render_css_value(&value)));
    }
    for (path, value) in flatten_map(&settings.components, "-") {
        lines.push(format!("--{path}: {};", render_css_value(&value)));
    }
    lines
}

/// Flatten the full tree into a dot-joined `path → raw value` table for
/// form binding.
///
/// Section names are part of the path (`global.border.width`). List leaves
/// reduce to their first element — a lossy projection used only for display
/// and editing, never as the stored value; empty lists are omitted.
pub fn resolve_field_values(settings: &ThemeSettings) -> IndexMap<String, SettingsValue> {
    let mut out = IndexMap::new();
    for (path, value) in flatten_map(&settings.to_root(), ".") {
        match value {
            SettingsValue::List(items) => {
                if let Some(first) = items.into_iter().next() {
                    out.insert(path, first);
                }
            }
            leaf => {
                out.insert(path, leaf);
            }
        }
    }
    out
}

/// Rebuild a nested tree from dot-joined field paths.
///
/// Later entries win on conflict: a path that crosses an existing leaf
/// replaces that leaf with a nested map.
pub fn unflatten(fields: &IndexMap<String, SettingsValue>) -> SettingsMap {
    let mut root = SettingsMap::new();
    for (path, value) in fields {
        let mut segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        let Some(leaf_key) = segments.pop() else {
            continue;
        };

        let mut cursor = &mut root;
        for segment in segments {
            let entry = cursor
                .entry(segment.to_string())
                .or_insert_with(|| SettingsValue::Map(SettingsMap::new()));
            if !entry.is_map() {
                *entry = SettingsValue::Map(SettingsMap::new());
            }
            let SettingsValue::Map(next) = entry else {
                // Just ensured above.
                unreachable!("entry was ensured to be a map");
            };
            cursor = next;
        }
        cursor.insert(leaf_key.to_string(), value.clone());
    }
    root
}

// ── Tests ────────────────────────────────────────────────────────────────
