#![forbid(unsafe_code)]

//! Deep merge and structural diff over settings trees.
//!
//! The reconciliation cycle is: merge a candidate deviation over the base so
//! omitted keys default from base, then strip every leaf that still equals
//! the base value. What remains is the minimal override tree — possibly
//! empty, which is a meaningful result (an empty override is the delete
//! signal for a variant's stored overrides).
//!
//! Lists are atomic: a list leaf replaces the base list wholesale and two
//! lists compare element-for-element. Merging list elements positionally
//! would splice unrelated font stacks together.

use crate::value::{MAX_TREE_DEPTH, SettingsMap, SettingsValue, ThemeSettings};

/// Merge `overlay` on top of `base`.
///
/// Overlay leaves win on conflicting paths; nested maps merge recursively;
/// keys only present on one side are kept. Neither input is mutated.
pub fn deep_merge(base: &SettingsMap, overlay: &SettingsMap) -> SettingsMap {
    merge_at(base, overlay, 0)
}

fn merge_at(base: &SettingsMap, overlay: &SettingsMap, depth: usize) -> SettingsMap {
    let mut out = base.clone();
    for (key, value) in overlay {
        match (out.get_mut(key), value) {
            (Some(SettingsValue::Map(existing)), SettingsValue::Map(incoming))
                if depth < MAX_TREE_DEPTH =>
            {
                let merged = merge_at(existing, incoming, depth + 1);
                *existing = merged;
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}

/// Keep only the parts of `deviation` that genuinely differ from `base`.
///
/// The deviation is first merged over the base so missing keys default from
/// base and cannot register as differences. Keys absent from `base` are
/// dropped from the output — a diff never introduces paths the base theme
/// does not know about. Returns an empty map when nothing differs.
pub fn deep_diff(base: &SettingsMap, deviation: &SettingsMap) -> SettingsMap {
    diff_at(base, deviation, 0)
}

fn diff_at(base: &SettingsMap, deviation: &SettingsMap, depth: usize) -> SettingsMap {
    let merged = merge_at(base, deviation, depth);
    let mut out = SettingsMap::new();

    for (key, value) in &merged {
        let Some(base_value) = base.get(key) else {
            // Key unknown to the base theme: ignored.
            continue;
        };
        if base_value == value {
            continue;
        }
        match (base_value, value) {
            (SettingsValue::Map(base_child), SettingsValue::Map(dev_child))
                if depth < MAX_TREE_DEPTH =>
            {
                let child = diff_at(base_child, dev_child, depth + 1);
                // A subtree can differ only in keys the base doesn't have;
                // its diff is empty and carries nothing worth keeping.
                if !child.is_empty() {
                    out.insert(key.clone(), SettingsValue::Map(child));
                }
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }

    out
}

impl ThemeSettings {
    /// Merge an override tree over this tree, section by section.
    #[must_use]
    pub fn merge(&self, overlay: &ThemeSettings) -> ThemeSettings {
        ThemeSettings {
            global: deep_merge(&self.global, &overlay.global),
            components: deep_merge(&self.components, &overlay.components),
        }
    }

    /// Diff a deviation against this tree, section by section.
    #[must_use]
    pub fn diff(&self, deviation: &ThemeSettings) -> ThemeSettings {
        ThemeSettings {
            global: deep_diff(&self.global, &deviation.global),
            components: deep_diff(&self.components, &deviation.components),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> SettingsMap {
        match serde_json::from_str::<SettingsValue>(json) {
            Ok(SettingsValue::Map(map)) => map,
            other => panic!("fixture must be an object, got {other:?}"),
        }
    }

    #[test]
    fn merge_overlay_leaf_wins() {
        let base = tree(r##"{"border":{"width":2,"radius":6}}"##);
        let overlay = tree(r##"{"border":{"width":4}}"##);
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged, tree(r##"{"border":{"width":4,"radius":6}}"##));
    }

    #[test]
    fn merge_keeps_unrelated_keys_from_both_sides() {
        let base = tree(r##"{"a":1,"nested":{"x":1}}"##);
        let overlay = tree(r##"{"b":2,"nested":{"y":2}}"##);
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged, tree(r##"{"a":1,"nested":{"x":1,"y":2},"b":2}"##));
    }

    #[test]
    fn merge_replaces_lists_wholesale() {
        let base = tree(r##"{"font":{"sans":["Inter","Roboto","sans-serif"]}}"##);
        let overlay = tree(r##"{"font":{"sans":["Open Sans"]}}"##);
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged, tree(r##"{"font":{"sans":["Open Sans"]}}"##));
    }

    #[test]
    fn merge_map_over_leaf_replaces_leaf() {
        let base = tree(r##"{"color":"#ffffff"}"##);
        let overlay = tree(r##"{"color":{"normal":"#ffffff"}}"##);
        assert_eq!(deep_merge(&base, &overlay), overlay);
    }

    #[test]
    fn diff_identical_trees_is_empty() {
        let base = tree(r##"{"border":{"width":2}}"##);
        let deviation = tree(r##"{"border":{"width":2}}"##);
        assert!(deep_diff(&base, &deviation).is_empty());
    }

    #[test]
    fn diff_keeps_only_changed_leaves() {
        let base = tree(r##"{"border":{"width":2,"radius":6},"font":{"size":"16px"}}"##);
        let deviation = tree(r##"{"border":{"width":4,"radius":6}}"##);
        let diff = deep_diff(&base, &deviation);
        assert_eq!(diff, tree(r##"{"border":{"width":4}}"##));
    }

    #[test]
    fn diff_drops_keys_unknown_to_base() {
        let base = tree(r##"{"border":{"width":2}}"##);
        let deviation = tree(r##"{"border":{"width":4},"shadow":{"blur":8}}"##);
        let diff = deep_diff(&base, &deviation);
        assert_eq!(diff, tree(r##"{"border":{"width":4}}"##));
    }

    #[test]
    fn diff_drops_subtrees_that_only_add_unknown_keys() {
        let base = tree(r##"{"border":{"width":2}}"##);
        let deviation = tree(r##"{"border":{"width":2,"style":"dashed"}}"##);
        assert!(deep_diff(&base, &deviation).is_empty());
    }

    #[test]
    fn diff_missing_deviation_keys_default_from_base() {
        // The deviation says nothing about radius; merging over base keeps
        // the base value, so radius must not show up as a difference.
        let base = tree(r##"{"border":{"width":2,"radius":6}}"##);
        let deviation = tree(r##"{"border":{"width":4}}"##);
        let diff = deep_diff(&base, &deviation);
        assert_eq!(diff, tree(r##"{"border":{"width":4}}"##));
    }

    #[test]
    fn diff_detects_list_changes_atomically() {
        let base = tree(r##"{"font":{"sans":["Inter","sans-serif"]}}"##);
        let deviation = tree(r##"{"font":{"sans":["Open Sans"]}}"##);
        let diff = deep_diff(&base, &deviation);
        assert_eq!(diff, tree(r##"{"font":{"sans":["Open Sans"]}}"##));
    }

    #[test]
    fn merge_then_diff_round_trip() {
        let base = tree(
            r##"{"color":{"primary":{"normal":"#6644FF","accent":"#5138bc"}},"border":{"width":2}}"##,
        );
        let override_tree = tree(r##"{"color":{"primary":{"normal":"#FF0000"}}}"##);
        let merged = deep_merge(&base, &override_tree);
        let diff = deep_diff(&base, &merged);
        assert_eq!(diff, override_tree);
        assert_eq!(deep_merge(&base, &diff), merged);
    }

    #[test]
    fn settings_merge_and_diff_work_per_section() {
        let base = ThemeSettings {
            global: tree(r##"{"border":{"width":2}}"##),
            components: tree(r##"{"module":{"background":{"normal":"#18222F"}}}"##),
        };
        let deviation = ThemeSettings {
            global: tree(r##"{"border":{"width":4}}"##),
            components: tree(r##"{"module":{"background":{"normal":"#18222F"}}}"##),
        };
        let diff = base.diff(&deviation);
        assert_eq!(diff.global, tree(r##"{"border":{"width":4}}"##));
        assert!(diff.components.is_empty());
    }
}
