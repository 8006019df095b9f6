//! End-to-end editor cycle: JSON submission → boundary validation → override
//! reconciliation → CSS output, across repeated edit/merge/reapply rounds.

use serde_json::json;
use tinct::{
    ContrastSearch, EditsByVariant, FieldEdits, Rgb, SettingsValue, ThemeStore, ThemeVersion,
    contrast_ratio, find_at_contrast_ratio, parse_overrides, resolve_field_values,
};

fn field_edits(entries: &[(&str, SettingsValue)]) -> EditsByVariant {
    let mut edits = FieldEdits::new();
    for (path, value) in entries {
        edits.insert(path.to_string(), value.clone());
    }
    let mut all = EditsByVariant::new();
    all.insert("light".to_string(), edits);
    all
}

#[test]
fn edit_persist_rehydrate_reapply_is_stable() {
    let mut store = ThemeStore::with_builtin();

    // Round 1: the editor changes the primary color and border width.
    let changes = store.update_theme_overrides(&field_edits(&[
        (
            "global.color.primary.normal",
            SettingsValue::Hex("#FF0000".into()),
        ),
        ("global.border.width", SettingsValue::Number(4.0)),
    ]));

    // "Persist" the diff through its JSON transport shape and rehydrate.
    let wire = serde_json::to_value(&changes).unwrap();
    let rehydrated = parse_overrides(wire).unwrap();
    assert_eq!(rehydrated, changes);
    store.set_overrides(rehydrated);

    // Round 2: resubmitting the exact same edits must be a fixed point.
    let again = store.update_theme_overrides(&field_edits(&[
        (
            "global.color.primary.normal",
            SettingsValue::Hex("#FF0000".into()),
        ),
        ("global.border.width", SettingsValue::Number(4.0)),
    ]));
    assert_eq!(again, store_overrides(&store));

    // Round 3: reverting the border width to its base value drops it from
    // the diff while the color override survives.
    let reverted = store.update_theme_overrides(&field_edits(&[(
        "global.border.width",
        SettingsValue::Number(2.0),
    )]));
    let light = &reverted["light"];
    assert!(!light.global.contains_key("border"));
    let color = light.global["color"].as_map().unwrap();
    let primary = color["primary"].as_map().unwrap();
    assert_eq!(primary["normal"], SettingsValue::Hex("#FF0000".into()));
}

fn store_overrides(store: &ThemeStore) -> tinct::ThemeOverrides {
    let mut out = tinct::ThemeOverrides::new();
    if let Some(light) = store.overrides("light") {
        out.insert("light".to_string(), light.clone());
    }
    out
}

#[test]
fn reverting_everything_produces_the_delete_signal() {
    let mut store = ThemeStore::with_builtin();
    let changes = store.update_theme_overrides(&field_edits(&[(
        "global.border.width",
        SettingsValue::Number(4.0),
    )]));
    store.set_overrides(changes);

    let reverted = store.update_theme_overrides(&field_edits(&[(
        "global.border.width",
        SettingsValue::Number(2.0),
    )]));
    assert!(reverted["light"].is_empty());
    assert_eq!(serde_json::to_string(&reverted["light"]).unwrap(), "{}");
}

#[test]
fn merged_theme_drives_css_and_form_fields() {
    let mut store = ThemeStore::with_builtin();
    let changes = store.update_theme_overrides(&field_edits(&[(
        "global.color.primary.normal",
        SettingsValue::Hex("#FF0000".into()),
    )]));
    store.set_overrides(changes);

    let merged = store.merged_theme("light").unwrap();
    let fields = resolve_field_values(&merged);
    assert_eq!(
        fields["global.color.primary.normal"],
        SettingsValue::Hex("#FF0000".into())
    );
    // Untouched paths still resolve from base.
    assert_eq!(
        fields["global.border.radius"],
        SettingsValue::Number(6.0)
    );

    let css = store.theme_css("light", ThemeVersion::Overrides);
    assert!(css.contains("body.light {"));
    assert!(css.contains("--g-color-primary-normal: #FF0000;"));
    assert!(css.contains("@media (prefers-color-scheme: light)"));
}

#[test]
fn malformed_submission_blocks_the_whole_update() {
    let wire = json!({
        "light": { "global": { "border": { "width": 4 } } },
        "dark": { "global": { "color": { "primary": { "normal": "red" } } } }
    });
    // One bad leaf anywhere rejects the whole submission; the valid light
    // entry must not be applied on its own.
    assert!(parse_overrides(wire).is_err());
}

#[test]
fn generated_accent_color_meets_its_contrast_target() {
    // The editor derives accent colors against the page/invert backgrounds.
    let store = ThemeStore::with_builtin();
    let fields = resolve_field_values(&store.base_theme("light").unwrap().settings);

    let primary = match &fields["global.color.primary.normal"] {
        SettingsValue::Hex(hex) => Rgb::from_hex(hex).unwrap(),
        other => panic!("primary slot should be hex, got {other:?}"),
    };
    let page = match &fields["global.color.background.page"] {
        SettingsValue::Hex(hex) => Rgb::from_hex(hex).unwrap(),
        other => panic!("page slot should be hex, got {other:?}"),
    };

    let subtle = find_at_contrast_ratio(page, primary, ContrastSearch::with_contrast(4.7));
    let ratio = contrast_ratio(page, subtle);
    let max = contrast_ratio(page, primary);
    assert!(ratio >= 1.0 && ratio <= max);
    assert!((ratio - 4.7).abs() < 0.1 || max < 4.9, "ratio {ratio}, max {max}");
}
