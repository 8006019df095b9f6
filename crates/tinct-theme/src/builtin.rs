#![forbid(unsafe_code)]

//! Built-in base themes.
//!
//! The registry ships one light and one dark variant. Base themes are
//! process-wide read-only constants: overrides are diffed against them, and
//! an override tree never contains a path the base theme lacks.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::value::{SettingsMap, SettingsValue, Theme, ThemeSettings};

macro_rules! settings {
    { $( $key:literal : $value:expr ),* $(,)? } => {{
        let mut map = SettingsMap::new();
        $( map.insert($key.to_string(), SettingsValue::from($value)); )*
        map
    }};
}

/// The built-in base theme registry, keyed by variant name.
pub fn builtin_themes() -> &'static IndexMap<String, Theme> {
    static THEMES: OnceLock<IndexMap<String, Theme>> = OnceLock::new();
    THEMES.get_or_init(|| {
        let mut themes = IndexMap::new();
        themes.insert("light".to_string(), light_theme());
        themes.insert("dark".to_string(), dark_theme());
        themes
    })
}

fn font_families() -> SettingsMap {
    settings! {
        "sans": vec![
            "Inter",
            "-apple-system",
            "BlinkMacSystemFont",
            "Segoe UI",
            "Roboto",
            "Helvetica",
            "Arial",
            "sans-serif",
            "Apple Color Emoji",
            "Segoe UI Emoji",
            "Segoe UI Symbol",
        ],
        "serif": vec!["Merriweather", "serif"],
        "mono": vec!["Fira Mono", "monospace", "sans-serif"],
    }
}

fn light_theme() -> Theme {
    Theme {
        name: "Tinct Light".to_string(),
        author: Some("tinct".to_string()),
        description: Some("Primary light tinct theme".to_string()),
        settings: ThemeSettings {
            global: settings! {
                "font": settings! { "family": font_families() },
                "border": settings! { "width": 2, "radius": 6 },
                "color": settings! {
                    "primary": settings! {
                        "normal": "#6644FF",
                        "accent": "#5138bc",
                        "subtle": "#f4ecff",
                    },
                    "secondary": settings! {
                        "normal": "#FF99DD",
                        "accent": "#d280b8",
                        "subtle": "#ffe9f8",
                    },
                    "success": settings! {
                        "normal": "#2ECDA7",
                        "accent": "#2ea98b",
                        "subtle": "#dbf5ea",
                    },
                    "warning": settings! {
                        "normal": "#FBC54F",
                        "accent": "#d1a447",
                        "subtle": "#ffedcc",
                    },
                    "danger": settings! {
                        "normal": "#E35169",
                        "accent": "#b34556",
                        "subtle": "#ffeaeb",
                    },
                    "border": settings! {
                        "normal": "#D3DAE4",
                        "accent": "#A2B5CD",
                        "subtle": "#F0F4F9",
                    },
                    "background": settings! {
                        "normal": "#F0F4F9",
                        "accent": "#E4EAF1",
                        "subtle": "#F7FAFC",
                        "page": "#FFFFFF",
                        "invert": "#0D1117",
                    },
                    "foreground": settings! {
                        "normal": "#4F5464",
                        "accent": "#172940",
                        "subtle": "#A2B5CD",
                        "invert": "#FFFFFF",
                    },
                },
            },
            // Component categories grow over time; the module bar is the one
            // surface themed so far.
            components: settings! {
                "module": settings! {
                    "background": settings! {
                        "normal": "#18222F",
                        "hover": "#18222F",
                        "active": "#F0F4F9",
                    },
                    "foreground": settings! {
                        "normal": "#8196B1",
                        "hover": "#FFFFFF",
                        "active": "#172940",
                    },
                },
            },
        },
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Tinct Dark".to_string(),
        author: Some("tinct".to_string()),
        description: Some("Primary dark tinct theme".to_string()),
        settings: ThemeSettings {
            global: settings! {
                "font": settings! { "family": font_families() },
                "border": settings! { "width": 2, "radius": 6 },
                "color": settings! {
                    "primary": settings! {
                        "normal": "#8866ff",
                        "accent": "#A583FF",
                        "subtle": "#201e3c",
                    },
                    "secondary": settings! {
                        "normal": "#FF99DD",
                        "accent": "#FFC7EC",
                        "subtle": "#261f2c",
                    },
                    "success": settings! {
                        "normal": "#2ECDA7",
                        "accent": "#96E3C8",
                        "subtle": "#102526",
                    },
                    "warning": settings! {
                        "normal": "#FBC54F",
                        "accent": "#FFE9C4",
                        "subtle": "#26241d",
                    },
                    "danger": settings! {
                        "normal": "#E35169",
                        "accent": "#ED7783",
                        "subtle": "#2f1b24",
                    },
                    "border": settings! {
                        "normal": "#30363D",
                        "accent": "#484f58",
                        "subtle": "#21262D",
                    },
                    "background": settings! {
                        "normal": "#21262E",
                        "accent": "#30363D",
                        "subtle": "#161B22",
                        "page": "#0D1117",
                        "invert": "#FFFFFF",
                    },
                    "foreground": settings! {
                        "normal": "#C9D1D9",
                        "accent": "#F0F6FC",
                        "subtle": "#666672",
                        "invert": "#0D1117",
                    },
                },
            },
            components: settings! {
                "module": settings! {
                    "background": settings! {
                        "normal": "#0D1117",
                        "hover": "#0D1117",
                        "active": "#21262E",
                    },
                    "foreground": settings! {
                        "normal": "#666672",
                        "hover": "#FFFFFF",
                        "active": "#F0F6FC",
                    },
                },
            },
        },
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_theme_settings;

    #[test]
    fn registry_holds_light_and_dark() {
        let themes = builtin_themes();
        assert_eq!(
            themes.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["light", "dark"]
        );
        assert_eq!(themes["light"].name, "Tinct Light");
        assert_eq!(themes["dark"].name, "Tinct Dark");
    }

    #[test]
    fn builtin_settings_pass_their_own_schema() {
        for (variant, theme) in builtin_themes() {
            let json = serde_json::to_value(&theme.settings).unwrap();
            assert_eq!(
                validate_theme_settings(&json, variant),
                Ok(()),
                "schema rejects builtin {variant} theme"
            );
        }
    }

    #[test]
    fn color_leaves_classify_as_hex() {
        let theme = &builtin_themes()["light"];
        let color = theme.settings.global["color"].as_map().unwrap();
        let primary = color["primary"].as_map().unwrap();
        assert_eq!(primary["normal"], SettingsValue::Hex("#6644FF".into()));
    }

    #[test]
    fn variants_share_structure() {
        // Every path in dark exists in light and vice versa; overrides diffed
        // against one variant stay addressable in the other.
        let light = &builtin_themes()["light"].settings;
        let dark = &builtin_themes()["dark"].settings;
        let light_fields = crate::flatten::resolve_field_values(light);
        let dark_fields = crate::flatten::resolve_field_values(dark);
        assert_eq!(
            light_fields.keys().collect::<Vec<_>>(),
            dark_fields.keys().collect::<Vec<_>>()
        );
    }
}
