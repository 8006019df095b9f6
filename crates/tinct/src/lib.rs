#![forbid(unsafe_code)]

//! tinct public facade crate.
//!
//! tinct is a theme resolution and perceptual color generation engine: it
//! derives secondary colors by searching a Lab-space gradient for a WCAG
//! contrast or luminosity target, reconciles partial theme overrides against
//! built-in base themes by deep structural diffing, and flattens nested
//! settings trees into renderable CSS custom properties.
//!
//! This crate re-exports the common types from the internal crates and offers
//! a lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```
//! use tinct::prelude::*;
//!
//! // Derive an accent color: the spot on the primary → white gradient with
//! // a 4.5:1 contrast ratio against the primary.
//! let primary = Rgb::from_hex("#6644FF")?;
//! let white = Rgb::from_hex("#FFFFFF")?;
//! let accent = find_at_contrast_ratio(primary, white, ContrastSearch::default());
//! assert!((contrast_ratio(primary, accent) - 4.5).abs() < 0.05);
//!
//! // Resolve the built-in light theme into CSS variables.
//! let store = ThemeStore::with_builtin();
//! let css = store.theme_css("light", ThemeVersion::Base);
//! assert!(css.contains("--g-border-width: 2px;"));
//! # Ok::<(), tinct::Error>(())
//! ```

mod error;

pub use error::Error;

// --- Color re-exports ------------------------------------------------------

pub use tinct_color::{
    ContrastSearch, InvalidColorError, Lab, Rgb, contrast_ratio, find_at_contrast_ratio,
    find_at_relative_luminosity, mix, relative_luminance,
};

// --- Theme re-exports ------------------------------------------------------

pub use tinct_theme::{
    EditsByVariant, FieldEdits, SchemaViolationError, SettingsMap, SettingsValue, Theme,
    ThemeOverrides, ThemeSettings, ThemeStore, ThemeVersion, builtin_themes, deep_diff,
    deep_merge, parse_overrides, resolve_field_values, resolve_theme_variables, unflatten,
    validate_overrides,
};

// --- Prelude ---------------------------------------------------------------

/// Common imports for working with the theming engine.
pub mod prelude {
    pub use crate::Error;
    pub use tinct_color::{
        ContrastSearch, Rgb, contrast_ratio, find_at_contrast_ratio, find_at_relative_luminosity,
        mix,
    };
    pub use tinct_theme::{
        SettingsValue, Theme, ThemeSettings, ThemeStore, ThemeVersion, resolve_field_values,
        resolve_theme_variables,
    };
}
