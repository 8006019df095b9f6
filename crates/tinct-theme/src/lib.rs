#![forbid(unsafe_code)]

//! Theme settings trees for the tinct theming engine.
//!
//! # Role in tinct
//! `tinct-theme` owns the settings data model and everything that moves
//! between its shapes: deep merge and structural diff for override
//! reconciliation, flattening into CSS custom properties and editable field
//! tables, boundary schema validation, and the store that composes base
//! themes with overrides.
//!
//! # This crate provides
//! - [`SettingsValue`] / [`ThemeSettings`] / [`Theme`], the typed tree.
//! - [`deep_merge`] and [`deep_diff`] with exact partial-override semantics
//!   (including "empty diff means delete").
//! - [`resolve_theme_variables`], [`resolve_field_values`], and [`unflatten`].
//! - [`validate_overrides`] / [`parse_overrides`] for the JSON boundary.
//! - [`ThemeStore`] with the built-in light/dark registry.
//!
//! # How it fits in the system
//! The surrounding application loads persisted overrides into a
//! [`ThemeStore`], renders CSS from it, and routes editor submissions through
//! [`ThemeStore::update_theme_overrides`] to get back the diff set to
//! persist. All operations are pure, synchronous tree computations.

/// Built-in light/dark base themes.
pub mod builtin;
/// Deep merge and structural diff.
pub mod diff;
/// Tree ⇄ flat-path conversions and CSS variable rendering.
pub mod flatten;
/// Boundary validation of submitted override JSON.
pub mod schema;
/// Base registry + overrides composition.
pub mod store;
/// The settings tree and leaf classification.
pub mod value;

pub use builtin::builtin_themes;
pub use diff::{deep_diff, deep_merge};
pub use flatten::{resolve_field_values, resolve_theme_variables, unflatten};
pub use schema::{SchemaViolationError, parse_overrides, validate_overrides};
pub use store::{EditsByVariant, FieldEdits, ThemeOverrides, ThemeStore, ThemeVersion};
pub use value::{SettingsMap, SettingsValue, Theme, ThemeSettings};
