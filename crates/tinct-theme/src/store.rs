#![forbid(unsafe_code)]

//! The theme store: base registry + current overrides, and the operations
//! the presentation and editing layers drive.
//!
//! Rendering flows one way: base theme + overrides → merged tree → flattened
//! variables → CSS text. Editing flows the other: flat field edits →
//! unflatten → merge into the held overrides → diff against base → a fresh
//! override set for the caller to persist.
//!
//! [`ThemeStore::update_theme_overrides`] is deliberately a read-merge-diff-
//! return unit that never mutates the store: persisting the result and
//! feeding it back via [`ThemeStore::set_overrides`] is the caller's job, so
//! external locking or optimistic concurrency can wrap the persist step.

use indexmap::IndexMap;

use crate::builtin::builtin_themes;
use crate::flatten::{resolve_theme_variables, unflatten};
use crate::value::{SettingsValue, Theme, ThemeSettings};

/// Per-variant override trees, keyed by variant name.
///
/// Each entry holds only leaves that differ from that variant's base theme.
/// An empty tree is a meaningful value: persisted as `{}`, it deletes the
/// variant's stored overrides.
pub type ThemeOverrides = IndexMap<String, ThemeSettings>;

/// Flat field edits for one variant: dot-joined path → new value.
pub type FieldEdits = IndexMap<String, SettingsValue>;

/// A full editor submission: per-variant flat field edits.
pub type EditsByVariant = IndexMap<String, FieldEdits>;

/// Which settings tree a render should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVersion {
    /// The variant's full base theme.
    #[default]
    Base,
    /// Only the override tree, for layering on top of base styles.
    Overrides,
}

/// Base themes plus the overrides currently in effect.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    base: IndexMap<String, Theme>,
    overrides: ThemeOverrides,
}

impl ThemeStore {
    /// A store over an explicit base registry, with no overrides.
    pub fn new(base: IndexMap<String, Theme>) -> Self {
        Self {
            base,
            overrides: ThemeOverrides::new(),
        }
    }

    /// A store over the built-in light/dark registry.
    pub fn with_builtin() -> Self {
        Self::new(builtin_themes().clone())
    }

    /// The base theme for a variant, if the registry knows it.
    pub fn base_theme(&self, variant: &str) -> Option<&Theme> {
        self.base.get(variant)
    }

    /// The override tree currently held for a variant.
    pub fn overrides(&self, variant: &str) -> Option<&ThemeSettings> {
        self.overrides.get(variant)
    }

    /// Replace the held override set, e.g. after hydrating from storage or
    /// persisting the result of [`Self::update_theme_overrides`].
    pub fn set_overrides(&mut self, overrides: ThemeOverrides) {
        self.overrides = overrides;
    }

    /// The variant's effective settings: base deep-merged with its overrides.
    ///
    /// Base structure is the foundation; override paths win where present and
    /// fall back to base everywhere else. Returns `None` for unknown variants.
    pub fn merged_theme(&self, variant: &str) -> Option<ThemeSettings> {
        let base = &self.base.get(variant)?.settings;
        Some(match self.overrides.get(variant) {
            Some(overrides) => base.merge(overrides),
            None => base.clone(),
        })
    }

    /// The effective theme's ordered variable list: base merged with
    /// overrides, then flattened.
    pub fn merged_variables(&self, variant: &str) -> Option<Vec<String>> {
        self.merged_theme(variant)
            .map(|settings| resolve_theme_variables(&settings))
    }

    /// Render a variant's settings as CSS rule blocks.
    ///
    /// The variables appear twice: under an explicit `body.<variant>` class
    /// selector, and under a `prefers-color-scheme` media query scoped to
    /// `body.auto`, so both user selection and OS preference are styleable
    /// from one generated block. Unknown variants render empty rule bodies.
    pub fn theme_css(&self, variant: &str, version: ThemeVersion) -> String {
        let lines = match version {
            ThemeVersion::Overrides => self
                .overrides
                .get(variant)
                .map(resolve_theme_variables)
                .unwrap_or_default(),
            ThemeVersion::Base => self
                .base
                .get(variant)
                .map(|theme| resolve_theme_variables(&theme.settings))
                .unwrap_or_default(),
        };
        let variables = lines.join("\n");

        // The extra tabs on the line breaks are purely cosmetic: they keep
        // the block readable in page source.
        format!(
            "\n\nbody.{variant} {{\n\t{}\n}}\n\n@media (prefers-color-scheme: {variant}) {{\n\tbody.auto {{\n\t\t{}\n\t}}\n}}",
            variables.replace('\n', "\n\t"),
            variables.replace('\n', "\n\t\t"),
        )
    }

    /// Reconcile per-variant flat edits into a fresh override set.
    ///
    /// For each variant known to the base registry: the edits are unflattened
    /// into a partial tree, merged on top of the currently held overrides
    /// (edits win on conflicting paths, unrelated override leaves survive),
    /// and the merge is diffed against the base theme. The returned mapping
    /// holds the complete new diff for every variant submitted — including
    /// empty trees, which persist as the delete signal. Edits for variants
    /// the registry does not know are skipped silently.
    pub fn update_theme_overrides(&self, edits: &EditsByVariant) -> ThemeOverrides {
        let mut changes = ThemeOverrides::new();
        for (variant, fields) in edits {
            let Some(base) = self.base.get(variant) else {
                tracing::debug!(variant = %variant, "skipping edits for unknown theme variant");
                continue;
            };

            let incoming = ThemeSettings::from_root(unflatten(fields));
            let held = self.overrides.get(variant).cloned().unwrap_or_default();
            let merged = held.merge(&incoming);
            changes.insert(variant.clone(), base.settings.diff(&merged));
        }
        changes
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::with_builtin()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
