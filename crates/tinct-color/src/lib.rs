#![forbid(unsafe_code)]

//! Perceptual color primitives for the tinct theming engine.
//!
//! # Role in tinct
//! `tinct-color` is the numeric foundation: it converts hex color strings to
//! and from CIE L*a*b*, computes WCAG contrast ratios, mixes colors in Lab
//! space, and searches the mix gradient between two anchor colors for a
//! derived color that hits a contrast or luminosity target.
//!
//! # This crate provides
//! - [`Rgb`] and [`Lab`] color values with hex parsing and formatting.
//! - WCAG relative luminance and [`contrast_ratio`] (1.0–21.0).
//! - [`mix`] for weighted averaging in Lab space.
//! - [`find_at_contrast_ratio`] and [`find_at_relative_luminosity`], the
//!   variant search used to derive accent/subtle colors from source colors.
//!
//! # How it fits in the system
//! `tinct-theme` holds settings trees whose color leaves are plain hex
//! strings; the editor layer calls into this crate to generate secondary
//! colors from user-picked source colors. Everything here is pure, synchronous
//! and deterministic: identical inputs always produce identical output.

/// Color values, conversions, luminance, and Lab mixing.
pub mod color;
/// Gradient search for contrast-ratio and luminosity targets.
pub mod variant;

pub use color::{InvalidColorError, Lab, Rgb, contrast_ratio, mix, relative_luminance};
pub use variant::{ContrastSearch, find_at_contrast_ratio, find_at_relative_luminosity};
