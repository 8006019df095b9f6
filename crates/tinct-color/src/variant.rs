#![forbid(unsafe_code)]

//! Gradient search for derived theme colors.
//!
//! Both searches walk the Lab-space mix gradient between two anchor colors.
//! [`find_at_relative_luminosity`] solves the mix weight algebraically from a
//! luminosity delta; [`find_at_contrast_ratio`] bisects the gradient until the
//! contrast ratio against the base anchor matches a target. Both are
//! deterministic: identical inputs always return identical output.

use crate::color::{Rgb, contrast_ratio, mix};

/// Hard cap on bisection iterations.
///
/// The loop normally stops earlier, when the quantized search range reaches a
/// fixed point; the cap guarantees termination under any floating-point
/// behavior.
const MAX_BISECT_ITERS: u32 = 40;

/// Parameters for [`find_at_contrast_ratio`].
///
/// `desired_contrast` is the WCAG-style target ratio against the base color.
/// The buffers keep the result away from the gradient's endpoints, in
/// contrast-ratio units: at least `end_buffer` below the end color's ratio
/// and at least `base_buffer` above the base color's ratio of 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastSearch {
    pub desired_contrast: f64,
    pub end_buffer: f64,
    pub base_buffer: f64,
}

impl Default for ContrastSearch {
    fn default() -> Self {
        Self {
            desired_contrast: 4.5,
            end_buffer: 0.2,
            base_buffer: 0.2,
        }
    }
}

impl ContrastSearch {
    /// Search with the given target ratio and default buffers.
    #[must_use]
    pub fn with_contrast(desired_contrast: f64) -> Self {
        Self {
            desired_contrast,
            ..Self::default()
        }
    }
}

/// Shift `base` in luminosity toward `mix_color` by `delta_lum` L* units.
///
/// `delta_lum` is clamped to the L* distance between the two anchors, so the
/// result never overshoots the far anchor. When `relative_to_base` is true
/// the shift is measured from the base color; when false, from the mix color.
///
/// Anchors whose L* agree to 4 decimal places are treated as equal-luminance
/// (the weight derivation divides by their difference) and return `base`
/// unchanged.
pub fn find_at_relative_luminosity(
    base: Rgb,
    mix_color: Rgb,
    delta_lum: f64,
    relative_to_base: bool,
) -> Rgb {
    if base == mix_color {
        return base;
    }

    let (static_color, relative_color) = if relative_to_base {
        (mix_color, base)
    } else {
        (base, mix_color)
    };

    let lum_a = static_color.to_lab().l;
    let lum_b = relative_color.to_lab().l;

    // 4 significant decimals, matching the feasibility check to the effective
    // precision of the color space rather than raw f64 equality.
    if (lum_a * 1e4).round() == (lum_b * 1e4).round() {
        return base;
    }

    // Maximum shift is the luminance distance between the anchors.
    let max_delta = (lum_a - lum_b).abs();
    let clamped_delta = delta_lum.clamp(0.0, max_delta);

    let shift_dir = if lum_a >= lum_b { 1.0 } else { -1.0 };
    let desired_lum = (lum_b + clamped_delta * shift_dir).clamp(0.0, 100.0);

    // From the weighted-average identity lumA*(1-w) + lumB*w = desiredLum:
    //
    //        desiredLum - lumA
    //   w = -------------------   (lumA != lumB)
    //          lumB - lumA
    let weight = ((desired_lum - lum_a) / (lum_b - lum_a)).abs();

    mix(static_color, relative_color, weight)
}

/// Find the color on the `base` → `end` gradient whose contrast ratio against
/// `base` best matches the search target.
///
/// Target selection, in order:
/// 1. `base == end` returns `base`.
/// 2. Buffers are clamped into `[0, maxContrast]`.
/// 3. A feasible band narrower than both buffers retargets to the midpoint
///    of the feasible range.
/// 4. A reachable maximum below `desired + endBuffer` retargets to
///    `maxContrast - endBuffer`.
/// 5. Otherwise the desired contrast stands.
///
/// A target landing exactly on 1.0 or `maxContrast` returns the matching
/// anchor; anything in between is found by bisecting the gradient. The
/// bisection stops once the midpoint color stops moving at 8-bit precision
/// (or after 40 iterations) and returns whichever range endpoint is
/// numerically closest in contrast to the target.
pub fn find_at_contrast_ratio(base: Rgb, end: Rgb, search: ContrastSearch) -> Rgb {
    if base == end {
        return base;
    }

    let max_contrast = contrast_ratio(base, end);
    let desired = search.desired_contrast.abs();
    let end_buffer = search.end_buffer.abs().clamp(0.0, max_contrast);
    let base_buffer = search.base_buffer.abs().clamp(0.0, max_contrast);

    let band = max_contrast - 1.0;
    let target = if band < end_buffer + base_buffer {
        // Both buffers can't fit; aim for the middle of the feasible range.
        let retarget = band / 2.0 + 1.0;
        tracing::debug!(max_contrast, retarget, "buffers exceed feasible band");
        retarget
    } else if max_contrast < desired + end_buffer {
        // Push as close to the maximum as the end buffer allows.
        let retarget = max_contrast - end_buffer;
        tracing::debug!(max_contrast, desired, retarget, "desired contrast unreachable");
        retarget
    } else {
        desired
    };

    let target = target.clamp(1.0, max_contrast);
    if target == 1.0 {
        return base;
    }
    if target == max_contrast {
        return end;
    }

    // Bisect the mix weight. Contrast against `base` grows from 1.0 at w=0
    // to `max_contrast` at w=1, so the target always lies inside the range.
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    let mut lo_color = base;
    let mut hi_color = end;

    for _ in 0..MAX_BISECT_ITERS {
        let mid = (lo + hi) / 2.0;
        let mid_color = mix(base, end, mid);
        if mid_color == lo_color || mid_color == hi_color {
            // Fixed point at the color space's effective precision.
            break;
        }
        if contrast_ratio(base, mid_color) < target {
            lo = mid;
            lo_color = mid_color;
        } else {
            hi = mid;
            hi_color = mid_color;
        }
    }

    let lo_dist = (contrast_ratio(base, lo_color) - target).abs();
    let hi_dist = (contrast_ratio(base, hi_color) - target).abs();
    if lo_dist <= hi_dist { lo_color } else { hi_color }
}

// ── Tests ────────────────────────────────────────────────────────────────
