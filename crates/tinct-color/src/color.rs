#![forbid(unsafe_code)]

//! Color values and conversions.
//!
//! Colors enter the system as hex strings, get converted to CIE L*a*b*
//! (D65 white point) for perceptually uniform mixing, and leave as lowercase
//! six-digit hex. WCAG relative luminance and contrast live here too since
//! both the variant search and accessibility checks need them.

use std::fmt;

use thiserror::Error;

/// A malformed or unparseable color input.
///
/// Fatal to the single color operation that received the input; callers must
/// not let it corrupt unrelated tree leaves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {input:?}")]
pub struct InvalidColorError {
    /// The rejected input, verbatim.
    pub input: String,
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A CIE L*a*b* color (D65 reference white).
///
/// `l` is in [0, 100]; `a` and `b` are unbounded in principle but stay within
/// roughly ±128 for colors inside the sRGB gamut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

// D65 reference white in XYZ.
const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

// CIE constants: epsilon = (6/29)^3, kappa = (29/3)^3.
const CIE_EPSILON: f64 = 216.0 / 24389.0;
const CIE_KAPPA: f64 = 24389.0 / 27.0;

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string.
    ///
    /// Accepts `#RGB`, `#RGBA`, `#RRGGBB`, and `#RRGGBBAA`; short forms expand
    /// each digit (`#f0c` → `#ff00cc`). An alpha channel is parsed and
    /// discarded since theme colors are opaque.
    pub fn from_hex(input: &str) -> Result<Self, InvalidColorError> {
        let err = || InvalidColorError {
            input: input.to_string(),
        };

        let digits = input.strip_prefix('#').ok_or_else(err)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }

        // Digit set and length are validated before these run.
        let nibble = |i: usize| -> u8 { u8::from_str_radix(&digits[i..=i], 16).unwrap_or(0) };
        let byte = |i: usize| -> u8 { u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) };

        match digits.len() {
            3 | 4 => Ok(Self::new(
                nibble(0) * 17,
                nibble(1) * 17,
                nibble(2) * 17,
            )),
            6 | 8 => Ok(Self::new(byte(0), byte(2), byte(4))),
            _ => Err(err()),
        }
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to CIE L*a*b*.
    pub fn to_lab(self) -> Lab {
        let r = srgb_to_linear(f64::from(self.r) / 255.0);
        let g = srgb_to_linear(f64::from(self.g) / 255.0);
        let b = srgb_to_linear(f64::from(self.b) / 255.0);

        // Linear sRGB → XYZ (D65).
        let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// WCAG 2.1 relative luminance, in [0, 1].
    pub fn relative_luminance(self) -> f64 {
        let r = srgb_to_linear(f64::from(self.r) / 255.0);
        let g = srgb_to_linear(f64::from(self.g) / 255.0);
        let b = srgb_to_linear(f64::from(self.b) / 255.0);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Lab {
    /// Convert back to sRGB, clamping out-of-gamut channels.
    pub fn to_rgb(self) -> Rgb {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        let xr = if fx.powi(3) > CIE_EPSILON {
            fx.powi(3)
        } else {
            (116.0 * fx - 16.0) / CIE_KAPPA
        };
        let yr = if self.l > CIE_KAPPA * CIE_EPSILON {
            fy.powi(3)
        } else {
            self.l / CIE_KAPPA
        };
        let zr = if fz.powi(3) > CIE_EPSILON {
            fz.powi(3)
        } else {
            (116.0 * fz - 16.0) / CIE_KAPPA
        };

        let x = xr * WHITE_X;
        let y = yr * WHITE_Y;
        let z = zr * WHITE_Z;

        // XYZ → linear sRGB (D65).
        let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
        let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
        let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;

        let channel = |c: f64| -> u8 {
            let c = linear_to_srgb(c.clamp(0.0, 1.0));
            (c * 255.0).round().clamp(0.0, 255.0) as u8
        };

        Rgb::new(channel(r), channel(g), channel(b))
    }
}

/// sRGB gamma expansion.
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB gamma compression.
fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// CIE f() transfer function for the Lab forward transform.
fn lab_f(t: f64) -> f64 {
    if t > CIE_EPSILON {
        t.cbrt()
    } else {
        (CIE_KAPPA * t + 16.0) / 116.0
    }
}

/// WCAG 2.1 relative luminance of a color, in [0, 1].
pub fn relative_luminance(color: Rgb) -> f64 {
    color.relative_luminance()
}

/// WCAG 2.1 contrast ratio between two colors, in [1.0, 21.0].
///
/// Symmetric in its arguments. Equal inputs return exactly 1.0 with no
/// floating-point drift.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    if a == b {
        return 1.0;
    }
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Mix two colors in Lab space at weight `w` ∈ [0, 1].
///
/// `w = 0` yields `a` and `w = 1` yields `b`, both returned untouched so the
/// anchors never pick up quantization error. Equal inputs short-circuit for
/// the same reason.
pub fn mix(a: Rgb, b: Rgb, w: f64) -> Rgb {
    if a == b {
        return a;
    }
    let w = w.clamp(0.0, 1.0);
    if w == 0.0 {
        return a;
    }
    if w == 1.0 {
        return b;
    }

    let la = a.to_lab();
    let lb = b.to_lab();
    Lab {
        l: la.l * (1.0 - w) + lb.l * w,
        a: la.a * (1.0 - w) + lb.a * w,
        b: la.b * (1.0 - w) + lb.b * w,
    }
    .to_rgb()
}

// ── Tests ────────────────────────────────────────────────────────────────
