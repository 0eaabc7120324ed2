//! RGB <-> HSL conversion and rotation arithmetic.

use super::ColorValue;
use crate::config::{Adjustment, HUE_PERIOD, PERCENT_MAX};

/// HSL color representation.
/// - `h`: whole degrees in [0, 360)
/// - `s`, `l`: percentages in [0, 100], one decimal place
///
/// Never stored; always recomputed from an entry's base color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Round to the nearest integer, halves toward positive infinity.
#[inline]
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place.
#[inline]
fn round1(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Convert RGB to HSL.
pub fn to_hsl(color: &ColorValue) -> Hsl {
    let ColorValue { r, g, b, .. } = *color;
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let delta = cmax - cmin;

    let sector = if delta == 0.0 {
        0.0
    } else if cmax == r {
        ((g - b) / delta) % 6.0
    } else if cmax == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let mut h = round_half_up(sector * 60.0);
    if h < 0.0 {
        h += HUE_PERIOD;
    }
    // Normalize -0.0 so equal hues compare and print identically
    if h == 0.0 {
        h = 0.0;
    }

    let l = (cmax + cmin) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    Hsl {
        h,
        s: round1(s * PERCENT_MAX),
        l: round1(l * PERCENT_MAX),
    }
}

/// Convert HSL to RGB.
///
/// `hsl.h` must already be wrapped into [0, 360); a hue outside that range
/// matches no sector and yields an achromatic color. Channels are not
/// re-clamped.
pub fn from_hsl(hsl: Hsl) -> ColorValue {
    let Hsl { h, s, l } = hsl;
    let s = s / PERCENT_MAX;
    let l = l / PERCENT_MAX;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else if (300.0..360.0).contains(&h) {
        (c, 0.0, x)
    } else {
        (0.0, 0.0, 0.0)
    };

    ColorValue::rgb(r + m, g + m, b + m)
}

/// Wrap a delta-adjusted hue into [0, 360).
///
/// Inputs may exceed the range by at most one period, so a single
/// conditional correction in each direction is enough.
pub fn wrap_hue(value: f64) -> f64 {
    let mut hue = value;
    if hue < 0.0 {
        hue += HUE_PERIOD;
    }
    if hue >= HUE_PERIOD {
        hue -= HUE_PERIOD;
    }
    hue
}

/// Two-sided clamp.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Rotate a color by the given hue/saturation/lightness deltas.
///
/// Pure: the same base color and adjustment always produce the same output,
/// which is what lets live preview recompute from the base color on every
/// tick. Alpha is carried through untouched.
pub fn rotate(color: &ColorValue, adjustment: &Adjustment) -> ColorValue {
    let hsl = to_hsl(color);
    let rotated = Hsl {
        h: wrap_hue(hsl.h + adjustment.hue),
        s: clamp(hsl.s + adjustment.saturation, 0.0, PERCENT_MAX),
        l: clamp(hsl.l + adjustment.lightness, 0.0, PERCENT_MAX),
    };

    ColorValue {
        a: color.a,
        ..from_hsl(rotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    /// Half a degree of hue plus 0.05 points of s/l stays under 3/255.
    const ROUND_TRIP_TOL: f64 = 3.0 / 255.0;

    fn assert_rgb(actual: ColorValue, r: f64, g: f64, b: f64) {
        assert!(
            actual.approx_eq_rgb(&ColorValue::rgb(r, g, b), TOL),
            "expected ({r}, {g}, {b}), got {actual:?}"
        );
    }

    fn channel_grid() -> Vec<ColorValue> {
        let steps = [0u8, 1, 37, 64, 127, 128, 200, 254, 255];
        let mut colors = Vec::new();
        for &r in &steps {
            for &g in &steps {
                for &b in &steps {
                    colors.push(ColorValue::rgb(
                        f64::from(r) / 255.0,
                        f64::from(g) / 255.0,
                        f64::from(b) / 255.0,
                    ));
                }
            }
        }
        colors
    }

    // ==================== to_hsl tests ====================

    #[test]
    fn test_to_hsl_primaries() {
        assert_eq!(
            to_hsl(&ColorValue::rgb(1.0, 0.0, 0.0)),
            Hsl {
                h: 0.0,
                s: 100.0,
                l: 50.0
            }
        );
        assert_eq!(to_hsl(&ColorValue::rgb(0.0, 1.0, 0.0)).h, 120.0);
        assert_eq!(to_hsl(&ColorValue::rgb(0.0, 0.0, 1.0)).h, 240.0);
    }

    #[test]
    fn test_to_hsl_negative_sector_wraps() {
        // Magenta-ish red: max is r and g < b, so the sector is negative
        let hsl = to_hsl(&ColorValue::rgb(1.0, 0.0, 0.5));
        assert_eq!(hsl.h, 330.0);
    }

    #[test]
    fn test_to_hsl_negative_half_degree_rounds_up() {
        // Sector -0.125 is -7.5 degrees: rounds to -7, not -8
        let hsl = to_hsl(&ColorValue::rgb(1.0, 0.0, 0.125));
        assert_eq!(hsl.h, 353.0);

        // Positive ties round up as well
        assert_eq!(round_half_up(7.5), 8.0);
        assert_eq!(round_half_up(-0.5), 0.0);
    }

    #[test]
    fn test_to_hsl_achromatic() {
        let hsl = to_hsl(&ColorValue::rgb(0.5, 0.5, 0.5));
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert_eq!(hsl.l, 50.0);
    }

    #[test]
    fn test_to_hsl_rounds_to_one_decimal() {
        let hsl = to_hsl(&ColorValue::rgb(0.2, 0.4, 0.3));
        assert_eq!(hsl.h, 150.0);
        assert_eq!(hsl.s, 33.3);
        assert_eq!(hsl.l, 30.0);
    }

    // ==================== from_hsl tests ====================

    #[test]
    fn test_from_hsl_sectors() {
        assert_rgb(from_hsl(Hsl { h: 0.0, s: 100.0, l: 50.0 }), 1.0, 0.0, 0.0);
        assert_rgb(from_hsl(Hsl { h: 60.0, s: 100.0, l: 50.0 }), 1.0, 1.0, 0.0);
        assert_rgb(from_hsl(Hsl { h: 120.0, s: 100.0, l: 50.0 }), 0.0, 1.0, 0.0);
        assert_rgb(from_hsl(Hsl { h: 180.0, s: 100.0, l: 50.0 }), 0.0, 1.0, 1.0);
        assert_rgb(from_hsl(Hsl { h: 240.0, s: 100.0, l: 50.0 }), 0.0, 0.0, 1.0);
        assert_rgb(from_hsl(Hsl { h: 300.0, s: 100.0, l: 50.0 }), 1.0, 0.0, 1.0);
    }

    #[test]
    fn test_from_hsl_has_no_alpha() {
        assert_eq!(from_hsl(Hsl { h: 10.0, s: 20.0, l: 30.0 }).a, None);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for color in channel_grid() {
            let back = from_hsl(to_hsl(&color));
            assert!(
                back.approx_eq_rgb(&color, ROUND_TRIP_TOL),
                "{color:?} came back as {back:?}"
            );
        }
    }

    // ==================== wrap_hue / clamp tests ====================

    #[test]
    fn test_wrap_hue_invariant() {
        for h0 in 0..360 {
            for dh in -180..=180 {
                let wrapped = wrap_hue(f64::from(h0) + f64::from(dh));
                assert!((0.0..360.0).contains(&wrapped), "{h0} + {dh} -> {wrapped}");
            }
        }
    }

    #[test]
    fn test_wrap_hue_full_turn_folds_to_zero() {
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(-30.0), 330.0);
        assert_eq!(wrap_hue(390.0), 30.0);
    }

    #[test]
    fn test_clamp_invariant() {
        for base in (0..=100).step_by(5) {
            for delta in (-100..=100).step_by(5) {
                let value = clamp(f64::from(base) + f64::from(delta), 0.0, 100.0);
                assert!((0.0..=100.0).contains(&value));
            }
        }
    }

    // ==================== rotate tests ====================

    #[test]
    fn test_rotate_identity() {
        for color in channel_grid() {
            let rotated = rotate(&color, &Adjustment::reset());
            assert!(rotated.approx_eq_rgb(&color, ROUND_TRIP_TOL));
        }
        let red = ColorValue::rgb(1.0, 0.0, 0.0);
        assert_eq!(rotate(&red, &Adjustment::reset()), red);
    }

    #[test]
    fn test_rotate_red_to_green() {
        let rotated = rotate(&ColorValue::rgb(1.0, 0.0, 0.0), &Adjustment::new(120.0, 0.0, 0.0));
        assert_rgb(rotated, 0.0, 1.0, 0.0);
    }

    #[test]
    fn test_rotate_desaturate_to_gray() {
        let rotated = rotate(&ColorValue::rgb(1.0, 0.0, 0.0), &Adjustment::new(0.0, -100.0, 0.0));
        assert_rgb(rotated, 0.5, 0.5, 0.5);
    }

    #[test]
    fn test_rotate_red_to_orange() {
        let rotated = rotate(&ColorValue::rgb(1.0, 0.0, 0.0), &Adjustment::new(30.0, 0.0, 0.0));
        assert_rgb(rotated, 1.0, 0.5, 0.0);
        assert_eq!(rotated.to_hex(), "#ff8000");
    }

    #[test]
    fn test_rotate_negative_hue_wraps() {
        let rotated = rotate(&ColorValue::rgb(1.0, 0.0, 0.0), &Adjustment::new(-120.0, 0.0, 0.0));
        assert_rgb(rotated, 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_rotate_is_deterministic() {
        let base = ColorValue::rgb(0.8, 0.3, 0.1);
        let adj = Adjustment::new(30.0, 10.0, -5.0);
        let first = rotate(&base, &adj);
        let second = rotate(&base, &adj);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rotate_preserves_alpha() {
        let base = ColorValue::rgba(1.0, 0.0, 0.0, 0.4);
        let rotated = rotate(&base, &Adjustment::new(120.0, 0.0, 0.0));
        assert_eq!(rotated.a, Some(0.4));
    }

    #[test]
    fn test_rotate_lightness_saturates() {
        let rotated = rotate(&ColorValue::rgb(1.0, 0.0, 0.0), &Adjustment::new(0.0, 0.0, 100.0));
        assert_rgb(rotated, 1.0, 1.0, 1.0);
    }
}
