//! Level conversions, the output clip and the submix gain law.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Output Stage
//!
//! - [`arcsine_clip`] - Hard clamp to `±CLIP_CEILING`, then an arcsine map
//!   onto `[-1, 1]`
//! - [`submix_gains`] - Wetness to independent wet and dry gains

use libm::{asin, expf, logf};

/// Magnitude the wet signal is clamped to before the arcsine stage.
pub const CLIP_CEILING: f64 = 2.8;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use kplate_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels. Inputs are floored at `1e-10` (-200 dB).
///
/// # Example
/// ```rust
/// use kplate_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Clamp to `[-2.8, 2.8]` and map through `asin(x / 2.8) * 2 / pi`.
///
/// The clamp keeps the `asin` argument inside `[-1, 1]`, so the result is
/// always finite and never exceeds unit magnitude. Non-finite input maps to
/// zero.
///
/// # Example
/// ```rust
/// use kplate_core::arcsine_clip;
///
/// assert_eq!(arcsine_clip(0.0), 0.0);
/// assert_eq!(arcsine_clip(100.0), 1.0);
/// assert_eq!(arcsine_clip(-100.0), -1.0);
/// ```
#[inline]
pub fn arcsine_clip(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let clamped = x.clamp(-CLIP_CEILING, CLIP_CEILING);
    (asin(clamped / CLIP_CEILING) / core::f64::consts::FRAC_PI_2).clamp(-1.0, 1.0)
}

/// Wet and dry gains for a wetness in `[0, 1]`.
///
/// `wet = min(1, 2w)` and `dry = min(1, 2(1 - w))`: both are at full level
/// at `w = 0.5`, so the dry signal is only turned down in the upper half.
///
/// # Example
/// ```rust
/// use kplate_core::submix_gains;
///
/// assert_eq!(submix_gains(0.0), (0.0, 1.0));
/// assert_eq!(submix_gains(0.5), (1.0, 1.0));
/// assert_eq!(submix_gains(1.0), (1.0, 0.0));
/// ```
#[inline]
pub fn submix_gains(wetness: f64) -> (f64, f64) {
    let w = wetness.clamp(0.0, 1.0);
    let wet = (w * 2.0).min(1.0);
    let dry = ((1.0 - w) * 2.0).min(1.0);
    (wet, dry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        for db in [-60.0f32, -12.0, -3.0, 0.0, 6.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 1e-3, "{db} -> {back}");
        }
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!((linear_to_db(0.0) + 200.0).abs() < 0.01);
    }

    #[test]
    fn test_arcsine_clip_is_odd_and_monotonic() {
        let mut previous = -1.0f64;
        for i in -300..=300 {
            let x = f64::from(i) * 0.01;
            let y = arcsine_clip(x);
            assert!((y + arcsine_clip(-x)).abs() < 1e-15);
            assert!(y >= previous, "not monotonic at {x}");
            assert!(y.abs() <= 1.0);
            previous = y;
        }
    }

    #[test]
    fn test_arcsine_clip_ceiling() {
        assert_eq!(arcsine_clip(CLIP_CEILING), 1.0);
        assert_eq!(arcsine_clip(f64::NAN), 0.0);
        assert_eq!(arcsine_clip(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_submix_gains_piecewise() {
        for i in 0..=100 {
            let w = f64::from(i) / 100.0;
            let (wet, dry) = submix_gains(w);
            let expected_wet = (2.0 * w).min(1.0);
            let expected_dry = (2.0 * (1.0 - w)).min(1.0);
            assert_eq!(wet, expected_wet);
            assert_eq!(dry, expected_dry);
        }
        assert_eq!(submix_gains(-1.0), (0.0, 1.0));
        assert_eq!(submix_gains(3.0), (1.0, 0.0));
    }
}
