//! Unit conversions and small math helpers shared across the simulation.
//!
//! Everything here is a pure function on `f64`; no state, no side effects.

use std::f64::consts::PI;

/// Converts engine speed in revolutions per minute to rad/s.
pub fn rpm_to_angular_velocity(rpm: f64) -> f64 {
    rpm * 2.0 * PI / 60.0
}

/// Converts rad/s back to revolutions per minute.
///
/// Exact inverse of [`rpm_to_angular_velocity`] up to float rounding.
pub fn angular_velocity_to_rpm(angular_velocity: f64) -> f64 {
    angular_velocity * 60.0 / (2.0 * PI)
}

/// Converts a linear speed in m/s to km/h.
pub fn ms_to_kmh(velocity: f64) -> f64 {
    velocity * 3.6
}

/// Bounds `x` into `[lo, hi]`. Callers must ensure `lo <= hi`.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

/// Affine remap of `x` from `[in_lo, in_hi]` onto `[out_lo, out_hi]`.
///
/// A degenerate input range (`in_lo == in_hi`) yields a non-finite value
/// rather than panicking; callers that can hit that case should check the
/// result with `is_finite`.
pub fn remap(x: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    out_lo + (x - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rpm_conversion_known_values() {
        // 60 RPM is one revolution per second, i.e. 2*pi rad/s.
        assert_relative_eq!(rpm_to_angular_velocity(60.0), 2.0 * PI);
        assert_relative_eq!(angular_velocity_to_rpm(2.0 * PI), 60.0);
        assert_relative_eq!(rpm_to_angular_velocity(0.0), 0.0);
    }

    #[test]
    fn test_rpm_round_trip() {
        for x in [-4500.0, -1.0, 0.0, 0.3, 1000.0, 4500.0, 1.0e9] {
            assert_relative_eq!(
                rpm_to_angular_velocity(angular_velocity_to_rpm(x)),
                x,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                angular_velocity_to_rpm(rpm_to_angular_velocity(x)),
                x,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_ms_to_kmh() {
        assert_relative_eq!(ms_to_kmh(10.0), 36.0);
        assert_relative_eq!(ms_to_kmh(-5.0), -18.0);
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(-0.1, 0.0, 1.0), 0.0);
        assert_eq!(clamp(1.7, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_remap_affine() {
        // [0, 1] -> [1000, 4500]
        assert_relative_eq!(remap(0.0, 0.0, 1.0, 1000.0, 4500.0), 1000.0);
        assert_relative_eq!(remap(1.0, 0.0, 1.0, 1000.0, 4500.0), 4500.0);
        assert_relative_eq!(remap(0.5, 0.0, 1.0, 1000.0, 4500.0), 2750.0);
        // Inverted output range is fine.
        assert_relative_eq!(remap(0.25, 0.0, 1.0, 1.0, -1.0), 0.5);
    }

    #[test]
    fn test_remap_degenerate_input_range_is_non_finite() {
        assert!(!remap(1.0, 3.0, 3.0, 0.0, 1.0).is_finite());
    }
}
