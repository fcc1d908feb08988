//! Open differential: even torque split and wheel-speed recombination
//! through the final drive.

use crate::config::{check_efficiency, ConfigError, DifferentialConfig};

/// Stateless beyond its configuration.
#[derive(Debug, Clone, Copy)]
pub struct Differential {
    final_drive_ratio: f64,
    efficiency: f64,
}

impl Differential {
    pub fn new(config: &DifferentialConfig) -> Result<Self, ConfigError> {
        if !(config.final_drive_ratio > 0.0) {
            return Err(ConfigError::NonPositiveFinalDrive(config.final_drive_ratio));
        }
        Ok(Differential {
            final_drive_ratio: config.final_drive_ratio,
            efficiency: check_efficiency(config.efficiency)?,
        })
    }

    /// Splits driveshaft torque evenly between the left and right wheel,
    /// applying the final drive ratio and efficiency loss.
    pub fn output_torque(&self, in_torque: f64) -> (f64, f64) {
        let per_wheel = in_torque * self.efficiency * self.final_drive_ratio / 2.0;
        (per_wheel, per_wheel)
    }

    /// Average wheel speed projected up through the final drive to the
    /// transmission-facing side (rad/s).
    pub fn angular_velocity(&self, left_wheel_velocity: f64, right_wheel_velocity: f64) -> f64 {
        (left_wheel_velocity + right_wheel_velocity) / 2.0 * self.final_drive_ratio
    }

    pub fn final_drive_ratio(&self) -> f64 {
        self.final_drive_ratio
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }
}
