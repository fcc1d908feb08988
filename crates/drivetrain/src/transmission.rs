//! Gearbox: discrete ratio selection with efficiency loss.
//!
//! Gearing trades speed for torque: the same ratio that multiplies
//! torque toward the wheels multiplies angular velocity back toward the
//! engine.

use log::warn;

use crate::config::{check_efficiency, ConfigError, TransmissionConfig};

#[derive(Debug, Clone)]
pub struct Transmission {
    gear_ratios: Vec<f64>,
    current_gear: usize,
    current_torque: f64,
    efficiency: f64,
}

impl Transmission {
    /// Builds a transmission in first gear.
    pub fn new(config: &TransmissionConfig) -> Result<Self, ConfigError> {
        // Index 0 is neutral; at least one drivable gear must follow.
        if config.gear_ratios.len() < 2 {
            return Err(ConfigError::TooFewGears(config.gear_ratios.len()));
        }
        if config.gear_ratios[0] != 0.0 {
            return Err(ConfigError::NonZeroNeutral(config.gear_ratios[0]));
        }
        Ok(Transmission {
            gear_ratios: config.gear_ratios.clone(),
            current_gear: 1,
            current_torque: 0.0,
            efficiency: check_efficiency(config.efficiency)?,
        })
    }

    /// Engages `gear` if it is a valid non-neutral index; out-of-range
    /// requests (including neutral) are ignored and the prior gear is
    /// retained.
    pub fn shift_gear(&mut self, gear: usize) {
        if gear > 0 && gear < self.gear_ratios.len() {
            self.current_gear = gear;
        } else {
            warn!("ignoring shift to invalid gear {gear}");
        }
    }

    /// Torque on the differential side for a given engine torque (N·m).
    /// The result is retained in [`Transmission::current_torque`].
    pub fn output_torque(&mut self, engine_torque: f64) -> f64 {
        self.current_torque = engine_torque * self.current_ratio() * self.efficiency;
        self.current_torque
    }

    /// Engine-side angular velocity implied by the differential-side
    /// angular velocity (rad/s).
    pub fn angular_velocity(&self, differential_side_velocity: f64) -> f64 {
        differential_side_velocity * self.current_ratio()
    }

    pub fn current_gear(&self) -> usize {
        self.current_gear
    }

    pub fn current_ratio(&self) -> f64 {
        self.gear_ratios[self.current_gear]
    }

    /// Last computed output torque (N·m). Informational.
    pub fn current_torque(&self) -> f64 {
        self.current_torque
    }

    pub fn gear_count(&self) -> usize {
        self.gear_ratios.len()
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }
}
