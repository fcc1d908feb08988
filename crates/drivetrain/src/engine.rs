//! Engine model: torque production and RPM tracking.
//!
//! The engine produces torque from a normalized torque curve scaled by
//! throttle and clutch engagement, and absorbs the drivetrain-implied
//! speed through [`Engine::match_rpm`] to update its RPM for the next
//! tick.

use simcore::units::{angular_velocity_to_rpm, clamp, rpm_to_angular_velocity};

use crate::config::{ConfigError, EngineConfig};

/// Where the torque curve peaks inside the RPM band.
const PEAK_FRACTION: f64 = 0.43;
/// Width parameter of the falling side of the curve.
const SPREAD_FRACTION: f64 = 0.57;
/// The rising side is narrower than the falling side by this factor.
const RISING_SPREAD_FACTOR: f64 = 2.0 / 3.0;

#[derive(Debug, Clone)]
pub struct Engine {
    max_torque: f64,
    min_rpm: f64,
    max_rpm: f64,
    current_rpm: f64,
    throttle: f64,
    clutch: f64,
}

impl Engine {
    /// Builds an engine idling at `min_rpm` with throttle closed and the
    /// clutch fully engaged.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        if config.min_rpm < 0.0 || config.max_rpm < 0.0 {
            return Err(ConfigError::NegativeRpm);
        }
        if config.min_rpm > config.max_rpm {
            return Err(ConfigError::InvertedRpmRange {
                min_rpm: config.min_rpm,
                max_rpm: config.max_rpm,
            });
        }
        if !(config.max_torque > 0.0) {
            return Err(ConfigError::NonPositiveMaxTorque(config.max_torque));
        }
        Ok(Engine {
            max_torque: config.max_torque,
            min_rpm: config.min_rpm,
            max_rpm: config.max_rpm,
            current_rpm: config.min_rpm,
            throttle: 0.0,
            clutch: 1.0,
        })
    }

    /// Normalized torque multiplier in [0, 1] for a given engine speed.
    ///
    /// An asymmetric parabola peaking at 43% of the RPM band, clamped to
    /// non-negative, with a narrower rising side. A rough stand-in for a
    /// naturally-aspirated torque curve without a lookup table.
    pub fn torque_factor(&self, rpm: f64) -> f64 {
        let range = self.max_rpm - self.min_rpm;
        let peak = self.min_rpm + PEAK_FRACTION * range;
        let mut spread = self.min_rpm + SPREAD_FRACTION * range;
        if rpm < peak {
            spread *= RISING_SPREAD_FACTOR;
        }
        let factor = 1.0 - ((rpm - peak) / spread).powi(2);
        factor.max(0.0)
    }

    /// Torque delivered to the transmission this tick (N·m), computed
    /// from the RPM as of the previous tick.
    pub fn produced_torque(&self) -> f64 {
        self.max_torque * self.torque_factor(self.current_rpm) * self.throttle * self.clutch
    }

    /// Pulls the engine speed toward the drivetrain-implied angular
    /// velocity, weighted by clutch engagement.
    ///
    /// With the clutch open the engine free-revs and the target is
    /// ignored; fully engaged, the RPM snaps to the drivetrain value.
    /// The blend is an instantaneous stand-in for clutch-plate slip
    /// dynamics. The result is always clamped into the RPM band.
    pub fn match_rpm(&mut self, target_angular_velocity: f64) {
        let current = rpm_to_angular_velocity(self.current_rpm);
        let blended = current * (1.0 - self.clutch) + target_angular_velocity * self.clutch;
        self.current_rpm = clamp(angular_velocity_to_rpm(blended), self.min_rpm, self.max_rpm);
    }

    pub fn current_rpm(&self) -> f64 {
        self.current_rpm
    }

    pub fn min_rpm(&self) -> f64 {
        self.min_rpm
    }

    pub fn max_rpm(&self) -> f64 {
        self.max_rpm
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Sets the throttle position, clamped into [0, 1].
    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = clamp(throttle, 0.0, 1.0);
    }

    pub fn clutch(&self) -> f64 {
        self.clutch
    }

    /// Sets clutch engagement (0 = open, 1 = locked), clamped into [0, 1].
    pub fn set_clutch(&mut self, clutch: f64) {
        self.clutch = clamp(clutch, 0.0, 1.0);
    }

    /// Drops the engine back to idle.
    pub fn reset(&mut self) {
        self.current_rpm = self.min_rpm;
    }
}
