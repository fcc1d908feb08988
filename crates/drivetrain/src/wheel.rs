//! Driven wheel: a rotating mass integrated under applied torque minus
//! aerodynamic drag and rolling resistance.

use crate::config::{ConfigError, WheelConfig};

/// Below this speed the wheel counts as stationary (rad/s).
const STATIC_LOCK_ANGULAR_VELOCITY: f64 = 0.01;
/// Minimum torque magnitude needed to move a stationary wheel (N·m).
const STATIC_LOCK_TORQUE: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
pub struct Wheel {
    radius: f64,
    carry_mass: f64,
    air_drag_coeff: f64,
    rolling_resistance_coeff: f64,
    angular_velocity: f64,
    max_angular_velocity: f64,
    in_torque: f64,
}

impl Wheel {
    pub fn new(config: &WheelConfig) -> Result<Self, ConfigError> {
        if !(config.radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius(config.radius));
        }
        if !(config.carry_mass > 0.0) {
            return Err(ConfigError::NonPositiveCarryMass(config.carry_mass));
        }
        Ok(Wheel {
            radius: config.radius,
            carry_mass: config.carry_mass,
            air_drag_coeff: config.air_drag_coeff,
            rolling_resistance_coeff: config.rolling_resistance_coeff,
            angular_velocity: 0.0,
            max_angular_velocity: 0.0,
            in_torque: 0.0,
        })
    }

    /// Stores the torque to apply on the next [`Wheel::update`] (N·m).
    pub fn set_torque(&mut self, in_torque: f64) {
        self.in_torque = in_torque;
    }

    /// Stores the drivetrain-implied speed ceiling (rad/s). Informational
    /// only; not enforced. Reserved for governor/limiter logic.
    pub fn set_max_angular_velocity(&mut self, max_angular_velocity: f64) {
        self.max_angular_velocity = max_angular_velocity;
    }

    /// Advances the wheel by one explicit Euler step.
    ///
    /// A stationary wheel under less than [`STATIC_LOCK_TORQUE`] stays
    /// locked: insufficient torque to overcome static friction. Otherwise
    /// quadratic aerodynamic drag and linear rolling resistance oppose
    /// the applied torque, and the net force accelerates `carry_mass`.
    pub fn update(&mut self, dt: f64) {
        if self.angular_velocity.abs() < STATIC_LOCK_ANGULAR_VELOCITY
            && self.in_torque.abs() < STATIC_LOCK_TORQUE
        {
            return;
        }

        let velocity = self.angular_velocity * self.radius;
        let sign = if velocity >= 0.0 { 1.0 } else { -1.0 };

        // The quadratic term needs the sign factor because v^2 erases it;
        // the linear term already opposes motion in both directions.
        let drag_torque = -self.air_drag_coeff * velocity * velocity * self.radius * sign;
        let rolling_torque = -self.rolling_resistance_coeff * velocity * self.radius;

        let net_torque = self.in_torque + drag_torque + rolling_torque;
        let drive_force = net_torque / self.radius;
        let acceleration = drive_force / self.carry_mass;
        let angular_acceleration = acceleration / self.radius;

        self.angular_velocity += angular_acceleration * dt;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn max_angular_velocity(&self) -> f64 {
        self.max_angular_velocity
    }

    /// Torque applied on the last tick (N·m).
    pub fn in_torque(&self) -> f64 {
        self.in_torque
    }

    /// Ground speed at the contact patch (m/s).
    pub fn linear_velocity(&self) -> f64 {
        self.angular_velocity * self.radius
    }

    /// Brings the wheel back to rest.
    pub fn reset(&mut self) {
        self.angular_velocity = 0.0;
        self.in_torque = 0.0;
    }
}
