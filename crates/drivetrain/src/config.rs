//! Drivetrain configuration structs and construction-time validation.
//!
//! Components are built once per session from these configs. All
//! validation happens here, up front: a malformed configuration fails
//! fast with a [`ConfigError`], and the running simulation never has to
//! signal errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration values, reported at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("engine RPM range is inverted: min {min_rpm} > max {max_rpm}")]
    InvertedRpmRange { min_rpm: f64, max_rpm: f64 },
    #[error("engine RPM bounds must be non-negative")]
    NegativeRpm,
    #[error("engine max torque must be positive, got {0}")]
    NonPositiveMaxTorque(f64),
    #[error("gear ratio table needs neutral plus at least one gear, got {0} entries")]
    TooFewGears(usize),
    #[error("gear ratio table must reserve index 0 as neutral (ratio 0), got {0}")]
    NonZeroNeutral(f64),
    #[error("efficiency must be in (0, 1], got {0}")]
    EfficiencyOutOfRange(f64),
    #[error("final drive ratio must be positive, got {0}")]
    NonPositiveFinalDrive(f64),
    #[error("wheel radius must be positive, got {0}")]
    NonPositiveRadius(f64),
    #[error("wheel carry mass must be positive, got {0}")]
    NonPositiveCarryMass(f64),
    #[error("vehicle mass must be positive, got {0}")]
    NonPositiveMass(f64),
}

pub(crate) fn check_efficiency(efficiency: f64) -> Result<f64, ConfigError> {
    if efficiency > 0.0 && efficiency <= 1.0 {
        Ok(efficiency)
    } else {
        Err(ConfigError::EfficiencyOutOfRange(efficiency))
    }
}

/// Engine constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Peak torque of the engine (N·m).
    pub max_torque: f64,
    /// Idle speed; the RPM never drops below this (RPM).
    pub min_rpm: f64,
    /// Redline; the RPM never rises above this (RPM).
    pub max_rpm: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_torque: 340.0, // N·m
            min_rpm: 1000.0,
            max_rpm: 4500.0,
        }
    }
}

/// Transmission constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmissionConfig {
    /// Gear ratios indexed by gear. Index 0 is reserved for neutral and
    /// must hold ratio 0; it is never engaged.
    pub gear_ratios: Vec<f64>,
    /// Power transfer efficiency through the gearbox, in (0, 1].
    pub efficiency: f64,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        TransmissionConfig {
            gear_ratios: vec![0.0, 3.6, 2.1, 1.4, 1.0, 0.8, 0.6],
            efficiency: 0.95,
        }
    }
}

/// Differential constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifferentialConfig {
    /// Fixed reduction between driveshaft and axle.
    pub final_drive_ratio: f64,
    /// Power transfer efficiency through the final drive, in (0, 1].
    pub efficiency: f64,
}

impl Default for DifferentialConfig {
    fn default() -> Self {
        DifferentialConfig {
            final_drive_ratio: 4.0,
            efficiency: 0.9,
        }
    }
}

/// Per-wheel constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Rolling radius (m).
    pub radius: f64,
    /// Share of the vehicle mass this wheel accelerates (kg). Supplied
    /// externally; there is no weight-transfer model to derive it from.
    pub carry_mass: f64,
    /// Quadratic aerodynamic drag coefficient, torque per (m/s)².
    pub air_drag_coeff: f64,
    /// Linear rolling resistance coefficient, torque per m/s.
    pub rolling_resistance_coeff: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        WheelConfig {
            radius: 0.23,      // m
            carry_mass: 700.0, // kg, half of the default vehicle mass
            air_drag_coeff: 2.5,
            rolling_resistance_coeff: 25.0,
        }
    }
}

/// Full vehicle configuration: one engine, one transmission, one
/// differential, and the wheel constants shared by all four corners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Total vehicle mass (kg). Informational; the longitudinal model
    /// accelerates each driven wheel against its own `carry_mass`.
    pub mass: f64,
    pub engine: EngineConfig,
    pub transmission: TransmissionConfig,
    pub differential: DifferentialConfig,
    pub wheel: WheelConfig,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        VehicleConfig {
            mass: 1400.0, // kg
            engine: EngineConfig::default(),
            transmission: TransmissionConfig::default(),
            differential: DifferentialConfig::default(),
            wheel: WheelConfig::default(),
        }
    }
}
