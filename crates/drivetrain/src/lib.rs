//! Longitudinal drivetrain simulation.
//!
//! Models the torque path of a rear-driven car well enough to animate
//! one:
//!
//! - [`engine::Engine`]: torque curve, throttle and clutch inputs, RPM
//!   tracking.
//! - [`transmission::Transmission`]: discrete gear ratios with
//!   efficiency loss.
//! - [`differential::Differential`]: even torque split through the
//!   final drive.
//! - [`wheel::Wheel`]: rotating mass under drive torque, aerodynamic
//!   drag, and rolling resistance.
//! - [`vehicle::Vehicle`]: owns the above and closes the feedback loop
//!   between wheel speed and engine RPM once per tick.
//!
//! This is not a vehicle dynamics engine: no tire slip, no suspension,
//! no lateral motion. One longitudinal degree of freedom, integrated
//! with explicit Euler at whatever tick rate the caller supplies.

pub mod config;
pub mod differential;
pub mod engine;
pub mod transmission;
pub mod vehicle;
pub mod wheel;

pub use config::{
    ConfigError, DifferentialConfig, EngineConfig, TransmissionConfig, VehicleConfig, WheelConfig,
};
pub use vehicle::Vehicle;
