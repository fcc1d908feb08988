//! Vehicle orchestrator: closes the loop between engine and wheels.
//!
//! Each tick pushes torque forward (engine -> transmission ->
//! differential -> driven wheels) and pulls velocity backward (wheel
//! speeds -> differential -> transmission -> engine RPM). Torque for a
//! tick is computed from the RPM left by the previous tick and the RPM
//! is only updated after the wheels have moved; this one-tick lag
//! avoids solving an implicit torque/RPM system and is the intended
//! behavior, not an ordering bug.

use simcore::units::{ms_to_kmh, rpm_to_angular_velocity};
use simcore::{Model, SimContext, Simulate};

use crate::config::{ConfigError, VehicleConfig};
use crate::differential::Differential;
use crate::engine::Engine;
use crate::transmission::Transmission;
use crate::wheel::Wheel;

/// A rear-driven two-axle vehicle. Owns every drivetrain component by
/// value; there is no shared state and no interior mutability.
#[derive(Debug, Clone)]
pub struct Vehicle {
    mass: f64,
    engine: Engine,
    transmission: Transmission,
    differential: Differential,
    left_drive_wheel: Wheel,
    right_drive_wheel: Wheel,
    // Passive wheels receive no torque; they are tracked so a future
    // front-axle model has somewhere to live.
    left_free_wheel: Wheel,
    right_free_wheel: Wheel,
}

impl Vehicle {
    /// Builds a vehicle at rest: engine idling, first gear engaged,
    /// wheels stationary. Fails fast on a malformed configuration.
    pub fn new(config: &VehicleConfig) -> Result<Self, ConfigError> {
        if !(config.mass > 0.0) {
            return Err(ConfigError::NonPositiveMass(config.mass));
        }
        Ok(Vehicle {
            mass: config.mass,
            engine: Engine::new(&config.engine)?,
            transmission: Transmission::new(&config.transmission)?,
            differential: Differential::new(&config.differential)?,
            left_drive_wheel: Wheel::new(&config.wheel)?,
            right_drive_wheel: Wheel::new(&config.wheel)?,
            left_free_wheel: Wheel::new(&config.wheel)?,
            right_free_wheel: Wheel::new(&config.wheel)?,
        })
    }

    /// Advances the whole drivetrain by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        // Forward path, using the previous tick's RPM.
        let produced_torque = self.engine.produced_torque();
        let transmission_torque = self.transmission.output_torque(produced_torque);
        let (left_torque, right_torque) = self.differential.output_torque(transmission_torque);

        // Speed the wheels would turn at with the engine pinned at
        // redline through the current gearing. Informational cap.
        let max_wheel_angular_velocity =
            rpm_to_angular_velocity(self.engine.max_rpm() / self.total_ratio());
        self.left_drive_wheel
            .set_max_angular_velocity(max_wheel_angular_velocity);
        self.right_drive_wheel
            .set_max_angular_velocity(max_wheel_angular_velocity);

        self.left_drive_wheel.set_torque(left_torque);
        self.right_drive_wheel.set_torque(right_torque);
        self.left_drive_wheel.update(dt);
        self.right_drive_wheel.update(dt);
        self.left_free_wheel.update(dt);
        self.right_free_wheel.update(dt);

        // Backward path: recombine wheel speeds and pull the engine
        // toward the drivetrain-implied speed for the next tick.
        let differential_velocity = self.differential.angular_velocity(
            self.left_drive_wheel.angular_velocity(),
            self.right_drive_wheel.angular_velocity(),
        );
        let transmission_velocity = self.transmission.angular_velocity(differential_velocity);
        self.engine.match_rpm(transmission_velocity);
    }

    /// Vehicle speed in km/h, averaged over both driven wheels.
    pub fn kmh(&self) -> f64 {
        let mean_velocity =
            (self.left_drive_wheel.linear_velocity() + self.right_drive_wheel.linear_velocity())
                / 2.0;
        ms_to_kmh(mean_velocity)
    }

    /// Combined reduction from engine to wheels: gear ratio times final
    /// drive ratio.
    pub fn total_ratio(&self) -> f64 {
        self.transmission.current_ratio() * self.differential.final_drive_ratio()
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn transmission(&self) -> &Transmission {
        &self.transmission
    }

    pub fn transmission_mut(&mut self) -> &mut Transmission {
        &mut self.transmission
    }

    pub fn differential(&self) -> &Differential {
        &self.differential
    }

    pub fn left_drive_wheel(&self) -> &Wheel {
        &self.left_drive_wheel
    }

    pub fn left_drive_wheel_mut(&mut self) -> &mut Wheel {
        &mut self.left_drive_wheel
    }

    pub fn right_drive_wheel(&self) -> &Wheel {
        &self.right_drive_wheel
    }

    pub fn right_drive_wheel_mut(&mut self) -> &mut Wheel {
        &mut self.right_drive_wheel
    }
}

impl Model for Vehicle {
    /// Returns the vehicle to rest without rebuilding it.
    fn reset(&mut self) {
        self.engine.reset();
        self.left_drive_wheel.reset();
        self.right_drive_wheel.reset();
        self.left_free_wheel.reset();
        self.right_free_wheel.reset();
    }
}

impl Simulate for Vehicle {
    fn step(&mut self, ctx: SimContext) {
        self.update(ctx.dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, TransmissionConfig};
    use approx::assert_relative_eq;
    use simcore::units::angular_velocity_to_rpm;

    const DT: f64 = 0.1;

    /// The end-to-end scenario: demo constants, half throttle, clutch
    /// locked, third gear, starting from rest.
    fn spin_up_vehicle() -> Vehicle {
        let mut vehicle = Vehicle::new(&VehicleConfig::default()).unwrap();
        vehicle.engine_mut().set_throttle(0.5);
        vehicle.engine_mut().set_clutch(1.0);
        vehicle.transmission_mut().shift_gear(3);
        vehicle
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let config = VehicleConfig {
            mass: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Vehicle::new(&config),
            Err(ConfigError::NonPositiveMass(_))
        ));
    }

    #[test]
    fn test_propagates_component_config_errors() {
        let config = VehicleConfig {
            engine: EngineConfig {
                min_rpm: 9000.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Vehicle::new(&config).is_err());

        let config = VehicleConfig {
            transmission: TransmissionConfig {
                gear_ratios: vec![],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Vehicle::new(&config).is_err());
    }

    #[test]
    fn test_stays_at_rest_without_throttle() {
        let mut vehicle = Vehicle::new(&VehicleConfig::default()).unwrap();
        for _ in 0..50 {
            vehicle.update(DT);
        }
        assert_eq!(vehicle.left_drive_wheel().angular_velocity(), 0.0);
        assert_eq!(vehicle.kmh(), 0.0);
        assert_eq!(vehicle.engine().current_rpm(), vehicle.engine().min_rpm());
    }

    #[test]
    fn test_insufficient_torque_cannot_creep() {
        let mut vehicle = Vehicle::new(&VehicleConfig::default()).unwrap();
        // A whisper of throttle: 0.5% of 340 N·m at the idle torque
        // factor (~0.43) is ~0.73 N·m, which first gear (3.6 x 0.95) and
        // the final drive (0.9 x 4.0 / 2) turn into ~4.5 N·m per wheel,
        // just under the 5 N·m static-lock threshold.
        vehicle.engine_mut().set_throttle(0.005);
        for _ in 0..50 {
            vehicle.update(DT);
        }
        assert!(vehicle.left_drive_wheel().in_torque() < 5.0);
        assert!(vehicle.left_drive_wheel().in_torque() > 0.0);
        assert_eq!(vehicle.left_drive_wheel().angular_velocity(), 0.0);
    }

    #[test]
    fn test_spin_up_is_monotone_and_converges() {
        let mut vehicle = spin_up_vehicle();

        let mut previous = 0.0;
        for _ in 0..100 {
            vehicle.update(DT);
            let velocity = vehicle.left_drive_wheel().angular_velocity();
            assert!(velocity >= previous, "wheel speed fell during spin-up");
            previous = velocity;

            let rpm = vehicle.engine().current_rpm();
            assert!(rpm >= vehicle.engine().min_rpm() && rpm <= vehicle.engine().max_rpm());
        }
        // After 10 simulated seconds the car is well underway.
        assert!(previous > 30.0, "wheel speed only reached {previous}");

        // Keep going until drive torque balances drag plus rolling
        // resistance; the speed must settle, not diverge or oscillate.
        for _ in 0..1400 {
            vehicle.update(DT);
        }
        let settled = vehicle.left_drive_wheel().angular_velocity();
        for _ in 0..100 {
            vehicle.update(DT);
        }
        let still_settled = vehicle.left_drive_wheel().angular_velocity();
        assert_relative_eq!(settled, still_settled, max_relative = 1e-6);
        assert!(settled > 70.0 && settled < 90.0, "steady speed {settled}");
    }

    #[test]
    fn test_steady_rpm_matches_wheel_speed() {
        let mut vehicle = spin_up_vehicle();
        for _ in 0..1500 {
            vehicle.update(DT);
        }
        // With the clutch locked, steady-state engine RPM is exactly the
        // wheel speed projected through the full reduction.
        let average = (vehicle.left_drive_wheel().angular_velocity()
            + vehicle.right_drive_wheel().angular_velocity())
            / 2.0;
        let implied_rpm = angular_velocity_to_rpm(average * vehicle.total_ratio());
        assert_relative_eq!(
            vehicle.engine().current_rpm(),
            implied_rpm,
            max_relative = 1e-3
        );
        assert!(implied_rpm < vehicle.engine().max_rpm());
    }

    #[test]
    fn test_kmh_is_mean_driven_wheel_speed() {
        let mut vehicle = spin_up_vehicle();
        for _ in 0..25 {
            vehicle.update(DT);
        }
        let mean = (vehicle.left_drive_wheel().linear_velocity()
            + vehicle.right_drive_wheel().linear_velocity())
            / 2.0;
        assert_relative_eq!(vehicle.kmh(), ms_to_kmh(mean));
    }

    #[test]
    fn test_both_drive_wheels_receive_equal_torque() {
        let mut vehicle = spin_up_vehicle();
        vehicle.update(DT);
        assert_relative_eq!(
            vehicle.left_drive_wheel().in_torque(),
            vehicle.right_drive_wheel().in_torque()
        );
        assert!(vehicle.left_drive_wheel().in_torque() > 0.0);
    }

    #[test]
    fn test_total_ratio_follows_gear() {
        let mut vehicle = Vehicle::new(&VehicleConfig::default()).unwrap();
        assert_relative_eq!(vehicle.total_ratio(), 3.6 * 4.0);
        vehicle.transmission_mut().shift_gear(3);
        assert_relative_eq!(vehicle.total_ratio(), 1.4 * 4.0);
    }

    #[test]
    fn test_wheel_speed_cap_tracks_gearing() {
        let mut vehicle = spin_up_vehicle();
        vehicle.update(DT);
        let expected =
            rpm_to_angular_velocity(vehicle.engine().max_rpm() / vehicle.total_ratio());
        assert_relative_eq!(
            vehicle.left_drive_wheel().max_angular_velocity(),
            expected
        );
    }

    #[test]
    fn test_reset_returns_to_rest() {
        let mut vehicle = spin_up_vehicle();
        for _ in 0..100 {
            vehicle.update(DT);
        }
        assert!(vehicle.kmh() > 0.0);

        vehicle.reset();
        assert_eq!(vehicle.kmh(), 0.0);
        assert_eq!(vehicle.engine().current_rpm(), vehicle.engine().min_rpm());
        assert_eq!(vehicle.left_drive_wheel().in_torque(), 0.0);
    }

    #[test]
    fn test_fixed_timestep_drives_vehicle() {
        use simcore::FixedTimestep;

        let mut stepper = FixedTimestep::new(spin_up_vehicle(), DT);
        // Irregular frame times, same total simulated duration.
        for frame_dt in [0.13, 0.29, 0.08, 0.31, 0.19] {
            stepper.advance(frame_dt);
        }

        let mut reference = spin_up_vehicle();
        for _ in 0..(stepper.elapsed() / DT).round() as usize {
            reference.update(DT);
        }
        assert_relative_eq!(
            stepper.model.left_drive_wheel().angular_velocity(),
            reference.left_drive_wheel().angular_velocity(),
            epsilon = 1e-12
        );
    }
}
