//! Console stand-in for the browser demo.
//!
//! Runs the drivetrain under a simple driver schedule (slip the clutch
//! to pull away, shift by RPM) and logs the same readouts the HTML HUD
//! displayed: engine RPM and torque, transmission torque, per-wheel
//! torque and speeds, and vehicle km/h.

use std::{env, error::Error, fs};

use drivetrain::{Vehicle, VehicleConfig};
use log::{info, LevelFilter};
use simcore::FixedTimestep;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Nominal render frame time fed to the fixed stepper (s).
const FRAME_DT: f64 = 1.0 / 60.0;
/// Physics sub-step length (s).
const FIXED_DT: f64 = 0.01;
/// Total simulated time (s).
const SIM_DURATION: f64 = 60.0;
/// HUD log interval (s).
const HUD_PERIOD: f64 = 0.5;
/// Below this speed the driver slips the clutch to pull away (m/s).
const CLUTCH_SLIP_SPEED: f64 = 2.0;
const SHIFT_UP_RPM: f64 = 4200.0;
const SHIFT_DOWN_RPM: f64 = 1400.0;

fn load_config() -> Result<VehicleConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => {
            let raw = fs::read_to_string(&path)?;
            let config = serde_json::from_str(&raw)?;
            info!("loaded vehicle config from {path}");
            Ok(config)
        }
        None => Ok(VehicleConfig::default()),
    }
}

/// Driver schedule adapted from the original demo loop.
fn drive(vehicle: &mut Vehicle) {
    let speed = vehicle.left_drive_wheel().linear_velocity();
    if speed < CLUTCH_SLIP_SPEED {
        vehicle.engine_mut().set_clutch(0.2);
    } else {
        vehicle.engine_mut().set_clutch(1.0);
    }
    vehicle.engine_mut().set_throttle(0.6);

    let rpm = vehicle.engine().current_rpm();
    let gear = vehicle.transmission().current_gear();
    if rpm > SHIFT_UP_RPM && gear + 1 < vehicle.transmission().gear_count() {
        vehicle.transmission_mut().shift_gear(gear + 1);
    } else if rpm < SHIFT_DOWN_RPM && gear > 1 {
        vehicle.transmission_mut().shift_gear(gear - 1);
    }
}

fn log_hud(vehicle: &Vehicle, t: f64) {
    let engine = vehicle.engine();
    let left = vehicle.left_drive_wheel();
    let right = vehicle.right_drive_wheel();
    info!(
        "t={t:5.1}s gear={} rpm={:4.0} engine={:5.1}Nm trans={:6.1}Nm wheels={:5.1}/{:5.1}Nm \
         w={:5.1}/{:5.1}rad/s v={:4.1}/{:4.1}m/s speed={:5.1}km/h",
        vehicle.transmission().current_gear(),
        engine.current_rpm(),
        engine.produced_torque(),
        vehicle.transmission().current_torque(),
        left.in_torque(),
        right.in_torque(),
        left.angular_velocity(),
        right.angular_velocity(),
        left.linear_velocity(),
        right.linear_velocity(),
        vehicle.kmh(),
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = load_config()?;
    let mut stepper = FixedTimestep::new(Vehicle::new(&config)?, FIXED_DT);

    let mut next_hud = 0.0;
    while stepper.elapsed() < SIM_DURATION {
        drive(&mut stepper.model);
        stepper.advance(FRAME_DT);
        if stepper.elapsed() >= next_hud {
            log_hud(&stepper.model, stepper.elapsed());
            next_hud += HUD_PERIOD;
        }
    }

    Ok(())
}
