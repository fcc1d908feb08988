//! Runs the half-throttle spin-up scenario and dumps a CSV trace for
//! plotting: wheel speed climbing until drive torque balances drag and
//! rolling resistance, engine RPM following through the gearing.

use std::fs::File;
use std::io::Write;

use drivetrain::{Vehicle, VehicleConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut vehicle = Vehicle::new(&VehicleConfig::default())?;
    vehicle.engine_mut().set_throttle(0.5);
    vehicle.engine_mut().set_clutch(1.0);
    vehicle.transmission_mut().shift_gear(3);

    let dt = 0.1;
    let t_end = 180.0;

    let mut csv = File::create("spin_up.csv")?;
    writeln!(csv, "t,rpm,engine_torque,wheel_torque,wheel_omega,kmh")?;

    let mut t = 0.0;
    while t <= t_end {
        vehicle.update(dt);
        t += dt;

        writeln!(
            csv,
            "{:.1},{:.1},{:.2},{:.2},{:.4},{:.2}",
            t,
            vehicle.engine().current_rpm(),
            vehicle.engine().produced_torque(),
            vehicle.left_drive_wheel().in_torque(),
            vehicle.left_drive_wheel().angular_velocity(),
            vehicle.kmh(),
        )?;
    }

    println!("Wrote spin_up.csv");
    Ok(())
}
