//! Canned signal batches for the manual controls.
//!
//! Each preset is a batch applied through [`SignalBus::set_many`] so the
//! whole scenario lands atomically. Fields a preset does not name keep their
//! current values (Low Battery, for example, leaves the gear alone).
//!
//! [`SignalBus::set_many`]: crate::signals::SignalBus::set_many

use crate::signals::{AutonomyState, GearMode, SignalUpdate};

/// "Reset All": back to the showroom state.
pub const fn reset_all() -> [SignalUpdate; 7] {
    [
        SignalUpdate::Speed(0.0),
        SignalUpdate::Gear(GearMode::Park),
        SignalUpdate::BatteryLevel(85.0),
        SignalUpdate::MotorTemp(45.0),
        SignalUpdate::BatteryTemp(22.0),
        SignalUpdate::Power(0.0),
        SignalUpdate::Autonomy(AutonomyState::Manual),
    ]
}

/// Parked at full charge.
pub const fn parked() -> [SignalUpdate; 7] {
    [
        SignalUpdate::Autonomy(AutonomyState::Manual),
        SignalUpdate::Gear(GearMode::Park),
        SignalUpdate::Speed(0.0),
        SignalUpdate::DriverReadiness(10.0),
        SignalUpdate::BatteryLevel(100.0),
        SignalUpdate::Range(450.0),
        SignalUpdate::Power(0.0),
    ]
}

/// Manual city driving at 50 km/h.
pub const fn city_driving() -> [SignalUpdate; 5] {
    [
        SignalUpdate::Autonomy(AutonomyState::Manual),
        SignalUpdate::Gear(GearMode::Drive),
        SignalUpdate::Speed(50.0),
        SignalUpdate::DriverReadiness(10.0),
        SignalUpdate::Power(15.0),
    ]
}

/// Autonomous highway cruise at 120 km/h with the driver half checked out.
pub const fn highway_autonomous() -> [SignalUpdate; 5] {
    [
        SignalUpdate::Autonomy(AutonomyState::Autonomous),
        SignalUpdate::Gear(GearMode::Drive),
        SignalUpdate::Speed(120.0),
        SignalUpdate::DriverReadiness(5.0),
        SignalUpdate::Power(45.0),
    ]
}

/// Low state of charge while still under way.
pub const fn low_battery() -> [SignalUpdate; 4] {
    [
        SignalUpdate::BatteryLevel(15.0),
        SignalUpdate::Range(50.0),
        SignalUpdate::Speed(80.0),
        SignalUpdate::Power(25.0),
    ]
}

/// Gear selection batch. Selecting Park zeroes the speed in the same batch
/// so no reader ever sees a parked car still moving.
pub fn select_gear(gear: GearMode) -> heapless::Vec<SignalUpdate, 2> {
    let mut batch = heapless::Vec::new();
    if gear == GearMode::Park {
        let _ = batch.push(SignalUpdate::Speed(0.0));
    }
    let _ = batch.push(SignalUpdate::Gear(gear));
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::SignalBus;

    #[test]
    fn test_reset_all_yields_literal_snapshot() {
        let mut bus = SignalBus::new();
        // Dirty the state first
        bus.set_many(&[
            SignalUpdate::Speed(200.0),
            SignalUpdate::Gear(GearMode::Drive),
            SignalUpdate::BatteryLevel(12.0),
            SignalUpdate::MotorTemp(79.0),
            SignalUpdate::BatteryTemp(44.0),
            SignalUpdate::Power(150.0),
            SignalUpdate::Autonomy(AutonomyState::Autonomous),
        ]);
        let stamp_before = bus.snapshot().stamp;

        bus.set_many(&reset_all());
        let snap = bus.snapshot();
        assert_eq!(snap.speed_kmh, 0.0);
        assert_eq!(snap.gear, GearMode::Park);
        assert_eq!(snap.battery_pct, 85.0);
        assert_eq!(snap.motor_temp_c, 45.0);
        assert_eq!(snap.battery_temp_c, 22.0);
        assert_eq!(snap.power_kw, 0.0);
        assert_eq!(snap.autonomy, AutonomyState::Manual);
        assert!(snap.stamp > stamp_before);
    }

    #[test]
    fn test_select_park_zeroes_speed_atomically() {
        let mut bus = SignalBus::new();
        bus.set_many(&[SignalUpdate::Gear(GearMode::Drive), SignalUpdate::Speed(80.0)]);

        bus.set_many(&select_gear(GearMode::Park));
        let snap = bus.snapshot();
        assert_eq!(snap.gear, GearMode::Park);
        assert_eq!(snap.speed_kmh, 0.0);
    }

    #[test]
    fn test_select_other_gear_keeps_speed() {
        let mut bus = SignalBus::new();
        bus.set(SignalUpdate::Speed(30.0));

        bus.set_many(&select_gear(GearMode::Neutral));
        let snap = bus.snapshot();
        assert_eq!(snap.gear, GearMode::Neutral);
        assert_eq!(snap.speed_kmh, 30.0);
    }

    #[test]
    fn test_low_battery_leaves_gear_alone() {
        let mut bus = SignalBus::new();
        bus.set(SignalUpdate::Gear(GearMode::Drive));
        bus.set_many(&low_battery());
        let snap = bus.snapshot();
        assert_eq!(snap.gear, GearMode::Drive);
        assert_eq!(snap.battery_pct, 15.0);
        assert_eq!(snap.range_km, 50.0);
    }
}
