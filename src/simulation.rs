//! Telemetry simulation: fixed-period stepping of the signal snapshot.
//!
//! When enabled, the driver evolves all interdependent signals every 100 ms
//! of wall time: speed follows the selected gear, power follows acceleration,
//! the battery drains with power, range derives from charge, temperatures
//! creep toward their operating bands, and distance accumulates on the
//! odometer and trip meter. Each step is one read-compute-write cycle whose
//! result is committed as a single atomic batch.
//!
//! The step math is deliberately simple and carries two quirks:
//!
//! - the distance added per 100 ms step is `speed / 3600` km, i.e. each step
//!   is treated as a full second for distance purposes while every other
//!   field is step-scaled;
//! - regeneration (negative power) still drains the battery, at half the
//!   scale of consumption.
//!
//! Downstream consumers and the tests depend on both, so they are kept
//! as-is.
//!
//! Randomness comes from a [`StdRng`] seeded on construction; pass a fixed
//! seed for reproducible runs. The pure step function takes
//! `&mut impl RngCore` so tests can substitute degenerate generators.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::signals::{GearMode, SignalBus, SignalSnapshot, SignalUpdate};

// =============================================================================
// Simulation Constants
// =============================================================================

/// Fixed simulation period: one step per 100 ms of wall time.
pub const SIM_STEP: Duration = Duration::from_millis(100);

/// Top speed in Drive, km/h. Manual speed nudges clamp to this too.
pub const MAX_SPEED_KMH: f64 = 260.0;

/// Speed ceiling in Reverse, km/h.
const MAX_REVERSE_KMH: f64 = 30.0;

/// Maximum random speed gain per step in Drive, km/h.
const DRIVE_STEP_KMH: f64 = 5.0;

/// Maximum random speed gain per step in Reverse, km/h.
const REVERSE_STEP_KMH: f64 = 2.0;

/// Coasting decay per step outside Drive/Reverse, km/h.
const COAST_DECAY_KMH: f64 = 2.0;

/// Power limits, kW. Negative is regeneration.
const MAX_POWER_KW: f64 = 150.0;
const MAX_REGEN_KW: f64 = -30.0;

/// Range at full charge, km.
const FULL_RANGE_KM: f64 = 450.0;

/// Battery temperature operating band, °C.
const BATT_TEMP_MIN: f64 = 15.0;
const BATT_TEMP_MAX: f64 = 45.0;

/// Motor temperature operating band, °C.
const MOTOR_TEMP_MIN: f64 = 30.0;
const MOTOR_TEMP_MAX: f64 = 80.0;

// =============================================================================
// Driver
// =============================================================================

/// Fixed-period stepper with two states: Idle and Running.
///
/// The driver is advanced from the render loop with the elapsed wall time;
/// it accumulates toward [`SIM_STEP`] and fires whole steps only. Enabling
/// starts the accumulator at zero, so the first step lands one full period
/// after the toggle — never immediately. Disabling clears the accumulator,
/// so a partially elapsed period can never fire late.
pub struct SimulationDriver {
    rng: StdRng,
    enabled: bool,
    accumulator: Duration,
}

impl SimulationDriver {
    /// Create an idle driver. `seed` fixes the random sequence for
    /// reproducible runs; `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            enabled: false,
            accumulator: Duration::ZERO,
        }
    }

    /// Whether the driver is in the Running state.
    #[inline]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle between Idle and Running. Either transition resets the period
    /// accumulator; see the type docs for the scheduling consequences.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.accumulator = Duration::ZERO;
        }
    }

    /// Account for `elapsed` wall time and run every full step it covers.
    /// Each step reads the current snapshot, computes the next one, and
    /// commits it as one atomic batch. Returns the number of steps run.
    pub fn advance(&mut self, elapsed: Duration, bus: &mut SignalBus) -> usize {
        if !self.enabled {
            return 0;
        }
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= SIM_STEP {
            self.accumulator -= SIM_STEP;
            let batch = step_snapshot(&bus.snapshot(), &mut self.rng);
            bus.set_many(&batch);
            steps += 1;
        }
        steps
    }
}

// =============================================================================
// Step Function
// =============================================================================

/// Compute one simulation step from the previous snapshot.
///
/// Pure apart from the RNG; never fails. Out-of-band inputs (e.g. a manual
/// speed write above the Reverse ceiling) are pulled back into range, not
/// rejected. Intermediate math runs unrounded; rounding to the documented
/// display precision happens only on the returned batch.
pub fn step_snapshot(prev: &SignalSnapshot, rng: &mut impl RngCore) -> [SignalUpdate; 8] {
    // 1. Speed follows the gear
    let new_speed = match prev.gear {
        GearMode::Drive => MAX_SPEED_KMH.min(prev.speed_kmh + rng.r#gen::<f64>() * DRIVE_STEP_KMH),
        GearMode::Reverse => {
            0f64.max(MAX_REVERSE_KMH.min(prev.speed_kmh + rng.r#gen::<f64>() * REVERSE_STEP_KMH))
        }
        GearMode::Park | GearMode::Neutral => 0f64.max(prev.speed_kmh - COAST_DECAY_KMH),
    };

    // 2. Power from acceleration: consumption when speeding up, regeneration
    //    when slowing, idle draw at constant speed
    let acceleration = new_speed - prev.speed_kmh;
    let power = if acceleration > 0.0 {
        MAX_POWER_KW.min(new_speed * 0.5 + rng.r#gen::<f64>() * 10.0)
    } else if acceleration < 0.0 {
        MAX_REGEN_KW.max(acceleration * 2.0)
    } else {
        5f64.max(new_speed * 0.1)
    };

    // 3. Battery drain (regeneration drains at half scale, see module docs)
    let drain = if power > 0.0 { power / 10_000.0 } else { -power / 20_000.0 };
    let battery = (prev.battery_pct - drain).clamp(0.0, 100.0);

    // 4. Range derives from the unrounded charge
    let range = (battery / 100.0 * FULL_RANGE_KM).round();

    // 5./6. Temperatures creep toward their bands
    let battery_temp = (prev.battery_temp_c + if power > 50.0 { 0.1 } else { -0.05 })
        .clamp(BATT_TEMP_MIN, BATT_TEMP_MAX);
    let motor_temp = (prev.motor_temp_c + if new_speed > 100.0 { 0.2 } else { -0.1 })
        .clamp(MOTOR_TEMP_MIN, MOTOR_TEMP_MAX);

    // 7. Distance: speed/3600 km per step (per-tick quirk, see module docs)
    let distance = new_speed / 3600.0;
    let odometer = prev.odometer_km + distance;
    let trip = prev.trip_km + distance;

    // 8. Round to display precision at the write boundary
    [
        SignalUpdate::Speed(new_speed.round()),
        SignalUpdate::Power(round1(power)),
        SignalUpdate::BatteryLevel(round1(battery)),
        SignalUpdate::Range(range),
        SignalUpdate::BatteryTemp(round1(battery_temp)),
        SignalUpdate::MotorTemp(round1(motor_temp)),
        SignalUpdate::Odometer(round1(odometer)),
        SignalUpdate::Trip(round2(trip)),
    ]
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{SignalSnapshot, SignalUpdate};

    /// RNG that always yields zero bits; `gen::<f64>()` becomes exactly 0.0.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    /// RNG that always yields all-one bits; `gen::<f64>()` becomes the
    /// largest value below 1.0.
    struct SaturatedRng;

    impl RngCore for SaturatedRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xFF);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0xFF);
            Ok(())
        }
    }

    fn apply(prev: &SignalSnapshot, batch: &[SignalUpdate]) -> SignalSnapshot {
        let mut next = *prev;
        for update in batch {
            match *update {
                SignalUpdate::Speed(v) => next.speed_kmh = v,
                SignalUpdate::Power(v) => next.power_kw = v,
                SignalUpdate::BatteryLevel(v) => next.battery_pct = v,
                SignalUpdate::Range(v) => next.range_km = v,
                SignalUpdate::BatteryTemp(v) => next.battery_temp_c = v,
                SignalUpdate::MotorTemp(v) => next.motor_temp_c = v,
                SignalUpdate::Odometer(v) => next.odometer_km = v,
                SignalUpdate::Trip(v) => next.trip_km = v,
                _ => unreachable!("step batch only writes simulated fields"),
            }
        }
        next
    }

    #[test]
    fn test_zero_random_drive_step_is_deterministic() {
        // Drive at speed 0 with a zero RNG: speed increment is 0, so
        // acceleration is 0 and power falls to the 5 kW idle-draw floor.
        let prev = SignalSnapshot {
            gear: GearMode::Drive,
            ..SignalSnapshot::default()
        };

        let next = apply(&prev, &step_snapshot(&prev, &mut ZeroRng));

        assert_eq!(next.speed_kmh, 0.0);
        assert_eq!(next.power_kw, 5.0);
        // Drain is 5/10000 = 0.0005 %, invisible at one-decimal rounding
        assert_eq!(next.battery_pct, 85.0);
        // ...but visible in the derived range: 84.9995 % of 450 km rounds to 382
        assert_eq!(next.range_km, 382.0);
        assert_eq!(next.odometer_km, prev.odometer_km);
        assert_eq!(next.trip_km, 0.0);
        // Idle draw is under the 50 kW threshold, temps cool
        assert_eq!(next.battery_temp_c, 22.0); // 21.95 rounds back up
        assert_eq!(next.motor_temp_c, 44.9);
    }

    #[test]
    fn test_reverse_speed_is_capped() {
        let prev = SignalSnapshot {
            gear: GearMode::Reverse,
            speed_kmh: 29.0,
            ..SignalSnapshot::default()
        };

        let next = apply(&prev, &step_snapshot(&prev, &mut SaturatedRng));
        assert_eq!(next.speed_kmh, 30.0);
    }

    #[test]
    fn test_reverse_pulls_overspeed_back_to_ceiling() {
        // Manual write above the Reverse ceiling: the next step clamps to 30
        // and the deceleration registers as regeneration, floored at -30 kW.
        let prev = SignalSnapshot {
            gear: GearMode::Reverse,
            speed_kmh: 80.0,
            ..SignalSnapshot::default()
        };

        let next = apply(&prev, &step_snapshot(&prev, &mut ZeroRng));
        assert_eq!(next.speed_kmh, 30.0);
        assert_eq!(next.power_kw, -30.0);
    }

    #[test]
    fn test_coast_decays_to_zero_floor() {
        let prev = SignalSnapshot {
            gear: GearMode::Neutral,
            speed_kmh: 1.0,
            ..SignalSnapshot::default()
        };

        let next = apply(&prev, &step_snapshot(&prev, &mut ZeroRng));
        assert_eq!(next.speed_kmh, 0.0);
        // accel = -1 -> regeneration at -2 kW
        assert_eq!(next.power_kw, -2.0);
    }

    #[test]
    fn test_battery_never_leaves_domain() {
        let mut prev = SignalSnapshot {
            gear: GearMode::Drive,
            battery_pct: 0.001,
            ..SignalSnapshot::default()
        };

        for _ in 0..100 {
            prev = apply(&prev, &step_snapshot(&prev, &mut SaturatedRng));
            assert!(prev.battery_pct >= 0.0 && prev.battery_pct <= 100.0);
        }
    }

    #[test]
    fn test_long_drive_stays_in_documented_domains() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut snap = SignalSnapshot {
            gear: GearMode::Drive,
            ..SignalSnapshot::default()
        };
        let mut last_odo = snap.odometer_km;

        for _ in 0..500 {
            snap = apply(&snap, &step_snapshot(&snap, &mut rng));
            assert!(snap.speed_kmh >= 0.0 && snap.speed_kmh <= 260.0);
            assert!(snap.power_kw >= -30.0 && snap.power_kw <= 150.0);
            assert!(snap.battery_pct >= 0.0 && snap.battery_pct <= 100.0);
            assert!(snap.battery_temp_c >= 15.0 && snap.battery_temp_c <= 45.0);
            assert!(snap.motor_temp_c >= 30.0 && snap.motor_temp_c <= 80.0);
            assert!(snap.range_km >= 0.0 && snap.range_km <= 450.0);
            assert!(snap.odometer_km >= last_odo, "odometer must not run backward");
            last_odo = snap.odometer_km;
        }
        // 500 steps of Drive with a real RNG must actually move the car
        assert!(snap.speed_kmh > 0.0);
        assert!(snap.trip_km > 0.0);
    }

    #[test]
    fn test_outputs_carry_documented_precision() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut snap = SignalSnapshot {
            gear: GearMode::Drive,
            ..SignalSnapshot::default()
        };

        for _ in 0..50 {
            snap = apply(&snap, &step_snapshot(&snap, &mut rng));
            assert_eq!(snap.speed_kmh.fract(), 0.0, "speed is an integer");
            assert_eq!(snap.range_km.fract(), 0.0, "range is an integer");
            for (value, scale) in [
                (snap.power_kw, 10.0),
                (snap.battery_pct, 10.0),
                (snap.battery_temp_c, 10.0),
                (snap.motor_temp_c, 10.0),
                (snap.odometer_km, 10.0),
                (snap.trip_km, 100.0),
            ] {
                let scaled = value * scale;
                assert!(
                    (scaled - scaled.round()).abs() < 1e-6,
                    "{value} not rounded to 1/{scale}"
                );
            }
        }
    }

    #[test]
    fn test_distance_uses_per_tick_convention() {
        // One step at a held 36 km/h adds exactly 0.01 km, regardless of the
        // step being 100 ms (per-tick convention, see module docs).
        let prev = SignalSnapshot {
            gear: GearMode::Drive,
            speed_kmh: 36.0,
            odometer_km: 100.0,
            trip_km: 0.0,
            ..SignalSnapshot::default()
        };

        let next = apply(&prev, &step_snapshot(&prev, &mut ZeroRng));
        assert_eq!(next.trip_km, 0.01);
        // The odometer's one-decimal rounding swallows the 0.01 km increment
        assert_eq!(next.odometer_km, 100.0);
    }

    // -------------------------------------------------------------------------
    // Driver Scheduling Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_first_step_waits_one_full_period() {
        let mut bus = SignalBus::new();
        bus.set(SignalUpdate::Gear(GearMode::Drive));
        let mut driver = SimulationDriver::new(Some(1));
        driver.set_enabled(true);

        assert_eq!(driver.advance(Duration::from_millis(99), &mut bus), 0);
        assert_eq!(driver.advance(Duration::from_millis(1), &mut bus), 1);
    }

    #[test]
    fn test_idle_driver_never_steps() {
        let mut bus = SignalBus::new();
        let mut driver = SimulationDriver::new(Some(1));
        let stamp = bus.snapshot().stamp;

        assert_eq!(driver.advance(Duration::from_secs(10), &mut bus), 0);
        assert_eq!(bus.snapshot().stamp, stamp, "idle driver must not write");
    }

    #[test]
    fn test_disable_cancels_pending_step() {
        let mut bus = SignalBus::new();
        bus.set(SignalUpdate::Gear(GearMode::Drive));
        let mut driver = SimulationDriver::new(Some(1));

        driver.set_enabled(true);
        assert_eq!(driver.advance(Duration::from_millis(90), &mut bus), 0);
        driver.set_enabled(false);
        assert_eq!(driver.advance(Duration::from_secs(1), &mut bus), 0);

        // Re-enabling starts a fresh period; the 90 ms from before is gone
        driver.set_enabled(true);
        assert_eq!(driver.advance(Duration::from_millis(99), &mut bus), 0);
    }

    #[test]
    fn test_large_elapsed_runs_whole_steps_only() {
        let mut bus = SignalBus::new();
        bus.set(SignalUpdate::Gear(GearMode::Drive));
        let mut driver = SimulationDriver::new(Some(1));
        driver.set_enabled(true);

        assert_eq!(driver.advance(Duration::from_millis(350), &mut bus), 3);
        assert_eq!(driver.advance(Duration::from_millis(50), &mut bus), 1);
    }

    #[test]
    fn test_step_commits_one_atomic_batch() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut bus = SignalBus::new();
        bus.set(SignalUpdate::Gear(GearMode::Drive));

        let notifications = Rc::new(RefCell::new(0u32));
        let notifications_in_cb = Rc::clone(&notifications);
        bus.subscribe(move |_| *notifications_in_cb.borrow_mut() += 1);

        let mut driver = SimulationDriver::new(Some(1));
        driver.set_enabled(true);
        driver.advance(Duration::from_millis(100), &mut bus);

        assert_eq!(*notifications.borrow(), 1, "one step, one notification");
    }
}
