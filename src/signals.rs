//! Vehicle signal bus: the shared telemetry snapshot and its write paths.
//!
//! All displayed values come from one process-wide [`SignalSnapshot`]. The
//! snapshot is versioned: every write stamps it with a strictly increasing
//! value, so consumers can detect freshness by comparing stamps. Writes go
//! through [`SignalBus::set`] (single field) or [`SignalBus::set_many`]
//! (atomic batch — all fields land under one stamp and one notification, so
//! a subscriber never observes a half-applied batch).
//!
//! The set of signal fields is closed: [`SignalUpdate`] has one variant per
//! writable field, so referencing an unknown signal is a compile error
//! rather than a runtime one.
//!
//! Manual writes pass values through as given. Range clamping is the
//! simulation's job ([`crate::simulation`]); the bus does not second-guess
//! its writers.

use std::time::Instant;

// =============================================================================
// Signal Enums
// =============================================================================

/// Driving mode reported on the bus. Selects which target geometry the
/// layout engine converges toward.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum AutonomyState {
    /// Driver in control.
    #[default]
    Manual,
    /// Autonomous driving engaged.
    Autonomous,
}

impl AutonomyState {
    /// Whether autonomous driving is engaged.
    #[inline]
    pub const fn is_autonomous(self) -> bool {
        matches!(self, Self::Autonomous)
    }

    /// Toggle between manual and autonomous.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Manual => Self::Autonomous,
            Self::Autonomous => Self::Manual,
        }
    }

    /// Human-readable status name for the banner widget.
    pub const fn status_name(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Autonomous => "Autonomous",
        }
    }
}

/// Transmission gear selection.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum GearMode {
    #[default]
    Park,
    Reverse,
    Neutral,
    Drive,
}

impl GearMode {
    /// All gears in selector order (P R N D).
    pub const ALL: [Self; 4] = [Self::Park, Self::Reverse, Self::Neutral, Self::Drive];

    /// Single-letter gear label as shown on the indicator.
    pub const fn label(self) -> char {
        match self {
            Self::Park => 'P',
            Self::Reverse => 'R',
            Self::Neutral => 'N',
            Self::Drive => 'D',
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// One complete, internally consistent set of signal values.
///
/// Copied out to readers; only the [`SignalBus`] mutates the authoritative
/// version. `stamp` strictly increases with every committed write.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SignalSnapshot {
    pub autonomy: AutonomyState,
    pub gear: GearMode,
    /// Vehicle speed, 0..=260 km/h.
    pub speed_kmh: f64,
    /// Driver readiness score, 0..=10 (10 = fully ready).
    pub driver_readiness: f64,
    /// State of charge, 0..=100 %.
    pub battery_pct: f64,
    /// Battery pack temperature in °C.
    pub battery_temp_c: f64,
    /// Motor temperature in °C.
    pub motor_temp_c: f64,
    /// Total distance, monotonic non-decreasing, km.
    pub odometer_km: f64,
    /// Resettable trip distance, km.
    pub trip_km: f64,
    /// Remaining range, km. Derived from charge during simulation, directly
    /// settable from manual controls.
    pub range_km: f64,
    /// Drive power in kW; negative values are regeneration.
    pub power_kw: f64,
    /// Monotonic write stamp (microseconds since bus creation, bumped by at
    /// least 1 per write).
    pub stamp: u64,
}

impl Default for SignalSnapshot {
    /// Ignition defaults: parked, 85 % charge, 380 km range, 12 543 km on the
    /// odometer.
    fn default() -> Self {
        Self {
            autonomy: AutonomyState::Manual,
            gear: GearMode::Park,
            speed_kmh: 0.0,
            driver_readiness: 10.0,
            battery_pct: 85.0,
            battery_temp_c: 22.0,
            motor_temp_c: 45.0,
            odometer_km: 12_543.0,
            trip_km: 0.0,
            range_km: 380.0,
            power_kw: 0.0,
            stamp: 0,
        }
    }
}

// =============================================================================
// Write Path
// =============================================================================

/// A single-field write. One variant per writable signal; the closed set is
/// what makes "unknown field name" unrepresentable.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SignalUpdate {
    Autonomy(AutonomyState),
    Gear(GearMode),
    Speed(f64),
    DriverReadiness(f64),
    BatteryLevel(f64),
    BatteryTemp(f64),
    MotorTemp(f64),
    Odometer(f64),
    Trip(f64),
    Range(f64),
    Power(f64),
}

/// Handle returned by [`SignalBus::subscribe`]; pass to
/// [`SignalBus::unsubscribe`] when the observer goes away.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(&SignalSnapshot)>;

/// Owner of the authoritative snapshot. Single-writer by construction
/// (`&mut self` on every write); readers get copies.
pub struct SignalBus {
    snapshot: SignalSnapshot,
    epoch: Instant,
    subscribers: Vec<(SubscriberId, Callback)>,
    next_id: u64,
}

impl SignalBus {
    /// Create a bus holding the ignition-default snapshot.
    pub fn new() -> Self {
        Self {
            snapshot: SignalSnapshot::default(),
            epoch: Instant::now(),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Current snapshot. Always fully formed, never a partial batch.
    #[inline]
    pub fn snapshot(&self) -> SignalSnapshot {
        self.snapshot
    }

    /// Write one field, stamp, and notify subscribers.
    pub fn set(&mut self, update: SignalUpdate) {
        self.apply(update);
        self.commit();
    }

    /// Write a batch of fields atomically: all fields land under a single
    /// stamp and subscribers are notified exactly once.
    pub fn set_many(&mut self, updates: &[SignalUpdate]) {
        for update in updates {
            self.apply(*update);
        }
        self.commit();
    }

    /// Register an observer called after every committed write.
    pub fn subscribe(&mut self, callback: impl FnMut(&SignalSnapshot) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove an observer. Returns `false` if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn apply(&mut self, update: SignalUpdate) {
        let s = &mut self.snapshot;
        match update {
            SignalUpdate::Autonomy(v) => s.autonomy = v,
            SignalUpdate::Gear(v) => s.gear = v,
            SignalUpdate::Speed(v) => s.speed_kmh = v,
            SignalUpdate::DriverReadiness(v) => s.driver_readiness = v,
            SignalUpdate::BatteryLevel(v) => s.battery_pct = v,
            SignalUpdate::BatteryTemp(v) => s.battery_temp_c = v,
            SignalUpdate::MotorTemp(v) => s.motor_temp_c = v,
            SignalUpdate::Odometer(v) => s.odometer_km = v,
            SignalUpdate::Trip(v) => s.trip_km = v,
            SignalUpdate::Range(v) => s.range_km = v,
            SignalUpdate::Power(v) => s.power_kw = v,
        }
    }

    /// Stamp the snapshot and notify. The stamp is wall-clock micros since
    /// bus creation, forced past the previous stamp so that writes landing
    /// within the same microsecond still strictly increase.
    fn commit(&mut self) {
        let now = self.epoch.elapsed().as_micros() as u64;
        self.snapshot.stamp = now.max(self.snapshot.stamp + 1);
        for (_, callback) in &mut self.subscribers {
            callback(&self.snapshot);
        }
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_ignition_defaults() {
        let bus = SignalBus::new();
        let snap = bus.snapshot();
        assert_eq!(snap.autonomy, AutonomyState::Manual);
        assert_eq!(snap.gear, GearMode::Park);
        assert_eq!(snap.speed_kmh, 0.0);
        assert_eq!(snap.driver_readiness, 10.0);
        assert_eq!(snap.battery_pct, 85.0);
        assert_eq!(snap.battery_temp_c, 22.0);
        assert_eq!(snap.motor_temp_c, 45.0);
        assert_eq!(snap.odometer_km, 12_543.0);
        assert_eq!(snap.trip_km, 0.0);
        assert_eq!(snap.range_km, 380.0);
        assert_eq!(snap.power_kw, 0.0);
        assert_eq!(snap.stamp, 0);
    }

    #[test]
    fn test_stamp_strictly_increases() {
        // Rapid writes land within the same microsecond; the +1 bump must
        // keep stamps strictly increasing anyway.
        let mut bus = SignalBus::new();
        let mut last = bus.snapshot().stamp;
        for i in 0..1000 {
            bus.set(SignalUpdate::Speed(f64::from(i)));
            let stamp = bus.snapshot().stamp;
            assert!(stamp > last, "stamp {stamp} not greater than {last}");
            last = stamp;
        }
    }

    #[test]
    fn test_batch_is_atomic_for_subscribers() {
        // A subscriber must see either both old values or both new values,
        // never one of each.
        let mut bus = SignalBus::new();
        let seen: Rc<RefCell<Vec<(f64, f64)>>> = Rc::default();
        let seen_in_cb = Rc::clone(&seen);
        bus.subscribe(move |snap| {
            seen_in_cb.borrow_mut().push((snap.speed_kmh, snap.power_kw));
        });

        bus.set_many(&[SignalUpdate::Speed(120.0), SignalUpdate::Power(45.0)]);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1, "one batch, one notification");
        assert_eq!(seen[0], (120.0, 45.0));
    }

    #[test]
    fn test_batch_commits_one_stamp() {
        let mut bus = SignalBus::new();
        bus.set_many(&[
            SignalUpdate::Speed(50.0),
            SignalUpdate::Gear(GearMode::Drive),
            SignalUpdate::Power(15.0),
        ]);
        let first = bus.snapshot().stamp;
        bus.set(SignalUpdate::Speed(51.0));
        assert!(bus.snapshot().stamp > first);
    }

    #[test]
    fn test_manual_write_passes_through_unclamped() {
        // The bus does not clamp; only the simulation path does.
        let mut bus = SignalBus::new();
        bus.set(SignalUpdate::BatteryLevel(-5.0));
        assert_eq!(bus.snapshot().battery_pct, -5.0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut bus = SignalBus::new();
        let count = Rc::new(RefCell::new(0u32));
        let count_in_cb = Rc::clone(&count);
        let id = bus.subscribe(move |_| *count_in_cb.borrow_mut() += 1);

        bus.set(SignalUpdate::Speed(10.0));
        assert_eq!(*count.borrow(), 1);

        assert!(bus.unsubscribe(id));
        bus.set(SignalUpdate::Speed(20.0));
        assert_eq!(*count.borrow(), 1);

        // Double unsubscribe is a no-op
        assert!(!bus.unsubscribe(id));
    }

    #[test]
    fn test_gear_labels() {
        let labels: Vec<char> = GearMode::ALL.iter().map(|g| g.label()).collect();
        assert_eq!(labels, ['P', 'R', 'N', 'D']);
    }

    #[test]
    fn test_autonomy_toggle() {
        assert_eq!(AutonomyState::Manual.toggle(), AutonomyState::Autonomous);
        assert!(AutonomyState::Autonomous.is_autonomous());
        assert_eq!(AutonomyState::Autonomous.status_name(), "Autonomous");
    }
}
