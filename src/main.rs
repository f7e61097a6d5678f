//! EV instrument cluster for the desktop simulator.
//!
//! Hosts the render loop: keyboard input writes to the signal bus, the
//! simulation driver advances on its fixed 100 ms grid, and every widget
//! animates its geometry toward the target the autonomy flag selects.
//!
//! # Controls
//!
//! - `S` simulation on/off, `A` manual/autonomous toggle
//! - `P`/`R`/`N`/`D` gear selection (manual mode only)
//! - `Up`/`Down` speed +/- 10 km/h (manual mode only)
//! - `T` trip reset, `B` reset all, `1`-`4` quick scenarios
//! - `L` light/dark theme, `X` FPS counter

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use ev_cluster_dashboard::colors::Theme;
use ev_cluster_dashboard::config::{FRAME_TIME, SCREEN_HEIGHT, SCREEN_WIDTH};
use ev_cluster_dashboard::layout::{AnimatedGeometry, GridSpec, HorizontalAlign, VerticalAlign};
use ev_cluster_dashboard::logbuf::EventLog;
use ev_cluster_dashboard::presets;
use ev_cluster_dashboard::signals::{GearMode, SignalBus, SignalUpdate};
use ev_cluster_dashboard::simulation::{MAX_SPEED_KMH, SimulationDriver};
use ev_cluster_dashboard::widgets::{
    draw_autonomy_banner,
    draw_battery_gauge,
    draw_gear_indicator,
    draw_odometer,
    draw_panel,
    draw_power_gauge,
    draw_speed_readout,
    draw_status_strip,
    draw_temperature_cell,
};

// =============================================================================
// Widget Layout
// =============================================================================

/// Mode banner across the top. Grows and rises when autonomy engages.
const BANNER_SPEC: GridSpec = GridSpec {
    y: 0.4,
    auto_width: Some(6.5),
    auto_y: Some(0.2),
    ..GridSpec::new(5.0, 0.8)
};

/// Speed readout, centered. Slides left in autonomous mode to clear the
/// middle of the screen for the banner.
const SPEED_SPEC: GridSpec = GridSpec {
    y: 1.8,
    auto_x: Some(-4.0),
    ..GridSpec::new(4.0, 1.4)
};

/// Gear strip under the speed readout; tracks its horizontal slide.
const GEAR_SPEC: GridSpec = GridSpec {
    y: 3.4,
    auto_x: Some(-4.0),
    ..GridSpec::new(2.6, 0.8)
};

/// Battery gauge, anchored to the top-right corner.
const BATTERY_SPEC: GridSpec = GridSpec {
    x_align: HorizontalAlign::Right,
    x: 0.5,
    y: 0.6,
    ..GridSpec::new(4.5, 1.4)
};

/// Power gauge under the battery gauge.
const POWER_SPEC: GridSpec = GridSpec {
    x_align: HorizontalAlign::Right,
    x: 0.5,
    y: 2.4,
    ..GridSpec::new(4.5, 1.2)
};

/// Temperature cell, anchored above the status strip on the right.
const TEMPS_SPEC: GridSpec = GridSpec {
    x_align: HorizontalAlign::Right,
    y_align: VerticalAlign::Bottom,
    x: 0.5,
    y: 1.2,
    ..GridSpec::new(4.5, 1.0)
};

/// Odometer, anchored above the status strip on the left. Nudges inward
/// while autonomous.
const ODOMETER_SPEC: GridSpec = GridSpec {
    x_align: HorizontalAlign::Left,
    y_align: VerticalAlign::Bottom,
    x: 0.5,
    y: 1.2,
    auto_x: Some(1.5),
    ..GridSpec::new(4.5, 1.0)
};

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("EV Cluster", &output_settings);

    // Vehicle state
    let mut bus = SignalBus::new();
    let mut driver = SimulationDriver::new(None);

    // UI state
    let mut theme = Theme::default();
    let mut show_fps = true;
    let mut last_fps_calc = Instant::now();
    let mut fps_frame_count = 0u32;
    let mut current_fps = 0.0f32;

    // Widget geometry, mounted at static targets
    let mut banner_geo = AnimatedGeometry::new(BANNER_SPEC);
    let mut speed_geo = AnimatedGeometry::new(SPEED_SPEC);
    let mut gear_geo = AnimatedGeometry::new(GEAR_SPEC);
    let mut battery_geo = AnimatedGeometry::new(BATTERY_SPEC);
    let mut power_geo = AnimatedGeometry::new(POWER_SPEC);
    let mut temps_geo = AnimatedGeometry::new(TEMPS_SPEC);
    let mut odometer_geo = AnimatedGeometry::new(ODOMETER_SPEC);

    let mut event_log = EventLog::new();
    event_log.push("Cluster started");

    display.clear(theme.bg()).ok();
    window.update(&display);

    let mut last_advance = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Key repeat only makes sense for the speed nudges
                    if repeat && !matches!(keycode, Keycode::Up | Keycode::Down) {
                        continue;
                    }
                    let sim_on = driver.is_enabled();
                    match keycode {
                        Keycode::S => {
                            driver.set_enabled(!sim_on);
                            event_log.push(if sim_on { "Simulation: OFF" } else { "Simulation: ON" });
                        }
                        Keycode::A => {
                            let next = bus.snapshot().autonomy.toggle();
                            bus.set(SignalUpdate::Autonomy(next));
                            event_log.push(if next.is_autonomous() {
                                "Mode: Autonomous"
                            } else {
                                "Mode: Manual"
                            });
                        }
                        Keycode::P if !sim_on => {
                            bus.set_many(&presets::select_gear(GearMode::Park));
                            event_log.push("Gear: P");
                        }
                        Keycode::R if !sim_on => {
                            bus.set_many(&presets::select_gear(GearMode::Reverse));
                            event_log.push("Gear: R");
                        }
                        Keycode::N if !sim_on => {
                            bus.set_many(&presets::select_gear(GearMode::Neutral));
                            event_log.push("Gear: N");
                        }
                        Keycode::D if !sim_on => {
                            bus.set_many(&presets::select_gear(GearMode::Drive));
                            event_log.push("Gear: D");
                        }
                        Keycode::Up if !sim_on => {
                            let speed = (bus.snapshot().speed_kmh + 10.0).clamp(0.0, MAX_SPEED_KMH);
                            bus.set(SignalUpdate::Speed(speed));
                        }
                        Keycode::Down if !sim_on => {
                            let speed = (bus.snapshot().speed_kmh - 10.0).clamp(0.0, MAX_SPEED_KMH);
                            bus.set(SignalUpdate::Speed(speed));
                        }
                        Keycode::T if !sim_on => {
                            bus.set(SignalUpdate::Trip(0.0));
                            event_log.push("Trip reset");
                        }
                        Keycode::B if !sim_on => {
                            bus.set_many(&presets::reset_all());
                            event_log.push("Reset all");
                        }
                        Keycode::Num1 if !sim_on => {
                            bus.set_many(&presets::parked());
                            event_log.push("Preset: Parked");
                        }
                        Keycode::Num2 if !sim_on => {
                            bus.set_many(&presets::city_driving());
                            event_log.push("Preset: City driving");
                        }
                        Keycode::Num3 if !sim_on => {
                            bus.set_many(&presets::highway_autonomous());
                            event_log.push("Preset: Highway autonomous");
                        }
                        Keycode::Num4 if !sim_on => {
                            bus.set_many(&presets::low_battery());
                            event_log.push("Preset: Low battery");
                        }
                        Keycode::L => {
                            theme = theme.toggle();
                            event_log.push(match theme {
                                Theme::Dark => "Theme: Dark",
                                Theme::Light => "Theme: Light",
                            });
                        }
                        Keycode::X => {
                            show_fps = !show_fps;
                            event_log.push(if show_fps { "FPS: ON" } else { "FPS: OFF" });
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Advance the simulation by however long the last frame took;
        // whole 100 ms steps fire inside, the remainder carries over
        let elapsed = last_advance.elapsed();
        last_advance = Instant::now();
        driver.advance(elapsed, &mut bus);

        let snapshot = bus.snapshot();
        let autonomous = snapshot.autonomy.is_autonomous();

        // FPS calculation
        fps_frame_count += 1;
        if last_fps_calc.elapsed().as_secs() >= 1 {
            current_fps = fps_frame_count as f32 / last_fps_calc.elapsed().as_secs_f32();
            fps_frame_count = 0;
            last_fps_calc = Instant::now();
        }

        // Animate widget geometry toward the mode-selected targets
        banner_geo.tick(autonomous);
        speed_geo.tick(autonomous);
        gear_geo.tick(autonomous);
        battery_geo.tick(autonomous);
        power_geo.tick(autonomous);
        temps_geo.tick(autonomous);
        odometer_geo.tick(autonomous);

        // Widgets move every frame while animating, so redraw from scratch
        display.clear(theme.bg()).ok();

        let screen = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

        draw_autonomy_banner(
            &mut display,
            banner_geo.resolve(screen),
            snapshot.autonomy,
            snapshot.driver_readiness,
            theme,
        );
        draw_speed_readout(&mut display, speed_geo.resolve(screen), snapshot.speed_kmh, theme);
        draw_gear_indicator(&mut display, gear_geo.resolve(screen), snapshot.gear, theme);

        let battery_rect = battery_geo.resolve(screen);
        draw_panel(&mut display, battery_rect, theme.panel());
        draw_battery_gauge(&mut display, battery_rect, snapshot.battery_pct, snapshot.range_km, theme);

        let power_rect = power_geo.resolve(screen);
        draw_panel(&mut display, power_rect, theme.panel());
        draw_power_gauge(&mut display, power_rect, snapshot.power_kw, theme);

        let temps_rect = temps_geo.resolve(screen);
        draw_panel(&mut display, temps_rect, theme.panel());
        draw_temperature_cell(
            &mut display,
            temps_rect,
            snapshot.battery_temp_c,
            snapshot.motor_temp_c,
            theme,
        );

        draw_odometer(
            &mut display,
            odometer_geo.resolve(screen),
            snapshot.odometer_km,
            snapshot.trip_km,
            theme,
        );

        draw_status_strip(&mut display, driver.is_enabled(), &event_log, current_fps, show_fps, theme);

        window.update(&display);

        let pre_sleep = frame_start.elapsed();
        if pre_sleep < FRAME_TIME {
            thread::sleep(FRAME_TIME - pre_sleep);
        }
    }
}
