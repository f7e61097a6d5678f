//! EV instrument cluster: signal bus, telemetry simulation, reactive layout.
//!
//! The cluster is driven by two engines sharing one data structure:
//!
//! - [`signals`]: the in-memory signal bus — a versioned, atomically written
//!   snapshot of vehicle telemetry with an observer interface
//! - [`simulation`]: the fixed-period stepper that evolves the snapshot with
//!   coupled speed/power/battery/temperature/distance approximations
//! - [`layout`]: per-widget geometry smoothing toward the target selected by
//!   the autonomy flag
//! - [`presets`]: canned control batches (reset, quick scenarios)
//! - [`widgets`], [`styles`], [`colors`], [`config`]: the presentational
//!   layer rendered through `embedded-graphics`
//! - [`logbuf`]: event ring buffer shown on the status strip
//!
//! The binary (`cluster`) hosts the render loop on the desktop simulator;
//! everything in this library is host-testable without a window.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod layout;
pub mod logbuf;
pub mod presets;
pub mod signals;
pub mod simulation;
pub mod styles;
pub mod widgets;
