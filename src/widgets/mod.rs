//! Widget components for the cluster display.
//!
//! Presentational read-outs only: every widget takes its resolved pixel
//! rectangle from the layout engine ([`crate::layout::AnimatedGeometry`])
//! and the value(s) it displays from the current signal snapshot. No widget
//! writes to the bus or holds signal state of its own.
//!
//! - [`primitives`]: shared low-level drawing helpers (panel fill, bars)
//! - [`readouts`]: speed, gear indicator, odometer/trip, autonomy banner
//! - [`gauges`]: battery and power gauges, temperature cell
//! - [`status`]: bottom status strip (simulation flag, event log, FPS)
//!
//! All value formatting goes through `heapless::String` with
//! `core::fmt::Write`, keeping the draw path allocation-free.

pub mod gauges;
pub mod primitives;
pub mod readouts;
pub mod status;

pub use gauges::{draw_battery_gauge, draw_power_gauge, draw_temperature_cell};
pub use primitives::{draw_h_bar, draw_panel, draw_split_bar};
pub use readouts::{draw_autonomy_banner, draw_gear_indicator, draw_odometer, draw_speed_readout};
pub use status::draw_status_strip;
