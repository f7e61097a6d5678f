//! Application configuration constants.
//!
//! Display dimensions, frame timing, and fixed layout values live here as
//! `const`, so the drawing code never recalculates them per frame.

use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Cluster display width in pixels.
pub const SCREEN_WIDTH: u32 = 800;

/// Cluster display height in pixels.
pub const SCREEN_HEIGHT: u32 = 480;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

// =============================================================================
// Pre-computed Layout Constants
// =============================================================================

/// Height of the status strip along the bottom edge.
pub const STATUS_STRIP_HEIGHT: u32 = 28;
