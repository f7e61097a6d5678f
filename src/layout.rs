//! Reactive grid layout: continuous convergence of widget geometry.
//!
//! Every widget declares a [`GridSpec`]: its static geometry in grid cells
//! plus optional overrides used while autonomous driving is engaged. One
//! [`AnimatedGeometry`] per mounted widget then smooths the actual geometry
//! toward whichever target the autonomy flag selects, once per rendering
//! frame.
//!
//! # Smoothing
//!
//! Each of the four animated scalars is a first-order filter with a fixed
//! pole: every tick moves 12 % of the remaining distance, and once within
//! 0.05 of the target the value snaps exact. The filter is not delta-time
//! compensated; convergence speed is coupled to the frame rate.
//!
//! # Units
//!
//! Width and height animate in grid cells and are converted to pixels at
//! resolve time; x/y offsets are converted through [`gx`] first and animate
//! in pixels. Mixing the units would change the motion, so the split is
//! load-bearing.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Grid Conversion
// =============================================================================

/// Pixels per grid cell.
pub const GRID_CELL_PX: f32 = 40.0;

/// Convert grid cells to pixels. Pure, fixed scale.
#[inline]
pub fn gx(cells: f32) -> f32 {
    cells * GRID_CELL_PX
}

// =============================================================================
// Animation Constants
// =============================================================================

/// Fraction of the remaining distance applied per tick.
pub const CONVERGENCE_FACTOR: f32 = 0.12;

/// Distance below which a scalar snaps exactly onto its target.
pub const SNAP_THRESHOLD: f32 = 0.05;

// =============================================================================
// Declared Geometry
// =============================================================================

/// Horizontal anchor for a widget's x offset.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum HorizontalAlign {
    /// Offset measured from the left edge.
    Left,
    /// Offset measured from the right edge.
    Right,
    /// Widget midpoint at the screen midpoint, shifted by the offset.
    #[default]
    Center,
}

/// Vertical anchor for a widget's y offset.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum VerticalAlign {
    /// Offset measured from the top edge.
    #[default]
    Top,
    /// Offset measured from the bottom edge.
    Bottom,
    /// Widget midpoint at the screen midpoint, shifted by the offset.
    Center,
}

/// A widget's declared geometry: static target plus optional
/// autonomous-mode overrides. All lengths are in grid cells.
///
/// An absent override falls back to the static value, so a widget can move
/// without resizing (or vice versa) when autonomy engages.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GridSpec {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
    pub x_align: HorizontalAlign,
    pub y_align: VerticalAlign,
    pub auto_width: Option<f32>,
    pub auto_height: Option<f32>,
    pub auto_x: Option<f32>,
    pub auto_y: Option<f32>,
}

impl GridSpec {
    /// Spec with the given static size, zero offset, default anchors
    /// (centered horizontally, top-anchored vertically) and no
    /// autonomous overrides. Customize with struct update syntax.
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            x: 0.0,
            y: 0.0,
            x_align: HorizontalAlign::Center,
            y_align: VerticalAlign::Top,
            auto_width: None,
            auto_height: None,
            auto_x: None,
            auto_y: None,
        }
    }
}

// =============================================================================
// Animated Runtime State
// =============================================================================

/// Per-widget animated geometry. Created on mount with the static target
/// already applied; dropped on unmount.
#[derive(Clone, Copy, Debug)]
pub struct AnimatedGeometry {
    spec: GridSpec,
    /// Animated size in grid cells.
    current_width: f32,
    current_height: f32,
    /// Animated offsets in pixels (gx applied before filtering).
    current_x: f32,
    current_y: f32,
}

impl AnimatedGeometry {
    /// Mount a widget at its static geometry.
    pub fn new(spec: GridSpec) -> Self {
        Self {
            spec,
            current_width: spec.width,
            current_height: spec.height,
            current_x: gx(spec.x),
            current_y: gx(spec.y),
        }
    }

    /// Advance all four scalars one frame toward the mode-selected target.
    ///
    /// Flipping `autonomous` mid-flight retargets on the next tick without
    /// touching the current values — motion stays continuous.
    pub fn tick(&mut self, autonomous: bool) {
        let (tw, th, tx, ty) = self.targets(autonomous);
        self.current_width = approach(self.current_width, tw);
        self.current_height = approach(self.current_height, th);
        self.current_x = approach(self.current_x, tx);
        self.current_y = approach(self.current_y, ty);
    }

    /// Whether all four scalars sit exactly on the mode-selected target.
    pub fn is_settled(&self, autonomous: bool) -> bool {
        let (tw, th, tx, ty) = self.targets(autonomous);
        self.current_width == tw
            && self.current_height == th
            && self.current_x == tx
            && self.current_y == ty
    }

    /// Map the animated geometry to an absolute pixel rectangle on a screen
    /// of the given size, applying the declared anchors. Center anchoring
    /// places the widget midpoint at the screen midpoint plus the animated
    /// offset.
    pub fn resolve(&self, screen: Size) -> Rectangle {
        let width_px = gx(self.current_width).max(0.0);
        let height_px = gx(self.current_height).max(0.0);
        let screen_w = screen.width as f32;
        let screen_h = screen.height as f32;

        let x = match self.spec.x_align {
            HorizontalAlign::Left => self.current_x,
            HorizontalAlign::Right => screen_w - width_px - self.current_x,
            HorizontalAlign::Center => (screen_w - width_px) * 0.5 + self.current_x,
        };
        let y = match self.spec.y_align {
            VerticalAlign::Top => self.current_y,
            VerticalAlign::Bottom => screen_h - height_px - self.current_y,
            VerticalAlign::Center => (screen_h - height_px) * 0.5 + self.current_y,
        };

        Rectangle::new(
            Point::new(x.round() as i32, y.round() as i32),
            Size::new(width_px.round() as u32, height_px.round() as u32),
        )
    }

    fn targets(&self, autonomous: bool) -> (f32, f32, f32, f32) {
        let spec = &self.spec;
        if autonomous {
            (
                spec.auto_width.unwrap_or(spec.width),
                spec.auto_height.unwrap_or(spec.height),
                gx(spec.auto_x.unwrap_or(spec.x)),
                gx(spec.auto_y.unwrap_or(spec.y)),
            )
        } else {
            (spec.width, spec.height, gx(spec.x), gx(spec.y))
        }
    }
}

/// One filter step: snap inside the threshold, otherwise move 12 % of the
/// remaining distance. Never overshoots (the factor is well below 1).
#[inline]
fn approach(current: f32, target: f32) -> f32 {
    let diff = target - current;
    if diff.abs() < SNAP_THRESHOLD {
        target
    } else {
        current + diff * CONVERGENCE_FACTOR
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
