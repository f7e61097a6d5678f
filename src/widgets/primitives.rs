//! Low-level drawing primitives shared across widgets.
//!
//! # Panel Inset
//!
//! `draw_panel` fills a widget rectangle with a 2px inset. The display is
//! cleared to the theme background every frame (widget rectangles animate),
//! so the inset reads as a thin separation line between adjacent panels
//! without explicit border drawing.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics_simulator::SimulatorDisplay;

/// Fill a widget panel with a 2px inset.
///
/// Returns early if the rectangle is too small to inset, preventing
/// underflow in the size arithmetic.
pub fn draw_panel(display: &mut SimulatorDisplay<Rgb565>, rect: Rectangle, fill: Rgb565) {
    if rect.size.width < 4 || rect.size.height < 4 {
        return;
    }
    Rectangle::new(
        rect.top_left + Point::new(2, 2),
        Size::new(rect.size.width - 4, rect.size.height - 4),
    )
    .into_styled(PrimitiveStyle::with_fill(fill))
    .draw(display)
    .ok();
}

/// Horizontal level bar: outline plus a fill proportional to `fraction`
/// (clamped to 0..=1), growing from the left edge.
pub fn draw_h_bar(
    display: &mut SimulatorDisplay<Rgb565>,
    rect: Rectangle,
    fraction: f32,
    fill: Rgb565,
    outline: Rgb565,
) {
    rect.into_styled(PrimitiveStyle::with_stroke(outline, 1))
        .draw(display)
        .ok();

    let fraction = fraction.clamp(0.0, 1.0);
    let inner_w = rect.size.width.saturating_sub(4);
    let fill_w = (inner_w as f32 * fraction) as u32;
    if fill_w == 0 || rect.size.height < 4 {
        return;
    }
    Rectangle::new(
        rect.top_left + Point::new(2, 2),
        Size::new(fill_w, rect.size.height - 4),
    )
    .into_styled(PrimitiveStyle::with_fill(fill))
    .draw(display)
    .ok();
}

/// Centered-origin bar for signed values: positive fractions grow right
/// from the midline, negative grow left. Used by the power gauge, where
/// negative is regeneration.
pub fn draw_split_bar(
    display: &mut SimulatorDisplay<Rgb565>,
    rect: Rectangle,
    fraction: f32,
    positive_fill: Rgb565,
    negative_fill: Rgb565,
    outline: Rgb565,
) {
    rect.into_styled(PrimitiveStyle::with_stroke(outline, 1))
        .draw(display)
        .ok();

    if rect.size.height < 4 {
        return;
    }
    let fraction = fraction.clamp(-1.0, 1.0);
    let half_w = rect.size.width.saturating_sub(4) / 2;
    let mid_x = rect.top_left.x + 2 + half_w as i32;
    let span = (half_w as f32 * fraction.abs()) as u32;
    if span == 0 {
        return;
    }

    let (origin_x, fill) = if fraction >= 0.0 {
        (mid_x, positive_fill)
    } else {
        (mid_x - span as i32, negative_fill)
    };
    Rectangle::new(
        Point::new(origin_x, rect.top_left.y + 2),
        Size::new(span, rect.size.height - 4),
    )
    .into_styled(PrimitiveStyle::with_fill(fill))
    .draw(display)
    .ok();
}
