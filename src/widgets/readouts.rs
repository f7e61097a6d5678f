//! Primary read-outs: speed, gear, odometer, autonomy banner.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

use crate::colors::{GRAY, TEAL, Theme, WHITE, YELLOW};
use crate::signals::{AutonomyState, GearMode};
use crate::styles::{
    CENTERED, LABEL_FONT, LABEL_STYLE_GRAY, MEDIUM_FONT, RIGHT_ALIGNED, VALUE_FONT,
    VALUE_FONT_MEDIUM,
};

/// Speed readout: large integer value with a small "km/h" suffix,
/// right-aligned inside the widget rectangle.
pub fn draw_speed_readout(
    display: &mut SimulatorDisplay<Rgb565>,
    rect: Rectangle,
    speed_kmh: f64,
    theme: Theme,
) {
    let value_style = MonoTextStyle::new(VALUE_FONT, theme.fg());
    let unit_style = LABEL_STYLE_GRAY;

    let baseline_y = rect.top_left.y + rect.size.height as i32 / 2 + 10;
    let unit_x = rect.top_left.x + rect.size.width as i32 - 4;

    let mut value_str: String<8> = String::new();
    let _ = write!(value_str, "{}", speed_kmh.round() as i64);

    Text::with_text_style(
        "km/h",
        Point::new(unit_x, baseline_y),
        unit_style,
        RIGHT_ALIGNED,
    )
    .draw(display)
    .ok();
    Text::with_text_style(
        &value_str,
        Point::new(unit_x - 30, baseline_y),
        value_style,
        RIGHT_ALIGNED,
    )
    .draw(display)
    .ok();
}

/// Gear indicator: the P R N D strip with the selected gear boxed.
pub fn draw_gear_indicator(
    display: &mut SimulatorDisplay<Rgb565>,
    rect: Rectangle,
    gear: GearMode,
    theme: Theme,
) {
    const SLOT_W: i32 = 24;

    let active_style = MonoTextStyle::new(MEDIUM_FONT, theme.fg());
    let inactive_style = MonoTextStyle::new(MEDIUM_FONT, GRAY);

    let baseline_y = rect.top_left.y + rect.size.height as i32 / 2 + 7;
    for (slot, candidate) in GearMode::ALL.into_iter().enumerate() {
        let center_x = rect.top_left.x + SLOT_W / 2 + slot as i32 * SLOT_W;
        let mut label: String<2> = String::new();
        let _ = label.push(candidate.label());

        let style = if candidate == gear { active_style } else { inactive_style };
        Text::with_text_style(&label, Point::new(center_x, baseline_y), style, CENTERED)
            .draw(display)
            .ok();

        if candidate == gear {
            Rectangle::new(
                Point::new(center_x - SLOT_W / 2 + 2, rect.top_left.y + 2),
                Size::new(SLOT_W as u32 - 4, rect.size.height.saturating_sub(4)),
            )
            .into_styled(PrimitiveStyle::with_stroke(theme.fg(), 1))
            .draw(display)
            .ok();
        }
    }
}

/// Odometer and trip meter, right-aligned: total km at one decimal, trip at
/// two (the precisions the bus carries).
pub fn draw_odometer(
    display: &mut SimulatorDisplay<Rgb565>,
    rect: Rectangle,
    odometer_km: f64,
    trip_km: f64,
    theme: Theme,
) {
    let value_style = MonoTextStyle::new(VALUE_FONT_MEDIUM, theme.fg());
    let label_style = MonoTextStyle::new(LABEL_FONT, GRAY);

    let right_x = rect.top_left.x + rect.size.width as i32 - 4;
    let top_y = rect.top_left.y + 16;

    let mut odo_str: String<20> = String::new();
    let _ = write!(odo_str, "{odometer_km:.1} km");
    Text::with_text_style(&odo_str, Point::new(right_x, top_y), value_style, RIGHT_ALIGNED)
        .draw(display)
        .ok();

    let mut trip_str: String<20> = String::new();
    let _ = write!(trip_str, "TRIP {trip_km:.2} km");
    Text::with_text_style(
        &trip_str,
        Point::new(right_x, top_y + 16),
        label_style,
        RIGHT_ALIGNED,
    )
    .draw(display)
    .ok();
}

/// Autonomy banner: MANUAL/AUTONOMOUS pill plus the driver readiness score.
/// The pill fills teal while autonomous driving is engaged; readiness drops
/// to yellow below 5 to nudge the driver back.
pub fn draw_autonomy_banner(
    display: &mut SimulatorDisplay<Rgb565>,
    rect: Rectangle,
    autonomy: AutonomyState,
    driver_readiness: f64,
    theme: Theme,
) {
    let (fill, text_color) = if autonomy.is_autonomous() {
        (TEAL, WHITE)
    } else {
        (theme.bg(), GRAY)
    };
    Rectangle::new(rect.top_left, Size::new(rect.size.width, rect.size.height))
        .into_styled(PrimitiveStyle::with_fill(fill))
        .draw(display)
        .ok();
    Rectangle::new(rect.top_left, rect.size)
        .into_styled(PrimitiveStyle::with_stroke(GRAY, 1))
        .draw(display)
        .ok();

    let center_x = rect.top_left.x + rect.size.width as i32 / 2;
    let mid_y = rect.top_left.y + rect.size.height as i32 / 2;

    // Uppercase for the banner
    let mut status_upper: String<16> = String::new();
    for c in autonomy.status_name().chars() {
        let _ = status_upper.push(c.to_ascii_uppercase());
    }
    Text::with_text_style(
        &status_upper,
        Point::new(center_x, mid_y),
        MonoTextStyle::new(MEDIUM_FONT, text_color),
        CENTERED,
    )
    .draw(display)
    .ok();

    let readiness_color = if driver_readiness < 5.0 { YELLOW } else { GRAY };
    let mut readiness_str: String<16> = String::new();
    let _ = write!(readiness_str, "READY {driver_readiness:.0}/10");
    Text::with_text_style(
        &readiness_str,
        Point::new(center_x, mid_y + 14),
        MonoTextStyle::new(LABEL_FONT, readiness_color),
        CENTERED,
    )
    .draw(display)
    .ok();
}
