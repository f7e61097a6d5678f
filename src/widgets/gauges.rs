//! Battery, power, and temperature gauges.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

use crate::colors::{GRAY, GREEN, ORANGE, RED, Theme};
use crate::styles::{CENTERED, LABEL_FONT, LEFT_ALIGNED, RIGHT_ALIGNED, VALUE_FONT_MEDIUM};
use crate::widgets::primitives::{draw_h_bar, draw_split_bar};

/// Charge below which the gauge turns orange.
const BATTERY_WARNING_PCT: f64 = 30.0;

/// Charge below which the gauge turns red.
const BATTERY_CRITICAL_PCT: f64 = 15.0;

/// Battery gauge: charge bar with percent and remaining range.
pub fn draw_battery_gauge(
    display: &mut SimulatorDisplay<Rgb565>,
    rect: Rectangle,
    battery_pct: f64,
    range_km: f64,
    theme: Theme,
) {
    let bar_color = if battery_pct < BATTERY_CRITICAL_PCT {
        RED
    } else if battery_pct < BATTERY_WARNING_PCT {
        ORANGE
    } else {
        GREEN
    };

    let bar_rect = Rectangle::new(
        rect.top_left + Point::new(4, 4),
        Size::new(rect.size.width.saturating_sub(8), 12),
    );
    draw_h_bar(display, bar_rect, (battery_pct / 100.0) as f32, bar_color, GRAY);

    let baseline_y = rect.top_left.y + 34;
    let mut pct_str: String<16> = String::new();
    let _ = write!(pct_str, "{battery_pct:.1}%");
    Text::with_text_style(
        &pct_str,
        Point::new(rect.top_left.x + 4, baseline_y),
        MonoTextStyle::new(VALUE_FONT_MEDIUM, theme.fg()),
        LEFT_ALIGNED,
    )
    .draw(display)
    .ok();

    let mut range_str: String<16> = String::new();
    let _ = write!(range_str, "{range_km:.0} km");
    Text::with_text_style(
        &range_str,
        Point::new(rect.top_left.x + rect.size.width as i32 - 4, baseline_y),
        MonoTextStyle::new(LABEL_FONT, GRAY),
        RIGHT_ALIGNED,
    )
    .draw(display)
    .ok();
}

/// Power gauge: signed bar around a center origin. Consumption fills right
/// in the theme foreground, regeneration fills left in green.
pub fn draw_power_gauge(
    display: &mut SimulatorDisplay<Rgb565>,
    rect: Rectangle,
    power_kw: f64,
    theme: Theme,
) {
    // Scale: full right at 150 kW consumption, full left at 30 kW regen
    let fraction = if power_kw >= 0.0 {
        (power_kw / 150.0) as f32
    } else {
        -((-power_kw / 30.0) as f32)
    };

    let bar_rect = Rectangle::new(
        rect.top_left + Point::new(4, 4),
        Size::new(rect.size.width.saturating_sub(8), 10),
    );
    draw_split_bar(display, bar_rect, fraction, theme.fg(), GREEN, GRAY);

    let mut value_str: String<20> = String::new();
    if power_kw < 0.0 {
        let _ = write!(value_str, "{:.1} kW REGEN", -power_kw);
    } else {
        let _ = write!(value_str, "{power_kw:.1} kW");
    }
    let color = if power_kw < 0.0 { GREEN } else { GRAY };
    Text::with_text_style(
        &value_str,
        Point::new(rect.top_left.x + rect.size.width as i32 / 2, rect.top_left.y + 26),
        MonoTextStyle::new(LABEL_FONT, color),
        CENTERED,
    )
    .draw(display)
    .ok();
}

/// Temperature warning thresholds, °C. Soft limits: values above these only
/// recolor the readout.
const BATT_TEMP_WARN_C: f64 = 40.0;
const MOTOR_TEMP_WARN_C: f64 = 70.0;

/// Battery and motor temperatures side by side.
pub fn draw_temperature_cell(
    display: &mut SimulatorDisplay<Rgb565>,
    rect: Rectangle,
    battery_temp_c: f64,
    motor_temp_c: f64,
    theme: Theme,
) {
    let quarter_x = rect.top_left.x + rect.size.width as i32 / 4;
    let label_y = rect.top_left.y + 10;
    let value_y = rect.top_left.y + 26;

    for (slot, label, temp, warn_at) in [
        (0, "BATT", battery_temp_c, BATT_TEMP_WARN_C),
        (1, "MOTOR", motor_temp_c, MOTOR_TEMP_WARN_C),
    ] {
        let center_x = quarter_x + slot * rect.size.width as i32 / 2;
        Text::with_text_style(
            label,
            Point::new(center_x, label_y),
            MonoTextStyle::new(LABEL_FONT, GRAY),
            CENTERED,
        )
        .draw(display)
        .ok();

        let color = if temp > warn_at { ORANGE } else { theme.fg() };
        let mut temp_str: String<12> = String::new();
        let _ = write!(temp_str, "{temp:.1}C");
        Text::with_text_style(
            &temp_str,
            Point::new(center_x, value_y),
            MonoTextStyle::new(LABEL_FONT, color),
            CENTERED,
        )
        .draw(display)
        .ok();
    }
}
