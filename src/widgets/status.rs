//! Bottom status strip: simulation flag, latest event line, FPS counter.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

use crate::colors::{GRAY, GREEN, Theme};
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, STATUS_STRIP_HEIGHT};
use crate::logbuf::EventLog;
use crate::styles::{LABEL_FONT, LABEL_STYLE_GRAY, LEFT_ALIGNED, RIGHT_ALIGNED};

/// Y coordinate of the strip's separator line.
const STRIP_TOP: i32 = (SCREEN_HEIGHT - STATUS_STRIP_HEIGHT) as i32;

/// Text baseline inside the strip.
const STRIP_BASELINE: i32 = STRIP_TOP + 18;

/// Draw the status strip across the bottom edge.
pub fn draw_status_strip(
    display: &mut SimulatorDisplay<Rgb565>,
    simulation_on: bool,
    log: &EventLog,
    fps: f32,
    show_fps: bool,
    theme: Theme,
) {
    Rectangle::new(
        Point::new(0, STRIP_TOP),
        Size::new(SCREEN_WIDTH, STATUS_STRIP_HEIGHT),
    )
    .into_styled(PrimitiveStyle::with_fill(theme.bg()))
    .draw(display)
    .ok();
    Line::new(
        Point::new(0, STRIP_TOP),
        Point::new(SCREEN_WIDTH as i32 - 1, STRIP_TOP),
    )
    .into_styled(PrimitiveStyle::with_stroke(GRAY, 1))
    .draw(display)
    .ok();

    let sim_label = if simulation_on { "SIM ON" } else { "SIM OFF" };
    let sim_color = if simulation_on { GREEN } else { GRAY };
    Text::with_text_style(
        sim_label,
        Point::new(8, STRIP_BASELINE),
        MonoTextStyle::new(LABEL_FONT, sim_color),
        LEFT_ALIGNED,
    )
    .draw(display)
    .ok();

    if let Some(line) = log.latest() {
        Text::with_text_style(line, Point::new(72, STRIP_BASELINE), LABEL_STYLE_GRAY, LEFT_ALIGNED)
            .draw(display)
            .ok();
    }

    if show_fps {
        let mut fps_str: String<16> = String::new();
        let _ = write!(fps_str, "{fps:.0} FPS");
        Text::with_text_style(
            &fps_str,
            Point::new(SCREEN_WIDTH as i32 - 8, STRIP_BASELINE),
            LABEL_STYLE_GRAY,
            RIGHT_ALIGNED,
        )
        .draw(display)
        .ok();
    }
}
