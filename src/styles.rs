//! Pre-computed static text styles to avoid per-frame object construction.
//!
//! `MonoTextStyle` and `TextStyle` are const-constructible in
//! embedded-graphics 0.8, so the fixed styles live in the binary's read-only
//! data section instead of being rebuilt in every draw call. Styles whose
//! color depends on runtime state (theme, warning level) are created at the
//! call site from the exposed font references: `MonoTextStyle::new(LABEL_FONT,
//! color)`.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{GRAY, WHITE};

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Centered text alignment. Gear labels, banner text.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Status strip log line.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

/// Right-aligned text. Speed and odometer readouts, FPS counter.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Small label font (6x10). For unit suffixes and status text.
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Medium font (10x20). For gear letters and secondary readouts.
pub const MEDIUM_FONT: &MonoFont = &FONT_10X20;

/// Large value font (`ProFont` 24pt). For the speed readout.
pub const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Medium value font (`ProFont` 18pt). For readouts with longer strings
/// (odometer, range).
pub const VALUE_FONT_MEDIUM: &MonoFont = &PROFONT_18_POINT;

// =============================================================================
// Pre-computed Text Styles (const - zero runtime cost)
// =============================================================================

/// Small white text for labels on dark backgrounds.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Small gray text for de-emphasized status strip content.
pub const LABEL_STYLE_GRAY: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GRAY);
