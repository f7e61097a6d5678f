//! Color constants for the cluster display.
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! The format is native to embedded cluster displays, so the simulator uses
//! it too. Standard colors come from the `RgbColor` trait constants;
//! application colors are built with `Rgb565::new(r, g, b)`.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Dark-theme background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Text on dark backgrounds.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Critical alerts (low battery, high temperature).
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Regeneration indication and healthy ranges.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Warning states.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Orange warning color for elevated temperatures and low charge.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for divider lines and inactive gear labels.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Accent teal for the autonomous-mode banner.
pub const TEAL: Rgb565 = Rgb565::new(0, 40, 20);

/// Near-white light-theme background.
pub const LIGHT_BG: Rgb565 = Rgb565::new(29, 59, 29);

/// Near-black light-theme foreground.
pub const LIGHT_FG: Rgb565 = Rgb565::new(5, 11, 5);

/// Dark gauge panel fill, slightly lifted off the dark background.
pub const DARK_PANEL: Rgb565 = Rgb565::new(2, 5, 3);

/// Light gauge panel fill, slightly below the light background.
pub const LIGHT_PANEL: Rgb565 = Rgb565::new(26, 53, 26);

// =============================================================================
// Theme
// =============================================================================

/// Background/foreground pair selected by the theme toggle.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Theme {
    /// Dark cluster theme (default at ignition).
    #[default]
    Dark,
    /// Light cluster theme for daylight.
    Light,
}

impl Theme {
    /// Toggle between dark and light.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Background fill for this theme.
    #[inline]
    pub const fn bg(self) -> Rgb565 {
        match self {
            Self::Dark => BLACK,
            Self::Light => LIGHT_BG,
        }
    }

    /// Foreground (text) color for this theme.
    #[inline]
    pub const fn fg(self) -> Rgb565 {
        match self {
            Self::Dark => WHITE,
            Self::Light => LIGHT_FG,
        }
    }

    /// Gauge panel fill for this theme.
    #[inline]
    pub const fn panel(self) -> Rgb565 {
        match self {
            Self::Dark => DARK_PANEL,
            Self::Light => LIGHT_PANEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_cycle() {
        let theme = Theme::default();
        assert_eq!(theme, Theme::Dark);
        let theme = theme.toggle();
        assert_eq!(theme, Theme::Light);
        assert_eq!(theme.toggle(), Theme::Dark);
    }

    #[test]
    fn test_theme_contrast() {
        // Background and foreground must differ in both themes
        assert_ne!(Theme::Dark.bg(), Theme::Dark.fg());
        assert_ne!(Theme::Light.bg(), Theme::Light.fg());
    }
}
