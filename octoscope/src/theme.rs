//! Color theme system for octoscope.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! octoscope renders. Two built-in themes are provided:
//!
//! - `dark` uses ANSI 16 colors (`Color::Reset`, `Color::DarkGray`, etc.) so it
//!   works on any terminal including 256-color SSH sessions with no truecolor support.
//! - `catppuccin_mocha` is the Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

/// All color values used across octoscope's UI surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Text
    pub text: Color,
    /// Secondary text: bios, descriptions, hints.
    pub muted: Color,
    /// Usernames and links.
    pub accent: Color,

    // Lists and the suggestion dropdown
    /// Background of the highlighted row.
    pub selection_bg: Color,
    /// Foreground of the highlighted row.
    pub selection_fg: Color,

    // Profile and repositories
    pub stars: Color,
    pub language: Color,
    /// Marker shown on the card of a saved profile.
    pub saved_marker: Color,
    /// Placeholder bars drawn while a profile loads.
    pub skeleton: Color,

    // Feedback
    pub error: Color,
    pub toast_info: Color,
    pub toast_success: Color,
    pub toast_warning: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Key hints in the status bar.
    pub status_key: Color,

    // General
    /// Application background (used for clearing areas).
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            text: Color::Reset,
            muted: Color::DarkGray,
            accent: Color::Cyan,

            selection_bg: Color::Blue,
            selection_fg: Color::White,

            stars: Color::Yellow,
            language: Color::Magenta,
            saved_marker: Color::Yellow,
            skeleton: Color::DarkGray,

            error: Color::Red,
            toast_info: Color::Cyan,
            toast_success: Color::Green,
            toast_warning: Color::Yellow,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_key: Color::Cyan,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let peach = Color::Rgb(250, 179, 135); // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            text,
            muted: overlay1,
            accent: blue,

            selection_bg: surface1,
            selection_fg: lavender,

            stars: yellow,
            language: mauve,
            saved_marker: peach,
            skeleton: surface0,

            error: red,
            toast_info: blue,
            toast_success: green,
            toast_warning: peach,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_key: lavender,

            background: base,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup. The fallback is logged as a warning.
    ///
    /// # Arguments
    ///
    /// * `name`: theme name from config, e.g. `"dark"` or `"catppuccin-mocha"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve() {
        assert_eq!(Theme::from_name("dark"), Theme::dark());
        assert_eq!(Theme::from_name("catppuccin-mocha"), Theme::catppuccin_mocha());
        assert_eq!(Theme::from_name("catppuccin_mocha"), Theme::catppuccin_mocha());
    }

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized"), Theme::dark());
    }
}
