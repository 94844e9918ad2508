use ratatui::style::Color;

/// Primary color presets (brand red, blue, green, purple, orange).
pub const PRIMARY_PRESETS: &[Color] = &[
    Color::Rgb(0xe1, 0x1d, 0x48),
    Color::Rgb(0x25, 0x63, 0xeb),
    Color::Rgb(0x16, 0xa3, 0x4a),
    Color::Rgb(0x93, 0x33, 0xea),
    Color::Rgb(0xea, 0x58, 0x0c),
];

/// Accent color presets (cheese yellow, pink, teal, violet, rose).
pub const SECONDARY_PRESETS: &[Color] = &[
    Color::Rgb(0xfb, 0xbf, 0x24),
    Color::Rgb(0xf4, 0x72, 0xb6),
    Color::Rgb(0x2d, 0xd4, 0xbf),
    Color::Rgb(0xa7, 0x8b, 0xfa),
    Color::Rgb(0xfb, 0x71, 0x85),
];

/// Session-lifetime theme state. Owned by `App` and passed by reference to
/// everything that renders; mutation goes through these methods only.
/// Any color value is accepted and last write wins.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub dark_mode: bool,
    primary_idx: usize,
    secondary_idx: usize,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            primary: PRIMARY_PRESETS[0],
            secondary: SECONDARY_PRESETS[0],
            dark_mode: false,
            primary_idx: 0,
            secondary_idx: 0,
        }
    }

    /// Advance to the next primary preset, wrapping around.
    pub fn cycle_primary(&mut self) {
        self.primary_idx = (self.primary_idx + 1) % PRIMARY_PRESETS.len();
        self.primary = PRIMARY_PRESETS[self.primary_idx];
    }

    /// Advance to the next accent preset, wrapping around.
    pub fn cycle_secondary(&mut self) {
        self.secondary_idx = (self.secondary_idx + 1) % SECONDARY_PRESETS.len();
        self.secondary = SECONDARY_PRESETS[self.secondary_idx];
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Set an arbitrary primary color (not necessarily a preset).
    pub fn set_primary(&mut self, color: Color) {
        self.primary = color;
    }

    pub fn set_secondary(&mut self, color: Color) {
        self.secondary = color;
    }

    /// Preset index of the current primary color, if it is a preset.
    pub fn primary_preset(&self) -> Option<usize> {
        PRIMARY_PRESETS.iter().position(|c| *c == self.primary)
    }

    pub fn secondary_preset(&self) -> Option<usize> {
        SECONDARY_PRESETS.iter().position(|c| *c == self.secondary)
    }

    // Derived render colors.

    pub fn background(&self) -> Color {
        if self.dark_mode {
            Color::Rgb(0x11, 0x18, 0x27)
        } else {
            Color::Rgb(0xf9, 0xfa, 0xfb)
        }
    }

    pub fn foreground(&self) -> Color {
        if self.dark_mode {
            Color::Rgb(0xe5, 0xe7, 0xeb)
        } else {
            Color::Rgb(0x1f, 0x29, 0x37)
        }
    }

    pub fn bot_bubble(&self) -> Color {
        if self.dark_mode {
            Color::Rgb(0x37, 0x41, 0x51)
        } else {
            Color::Rgb(0xf3, 0xf4, 0xf6)
        }
    }

    pub fn muted(&self) -> Color {
        if self.dark_mode {
            Color::Rgb(0x9c, 0xa3, 0xaf)
        } else {
            Color::Rgb(0x6b, 0x72, 0x80)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
