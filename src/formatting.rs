use yansi::Paint;

/// Color palette for consistent theming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub id: (u8, u8, u8),        // Entry ids, counts
    pub heading: (u8, u8, u8),   // Table headers, header bar
    pub date: (u8, u8, u8),      // Dates
    pub success: (u8, u8, u8),   // Confirmations
    pub warning: (u8, u8, u8),   // Hints, cancelled
    pub error: (u8, u8, u8),     // Failures
    pub muted: (u8, u8, u8),     // Separators, status bar
    pub text: (u8, u8, u8),      // Body text
}

impl ColorPalette {
    pub const MONOKAI: Self = Self {
        id: (171, 157, 242),     // Violet
        heading: (255, 216, 102), // Yellow
        date: (120, 220, 232),   // Cyan
        success: (169, 220, 118), // Green
        warning: (252, 152, 103), // Orange
        error: (255, 97, 136),   // Red
        muted: (147, 146, 147),  // Grey
        text: (252, 252, 250),   // White
    };
}

/// Formatting context passed through rendering pipeline
#[derive(Debug, Clone, Copy)]
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool, palette: ColorPalette) -> Self {
        Self { use_color, palette }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.use_color, config.palette)
    }

    fn paint(&self, text: &str, rgb: (u8, u8, u8), bold: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let (r, g, b) = rgb;
        if bold {
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            Paint::rgb(text, r, g, b).to_string()
        }
    }

    pub fn format_id(&self, id: &str) -> String {
        self.paint(id, self.palette.id, false)
    }

    pub fn format_header(&self, text: &str) -> String {
        self.paint(text, self.palette.heading, true)
    }

    pub fn format_date(&self, date: &str) -> String {
        self.paint(date, self.palette.date, false)
    }

    pub fn format_muted(&self, text: &str) -> String {
        self.paint(text, self.palette.muted, false)
    }

    pub fn format_positive(&self, text: &str) -> String {
        self.paint(text, self.palette.success, false)
    }

    pub fn format_tag(&self, tag: &str) -> String {
        if self.use_color {
            let (r, g, b) = crate::tags::color_for_tag(tag);
            Paint::rgb(tag, r, g, b).bold().to_string()
        } else {
            tag.to_string()
        }
    }

    pub fn format_tags(&self, tags: &[String]) -> String {
        tags.iter()
            .map(|t| self.format_tag(t))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `✓ message`
    pub fn success(&self, msg: &str) -> String {
        format!("{} {msg}", self.paint("✓", self.palette.success, true))
    }

    /// `! message`
    pub fn warning(&self, msg: &str) -> String {
        format!("{} {msg}", self.paint("!", self.palette.warning, true))
    }

    /// `✗ message`
    pub fn error(&self, msg: &str) -> String {
        format!("{} {msg}", self.paint("✗", self.palette.error, true))
    }
}
