//! Style builders over `runloop_config::Theme`.

use ratatui::style::{Modifier, Style};
use runloop_config::Theme;

/// Braille frames for the busy indicator.
pub const SPINNER_CHARS: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

pub fn spinner_char(frame: u64) -> char {
    SPINNER_CHARS[(frame % SPINNER_CHARS.len() as u64) as usize]
}

/// Theme helpers for building consistent widget styles.
pub trait ThemeExt {
    fn text(&self) -> Style;
    fn text_dim(&self) -> Style;
    /// Accent + bold.
    fn title(&self) -> Style;
    fn border(&self) -> Style;
    fn highlight(&self) -> Style;
    fn success(&self) -> Style;
    fn warning(&self) -> Style;
    fn error(&self) -> Style;
    fn info(&self) -> Style;
    fn table_header(&self) -> Style;
    /// Key label in the hint bar.
    fn hint_key(&self) -> Style;
}

impl ThemeExt for Theme {
    fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    fn text_dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    fn highlight(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    fn info(&self) -> Style {
        Style::default().fg(self.info)
    }

    fn table_header(&self) -> Style {
        Style::default()
            .fg(self.table_header_fg)
            .bg(self.table_header_bg)
            .add_modifier(Modifier::BOLD)
    }

    fn hint_key(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runloop_config::ColorTheme;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_char(0), SPINNER_CHARS[0]);
        assert_eq!(spinner_char(8), SPINNER_CHARS[0]);
        assert_eq!(spinner_char(11), SPINNER_CHARS[3]);
    }

    #[test]
    fn test_styles_follow_palette_for_every_theme() {
        for color_theme in [
            ColorTheme::Default,
            ColorTheme::Light,
            ColorTheme::Dark,
            ColorTheme::HighContrast,
        ] {
            let theme = Theme::from_color_theme(color_theme);
            assert_eq!(theme.title().fg, Some(theme.accent));
            assert!(theme.title().add_modifier.contains(Modifier::BOLD));
            assert_eq!(theme.highlight().bg, Some(theme.highlight_bg));
            assert_eq!(theme.table_header().bg, Some(theme.table_header_bg));
            assert_eq!(theme.error().fg, Some(theme.error));
        }
    }
}
