//! Terminal colouring that can be switched off as a whole.

use console::{Alignment, Style, pad_str};

#[derive(Debug, Clone, Copy)]
pub(super) struct Palette {
    colors: bool,
}

impl Palette {
    pub(super) fn new(colors: bool) -> Self {
        Self { colors }
    }

    /// Colours only when stdout is a terminal.
    pub(super) fn for_stdout() -> Self {
        Self::new(console::Term::stdout().features().colors_supported())
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style.force_styling(self.colors).apply_to(text).to_string()
    }

    pub(super) fn green(&self, text: &str) -> String {
        self.paint(Style::new().green(), text)
    }

    pub(super) fn yellow(&self, text: &str) -> String {
        self.paint(Style::new().yellow(), text)
    }

    pub(super) fn red(&self, text: &str) -> String {
        self.paint(Style::new().red(), text)
    }

    pub(super) fn bold(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    /// Colour a usage percentage: green below `warn`, yellow below `critical`, red otherwise.
    pub(super) fn usage(&self, percent: f64, warn: f64, critical: f64, text: &str) -> String {
        if percent < warn {
            self.green(text)
        } else if percent < critical {
            self.yellow(text)
        } else {
            self.red(text)
        }
    }
}

/// Left-align `text` to `width` visible columns, ignoring escape codes.
pub(super) fn pad(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, None).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_palette_emits_plain_text() {
        let palette = Palette::new(false);
        assert_eq!(palette.red("Stopped"), "Stopped");
        assert_eq!(palette.usage(95.0, 80.0, 90.0, "95%"), "95%");
    }

    #[test]
    fn padding_ignores_escape_codes() {
        let painted = Palette::new(true).green("Open");
        assert_ne!(painted, "Open");
        assert_eq!(console::measure_text_width(&pad(&painted, 8)), 8);
    }
}
