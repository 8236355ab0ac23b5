//! Terminal rendering for the markdown produced by the core display layer.
//!
//! Rich output goes through termimad; `--no-color` prints the markdown as-is,
//! which is also what tests and pipes see.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        // Italic marks passed and inactive agenda entries.
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Prints markdown, styled unless rich output is off.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                match line.strip_prefix('#') {
                    // Headings keep their level marker, dimmed, before the title.
                    Some(rest) => {
                        let title = rest.trim_start_matches('#').trim_start();
                        let marker = &line[..line.len() - title.len()];
                        print!("\x1b[2m{marker}\x1b[0m");
                        self.skin.print_inline(&format!("**{title}**"));
                    }
                    None => self.skin.print_inline(line),
                }
                println!();
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_rich_renderer() {
        let renderer = TerminalRenderer::new(true);
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }
}
