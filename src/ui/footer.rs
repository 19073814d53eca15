use crate::ui::theme::{BORDER, BRAND, MUTED, SEPARATOR};
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A key and what it does on the current screen.
pub type Hint = (&'static str, &'static str);

/// Key hints for the current screen, with the version on the right border.
pub struct Footer {
    hints: &'static [Hint],
}

impl Footer {
    pub fn new(hints: &'static [Hint]) -> Self {
        Self { hints }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let key_style = Style::default().fg(BRAND).add_modifier(Modifier::BOLD);
        let action_style = Style::default().fg(MUTED);
        let separator_style = Style::default().fg(SEPARATOR);

        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", separator_style));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(" {}", action), action_style));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER))
                .title_bottom(
                    Line::from(Span::styled(format!(" v{} ", VERSION), action_style))
                        .alignment(Alignment::Right),
                ),
        )
    }
}
