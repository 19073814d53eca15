use crate::ui::theme::{BORDER, BRAND, MUTED, SEPARATOR, SUCCESS, TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header<'a> {
    title: &'a str,
    email: Option<String>,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, email: Option<String>) -> Self {
        Self { title, email }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(TEXT);
        let separator_style = Style::default().fg(SEPARATOR);
        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(
                "Vocab Vault",
                Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(self.title.to_string(), text_style),
        ];

        spans.push(Span::styled("  │  ", separator_style));
        match &self.email {
            Some(email) => {
                spans.push(Span::styled("●", Style::default().fg(SUCCESS)));
                spans.push(Span::styled(format!(" {}", email), text_style));
            }
            None => spans.push(Span::styled("Not signed in", Style::default().fg(MUTED))),
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(BORDER)),
        )
    }
}
