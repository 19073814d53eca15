use crate::ui::app::{Alert, App};
use crate::ui::footer::{Footer, Hint};
use crate::ui::form::FormState;
use crate::ui::google::GoogleState;
use crate::ui::header::Header;
use crate::ui::landing::LandingState;
use crate::ui::layout::{centered_rect, centered_rect_by_size, layout_regions};
use crate::ui::lists::ListsState;
use crate::ui::loadable::Loadable;
use crate::ui::route::Route;
use crate::ui::screen::Screen;
use crate::ui::theme::{BORDER, BRAND, DANGER, MUTED, POPUP_BORDER, SELECTED_BG, SUCCESS, TEXT};
use crate::ui::words::{WordsState, DELETE_CONFIRM_MESSAGE, DELETE_CONFIRM_TITLE};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const ALERT_MAX_WIDTH: u16 = 60;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    let email = app.session().identity().map(|identity| identity.email);
    frame.render_widget(Header::new(app.route().title(), email).widget(), header);
    frame.render_widget(Clear, body);

    match app.screen() {
        Screen::Home => draw_home(frame, body),
        Screen::GoogleSignIn(state) => draw_google(frame, body, state),
        Screen::Landing(state) => draw_landing(frame, body, state),
        Screen::PickList(state) => {
            let word = match app.route() {
                Route::PickList { word, .. } => word.as_str(),
                _ => "",
            };
            draw_lists(frame, body, state, Some(word));
        }
        Screen::VocabLists(state) => draw_lists(frame, body, state, None),
        Screen::WordList(state) => draw_words(frame, body, state),
        Screen::VerifySecurityAnswer(form) => {
            let question = match app.route() {
                Route::VerifySecurityAnswer { question, .. } => question.as_str(),
                _ => "",
            };
            draw_form(frame, body, form, &[question]);
        }
        screen => {
            if let Some(form) = screen.form() {
                draw_form(frame, body, form, &[]);
            }
        }
    }

    frame.render_widget(Footer::new(footer_hints(app)).widget(), footer);

    if let Screen::WordList(state) = app.screen() {
        if state.confirm_delete {
            draw_popup(
                frame,
                body,
                DELETE_CONFIRM_TITLE,
                DANGER,
                vec![
                    Line::from(DELETE_CONFIRM_MESSAGE),
                    Line::from(""),
                    Line::from("y: Delete  n: Cancel"),
                ],
            );
        }
    }

    if let Some(alert) = app.alert() {
        draw_alert(frame, body, alert);
    }
}

fn footer_hints(app: &App) -> &'static [Hint] {
    if app.alert().is_some() {
        return &[("Enter", "OK"), ("Ctrl+Q", "Quit")];
    }
    match app.screen() {
        Screen::Home => &[
            ("l", "Log in"),
            ("c", "Create account"),
            ("g", "Google"),
            ("f", "Forgot password"),
            ("q", "Quit"),
        ],
        Screen::Login(_) => &[
            ("Tab", "Next field"),
            ("Enter", "Log in"),
            ("Ctrl+F", "Forgot password"),
            ("Esc", "Back"),
        ],
        Screen::GoogleSignIn(GoogleState::Failed { .. }) => &[("r", "Retry"), ("Esc", "Back")],
        Screen::GoogleSignIn(_) => &[
            ("Paste", "redirect URL"),
            ("Enter", "Continue"),
            ("Esc", "Back"),
        ],
        Screen::Landing(_) => &[
            ("r", "New word"),
            ("s", "Save to history"),
            ("p", "Save to list"),
            ("n", "New list"),
            ("v", "My lists"),
            ("o", "Log out"),
            ("q", "Quit"),
        ],
        Screen::PickList(_) => &[
            ("↑/↓", "Select"),
            ("Enter", "Save here"),
            ("n", "New list"),
            ("r", "Refresh"),
            ("Esc", "Back"),
        ],
        Screen::VocabLists(_) => &[
            ("↑/↓", "Select"),
            ("Enter", "Open"),
            ("n", "New list"),
            ("r", "Refresh"),
            ("Esc", "Back"),
        ],
        Screen::WordList(_) => &[
            ("↑/↓", "Scroll"),
            ("d", "Delete list"),
            ("r", "Refresh"),
            ("Esc", "Back"),
        ],
        _ => &[
            ("Tab", "Next field"),
            ("Enter", "Submit"),
            ("Esc", "Back"),
            ("Ctrl+Q", "Quit"),
        ],
    }
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER))
}

fn muted(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(MUTED)))
}

fn draw_home(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Build your vocabulary one word a day.",
            Style::default().fg(TEXT),
        )),
        Line::from(""),
        Line::from("  [l] Log in"),
        Line::from("  [c] Create an account"),
        Line::from("  [g] Sign in with Google"),
        Line::from("  [f] Forgot password"),
    ];
    let widget = Paragraph::new(lines).block(panel("Welcome"));
    frame.render_widget(widget, centered_rect(60, 60, area));
}

fn draw_form(frame: &mut Frame<'_>, area: Rect, form: &FormState, preamble: &[&str]) {
    let mut lines: Vec<Line> = preamble
        .iter()
        .filter(|text| !text.is_empty())
        .map(|text| Line::from(Span::styled(text.to_string(), Style::default().fg(TEXT))))
        .collect();
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }

    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.focused;
        let label_style = if focused {
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        let cursor = if focused && !form.submitting { "▏" } else { "" };
        let mut value = Line::from(vec![
            Span::raw("  "),
            Span::styled(field.display(), Style::default().fg(TEXT)),
            Span::styled(cursor, Style::default().fg(BRAND)),
        ]);
        if focused {
            value = value.style(Style::default().bg(SELECTED_BG));
        }
        lines.push(Line::from(Span::styled(field.label, label_style)));
        lines.push(value);
        lines.push(Line::from(""));
    }

    if form.submitting {
        lines.push(muted("Working..."));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Details"));
    frame.render_widget(widget, centered_rect(70, 80, area));
}

fn draw_google(frame: &mut Frame<'_>, area: Rect, state: &GoogleState) {
    let mut lines = vec![Line::from(state.status_line()), Line::from("")];
    match state {
        GoogleState::AwaitingRedirect { pending, input } => {
            lines.push(Line::from(Span::styled(
                pending.auth_url.clone(),
                Style::default().fg(BRAND).add_modifier(Modifier::UNDERLINED),
            )));
            lines.push(Line::from(""));
            lines.push(muted(input.fields.first().map(|f| f.label).unwrap_or("")));
            lines.push(
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(input.value(0).to_string(), Style::default().fg(TEXT)),
                ])
                .style(Style::default().bg(SELECTED_BG)),
            );
        }
        GoogleState::Failed { message } => {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(DANGER),
            )));
        }
        _ => {}
    }
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Google"));
    frame.render_widget(widget, centered_rect(90, 80, area));
}

fn draw_landing(frame: &mut Frame<'_>, area: Rect, state: &LandingState) {
    let lines = match &state.word {
        Loadable::Loading => vec![muted("Loading today's word...")],
        Loadable::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(DANGER),
        ))],
        Loadable::Loaded(word) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    word.word.clone(),
                    Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    word.definition.clone(),
                    Style::default().fg(TEXT),
                )),
            ];
            if state.saving {
                lines.push(Line::from(""));
                lines.push(muted("Saving..."));
            }
            lines
        }
    };
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("Word of the Day"));
    frame.render_widget(widget, centered_rect(80, 70, area));
}

fn draw_lists(frame: &mut Frame<'_>, area: Rect, state: &ListsState, word: Option<&str>) {
    let mut lines = Vec::new();
    if let Some(word) = word {
        lines.push(Line::from(vec![
            Span::raw("Save "),
            Span::styled(word.to_string(), Style::default().fg(BRAND)),
            Span::raw(" to:"),
        ]));
        lines.push(Line::from(""));
    }

    match &state.lists {
        Loadable::Loading => lines.push(muted("Loading lists...")),
        Loadable::Failed(message) => lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(DANGER),
        ))),
        Loadable::Loaded(lists) if lists.is_empty() => {
            lines.push(muted("No vocab lists yet. Press n to create one."));
        }
        Loadable::Loaded(lists) => {
            if let Some(label) = state.count_label() {
                lines.push(muted(label));
                lines.push(Line::from(""));
            }
            for (index, list) in lists.iter().enumerate() {
                let date = list
                    .created_date()
                    .map(|d| format!("  {}", d.format("%b %-d, %Y")))
                    .unwrap_or_default();
                let mut line = Line::from(vec![
                    Span::styled(
                        format!(" {} ", list.list_name),
                        Style::default().fg(TEXT),
                    ),
                    Span::styled(date, Style::default().fg(MUTED)),
                ]);
                if index == state.selected {
                    line = line.style(Style::default().bg(SELECTED_BG));
                }
                lines.push(line);
            }
        }
    }

    if state.saving {
        lines.push(Line::from(""));
        lines.push(muted("Saving..."));
    }

    let widget = Paragraph::new(lines).block(panel("Lists"));
    frame.render_widget(widget, centered_rect(80, 90, area));
}

fn draw_words(frame: &mut Frame<'_>, area: Rect, state: &WordsState) {
    let mut lines = Vec::new();
    match &state.words {
        Loadable::Loading => lines.push(muted("Loading words...")),
        Loadable::Failed(message) => lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(DANGER),
        ))),
        Loadable::Loaded(words) if words.is_empty() => {
            lines.push(muted("No words in this list yet."));
        }
        Loadable::Loaded(words) => {
            if let Some(label) = state.count_label() {
                lines.push(muted(label));
                lines.push(Line::from(""));
            }
            for word in words {
                let date = word
                    .created_date()
                    .map(|d| format!("  added {}", d.format("%b %-d, %Y")))
                    .unwrap_or_default();
                lines.push(Line::from(vec![
                    Span::styled(
                        word.word.clone(),
                        Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(date, Style::default().fg(MUTED)),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("  {}", word.definition),
                    Style::default().fg(TEXT),
                )));
                lines.push(Line::from(""));
            }
        }
    }
    if state.deleting {
        lines.push(muted("Deleting..."));
    }

    let scroll = u16::try_from(state.scroll.saturating_mul(3)).unwrap_or(u16::MAX);
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(panel(state.title()));
    frame.render_widget(widget, centered_rect(90, 95, area));
}

fn draw_alert(frame: &mut Frame<'_>, body: Rect, alert: &Alert) {
    let lines = vec![
        Line::from(alert.message.clone()),
        Line::from(""),
        muted("Enter: OK"),
    ];
    draw_popup(frame, body, &alert.title, alert_color(&alert.title), lines);
}

fn alert_color(title: &str) -> Color {
    match title {
        "Success" | "Sign Up Successful" | "Welcome" => SUCCESS,
        t if t.ends_with("Failed") || t.to_lowercase().contains("error") => DANGER,
        _ => BRAND,
    }
}

fn draw_popup(
    frame: &mut Frame<'_>,
    body: Rect,
    title: &str,
    title_color: Color,
    lines: Vec<Line<'static>>,
) {
    let content_width = lines
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .max(title.chars().count() + 2) as u16;
    let popup_width = content_width.saturating_add(4).min(ALERT_MAX_WIDTH);
    let inner_width = popup_width.saturating_sub(2).max(1) as usize;
    let wrapped_rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(inner_width))
        .sum();
    let popup_height = (wrapped_rows as u16).saturating_add(2);
    let area = centered_rect_by_size(body, popup_width, popup_height);

    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(title_color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(popup);
    frame.render_widget(widget, area);
}
