//! Form widgets: bet slip, deposit and login.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::super::layout::centered_rect;
use crate::state::Store;
use crate::views::{AuthMode, BetSlip, LoginField};

const LABEL: Style = Style::new().fg(Color::Yellow);
const HINT: Style = Style::new().fg(Color::DarkGray);

fn field<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let value_style = if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if focused { "█" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:<10}", label), LABEL),
        Span::styled(value, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

fn form_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn render_form(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let popup = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines)
        .block(form_block(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup);
}

/// Bet slip form.
pub struct BetSlipForm;

impl BetSlipForm {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let Some(slip) = store.bet_slip.as_ref() else {
            return;
        };
        let editing = store.app.is_editing();

        let lines = vec![
            Line::from(Span::styled(
                slip.event.matchup(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(slip.bet_type.to_string(), HINT)),
            Line::from(""),
            selection_line(slip),
            field("Amount", &slip.amount, editing),
            Line::from(""),
            Line::from(Span::styled(store.profile.balance_text(), HINT)),
            Line::from(""),
            Line::from(Span::styled(
                "Tab/←/→ switch team · Enter place bet · Esc cancel",
                HINT,
            )),
        ];

        render_form(frame, area, slip.title(), lines);
    }
}

fn selection_line(slip: &BetSlip) -> Line<'_> {
    let marker = |chosen: bool| {
        if chosen {
            Span::styled(
                "(●) ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("( ) ")
        }
    };
    let first = &slip.event.team1;
    let second = &slip.event.team2;
    Line::from(vec![
        Span::styled(format!("{:<10}", "Team"), LABEL),
        marker(slip.selection == *first),
        Span::raw(first.as_str()),
        Span::raw("   "),
        marker(slip.selection == *second),
        Span::raw(second.as_str()),
    ])
}

/// Deposit form.
pub struct DepositPanel;

impl DepositPanel {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let lines = vec![
            Line::from(""),
            field("Amount $", &store.deposit.amount, store.app.is_editing()),
            Line::from(""),
            Line::from(Span::styled("Enter deposit · Esc back", HINT)),
        ];
        render_form(frame, area, "Deposit Funds", lines);
    }
}

/// Login / registration form.
pub struct LoginPanel;

impl LoginPanel {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let form = &store.login;
        let editing = store.app.is_editing();
        let masked = form.masked_password();
        let other = match form.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        let hint = format!("Tab next field · Enter submit · Ctrl+r {}", other.title());

        let lines = vec![
            Line::from(""),
            field(
                "Email",
                &form.email,
                editing && form.focus == LoginField::Email,
            ),
            field(
                "Password",
                &masked,
                editing && form.focus == LoginField::Password,
            ),
            Line::from(""),
            Line::from(Span::styled(hint, HINT)),
        ];
        render_form(frame, area, form.mode.title(), lines);
    }
}
