//! UI rendering

mod fight_view;
mod select_view;

use crate::app::{App, Screen};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_title(f, app, chunks[0]);

    match app.screen {
        Screen::ChooseHero | Screen::ChooseEnemy => select_view::draw(f, app, chunks[1]),
        Screen::Fight => fight_view::draw(f, app, chunks[1]),
    }

    draw_keybindings(f, app, chunks[2]);
}

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        app.screen.title(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];
    if let Some(error) = &app.error {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Arena "));
    f.render_widget(paragraph, area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let keys: Vec<(&str, &str)> = match app.screen {
        Screen::ChooseHero | Screen::ChooseEnemy => vec![
            ("↑/↓", "Field"),
            ("←/→", "Change"),
            ("Enter", "Confirm"),
            ("Esc", "Quit"),
        ],
        Screen::Fight => vec![
            ("a", "Hit"),
            ("s", "Skill"),
            ("p", "Pass"),
            ("e", "End fight"),
            ("↑/↓", "Scroll log"),
            ("q", "Quit"),
        ],
    };

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

/// Text bar filled in proportion to `percent`
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0).clamp(0.0, 1.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

pub fn stat_line(name: &str, value: f64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:16}", name), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:.1}", value), Style::default().fg(Color::White)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar(50.0, 10).chars().count(), 10);
        assert_eq!(bar(100.0, 4), "████");
        assert_eq!(bar(-20.0, 4), "░░░░");
    }
}
