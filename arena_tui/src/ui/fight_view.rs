//! Fight screen - both units and the battle log

use crate::app::App;
use crate::ui::bar;
use arena_core::{BattlePhase, UnitStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Units
            Constraint::Min(0),    // Log
        ])
        .split(area);

    let units = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let status = app.status();
    if let Some(player) = &status.player {
        draw_unit(f, player, " Player ", units[0]);
    }
    if let Some(enemy) = &status.enemy {
        draw_unit(f, enemy, " Enemy ", units[1]);
    }

    let title = match (status.phase, &status.result) {
        (BattlePhase::Ended(_), Some(result)) => format!(" Battle over: {} ", result),
        _ => format!(" Round {} ", status.round),
    };
    draw_log(f, app, &title, chunks[1]);
}

fn health_color(percent: f64) -> Color {
    if percent > 50.0 {
        Color::Green
    } else if percent > 25.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn draw_unit(f: &mut Frame, unit: &UnitStatus, title: &str, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;
    let hp_color = health_color(unit.hp_percent());

    let skill_style = if unit.skill_used {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Magenta)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                unit.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({})", unit.class_name), Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("HP ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1}/{:.1}", unit.hp, unit.max_hp),
                Style::default().fg(hp_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(bar(unit.hp_percent(), width), Style::default().fg(hp_color))),
        Line::from(vec![
            Span::styled("Stamina ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1}/{:.1}", unit.stamina, unit.max_stamina),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(Span::styled(
            bar(unit.stamina_percent(), width),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(vec![
            Span::styled(
                format!(
                    "{} / {}  ",
                    unit.weapon.as_deref().unwrap_or("-"),
                    unit.armor.as_deref().unwrap_or("-")
                ),
                Style::default().fg(Color::White),
            ),
            Span::styled(unit.skill.clone(), skill_style),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);
}

fn draw_log(f: &mut Frame, app: &App, title: &str, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = app
        .log_scroll
        .saturating_sub(visible.saturating_sub(1))
        .min(app.combat_log.len());

    let items: Vec<ListItem> = app.combat_log[start..]
        .iter()
        .take(visible)
        .map(|line| {
            let style = if line.starts_with("━━━") {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if app.session.result() == Some(line.as_str()) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(line.clone(), style)))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(list, area);
}
