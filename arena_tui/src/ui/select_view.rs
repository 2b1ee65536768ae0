//! Hero and opponent selection form

use crate::app::{App, Field};
use crate::ui::stat_line;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_form(f, app, chunks[0]);
    draw_preview(f, app, chunks[1]);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let value = |field: Field| -> String {
        let pick = |names: &[String], i: usize| names.get(i).cloned().unwrap_or_default();
        match field {
            Field::Name => format!("{}_", app.form.name),
            Field::Class => pick(&app.class_names, app.form.class_index),
            Field::Weapon => pick(&app.weapon_names, app.form.weapon_index),
            Field::Armor => pick(&app.armor_names, app.form.armor_index),
        }
    };

    let items: Vec<ListItem> = Field::all()
        .iter()
        .map(|field| {
            let focused = *field == app.form.focused();
            let style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let arrows = if focused && *field != Field::Name { "◀ ▶" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:8}", field.label()), Style::default().fg(Color::Gray)),
                Span::styled(value(*field), style),
                Span::styled(format!("  {}", arrows), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", app.screen.title())),
    );
    f.render_widget(list, area);
}

fn draw_preview(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    if let Some(class) = app.selected_class() {
        lines.push(Line::from(Span::styled(
            class.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.push(stat_line("Max health", class.max_health));
        lines.push(stat_line("Max stamina", class.max_stamina));
        lines.push(stat_line("Attack", class.attack));
        lines.push(stat_line("Armor", class.armor));
        lines.push(Line::from(vec![
            Span::styled(format!("{:16}", "Skill"), Style::default().fg(Color::Gray)),
            Span::styled(
                format!(
                    "{} ({:.0} dmg, {:.0} stamina)",
                    class.skill.name(),
                    class.skill.damage(),
                    class.skill.stamina_cost()
                ),
                Style::default().fg(Color::Magenta),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let catalog = app.game.catalog();
    if let Some(weapon) = app
        .weapon_names
        .get(app.form.weapon_index)
        .and_then(|name| catalog.weapon(name).ok())
    {
        lines.push(Line::from(Span::styled(
            weapon.name.clone(),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(format!(
            "  damage {:.1}-{:.1}, {:.1} stamina per hit",
            weapon.min_damage, weapon.max_damage, weapon.stamina_per_hit
        )));
    }
    if let Some(armor) = app
        .armor_names
        .get(app.form.armor_index)
        .and_then(|name| catalog.armor(name).ok())
    {
        lines.push(Line::from(Span::styled(
            armor.name.clone(),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(format!(
            "  defence {:.1}, {:.1} stamina per turn",
            armor.defence, armor.stamina_per_turn
        )));
    }

    if let Some(player) = &app.pending_player {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Hero: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} ({})", player.name, player.unit_class.name),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Preview "));
    f.render_widget(paragraph, area);
}
