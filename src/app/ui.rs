use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{App, Entry};
use crate::persistence::Store;

pub fn draw<S: Store>(frame: &mut Frame, app: &App<S>) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // header
                Constraint::Min(1),    // transcript
                Constraint::Length(3), // input
            ]
            .as_ref(),
        )
        .split(size);

    // Header (help + counts)
    let help = Line::from("enter send  esc quit  ↑/↓ scroll  pgup/pgdn page");
    let tasks = app.session.tasks();
    let counts = Line::from(format!(
        "{} tasks, {} done, {} due soon",
        tasks.len(),
        tasks.items().iter().filter(|t| t.is_done()).count(),
        tasks.reminders().count()
    ));
    let header = Paragraph::new(vec![help, counts])
        .block(Block::default().borders(Borders::ALL).title("Taskbot"));
    frame.render_widget(header, chunks[0]);

    // Transcript, newest at the bottom
    let mut lines: Vec<Line> = Vec::new();
    for entry in &app.transcript.entries {
        let style = match entry {
            Entry::User(_) => Style::default().add_modifier(Modifier::BOLD),
            Entry::Reply(_) => Style::default(),
            Entry::Raw(_) => Style::default().fg(Color::Yellow),
            Entry::Error(_) => Style::default().fg(Color::Red),
        };
        let prefix = if matches!(entry, Entry::User(_)) { "> " } else { "  " };
        let text = entry.text();
        if text.is_empty() {
            lines.push(Line::styled(prefix.to_string(), style));
        }
        for l in text.lines() {
            lines.push(Line::styled(format!("{prefix}{l}"), style));
        }
    }
    let height = chunks[1].height.saturating_sub(2) as usize;
    let top = lines.len().saturating_sub(height + app.scroll);
    let transcript = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Conversation"))
        .wrap(Wrap { trim: false })
        .scroll((top.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(transcript, chunks[1]);

    // Input line
    let input = Paragraph::new(app.input.as_str())
        .block(Block::default().borders(Borders::ALL).title("Command"));
    frame.render_widget(input, chunks[2]);
    let cursor_x = chunks[2].x + 1 + app.input.chars().count().min(u16::MAX as usize) as u16;
    frame.set_cursor_position((cursor_x.min(chunks[2].right().saturating_sub(2)), chunks[2].y + 1));
}
