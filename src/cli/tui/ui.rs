//! Rendering for the two TUI screens

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{App, Message, MessageKind, Screen};

/// Draw the current screen
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match app.screen {
        Screen::Directory => draw_directory_screen(frame, app, area),
        Screen::Catalog => draw_catalog_screen(frame, app, area),
    }
}

fn draw_directory_screen(frame: &mut Frame, app: &App, area: Rect) {
    let [title_area, input_area, message_area, _, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(area);

    let title = Paragraph::new(" idcat - choose a directory ")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, title_area);

    let input = Paragraph::new(app.dir_input.as_str())
        .block(Block::default().borders(Borders::ALL).title(" Directory "));
    frame.render_widget(input, input_area);
    frame.set_cursor_position(cursor_position(input_area, app.dir_input.chars().count()));

    draw_message(frame, app.message.as_ref(), message_area);

    let footer = Paragraph::new(" [Enter] Open  [Esc] Quit ")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, footer_area);
}

fn draw_catalog_screen(frame: &mut Frame, app: &App, area: Rect) {
    let [title_area, list_area, input_area, message_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(area);

    let (directory, total) = app
        .session()
        .map(|s| (s.directory().display().to_string(), s.catalog().len()))
        .unwrap_or_default();

    let title = Paragraph::new(format!(" {} ({} files) ", directory, total))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, title_area);

    let items: Vec<ListItem> = app
        .session()
        .map(|s| {
            s.catalog()
                .iter()
                .map(|entry| {
                    ListItem::new(Line::from(vec![
                        Span::styled(entry.id.to_string(), Style::default().fg(Color::Cyan)),
                        Span::raw(" - "),
                        Span::raw(entry.filename.clone()),
                    ]))
                })
                .collect()
        })
        .unwrap_or_default();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Catalog "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, list_area, &mut state);

    let input = Paragraph::new(app.query_input.as_str())
        .block(Block::default().borders(Borders::ALL).title(" Identifier "));
    frame.render_widget(input, input_area);
    frame.set_cursor_position(cursor_position(input_area, app.query_input.chars().count()));

    draw_message(frame, app.message.as_ref(), message_area);

    let footer = Paragraph::new(" [Enter] Look up  [↑↓] Scroll  [Esc] Change directory  [Ctrl-C] Quit ")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, footer_area);
}

/// Cursor after `len` typed chars inside a bordered input, kept inside the box
fn cursor_position(area: Rect, len: usize) -> (u16, u16) {
    let start = area.x.saturating_add(1);
    let last = area.right().saturating_sub(2).max(start);
    let offset = u16::try_from(len).unwrap_or(u16::MAX);
    (start.saturating_add(offset).min(last), area.y.saturating_add(1))
}

fn draw_message(frame: &mut Frame, message: Option<&Message>, area: Rect) {
    let Some(message) = message else {
        return;
    };
    let color = match message.kind {
        MessageKind::Info => Color::Gray,
        MessageKind::Success => Color::Green,
        MessageKind::Error => Color::Red,
    };
    let line = Paragraph::new(format!(" {}", message.text)).style(Style::default().fg(color));
    frame.render_widget(line, area);
}
