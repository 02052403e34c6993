use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::footer::draw_footer;
use super::status_bar::draw_status_bar;
use crate::app::{ActionButton, ActivePanel, App};

const LIST_MAX_WIDTH: u16 = 50;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Footer
        ])
        .split(size);

    let list_width = LIST_MAX_WIDTH.min(chunks[0].width / 2);
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(list_width), Constraint::Min(0)])
        .split(chunks[0]);

    draw_hosts_panel(f, app, main[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(main[1]);

    draw_details_panel(f, app, right[0]);
    draw_buttons(f, app, right[1]);

    draw_status_bar(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);
}

fn draw_hosts_panel(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme;
    let is_active = app.active_panel == ActivePanel::Hosts;
    app.hit_areas.hosts_list = area;

    let items: Vec<ListItem> = app
        .state
        .labels
        .iter()
        .map(|label| ListItem::new(Line::from(Span::raw(label.as_str()))))
        .collect();

    let border_style = if is_active {
        Style::default().fg(theme.highlight)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Connections ")
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().fg(theme.text))
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .fg(ratatui::style::Color::Black)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(list, area, &mut app.host_list_state);
}

fn detail_line<'a>(name: &'a str, value: &'a str, style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", name), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(value, style),
    ])
}

fn draw_details_panel(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Details ")
        .title_style(Style::default().add_modifier(Modifier::BOLD));

    let text_style = Style::default().fg(theme.text);
    let lines = match app.get_selected_host() {
        Some(host) => {
            let alias = if host.host.is_empty() {
                "(none)"
            } else {
                host.host.as_str()
            };
            vec![
                detail_line("Host:", alias, text_style),
                detail_line(
                    "Hostname:",
                    host.hostname.as_deref().unwrap_or("(none)"),
                    text_style,
                ),
                detail_line("User:", host.user.as_deref().unwrap_or("(none)"), text_style),
                Line::from(""),
                Line::from(Span::styled(
                    "SSH command:",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    host.command(),
                    Style::default().fg(theme.success),
                )),
            ]
        }
        None => vec![Line::from(Span::styled(
            "No connection selected",
            Style::default().fg(theme.muted),
        ))],
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_buttons(f: &mut Frame, app: &mut App, area: Rect) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(10),
            Constraint::Min(0),
        ])
        .split(area);

    app.hit_areas.select_button = row[1];
    app.hit_areas.quit_button = row[3];

    draw_button(f, app, ActionButton::Select, "Select", row[1]);
    draw_button(f, app, ActionButton::Quit, "Quit", row[3]);
}

fn draw_button(f: &mut Frame, app: &App, button: ActionButton, text: &str, area: Rect) {
    let theme = app.theme;
    let focused = app.active_panel == ActivePanel::Actions && app.focused_button == button;
    let style = if focused {
        Style::default()
            .fg(ratatui::style::Color::Black)
            .bg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
