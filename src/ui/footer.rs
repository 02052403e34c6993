use crate::app::{ActivePanel, App};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let legend = match app.active_panel {
        ActivePanel::Hosts => {
            "↑/↓: Move  Enter: Select  q: Quit  Esc: Quit  Tab: Switch Focus  y: Copy"
        }
        ActivePanel::Actions => "←/→: Choose  Enter: Press  q: Quit  Esc: Quit  Tab: Switch Focus",
    };

    let footer = Paragraph::new(legend)
        .style(
            Style::default()
                .fg(app.theme.muted)
                .add_modifier(Modifier::DIM),
        )
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}
