use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

const STATUS_TTL_SECS: u64 = 5;

pub fn draw_status_bar(f: &mut Frame, app: &mut App, area: Rect) {
    let Some((message, timestamp)) = &app.status_message else {
        return;
    };

    if timestamp.elapsed().as_secs() >= STATUS_TTL_SECS {
        // expired
        app.clear_status_message();
        return;
    }

    let lower = message.to_lowercase();
    let color = if lower.contains("error") || lower.contains("failed") {
        app.theme.error
    } else if lower.contains("copied") {
        app.theme.success
    } else {
        app.theme.warning
    };

    let paragraph = Paragraph::new(message.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
