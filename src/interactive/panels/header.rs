use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::filtering::QuickFilter;
use crate::interactive::app::InteractiveApp;

pub fn draw_header(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let width = area.width as usize;

    let mut left = vec![
        Span::styled(
            " Tester Talk ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.view.router.current_path().to_string(), Style::default().fg(Color::Gray)),
    ];

    // Quick filter tabs only make sense on the list page
    if app.view.list_visible() {
        let active = app.view.filters.quick_filter();
        left.push(Span::raw("  "));
        for (i, quick) in QuickFilter::ALL.iter().enumerate() {
            let style = if active == Some(*quick) {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            left.push(Span::styled(format!(" {}:{} ", i + 1, quick.label()), style));
        }
    }

    let user = match &app.user {
        Some(user) if user.is_admin() => format!("{} (admin) ", user.username),
        Some(user) => format!("{} ", user.username),
        None => "not logged in ".to_string(),
    };
    let right = vec![Span::styled(user, Style::default().fg(Color::DarkGray))];

    let right_text_len: usize = right.iter().map(|s| s.content.chars().count()).sum();
    let left_text_len: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let pad = width.saturating_sub(left_text_len + right_text_len);

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(pad)));
    spans.extend(right);

    let header = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Rgb(20, 22, 30)));
    frame.render_widget(header, area);
}
