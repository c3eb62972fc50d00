use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::interactive::app::{InteractiveApp, Notification, NotificationKind, NOTIFICATION_TTL};

pub const MAX_VISIBLE: usize = 3;

fn icon_and_color(kind: NotificationKind) -> (&'static str, Color) {
    match kind {
        NotificationKind::Success => ("\u{2713}", Color::Green),
        NotificationKind::Error => ("\u{2717}", Color::Red),
        NotificationKind::Loading => ("\u{27f3}", Color::Yellow),
        NotificationKind::Info => ("\u{24d8}", Color::Blue),
    }
}

fn notification_line(n: &Notification) -> Line<'static> {
    let (icon, color) = icon_and_color(n.kind);
    let suffix = match n.kind {
        NotificationKind::Success | NotificationKind::Info => {
            let remaining = NOTIFICATION_TTL.as_secs().saturating_sub(n.created_at.elapsed().as_secs());
            format!("[{}s]", remaining)
        }
        NotificationKind::Error => "[x] dismiss".to_string(),
        NotificationKind::Loading => String::new(),
    };
    Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(n.message.clone(), Style::default().fg(color)),
        Span::styled(format!("  {}", suffix), Style::default().fg(Color::DarkGray)),
    ])
}

/// Newest messages last, at most three.
pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    if area.height == 0 {
        return;
    }
    let visible: Vec<&Notification> = app.notifications.iter().filter(|n| !n.dismissed).collect();
    if visible.is_empty() {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let skip = visible.len().saturating_sub(MAX_VISIBLE);
    let lines: Vec<Line> = visible.into_iter().skip(skip).map(notification_line).collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
