use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::interactive::app::InteractiveApp;
use crate::interactive::layout::centered_popup;

/// Draw the full keyboard shortcuts help overlay.
pub fn draw(frame: &mut Frame, area: Rect, _app: &InteractiveApp) {
    let width: u16 = 72;
    let height: u16 = 16;
    let popup_area = centered_popup(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let separator_style = Style::default().fg(Color::DarkGray);
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let lines: Vec<Line> = vec![
        // Column headers
        Line::from(vec![
            Span::styled(format!("{:<22}", "Navigation"), header_style),
            Span::styled(format!("{:<24}", "Issue"), header_style),
            Span::styled("Filters", header_style),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<22}", "\u{2500}".repeat(10)), separator_style),
            Span::styled(format!("{:<24}", "\u{2500}".repeat(5)), separator_style),
            Span::styled("\u{2500}".repeat(7), separator_style),
        ]),
        build_help_row("j/k", "Move up/down", "u/d", "Vote issue", "/", "Search", key_style, desc_style),
        build_help_row("Enter", "Open issue", "+/-", "Vote comment", "1-4", "Quick filter", key_style, desc_style),
        build_help_row("Esc/H", "Back", "v", "Verify solution", "Tab", "Filter bar", key_style, desc_style),
        build_help_row("L", "Forward", "c", "Add comment", "h/l", "Prev/next field", key_style, desc_style),
        build_help_row("PgUp", "Scroll up", "m", "Move to CCR", "j/k", "Change value", key_style, desc_style),
        build_help_row("PgDn", "Scroll down", "n", "New issue", "Bksp", "Clear value", key_style, desc_style),
        build_help_row("r", "Refresh", "D", "Delete (admin)", "", "", key_style, desc_style),
        build_help_row("x", "Dismiss message", "", "", "", "", key_style, desc_style),
        build_help_row("?", "This help", "", "", "", "", key_style, desc_style),
        build_help_row("q", "Quit", "", "", "", "", key_style, desc_style),
    ];

    let content = Paragraph::new(lines);
    let content_area = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height.saturating_sub(1));
    frame.render_widget(content, content_area);

    // Footer
    let footer_area = Rect::new(
        inner.x,
        inner.y + inner.height.saturating_sub(1),
        inner.width,
        1,
    );
    let footer = Paragraph::new(Line::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, footer_area);
}

/// Build a single row across the three columns.
fn build_help_row<'a>(
    nav_key: &'a str,
    nav_desc: &'a str,
    issue_key: &'a str,
    issue_desc: &'a str,
    filter_key: &'a str,
    filter_desc: &'a str,
    key_style: Style,
    desc_style: Style,
) -> Line<'a> {
    let mut spans = Vec::new();

    if nav_key.is_empty() {
        spans.push(Span::styled(format!("{:<22}", ""), desc_style));
    } else {
        spans.push(Span::styled(format!("{:<7}", nav_key), key_style));
        spans.push(Span::styled(format!("{:<15}", nav_desc), desc_style));
    }

    if issue_key.is_empty() {
        spans.push(Span::styled(format!("{:<24}", ""), desc_style));
    } else {
        spans.push(Span::styled(format!("{:<5}", issue_key), key_style));
        spans.push(Span::styled(format!("{:<19}", issue_desc), desc_style));
    }

    if !filter_key.is_empty() {
        spans.push(Span::styled(format!("{:<5}", filter_key), key_style));
        spans.push(Span::styled(filter_desc, desc_style));
    }

    Line::from(spans)
}
