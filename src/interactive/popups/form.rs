use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::formatting::truncate;
use crate::interactive::app::{FormState, InteractiveApp, Popup};
use crate::interactive::layout::centered_popup;

const LABEL_WIDTH: usize = 24;

/// Draw the comment, CCR or new-issue form.
pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let Some(Popup::Form(form)) = &app.popup else {
        return;
    };

    let width: u16 = 76;
    // fields + path info + error + hints + borders
    let height = form.fields.len() as u16 + 5;
    let popup_area = centered_popup(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", form.title()))
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let max_value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 4);
    let mut lines: Vec<Line> = (0..form.fields.len())
        .map(|i| field_line(form, i, max_value_width))
        .collect();

    if let Some(summary) = form.path_summary() {
        lines.push(Line::from(Span::styled(
            format!("  {}", summary),
            Style::default().fg(Color::Cyan),
        )));
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let body_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines), body_area);

    // Hints at the bottom
    let hints_area = Rect::new(
        inner.x,
        inner.y + inner.height.saturating_sub(1),
        inner.width,
        1,
    );
    let hints_widget = Paragraph::new(Line::from(Span::styled(
        "Tab: Next field  Enter: Submit  Esc: Cancel",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(hints_widget, hints_area);
}

fn field_line(form: &FormState, index: usize, max_value_width: usize) -> Line<'static> {
    let field = &form.fields[index];
    let is_active = index == form.active;

    let label_style = if is_active {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_style = if is_active {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let indicator = if is_active { "\u{25b6} " } else { "  " };
    let label = if field.required {
        format!("{}*", field.label)
    } else {
        field.label.to_string()
    };

    // Show the tail of long values so the cursor end stays visible
    let chars: Vec<char> = field.value.chars().collect();
    let value = if chars.len() > max_value_width && max_value_width > 3 {
        let tail: String = chars[chars.len() - (max_value_width - 3)..].iter().collect();
        format!("...{}", tail)
    } else {
        truncate(&field.value, max_value_width.max(4))
    };

    let mut spans = vec![
        Span::styled(indicator, label_style),
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
        Span::styled(value, value_style),
    ];
    if is_active {
        spans.push(Span::styled(
            " ",
            Style::default().bg(Color::White),
        ));
    }
    Line::from(spans)
}
