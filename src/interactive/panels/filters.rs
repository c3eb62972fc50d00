use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::filtering::{FilterField, TargetOptions};
use crate::formatting::truncate;
use crate::interactive::app::{Focus, InteractiveApp};

const VALUE_WIDTH: usize = 16;

/// The seven filter inputs. The focused field is highlighted while the bar
/// has focus; the search box shows a cursor while it is being edited.
pub fn draw_filters(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let focused = app.focus == Focus::Filters || app.search_editing;
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filters ")
        .border_style(border_style);

    let mut spans = Vec::new();
    for field in FilterField::ALL {
        spans.extend(field_spans(app, field, focused));
        spans.push(Span::raw("  "));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn field_spans(app: &InteractiveApp, field: FilterField, bar_focused: bool) -> Vec<Span<'static>> {
    let is_current = bar_focused && app.filter_field == field;
    let label_style = if is_current {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let value = if field == FilterField::Search {
        let text = &app.view.filters.search_text;
        if app.search_editing {
            format!("{}\u{2588}", text)
        } else if text.is_empty() {
            "...".to_string()
        } else {
            truncate(text, VALUE_WIDTH)
        }
    } else {
        truncate(&app.view.options.display_value(&app.view.filters, field), VALUE_WIDTH)
    };

    let value_style = match (field, &app.view.options.targets) {
        (FilterField::Target, TargetOptions::Failed(_)) => Style::default().fg(Color::Red),
        (FilterField::Target, targets) if !targets.is_enabled() => {
            Style::default().fg(Color::DarkGray)
        }
        _ if app.view.filters.get(field).is_empty() => Style::default().fg(Color::DarkGray),
        _ => Style::default().fg(Color::Yellow),
    };

    vec![
        Span::styled(format!("{}:", field.label()), label_style),
        Span::raw(" "),
        Span::styled(value, value_style),
    ]
}
