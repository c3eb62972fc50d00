use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::{score_color, severity_color, status_color};
use crate::formatting::{ccr_badge, description_preview, resolved_indicator, time_ago, truncate};
use crate::interactive::app::{Focus, InteractiveApp};
use crate::models::Issue;
use crate::view::ListStatus;

pub fn draw_list(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let focused = app.focus == Focus::List && !app.search_editing;
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let issues = app.view.list.issues();
    let title = match &app.view.list.status {
        ListStatus::Loaded(issues) => format!(" Issues ({}) ", issues.len()),
        _ => " Issues ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    match &app.view.list.status {
        ListStatus::Idle | ListStatus::Loading => {
            let loading = Paragraph::new("Loading issues...")
                .style(Style::default().fg(Color::Yellow))
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(loading, area);
            return;
        }
        ListStatus::Failed(message) => {
            let error_widget = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(error_widget, area);
            return;
        }
        ListStatus::Loaded(_) if issues.is_empty() => {
            let empty = Paragraph::new("No issues found. Try adjusting your filters.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }
        ListStatus::Loaded(_) => {}
    }

    let inner_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = issues
        .iter()
        .map(|issue| build_card(issue, inner_width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(30, 35, 50)))
        .highlight_symbol("\u{258c}");

    let mut state = ListState::default();
    state.select(Some(app.view.list.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Three-line card: badges and title, path and metadata, description preview.
fn build_card(issue: &Issue, width: usize) -> ListItem<'static> {
    let mut first = vec![
        Span::styled(format!("#{:<5}", issue.id), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("[{}] ", issue.status.label()),
            Style::default().fg(status_color(issue.status)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}] ", issue.severity),
            Style::default().fg(severity_color(issue.severity)),
        ),
    ];
    if let Some(badge) = ccr_badge(issue) {
        first.push(Span::styled(format!("{} ", badge), Style::default().fg(Color::Magenta)));
    }
    if issue.has_verified_solution {
        first.push(Span::styled("\u{2714} Solved ", Style::default().fg(Color::Green)));
    }
    first.push(Span::styled(
        truncate(&issue.testcase_title, width.saturating_sub(30).max(10)),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));

    let mut meta = vec![issue.reporter_name.clone()];
    meta.extend(issue.release.clone().filter(|r| !r.is_empty()));
    meta.extend(issue.platform_label().map(str::to_string));
    meta.extend(issue.build.clone().filter(|b| !b.is_empty()));
    if let Some(created) = issue.created_at.as_deref() {
        meta.push(time_ago(created));
    }
    meta.push(format!("{} comments", issue.comment_count));
    if let Some(resolved) = resolved_indicator(issue) {
        meta.push(resolved);
    }

    let second = vec![
        Span::raw("       "),
        Span::styled(
            truncate(&meta.join(" \u{00b7} "), width.saturating_sub(16)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  \u{25b2}{} \u{25bc}{} ", issue.upvotes, issue.downvotes),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{:+}", issue.score), Style::default().fg(score_color(issue.score))),
    ];

    let third = Line::from(vec![
        Span::raw("       "),
        Span::styled(
            truncate(&description_preview(issue).replace('\n', " "), width.saturating_sub(8)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    ListItem::new(vec![Line::from(first), Line::from(second), third])
}
