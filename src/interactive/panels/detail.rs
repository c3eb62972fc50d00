use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{score_color, severity_color, status_color};
use crate::formatting::{ccr_badge, format_date, format_file_size, resolved_indicator, time_ago};
use crate::interactive::app::InteractiveApp;
use crate::models::{Comment, Issue};
use crate::view::DetailView;

pub fn draw_detail(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    match &app.view.detail {
        DetailView::Hidden => {}
        DetailView::Loading(id) => {
            let loading = Paragraph::new(format!("Loading issue #{}...", id))
                .style(Style::default().fg(Color::Yellow))
                .block(block.title(" Issue "))
                .alignment(Alignment::Center);
            frame.render_widget(loading, area);
        }
        DetailView::Failed { id, message } => {
            let error = Paragraph::new(vec![
                Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
                Line::from(""),
                Line::from(Span::styled(
                    "Esc: back to issues  r: retry",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(block.title(format!(" Issue #{} ", id)))
            .wrap(Wrap { trim: true });
            frame.render_widget(error, area);
        }
        DetailView::Loaded(issue) => {
            let lines = issue_lines(issue, app.selected_comment, app.is_admin());
            let paragraph = Paragraph::new(lines)
                .block(block.title(format!(" Issue #{} ", issue.id)))
                .wrap(Wrap { trim: false })
                .scroll((app.detail_scroll, 0));
            frame.render_widget(paragraph, area);
        }
    }
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{:<12}", text), Style::default().fg(Color::Gray))
}

fn field(name: &str, value: Option<&str>) -> Line<'static> {
    Line::from(vec![
        label(name),
        Span::styled(
            value.filter(|v| !v.is_empty()).unwrap_or("-").to_string(),
            Style::default().fg(Color::White),
        ),
    ])
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

pub fn issue_lines(issue: &Issue, selected_comment: usize, is_admin: bool) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        issue.testcase_title.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))];

    let mut badges = vec![
        Span::styled(
            format!("[{}] ", issue.status.label()),
            Style::default().fg(status_color(issue.status)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}] ", issue.severity),
            Style::default().fg(severity_color(issue.severity)),
        ),
        Span::styled(
            format!("\u{25b2}{} \u{25bc}{} ", issue.upvotes, issue.downvotes),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("score {:+} ", issue.score),
            Style::default().fg(score_color(issue.score)),
        ),
    ];
    if let Some(badge) = ccr_badge(issue) {
        badges.push(Span::styled(format!("{} ", badge), Style::default().fg(Color::Magenta)));
    }
    if let Some(resolved) = resolved_indicator(issue) {
        badges.push(Span::styled(resolved, Style::default().fg(Color::Green)));
    }
    lines.push(Line::from(badges));
    lines.push(Line::from(""));

    lines.push(field("Path", Some(issue.testcase_path.as_str())));
    lines.push(field("Reporter", Some(issue.reporter_name.as_str())));
    lines.push(field("Release", issue.release.as_deref()));
    lines.push(field("Platform", issue.platform_label()));
    lines.push(field("Build", issue.build.as_deref()));
    lines.push(field("Target", issue.target.as_deref()));
    if let Some(ids) = issue.test_case_ids.as_deref().filter(|s| !s.is_empty()) {
        lines.push(field("Test cases", Some(ids)));
    }
    if !issue.tags.is_empty() {
        lines.push(field("Tags", Some(issue.tags.join(", ").as_str())));
    }
    if let Some(created) = issue.created_at.as_deref() {
        lines.push(field("Created", Some(format!("{} ({})", format_date(created), time_ago(created)).as_str())));
    }
    if let Some(updated) = issue.updated_at.as_deref() {
        lines.push(field("Updated", Some(format_date(updated).as_str())));
    }

    lines.push(Line::from(""));
    lines.push(section("Description"));
    if issue.description.trim().is_empty() {
        lines.push(Line::from(Span::styled("No description", Style::default().fg(Color::DarkGray))));
    } else {
        lines.extend(issue.description.lines().map(|l| Line::from(l.to_string())));
    }

    if let Some(extra) = issue.additional_comments.as_deref().filter(|s| !s.trim().is_empty()) {
        lines.push(Line::from(""));
        lines.push(section("Additional comments"));
        lines.extend(extra.lines().map(|l| Line::from(l.to_string())));
    }

    if !issue.attachments.is_empty() {
        lines.push(Line::from(""));
        lines.push(section(&format!("Attachments ({})", issue.attachments.len())));
        for attachment in &issue.attachments {
            let size = attachment.file_size.map(format_file_size).unwrap_or_default();
            lines.push(Line::from(vec![
                Span::raw("  \u{1f4ce} "),
                Span::styled(attachment.filename.clone(), Style::default().fg(Color::White)),
                Span::styled(format!("  {}", size), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(section(&format!("Comments ({})", issue.comments.len())));
    if issue.comments.is_empty() {
        lines.push(Line::from(Span::styled(
            "No comments yet. Press c to add one.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, comment) in issue.comments.iter().enumerate() {
        lines.extend(comment_lines(comment, i == selected_comment));
    }

    lines.push(Line::from(""));
    let mut hints = "u/d vote  +/- vote comment  v verify  c comment".to_string();
    if issue.ccr_number.as_deref().map_or(true, str::is_empty) {
        hints.push_str("  m move to CCR");
    }
    if is_admin {
        hints.push_str("  D delete");
    }
    lines.push(Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))));

    lines
}

fn comment_lines(comment: &Comment, selected: bool) -> Vec<Line<'static>> {
    let marker = if selected { "\u{25b6} " } else { "  " };
    let mut header = vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(
            comment.commenter_name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(created) = comment.created_at.as_deref() {
        header.push(Span::styled(format!(" ({})", time_ago(created)), Style::default().fg(Color::Gray)));
    }
    let score = comment.net_score();
    header.push(Span::styled(
        format!("  \u{25b2}{} \u{25bc}{} ", comment.upvotes, comment.downvotes),
        Style::default().fg(Color::DarkGray),
    ));
    header.push(Span::styled(format!("{:+}", score), Style::default().fg(score_color(score))));
    if comment.is_verified_solution {
        header.push(Span::styled(
            "  \u{2714} Verified Solution",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    let body_style = if selected {
        Style::default().fg(Color::White).bg(Color::Rgb(30, 35, 50))
    } else {
        Style::default().fg(Color::White)
    };

    let mut lines = vec![Line::from(header)];
    lines.extend(
        comment
            .content
            .lines()
            .map(|l| Line::from(Span::styled(format!("    {}", l), body_style))),
    );
    lines.push(Line::from(""));
    lines
}
