use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{Focus, InteractiveApp};
use super::layout::{app_layout, list_page_layout};
use super::panels::{detail::draw_detail, filters::draw_filters, header::draw_header, list::draw_list};
use super::{notifications, popups};

pub fn draw(frame: &mut Frame, app: &InteractiveApp) {
    let visible_notifications = app.notifications.iter().filter(|n| !n.dismissed).count();
    let layout = app_layout(frame.size(), visible_notifications);

    draw_header(frame, layout.header, app);

    if app.view.detail_visible() {
        draw_detail(frame, layout.main, app);
    } else {
        let page = list_page_layout(layout.main);
        draw_filters(frame, page.filters, app);
        draw_list(frame, page.list, app);
    }

    notifications::draw(frame, layout.notifications, app);
    draw_footer(frame, layout.footer, app);

    popups::draw_popup(frame, frame.size(), app);
}

pub fn footer_hint(app: &InteractiveApp) -> &'static str {
    if app.popup.is_some() {
        return "[Tab] Next field  [Enter] Confirm  [Esc] Cancel";
    }
    if app.search_editing {
        return "[Enter] Search now  [Esc] Done  Type to search...";
    }
    if app.view.detail_visible() {
        return "[Esc] Back  [j/k] Comments  [u/d] Vote  [c] Comment  [v] Verify  [m] CCR  [?] Help";
    }
    match app.focus {
        Focus::Filters => "[h/l] Field  [j/k] Change value  [Bksp] Clear  [Tab/Esc] Issues  [?] Help",
        Focus::List => "[q] Quit  [j/k] Nav  [Enter] Open  [/] Search  [1-4] Quick filter  [Tab] Filters  [n] New  [?] Help",
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let footer = Paragraph::new(footer_hint(app))
        .style(Style::default().bg(Color::Black).fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
