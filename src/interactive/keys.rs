use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::filtering::QuickFilter;
use crate::interactive::app::{Focus, Popup};
use crate::models::VoteKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    ScrollUp,
    ScrollDown,
    Open,
    Back,
    Forward,

    // Search / filters
    StartSearch,
    QuickFilter(QuickFilter),
    ToggleFilters,
    NextFilter,
    PrevFilter,
    CycleFilter(isize),
    ClearFilter,

    // Issue actions
    VoteIssue(VoteKind),
    VoteComment(VoteKind),
    VerifyComment,
    AddComment,
    MoveToCcr,
    DeleteIssue,
    NewIssue,
    Refresh,

    // Text input
    Confirm,
    Cancel,
    TypeChar(char),
    Backspace,
    NextField,
    PrevField,

    // General
    Help,
    Quit,
    DismissNotification,

    None,
}

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    pub popup: Option<&'a Popup>,
    pub detail: bool,
    pub focus: Focus,
    pub search_editing: bool,
}

pub fn map_key(key: KeyEvent, ctx: KeyContext) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    if let Some(popup) = ctx.popup {
        return map_popup_key(key, popup);
    }
    if ctx.search_editing {
        return map_search_key(key);
    }
    if ctx.detail {
        return map_detail_key(key);
    }
    match ctx.focus {
        Focus::List => map_list_key(key),
        Focus::Filters => map_filter_key(key),
    }
}

fn map_list_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::Open,
        KeyCode::Tab => Action::ToggleFilters,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('1') => Action::QuickFilter(QuickFilter::All),
        KeyCode::Char('2') => Action::QuickFilter(QuickFilter::Open),
        KeyCode::Char('3') => Action::QuickFilter(QuickFilter::Resolved),
        KeyCode::Char('4') => Action::QuickFilter(QuickFilter::Ccr),
        KeyCode::Char('u') => Action::VoteIssue(VoteKind::Upvote),
        KeyCode::Char('d') => Action::VoteIssue(VoteKind::Downvote),
        KeyCode::Char('D') => Action::DeleteIssue,
        KeyCode::Char('n') => Action::NewIssue,
        KeyCode::Char('L') => Action::Forward,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('x') => Action::DismissNotification,
        KeyCode::Char('?') => Action::Help,
        _ => Action::None,
    }
}

fn map_filter_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc | KeyCode::Tab => Action::ToggleFilters,
        KeyCode::Char('h') | KeyCode::Left => Action::PrevFilter,
        KeyCode::Char('l') | KeyCode::Right => Action::NextFilter,
        KeyCode::Char('j') | KeyCode::Down => Action::CycleFilter(1),
        KeyCode::Char('k') | KeyCode::Up => Action::CycleFilter(-1),
        KeyCode::Enter => Action::CycleFilter(1),
        KeyCode::Backspace | KeyCode::Delete => Action::ClearFilter,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('?') => Action::Help,
        _ => Action::None,
    }
}

fn map_search_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::TypeChar(c),
        _ => Action::None,
    }
}

fn map_detail_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc | KeyCode::Char('H') | KeyCode::Backspace => Action::Back,
        KeyCode::Char('L') => Action::Forward,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::PageDown => Action::ScrollDown,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::Char('u') => Action::VoteIssue(VoteKind::Upvote),
        KeyCode::Char('d') => Action::VoteIssue(VoteKind::Downvote),
        KeyCode::Char('+') => Action::VoteComment(VoteKind::Upvote),
        KeyCode::Char('-') => Action::VoteComment(VoteKind::Downvote),
        KeyCode::Char('v') => Action::VerifyComment,
        KeyCode::Char('c') => Action::AddComment,
        KeyCode::Char('m') => Action::MoveToCcr,
        KeyCode::Char('D') => Action::DeleteIssue,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('x') => Action::DismissNotification,
        KeyCode::Char('?') => Action::Help,
        _ => Action::None,
    }
}

fn map_popup_key(key: KeyEvent, popup: &Popup) -> Action {
    match popup {
        Popup::Form(_) => match key.code {
            KeyCode::Esc => Action::Cancel,
            KeyCode::Tab | KeyCode::Down => Action::NextField,
            KeyCode::BackTab | KeyCode::Up => Action::PrevField,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char(c) => Action::TypeChar(c),
            _ => Action::None,
        },
        Popup::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::Cancel,
            _ => Action::None,
        },
        Popup::Confirm(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Action::Confirm,
            KeyCode::Char('n') | KeyCode::Esc => Action::Cancel,
            _ => Action::None,
        },
    }
}
