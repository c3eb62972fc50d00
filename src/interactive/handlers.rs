use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

use super::app::{Focus, InteractiveApp, Popup};
use super::event::{Event, EventHandler};
use super::keys::{map_key, Action, KeyContext};
use crate::cli_context::CliContext;
use crate::error::{ErrorContext, TalkResult};
use crate::logging::{log_debug, log_error, log_info};
use crate::search::{SearchDispatcher, SearchOutcome};

type TalkTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run_interactive_mode(initial_path: &str) -> TalkResult<()> {
    log_info(&format!("Starting interactive mode at {}", initial_path));

    let mut context = CliContext::load().context("Failed to load CLI context")?;
    let client = context.client()?;
    let user = context.session().current_user.clone();
    let reporter = context.config().reporter_name.clone();
    let (dispatcher, outcomes) = SearchDispatcher::new(client.clone(), context.config().debounce());

    let mut app = InteractiveApp::new(client, dispatcher, initial_path, user, reporter);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    log_debug("Terminal initialized");

    let result = event_loop(&mut terminal, &mut app, outcomes).await;
    if let Err(e) = &result {
        log_error(&format!("Interactive mode failed: {}", e));
    }

    log_info("Exiting interactive mode");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut TalkTerminal,
    app: &mut InteractiveApp,
    mut outcomes: UnboundedReceiver<SearchOutcome>,
) -> TalkResult<()> {
    let mut events = EventHandler::new(250);

    terminal.draw(|f| super::ui::draw(f, app))?;
    app.start().await;

    while !app.should_quit {
        terminal.draw(|f| super::ui::draw(f, app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Event::Key(key)) => {
                    let action = map_key(key, KeyContext {
                        popup: app.popup.as_ref(),
                        detail: app.view.detail_visible(),
                        focus: app.focus,
                        search_editing: app.search_editing,
                    });
                    if action != Action::None {
                        log_debug(&format!("Key {:?} -> {:?}", key.code, action));
                    }
                    handle_action(app, action).await;
                }
                Some(Event::Resize) => {}
                Some(Event::Tick) => app.expire_notifications(),
                None => break,
            },
            Some(outcome) = outcomes.recv() => app.handle_search_outcome(outcome),
        }
    }

    Ok(())
}

pub async fn handle_action(app: &mut InteractiveApp, action: Action) {
    if app.popup.is_some() {
        handle_popup_action(app, action).await;
        return;
    }
    if app.search_editing {
        match action {
            Action::TypeChar(c) => app.type_search_char(c),
            Action::Backspace => app.search_backspace(),
            Action::Confirm => app.submit_search(),
            Action::Cancel => app.search_editing = false,
            _ => {}
        }
        return;
    }

    let detail = app.view.detail_visible();
    match action {
        Action::Quit => app.should_quit = true,
        Action::Help => app.popup = Some(Popup::Help),
        Action::DismissNotification => app.dismiss_notification(),
        Action::Refresh => app.refresh().await,

        Action::MoveDown if detail => app.select_next_comment(),
        Action::MoveUp if detail => app.select_previous_comment(),
        Action::MoveDown => app.view.select_next(),
        Action::MoveUp => app.view.select_previous(),
        Action::ScrollDown => app.detail_scroll = app.detail_scroll.saturating_add(5),
        Action::ScrollUp => app.detail_scroll = app.detail_scroll.saturating_sub(5),
        Action::Open => app.open_selected().await,
        Action::Back => app.go_back().await,
        Action::Forward => app.go_forward().await,

        Action::StartSearch => {
            app.focus = Focus::List;
            app.search_editing = true;
        }
        Action::QuickFilter(quick) => app.apply_quick_filter(quick),
        Action::ToggleFilters => {
            app.focus = match app.focus {
                Focus::List => Focus::Filters,
                Focus::Filters => Focus::List,
            }
        }
        Action::NextFilter => app.filter_field = app.filter_field.next(),
        Action::PrevFilter => app.filter_field = app.filter_field.previous(),
        Action::CycleFilter(step) => app.cycle_filter(step).await,
        Action::ClearFilter => app.clear_filter().await,

        Action::VoteIssue(vote) => app.vote_issue(vote).await,
        Action::VoteComment(vote) => app.vote_comment(vote).await,
        Action::VerifyComment => app.verify_comment().await,
        Action::AddComment => app.open_comment_form(),
        Action::MoveToCcr => app.open_ccr_form(),
        Action::DeleteIssue => app.request_delete(),
        Action::NewIssue => app.open_create_form(),
        _ => {}
    }
}

async fn handle_popup_action(app: &mut InteractiveApp, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::Cancel => app.popup = None,
        Action::Confirm => match app.popup.clone() {
            Some(Popup::Confirm(confirm)) => app.confirm(confirm).await,
            Some(Popup::Form(_)) => app.submit_form().await,
            _ => {}
        },
        _ => {
            if let Some(Popup::Form(form)) = &mut app.popup {
                match action {
                    Action::TypeChar(c) => form.type_char(c),
                    Action::Backspace => form.backspace(),
                    Action::NextField => form.next_field(),
                    Action::PrevField => form.previous_field(),
                    _ => {}
                }
            }
        }
    }
}
