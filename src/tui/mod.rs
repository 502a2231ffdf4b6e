// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks)
// - Rendering the UI
// - Receiving outcomes and identity changes from the account service

pub mod app;
pub mod components;
pub mod layout;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::events::Outcome;
use crate::identity::UserIdentity;
use crate::logging::LogBuffer;
use crate::loyalty::LoyaltyAccount;
use crate::service::AccountHandle;
use anyhow::{Context, Result};
use app::{App, Route};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Position, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and cleans up when done.
/// App state is single-threaded, so this must be awaited on the caller's
/// task rather than spawned.
pub async fn run_tui(
    handle: AccountHandle,
    account: LoyaltyAccount,
    log_buffer: LogBuffer,
    config: &Config,
) -> Result<()> {
    let AccountHandle {
        commands,
        mut outcomes,
        mut identity,
    } = handle;

    let current = identity.borrow_and_update().clone();
    let mut app = App::new(
        current,
        account,
        log_buffer,
        commands,
        config.toast_duration,
    );

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut outcomes, &mut identity).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on terminal input, a redraw tick, completed operations and identity
/// changes, responding to whichever arrives first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcomes: &mut mpsc::Receiver<Outcome>,
    identity: &mut watch::Receiver<Option<UserIdentity>>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick: expire toasts and redraw
            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(outcome) = outcomes.recv() => {
                app.on_outcome(outcome);
            }

            changed = identity.changed() => {
                match changed {
                    Ok(()) => {
                        let next = identity.borrow_and_update().clone();
                        app.on_identity_changed(next);
                    }
                    Err(_) => {
                        tracing::error!("Account service stopped");
                        app.should_quit = true;
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Quit → Menu → Form editing → Global
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C always quits, even mid-edit
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    if handle_menu_keys(app, &key_event) {
        return;
    }

    if handle_editing_keys(app, &key_event) {
        return;
    }

    handle_global_keys(app, &key_event);
}

/// Open menu captures all input - returns true if absorbed
fn handle_menu_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    if !app.dropdown.is_open() {
        return false;
    }

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => app.dropdown.highlight_prev(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.dropdown.highlight_next(),
        KeyCode::Enter => {
            let item = app.dropdown.highlighted_item();
            app.select_menu_item(item);
        }
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::F(2) => app.dropdown.close(),
        _ => {}
    }
    true
}

/// Text input while the profile form is editable - returns true if handled
fn handle_editing_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    if app.route() != Route::EditProfile || !app.profile.is_editing() {
        return false;
    }

    match key_event.code {
        KeyCode::Tab | KeyCode::BackTab => app.profile.focus_next(),
        KeyCode::Enter => app.submit_profile(),
        KeyCode::Backspace => {
            app.profile.pop_char();
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.profile.push_char(c);
        }
        _ => return false,
    }
    true
}

/// Global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('m') | KeyCode::F(2) => app.dropdown.toggle(),
        KeyCode::Char('e') => {
            if app.route() == Route::EditProfile {
                app.profile.enter_edit_mode();
            }
        }
        KeyCode::Char('p') => app.router.navigate(Route::EditProfile),
        KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace => {
            app.router.back();
        }
        _ => return false,
    }
    true
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
        app.handle_pointer_down(Position::new(mouse_event.column, mouse_event.row));
    }
}
