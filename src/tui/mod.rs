//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! key ─▶ translate() ─▶ Action ─▶ update() ─▶ Effect::Dispatch(commands)
//!                                                 │
//!        rx.try_recv() ◀── Action ◀── backend ◀───┘  (one tokio task each)
//! ```
//!
//! ## Redraw Strategy
//!
//! Frames are only drawn after an input event or a request result. While the
//! visible screen is loading the poll timeout drops to ~100ms so results land
//! promptly; when idle it sleeps up to 500ms.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::client::ApiClient;
use crate::api::dispatch::{Backend, HttpBackend};
use crate::core::action::{Action, Effect, FormInput, update};
use crate::core::command::Command;
use crate::core::config::ResolvedConfig;
use crate::core::deep_link::DeepLink;
use crate::core::entity::FieldKind;
use crate::core::screen::{FormScreen, ScreenKind};
use crate::core::session::{FileTokenStore, MemoryTokenStore, Session, TokenStore, session_path};
use crate::core::state::{AlertKind, App};
use crate::tui::component::EventHandler;
use crate::tui::components::{ChoicePickerState, PickerEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    /// Choice picker overlay (None = hidden)
    pub picker: Option<ChoicePickerState>,
}

/// What a key press turns into.
pub enum KeyOutcome {
    Dispatch(Action),
    OpenPicker(ChoicePickerState),
    Ignore,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // The keyboard protocol is ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Maps a terminal event to an intent, given what is on screen.
///
/// Alerts take every key first. Picker routing happens in the event loop
/// before this is called.
pub fn translate(app: &App, event: &TuiEvent) -> KeyOutcome {
    use KeyOutcome::{Dispatch, Ignore};

    if matches!(event, TuiEvent::ForceQuit) {
        return Dispatch(Action::Quit);
    }

    if let Some(alert) = &app.alert {
        return match (event, &alert.kind) {
            (TuiEvent::Submit, AlertKind::ConfirmDelete { .. }) => Dispatch(Action::ConfirmAlert),
            (TuiEvent::Submit | TuiEvent::Escape, _) => Dispatch(Action::DismissAlert),
            _ => Ignore,
        };
    }

    if let TuiEvent::Ctrl(c) = event {
        return match c {
            't' => Dispatch(Action::NextTab),
            'l' => Dispatch(Action::ToggleLanguage),
            'o' => Dispatch(Action::Logout),
            'f' => Dispatch(Action::OpenForgotPassword),
            'a' => Dispatch(Action::OpenActivation),
            's' => Dispatch(Action::Submit),
            _ => Ignore,
        };
    }

    let Some(screen) = app.nav.current() else {
        return Ignore;
    };
    if let ScreenKind::Form(form) = &screen.kind {
        return form_key(form, event);
    }

    let is_list = matches!(screen.kind, ScreenKind::List(_));
    match event {
        TuiEvent::CursorUp => Dispatch(Action::CursorUp),
        TuiEvent::CursorDown => Dispatch(Action::CursorDown),
        TuiEvent::Submit => Dispatch(Action::Open),
        TuiEvent::Escape => Dispatch(Action::Back),
        TuiEvent::InputChar('e') => Dispatch(Action::Edit),
        TuiEvent::InputChar('r') => Dispatch(Action::Refresh),
        TuiEvent::InputChar('n') if is_list => Dispatch(Action::New),
        TuiEvent::InputChar('d') if is_list => Dispatch(Action::RequestDelete),
        TuiEvent::InputChar(c) => match c.to_digit(10) {
            Some(digit @ 1..=3) => Dispatch(Action::SelectTab(digit as usize - 1)),
            _ => Ignore,
        },
        _ => Ignore,
    }
}

fn form_key(screen: &FormScreen, event: &TuiEvent) -> KeyOutcome {
    use KeyOutcome::{Dispatch, Ignore};

    let focused = screen.form.focused_spec();
    match event {
        TuiEvent::InputChar(' ') if focused.is_some_and(|spec| spec.kind == FieldKind::Flag) => {
            Dispatch(Action::Input(FormInput::Toggle))
        }
        TuiEvent::InputChar(c) => Dispatch(Action::Input(FormInput::Char(*c))),
        TuiEvent::Paste(text) => Dispatch(Action::Input(FormInput::Paste(text.clone()))),
        TuiEvent::Backspace => Dispatch(Action::Input(FormInput::Backspace)),
        TuiEvent::CursorUp => Dispatch(Action::CursorUp),
        TuiEvent::CursorDown => Dispatch(Action::CursorDown),
        TuiEvent::FocusNext => Dispatch(Action::Input(FormInput::Next)),
        TuiEvent::FocusPrev => Dispatch(Action::Input(FormInput::Prev)),
        TuiEvent::Escape => Dispatch(Action::Back),
        TuiEvent::Submit => match focused {
            Some(spec) if matches!(spec.kind, FieldKind::Choice(_)) => {
                if screen.submitting {
                    return Ignore;
                }
                let choices = screen
                    .form
                    .choices
                    .get(&spec.field)
                    .cloned()
                    .unwrap_or_default();
                KeyOutcome::OpenPicker(ChoicePickerState::new(
                    spec.field,
                    choices,
                    screen.form.choice(spec.field),
                ))
            }
            _ => Dispatch(Action::Submit),
        },
        _ => Ignore,
    }
}

fn build_backend(config: &ResolvedConfig) -> std::io::Result<(Arc<Session>, Arc<dyn Backend>)> {
    let store: Box<dyn TokenStore> = match session_path() {
        Some(path) => Box::new(FileTokenStore::new(path)),
        None => {
            warn!("No home directory, session will not survive a restart");
            Box::new(MemoryTokenStore::default())
        }
    };
    let session = Arc::new(Session::restore(store));
    let client = ApiClient::new(&config.base_url, config.timeout, session.clone()).map_err(|e| {
        warn!("Failed to build API client: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    info!("Using API at {}", client.base_url());
    Ok((session, Arc::new(HttpBackend::new(client))))
}

fn spawn_command(backend: &Arc<dyn Backend>, command: Command, tx: &mpsc::Sender<Action>) {
    debug!("Spawning {}", command.name());
    let backend = backend.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        if let Some(action) = backend.execute(command).await
            && tx.send(action).is_err()
        {
            warn!("Failed to send request result: receiver dropped");
        }
    });
}

/// Runs an effect. Returns true when the app should quit.
fn apply(effect: Effect, backend: &Arc<dyn Backend>, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Dispatch(commands) => {
            for command in commands {
                spawn_command(backend, command, tx);
            }
            false
        }
    }
}

pub fn run(config: ResolvedConfig, link: Option<DeepLink>) -> std::io::Result<()> {
    let (session, backend) = build_backend(&config)?;
    let mut app = App::new(config.language);
    let mut tui = TuiState::default();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // A link decides the first screen; otherwise a stored token is checked
    let startup = match link {
        Some(link) => update(&mut app, Action::OpenLink(link)),
        None if session.is_active() => {
            info!("Restoring stored session");
            Effect::Dispatch(vec![Command::FetchSelf])
        }
        None => Effect::None,
    };
    apply(startup, &backend, &tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        // A picker belongs to the form it was opened on
        if tui.picker.is_some()
            && !matches!(app.nav.current().map(|s| &s.kind), Some(ScreenKind::Form(_)))
        {
            tui.picker = None;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = apply(update(&mut app, Action::Quit), &backend, &tx);
                break;
            }

            // An open picker takes every key unless an alert is up
            if app.alert.is_none()
                && let Some(picker) = tui.picker.as_mut()
            {
                match picker.handle_event(&event) {
                    Some(PickerEvent::Pick(field, id)) => {
                        tui.picker = None;
                        let effect = update(&mut app, Action::Input(FormInput::Pick(field, id)));
                        should_quit |= apply(effect, &backend, &tx);
                    }
                    Some(PickerEvent::Dismiss) => tui.picker = None,
                    None => {}
                }
                continue;
            }

            match translate(&app, &event) {
                KeyOutcome::Dispatch(action) => {
                    let effect = update(&mut app, action);
                    should_quit |= apply(effect, &backend, &tx);
                }
                KeyOutcome::OpenPicker(picker) => tui.picker = Some(picker),
                KeyOutcome::Ignore => {}
            }
            if should_quit {
                break;
            }
        }

        // Handle background task actions (request results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            should_quit |= apply(effect, &backend, &tx);
        }
    }

    ratatui::restore();
    info!("orgdesk exiting");
    Ok(())
}
