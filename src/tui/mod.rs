//! # TUI Host Simulator
//!
//! The ratatui-specific layer. Plays the part of a host navigation substrate
//! so the router can be exercised by hand:
//!
//! - App keys (`1`-`9`, `s`, `x`) dispatch navigation actions through
//!   `Router::reduce`, like an app would.
//! - Host keys (`Backspace`, `h`) write to the opaque path directly, like a
//!   system back gesture or a host-initiated push would.
//!
//! Both paths are rendered side by side so the projection can be watched
//! catching up.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop sleeps up to 500ms waiting for input and only redraws after an
//! event or when the projected path reports a change.

mod component;
pub mod components;
mod event;
mod ui;

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};
use ratatui::DefaultTerminal;

use crate::core::action::{NavigationAction, Reduced, RoutedAction};
use crate::core::config::ResolvedConfig;
use crate::core::observable::Subscription;
use crate::core::page::AnyPage;
use crate::core::router::Router;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Everything the simulator can ask for. Only `Navigate` is the router's business.
#[derive(Debug, Clone)]
pub enum HostAction {
    Navigate(NavigationAction<String>),
    ToggleDuplicates,
    Quit,
}

impl RoutedAction<String> for HostAction {
    fn into_navigation(self) -> Option<NavigationAction<String>> {
        match self {
            HostAction::Navigate(action) => Some(action),
            _ => None,
        }
    }
}

/// What the event loop should do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

/// A page the host pushed on its own. The app has no idea what it is.
#[derive(Debug, Clone, PartialEq)]
pub struct HostEntry(pub usize);

/// TUI-specific presentation state (the router owns the navigation state)
pub struct TuiState {
    pub pages: Vec<String>,
    pub allow_duplicates: bool,
    pub status_message: String,
    host_pushes: usize,
    dirty: Rc<Cell<bool>>,
    _projection_watch: Subscription,
}

impl TuiState {
    pub fn new(router: &Router<String>, config: &ResolvedConfig) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let projection_watch = router.subscribe_projected(move |_| flag.set(true));

        Self {
            pages: config.pages.clone(),
            allow_duplicates: config.allow_duplicates,
            status_message: String::from("Welcome to navstack!"),
            host_pushes: 0,
            dirty,
            _projection_watch: projection_watch,
        }
    }

    /// True if the projection changed since the last call.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let router: Router<String> = Router::new();
    let mut tui = TuiState::new(&router, &config);

    let mut terminal = ratatui::init();
    info!("Host simulator started with {} page(s)", tui.pages.len());
    let result = event_loop(&mut terminal, &router, &mut tui);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    router: &Router<String>,
    tui: &mut TuiState,
) -> io::Result<()> {
    let mut needs_redraw = true;

    loop {
        if tui.take_dirty() || needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, router, &*tui))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let mut pending = poll_event_timeout(Duration::from_millis(500))?;
        needs_redraw = pending.is_some();
        while let Some(event) = pending {
            if handle_event(router, tui, event) == Effect::Quit {
                info!("Host simulator exiting with {} entries on the stack", router.len());
                return Ok(());
            }
            pending = poll_event_immediate()?;
        }
    }
}

/// Applies one input event to the router and the presentation state.
fn handle_event(router: &Router<String>, tui: &mut TuiState, event: TuiEvent) -> Effect {
    debug!("Handling {:?}", event);
    match event {
        TuiEvent::PushPage(index) => match tui.pages.get(index).cloned() {
            Some(page) => {
                let action = NavigationAction::Push {
                    page,
                    allow_duplicates: tui.allow_duplicates,
                };
                dispatch(router, tui, HostAction::Navigate(action))
            }
            None => {
                tui.status_message = format!("No page bound to {}", index + 1);
                Effect::None
            }
        },
        TuiEvent::SetAll => {
            let action = NavigationAction::set(tui.pages.iter().cloned());
            dispatch(router, tui, HostAction::Navigate(action))
        }
        TuiEvent::RemoveTwo => dispatch(router, tui, HostAction::Navigate(NavigationAction::remove_last(2))),
        TuiEvent::Restore => {
            router.restore();
            tui.status_message = String::from("Restored");
            Effect::None
        }
        TuiEvent::HostBack => {
            let popped = router.opaque().mutate(|path| path.remove_last(1));
            tui.status_message = if popped == 0 {
                String::from("Host back: nothing to pop")
            } else {
                String::from("Host back gesture")
            };
            Effect::None
        }
        TuiEvent::HostPush => {
            tui.host_pushes += 1;
            let entry = HostEntry(tui.host_pushes);
            tui.status_message = format!("Host pushed {:?}", entry);
            router.opaque().mutate(|path| path.append(AnyPage::new(entry)));
            Effect::None
        }
        TuiEvent::ToggleDuplicates => dispatch(router, tui, HostAction::ToggleDuplicates),
        TuiEvent::Quit => dispatch(router, tui, HostAction::Quit),
        TuiEvent::Resize => Effect::None,
    }
}

/// The router sees every action first; whatever it ignores is ours.
fn dispatch(router: &Router<String>, tui: &mut TuiState, action: HostAction) -> Effect {
    let summary = summarize(&action);
    match router.reduce(action.clone()) {
        Reduced::Applied => {
            tui.status_message = summary;
            Effect::None
        }
        Reduced::Duplicate => {
            tui.status_message = format!("{summary} skipped: already on the stack");
            Effect::None
        }
        Reduced::Ignored => match action {
            HostAction::ToggleDuplicates => {
                tui.allow_duplicates = !tui.allow_duplicates;
                tui.status_message = if tui.allow_duplicates {
                    String::from("Duplicates allowed")
                } else {
                    String::from("Unique pushes only")
                };
                Effect::None
            }
            HostAction::Quit => Effect::Quit,
            HostAction::Navigate(_) => Effect::None,
        },
    }
}

fn summarize(action: &HostAction) -> String {
    match action {
        HostAction::Navigate(NavigationAction::Push { page, .. }) => format!("Pushed {page}"),
        HostAction::Navigate(NavigationAction::Set { pages }) => format!("Set {} page(s)", pages.len()),
        HostAction::Navigate(NavigationAction::RemoveLast { count }) => format!("Removed up to {count}"),
        HostAction::ToggleDuplicates => String::from("Toggle duplicates"),
        HostAction::Quit => String::from("Quit"),
    }
}
