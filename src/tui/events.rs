use crate::core::routes::Route;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for polling view tasks and notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions produced by views and global keybindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open a route, pushing the current one onto history.
    Navigate(Route),
    /// Open a route without keeping the current one in history.
    Replace(Route),
    /// Return to the previous route.
    Back,
    /// Copy text to the system clipboard via OSC 52.
    Copy { label: String, text: String },
    ToggleSidebar,
    ShowHelp,
    CloseHelp,
    Quit,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// Build a notification; the id is assigned when it is shown.
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            id: 0,
            message: message.into(),
            level,
            ttl_ticks: 60,
        }
    }
}
