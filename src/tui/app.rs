use std::io;
use std::time::Duration;

use crossterm::clipboard::CopyToClipboard;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Notification, NotificationLevel};
use super::layout::{centered_rect, AppLayout};
use super::services::Services;
use super::sidebar::{section_key, TrayState};
use super::theme;
use super::views::campaign_detail::CampaignDetailState;
use super::views::campaign_form::CampaignFormState;
use super::views::campaigns::CampaignsState;
use super::views::chat::ChatState;
use super::views::home::HomeState;
use super::views::post::PostState;
use super::views::product_form::ProductFormState;
use super::views::products::ProductsState;
use super::views::ViewResult;
use crate::core::routes::{Route, Section};

/// Most notifications shown at once.
const MAX_NOTIFICATIONS: usize = 3;

/// The view for the current route. Built fresh on every navigation.
enum ActiveView {
    Home(HomeState),
    Products(ProductsState),
    ProductForm(ProductFormState),
    Campaigns(CampaignsState),
    CampaignDetail(CampaignDetailState),
    CampaignForm(CampaignFormState),
    Chat(ChatState),
    Post(PostState),
}

impl ActiveView {
    fn for_route(route: &Route) -> Self {
        match route.clone() {
            Route::Home => ActiveView::Home(HomeState::new()),
            Route::Products => ActiveView::Products(ProductsState::new()),
            Route::ProductForm => ActiveView::ProductForm(ProductFormState::new()),
            Route::Campaigns => ActiveView::Campaigns(CampaignsState::new()),
            Route::CampaignDetail(id) => ActiveView::CampaignDetail(CampaignDetailState::new(id)),
            Route::CampaignCreate(product_id) => {
                ActiveView::CampaignForm(CampaignFormState::new(product_id))
            }
            Route::Chat(product_id) => ActiveView::Chat(ChatState::new(product_id)),
            Route::Post {
                campaign_id,
                post_id,
            } => ActiveView::Post(PostState::new(campaign_id, post_id)),
        }
    }

    fn load(&mut self, services: &Services) {
        match self {
            ActiveView::Home(v) => v.load(services),
            ActiveView::Products(v) => v.load(services),
            ActiveView::Campaigns(v) => v.load(services),
            ActiveView::CampaignDetail(v) => v.load(services),
            ActiveView::Chat(v) => v.load(services),
            ActiveView::Post(v) => v.load(services),
            ActiveView::ProductForm(_) | ActiveView::CampaignForm(_) => {}
        }
    }

    /// Drain task results; some views navigate when their work completes.
    fn poll(&mut self, services: &Services) -> Option<Action> {
        match self {
            ActiveView::Home(v) => v.poll(),
            ActiveView::Products(v) => v.poll(),
            ActiveView::Campaigns(v) => v.poll(),
            ActiveView::CampaignDetail(v) => v.poll(),
            ActiveView::Post(v) => v.poll(),
            ActiveView::ProductForm(v) => return v.poll(services),
            ActiveView::CampaignForm(v) => return v.poll(services),
            ActiveView::Chat(v) => return v.poll(),
        }
        None
    }

    fn handle_input(&mut self, event: &Event, services: &Services) -> Option<ViewResult> {
        match self {
            ActiveView::Home(v) => v.handle_input(event, services),
            ActiveView::Products(v) => v.handle_input(event, services),
            ActiveView::ProductForm(v) => v.handle_input(event, services),
            ActiveView::Campaigns(v) => v.handle_input(event, services),
            ActiveView::CampaignDetail(v) => v.handle_input(event, services),
            ActiveView::CampaignForm(v) => v.handle_input(event, services),
            ActiveView::Chat(v) => v.handle_input(event, services),
            ActiveView::Post(v) => v.handle_input(event, services),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, services: &Services) {
        match self {
            ActiveView::Home(v) => v.render(frame, area, services),
            ActiveView::Products(v) => v.render(frame, area, services),
            ActiveView::ProductForm(v) => v.render(frame, area),
            ActiveView::Campaigns(v) => v.render(frame, area, services),
            ActiveView::CampaignDetail(v) => v.render(frame, area),
            ActiveView::CampaignForm(v) => v.render(frame, area),
            ActiveView::Chat(v) => v.render(frame, area),
            ActiveView::Post(v) => v.render(frame, area),
        }
    }
}

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    route: Route,
    /// Routes to return to with Esc.
    history: Vec<Route>,
    view: ActiveView,
    tray: TrayState,
    notifications: Vec<Notification>,
    notification_counter: u64,
    show_help: bool,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
        start: Route,
    ) -> Self {
        Self {
            running: true,
            view: ActiveView::for_route(&start),
            route: start,
            history: Vec::new(),
            tray: TrayState::new(),
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            services,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.view.load(&self.services);

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                if is_force_quit(&crossterm_event) {
                    self.running = false;
                    return;
                }

                if self.show_help {
                    if let Some(action) = map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                match self.view.handle_input(&crossterm_event, &self.services) {
                    Some(ViewResult::Consumed) => {}
                    Some(ViewResult::Action(action)) => self.handle_action(action),
                    None => {
                        if let Some(action) = map_input_to_action(&crossterm_event) {
                            self.handle_action(action);
                        }
                    }
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => self.running = false,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(route) => self.open(route, true),
            Action::Replace(route) => self.open(route, false),
            Action::Back => self.back(),
            Action::Copy { label, text } => match copy_to_clipboard(&text) {
                Ok(()) => {
                    log::debug!("Copied {label} ({} chars)", text.chars().count());
                }
                Err(e) => {
                    log::warn!("Clipboard copy failed: {e}");
                    self.push_notification(
                        format!("Could not copy {label}"),
                        NotificationLevel::Error,
                    );
                }
            },
            Action::ToggleSidebar => self.tray.toggle_collapse(),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    /// Switch to `route`. With `remember`, Esc returns to the current route.
    fn open(&mut self, route: Route, remember: bool) {
        if route == self.route {
            return;
        }
        log::debug!("Navigating {} -> {}", self.route, route);
        let previous = std::mem::replace(&mut self.route, route);
        if remember {
            self.history.push(previous);
        }
        self.view = ActiveView::for_route(&self.route);
        self.view.load(&self.services);
    }

    fn back(&mut self) {
        let target = match self.history.pop() {
            Some(route) => route,
            None if self.route != Route::Home => Route::Home,
            None => return,
        };
        self.route = target;
        self.view = ActiveView::for_route(&self.route);
        self.view.load(&self.services);
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        let mut notification = Notification::new(message, level);
        notification.id = self.notification_counter;
        self.notifications.push(notification);

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, poll view tasks.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        if let Some(action) = self.view.poll(&self.services) {
            self.handle_action(action);
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (layout, visibility) = AppLayout::compute(area, self.tray.user_collapsed);

        self.render_header(frame, layout.header);
        if let Some(tray_area) = layout.tray {
            self.tray
                .render(frame, tray_area, visibility, self.route.section());
        }
        self.view.render(frame, layout.main, &self.services);
        self.render_status_bar(frame, layout.status);

        self.render_notifications(frame, area);
        if self.show_help {
            render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(" LaunchDeck ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(self.route.title(), theme::heading()),
            Span::raw("  "),
            Span::styled(self.route.path(), theme::dim()),
        ]);
        frame.render_widget(
            Paragraph::new(header).style(Style::default().bg(theme::BG_SURFACE)),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!(" v{} ", crate::VERSION),
            theme::muted(),
        )];
        for section in Section::ALL {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(section_key(section).to_string(), theme::key_hint()));
            spans.push(Span::raw(format!(":{}", section.label().to_lowercase())));
        }
        spans.extend([
            Span::raw(" │ "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(":back "),
            Span::styled("Ctrl+B", theme::key_hint()),
            Span::raw(":tray "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }
}

/// Write `text` to the system clipboard with an OSC 52 escape sequence.
fn copy_to_clipboard(text: &str) -> io::Result<()> {
    execute!(io::stdout(), CopyToClipboard::to_clipboard_from(text))
}

fn is_force_quit(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}

fn map_help_input(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };
    match code {
        KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
        _ => None,
    }
}

/// Global keybindings, used when the view leaves a key unconsumed.
fn map_input_to_action(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    match (*modifiers, *code) {
        (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleSidebar),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') => Some(Action::ShowHelp),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char(c) => Section::ALL
                .into_iter()
                .find(|s| section_key(*s) == c)
                .map(|s| Action::Navigate(s.route())),
            _ => None,
        },
        _ => None,
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let keybindings = [
        ("Global:", ""),
        ("1 / 2 / 3", "Home / Campaigns / Products"),
        ("Esc", "Back"),
        ("Ctrl+B", "Collapse or expand the tray"),
        ("?", "Toggle this help"),
        ("q / Ctrl+C", "Quit"),
        ("", ""),
        ("Lists:", ""),
        ("j/k", "Move selection"),
        ("Enter", "Open"),
        ("/", "Search by name"),
        ("d", "Delete (confirm with y)"),
        ("r", "Refresh"),
        ("", ""),
        ("Products:", ""),
        ("a", "Add product"),
        ("c", "Create campaign for product"),
        ("", ""),
        ("Forms:", ""),
        ("Enter", "Next step / submit"),
        ("Shift+Enter", "New line in long answers"),
        ("Space", "Toggle option"),
        ("Esc", "Previous step"),
        ("", ""),
        ("Chat:", ""),
        ("Enter", "Send message"),
        ("Ctrl+S", "Skip to campaign planning"),
        ("PgUp/PgDn", "Scroll transcript"),
        ("", ""),
        ("Campaign / Post:", ""),
        ("e", "Edit name and description"),
        ("t / b", "Copy post title / body"),
    ];

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(" Keybindings", theme::title())),
        Line::raw(""),
    ];
    for (key, desc) in keybindings {
        if key.is_empty() {
            lines.push(Line::raw(""));
        } else if desc.is_empty() {
            lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
        } else {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{key:<16}"),
                    Style::default()
                        .fg(theme::PRIMARY_LIGHT)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(desc),
            ]));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("  Press "),
        Span::styled("?", theme::highlight()),
        Span::raw(" or "),
        Span::styled("Esc", theme::highlight()),
        Span::raw(" to close"),
    ]));
    lines
}

fn render_help_modal(frame: &mut Frame, area: Rect) {
    let modal = centered_rect(60, 80, area);
    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT));

    frame.render_widget(Clear, modal);
    frame.render_widget(Paragraph::new(help_lines()).block(block), modal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::DisplayConfig;
    use crate::core::api::MockLaunchApi;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app(start: Route) -> AppState {
        let mut api = MockLaunchApi::new();
        api.expect_get_products().returning(|| Ok(vec![]));
        api.expect_get_campaigns().returning(|| Ok(vec![]));
        let (tx, rx) = mpsc::unbounded_channel();
        let services = Services::with_api(Arc::new(api), DisplayConfig::default(), tx);
        AppState::new(rx, services, start)
    }

    #[tokio::test]
    async fn test_navigate_and_back() {
        let mut app = app(Route::Home);
        app.handle_action(Action::Navigate(Route::Products));
        assert_eq!(app.route(), &Route::Products);
        app.handle_action(Action::Back);
        assert_eq!(app.route(), &Route::Home);
    }

    #[tokio::test]
    async fn test_replace_skips_history() {
        let mut app = app(Route::Home);
        app.handle_action(Action::Navigate(Route::ProductForm));
        app.handle_action(Action::Replace(Route::Chat(None)));
        app.handle_action(Action::Back);
        assert_eq!(app.route(), &Route::Home);
    }

    #[tokio::test]
    async fn test_back_without_history_goes_home() {
        let mut app = app(Route::Chat(None));
        app.handle_action(Action::Back);
        assert_eq!(app.route(), &Route::Home);
        app.handle_action(Action::Back);
        assert_eq!(app.route(), &Route::Home);
    }

    #[tokio::test]
    async fn test_section_keys_navigate() {
        let mut app = app(Route::Home);
        app.handle_event(AppEvent::Input(key(KeyCode::Char('2'))));
        assert_eq!(app.route(), &Route::Campaigns);
        assert_eq!(app.route().section(), Section::Campaigns);
        app.handle_event(AppEvent::Input(key(KeyCode::Char('3'))));
        assert_eq!(app.route(), &Route::Products);
    }

    #[test]
    fn test_form_swallows_quit_key() {
        let mut app = app(Route::ProductForm);
        app.handle_event(AppEvent::Input(key(KeyCode::Char('q'))));
        assert!(app.running);
        app.handle_event(AppEvent::Input(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ))));
        assert!(!app.running);
    }

    #[test]
    fn test_help_modal_captures_input() {
        let mut app = app(Route::ProductForm);
        app.handle_action(Action::ShowHelp);
        app.handle_event(AppEvent::Input(key(KeyCode::Char('x'))));
        assert!(app.show_help);
        app.handle_event(AppEvent::Input(key(KeyCode::Esc)));
        assert!(!app.show_help);
        assert_eq!(app.route(), &Route::ProductForm);
    }

    #[test]
    fn test_notifications_dedup_and_cap() {
        let mut app = app(Route::ProductForm);
        app.push_notification("same".into(), NotificationLevel::Info);
        app.push_notification("same".into(), NotificationLevel::Info);
        assert_eq!(app.notifications.len(), 1);
        for i in 0..5 {
            app.push_notification(format!("n{i}"), NotificationLevel::Info);
        }
        assert_eq!(app.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(app.notifications.last().unwrap().message, "n4");
    }

    #[test]
    fn test_global_key_mapping() {
        assert_eq!(map_input_to_action(&key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_input_to_action(&key(KeyCode::Esc)), Some(Action::Back));
        assert_eq!(
            map_input_to_action(&key(KeyCode::Char('1'))),
            Some(Action::Navigate(Route::Home))
        );
        assert_eq!(
            map_input_to_action(&Event::Key(KeyEvent::new(
                KeyCode::Char('b'),
                KeyModifiers::CONTROL
            ))),
            Some(Action::ToggleSidebar)
        );
        assert_eq!(map_input_to_action(&key(KeyCode::Char('9'))), None);
    }

    #[test]
    fn test_help_lists_chat_skip() {
        let text: String = help_lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Ctrl+S"));
    }
}
