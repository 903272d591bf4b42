//! Chat view: the enrichment conversation for one product.
//!
//! The transcript is seeded from the product record. Sends are optimistic:
//! the user's message shows immediately as pending and is confirmed or
//! marked failed when the response for its correlation id arrives. Ctrl+S
//! skips the chat and opens campaign creation for the product.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::{blank, hint_line, key_press, text_line, ViewResult};
use crate::core::api::Result;
use crate::core::chat::{skip, ChatSession, DeliveryStatus, SkipOutcome, TranscriptEntry};
use crate::core::models::{ChatReply, Product, Sender};
use crate::core::routes::Route;
use crate::core::text::wrap;
use crate::tui::events::{Action, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::InputBuffer;

pub const MISSING_PRODUCT_MESSAGE: &str = "Product ID not found";
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load product";

enum ChatMsg {
    Loaded(Result<Product>),
    Replied {
        correlation: Uuid,
        result: Result<ChatReply>,
    },
    Skipped(SkipOutcome),
}

pub struct ChatState {
    product_id: Option<String>,
    product: Option<Product>,
    session: Option<ChatSession>,
    input: InputBuffer,
    loading: bool,
    skipping: bool,
    error: Option<String>,
    /// Lines scrolled up from the bottom of the transcript.
    scroll_back: u16,
    msg_tx: mpsc::UnboundedSender<ChatMsg>,
    msg_rx: mpsc::UnboundedReceiver<ChatMsg>,
}

impl ChatState {
    pub fn new(product_id: Option<String>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            product_id: product_id.filter(|id| !id.trim().is_empty()),
            product: None,
            session: None,
            input: InputBuffer::new(),
            loading: false,
            skipping: false,
            error: None,
            scroll_back: 0,
            msg_tx,
            msg_rx,
        }
    }

    pub fn load(&mut self, services: &Services) {
        let Some(product_id) = self.product_id.clone() else {
            self.error = Some(MISSING_PRODUCT_MESSAGE.to_string());
            return;
        };
        if self.loading {
            return;
        }
        self.loading = true;
        let api = services.api.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(ChatMsg::Loaded(api.get_product(&product_id).await));
        });
    }

    /// Drain task results. A successful skip navigates to campaign creation.
    pub fn poll(&mut self) -> Option<Action> {
        let mut action = None;
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(a) = self.apply(msg) {
                action = Some(a);
            }
        }
        action
    }

    fn apply(&mut self, msg: ChatMsg) -> Option<Action> {
        match msg {
            ChatMsg::Loaded(Ok(product)) => {
                self.loading = false;
                self.error = None;
                self.session = Some(ChatSession::new(product.id.clone(), product.chat.clone()));
                self.product = Some(product);
                None
            }
            ChatMsg::Loaded(Err(e)) => {
                log::error!("Failed to load product for chat: {e}");
                self.loading = false;
                self.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                None
            }
            ChatMsg::Replied {
                correlation,
                result,
            } => {
                let session = self.session.as_mut()?;
                match result {
                    Ok(reply) => {
                        session.complete_send(correlation, reply);
                    }
                    Err(e) => {
                        log::error!("Chat send failed: {e}");
                        session.fail_send(correlation);
                    }
                }
                self.scroll_back = 0;
                None
            }
            ChatMsg::Skipped(outcome) => {
                self.skipping = false;
                match outcome {
                    SkipOutcome::Skipped(product) => {
                        if let Some(product) = product {
                            self.product = Some(*product);
                        } else if let Some(current) = self.product.as_mut() {
                            current.mark_completed();
                        }
                        let id = self.session.as_ref().map(|s| s.product_id().to_string());
                        Some(Action::Replace(Route::CampaignCreate(id)))
                    }
                    SkipOutcome::Failed(message) => {
                        if let Some(session) = self.session.as_mut() {
                            session.push_notice(message);
                        }
                        self.scroll_back = 0;
                        None
                    }
                }
            }
        }
    }

    fn send(&mut self, services: &Services) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let text = self.input.text().trim().to_string();
        let Some(correlation) = session.begin_send(&text) else {
            return;
        };
        self.input.clear();
        self.scroll_back = 0;

        let product_id = session.product_id().to_string();
        let api = services.api.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = api.send_message(&product_id, &text).await;
            let _ = tx.send(ChatMsg::Replied {
                correlation,
                result,
            });
        });
    }

    fn skip(&mut self, services: &Services) {
        if self.skipping {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        self.skipping = true;
        let product_id = session.product_id().to_string();
        let services = services.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let outcome = skip(services.api.as_ref(), &product_id).await;
            if matches!(outcome, SkipOutcome::Skipped(_)) {
                services.notify("Chat skipped", NotificationLevel::Info);
            }
            let _ = tx.send(ChatMsg::Skipped(outcome));
        });
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> Option<ViewResult> {
        let key = key_press(event)?;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            self.skip(services);
            return Some(ViewResult::Consumed);
        }

        match key.code {
            KeyCode::Esc => return Some(ViewResult::Action(Action::Back)),
            KeyCode::PageUp => {
                self.scroll_back = self.scroll_back.saturating_add(5);
                return Some(ViewResult::Consumed);
            }
            KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(5);
                return Some(ViewResult::Consumed);
            }
            _ => {}
        }

        // Without a session there is nothing to type into; leave keys global.
        self.session.as_ref()?;

        if key.code == KeyCode::Enter && key.modifiers.is_empty() {
            self.send(services);
            return Some(ViewResult::Consumed);
        }
        if self.input.handle_key(key) {
            return Some(ViewResult::Consumed);
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .product
            .as_ref()
            .map(|p| format!("Chat · {}", p.name))
            .unwrap_or_else(|| "Chat".to_string());
        let block = theme::block_focused(&title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(session) = self.session.as_ref() else {
            let lines = match self.error.as_deref() {
                Some(error) => vec![blank(), text_line(error, theme::error())],
                None => vec![blank(), text_line("Loading chat...", theme::muted())],
            };
            frame.render_widget(Paragraph::new(lines), inner);
            return;
        };

        let [gauge_area, transcript_area, input_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Gauge::default()
                .gauge_style(theme::progress_filled())
                .label(format!("Profile {}%", session.progress()))
                .percent(u16::from(session.progress())),
            gauge_area,
        );

        // Lines come back pre-wrapped, so one line is one row.
        let lines = build_transcript(
            session.entries(),
            session.is_sending(),
            usize::from(transcript_area.width),
        );
        let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let bottom = total.saturating_sub(transcript_area.height);
        let offset = bottom.saturating_sub(self.scroll_back);
        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), transcript_area);

        let input_block = Block::default()
            .borders(Borders::TOP)
            .border_style(theme::border_default());
        let input_inner = input_block.inner(input_area);
        frame.render_widget(input_block, input_area);
        frame.render_widget(
            Paragraph::new(self.input.to_lines(!self.skipping, "Type your answer...")),
            input_inner,
        );

        let hints = if self.skipping {
            vec![("…", "skipping")]
        } else {
            vec![
                ("Enter", "send"),
                ("Ctrl+S", "skip to campaign"),
                ("PgUp/PgDn", "scroll"),
                ("Esc", "back"),
            ]
        };
        frame.render_widget(Paragraph::new(hint_line(&hints)), hint_area);
    }
}

/// Transcript lines wrapped to `width` columns.
fn build_transcript(
    entries: &[TranscriptEntry],
    sending: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let body_width = width.saturating_sub(2);
    let mut lines = Vec::new();
    for entry in entries {
        let (label_style, body_style) = match entry.message.sender {
            Sender::User => (theme::user_label(), theme::muted()),
            Sender::Assistant => (theme::assistant_label(), Style::default().fg(theme::TEXT)),
        };
        let mut header = vec![Span::styled(
            entry.message.sender.label().to_string(),
            label_style,
        )];
        match entry.status {
            DeliveryStatus::Pending => header.push(Span::styled("  sending…", theme::dim())),
            DeliveryStatus::Failed => header.push(Span::styled("  not delivered", theme::error())),
            DeliveryStatus::Confirmed => {}
        }
        lines.push(Line::from(header));
        for text in entry.message.message.lines() {
            for row in wrap(text, body_width) {
                lines.push(Line::from(Span::styled(format!("  {row}"), body_style)));
            }
        }
        lines.push(blank());
    }
    if sending {
        lines.push(Line::from(Span::styled("Assistant is typing…", theme::dim())));
    }
    lines
}
