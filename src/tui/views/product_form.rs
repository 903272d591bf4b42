//! Product form: the four-question wizard that creates a product.
//!
//! Enter advances (Shift+Enter adds a line on the multi-line questions),
//! Esc goes back a question or leaves the form from the first one. A created
//! product opens its enrichment chat.

use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use super::{blank, hint_line, key_press, progress_line, text_line, ViewResult};
use crate::core::api::Result;
use crate::core::models::Product;
use crate::core::routes::Route;
use crate::core::wizard::{ProductStep, ProductWizard, StepOutcome};
use crate::tui::events::{Action, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::InputBuffer;

pub struct ProductFormState {
    wizard: ProductWizard,
    input: InputBuffer,
    result_tx: mpsc::UnboundedSender<Result<Product>>,
    result_rx: mpsc::UnboundedReceiver<Result<Product>>,
}

impl Default for ProductFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductFormState {
    pub fn new() -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        let wizard = ProductWizard::new();
        let input = buffer_for(&wizard);
        Self {
            wizard,
            input,
            result_tx,
            result_rx,
        }
    }

    /// Drain the create result. A created product opens its chat.
    pub fn poll(&mut self, services: &Services) -> Option<Action> {
        let result = self.result_rx.try_recv().ok()?;
        match result {
            Ok(product) => {
                self.wizard.submit_succeeded();
                services.notify(
                    format!("Created {}", product.name),
                    NotificationLevel::Success,
                );
                Some(Action::Replace(Route::Chat(Some(product.id))))
            }
            Err(e) => {
                log::error!("Failed to create product: {e}");
                self.wizard.submit_failed();
                None
            }
        }
    }

    fn sync_input(&mut self) {
        self.input = buffer_for(&self.wizard);
    }

    fn advance(&mut self, services: &Services) {
        match self.wizard.next() {
            StepOutcome::Advanced => self.sync_input(),
            StepOutcome::Submit(info) => {
                let api = services.api.clone();
                let tx = self.result_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(api.create_product(&info).await);
                });
            }
            StepOutcome::Blocked(_) | StepOutcome::Busy => {}
        }
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> Option<ViewResult> {
        let key = key_press(event)?;
        if self.wizard.is_submitting() {
            return Some(ViewResult::Consumed);
        }

        if self.input.handle_key(key) {
            self.wizard.set_answer(self.input.text());
            return Some(ViewResult::Consumed);
        }

        match key.code {
            KeyCode::Enter | KeyCode::Tab => {
                self.advance(services);
                Some(ViewResult::Consumed)
            }
            KeyCode::Esc | KeyCode::BackTab => {
                if self.wizard.back() {
                    self.sync_input();
                    Some(ViewResult::Consumed)
                } else if self.wizard.is_submitting() {
                    Some(ViewResult::Consumed)
                } else {
                    Some(ViewResult::Action(Action::Back))
                }
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Add Product");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let lines = build_lines(&self.wizard, &self.input);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

fn buffer_for(wizard: &ProductWizard) -> InputBuffer {
    let buffer = if wizard.step().is_multiline() {
        InputBuffer::multiline()
    } else {
        InputBuffer::new()
    };
    buffer.with_text(wizard.current_answer())
}

fn build_lines(wizard: &ProductWizard, input: &InputBuffer) -> Vec<Line<'static>> {
    let step = wizard.step();
    let mut lines = vec![
        blank(),
        progress_line(step.index() + 1, ProductStep::ALL.len(), 8),
        text_line(
            format!("Step {} of {}", step.index() + 1, ProductStep::ALL.len()),
            theme::dim(),
        ),
        blank(),
        text_line(step.label(), theme::heading()),
        blank(),
    ];

    for line in input.to_lines(!wizard.is_submitting(), step.placeholder()) {
        let mut spans = vec![Span::raw("    ")];
        spans.extend(line.spans);
        lines.push(Line::from(spans));
    }
    lines.push(blank());

    if let Some(error) = wizard.error() {
        lines.push(text_line(error, theme::error()));
        lines.push(blank());
    }

    if wizard.is_submitting() {
        lines.push(text_line("Creating your product...", theme::muted()));
        return lines;
    }

    let advance = if wizard.is_last_step() { "create" } else { "next" };
    let mut hints = vec![("Enter", advance), ("Esc", "back")];
    if step.is_multiline() {
        hints.push(("Shift+Enter", "new line"));
    }
    lines.push(hint_line(&hints));
    lines
}
