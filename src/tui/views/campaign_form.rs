//! Campaign form: channels, launch type, tone and keywords, then generate.
//!
//! Option steps use j/k to move and Space to pick; Enter picks the
//! highlighted option and advances. A generated campaign opens its detail.

use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use super::{blank, hint_line, key_press, progress_line, step_selection, text_line, ViewResult};
use crate::core::api::Result;
use crate::core::models::{Campaign, Channel, LaunchType, Tone};
use crate::core::routes::Route;
use crate::core::wizard::{CampaignStep, CampaignWizard, StepOutcome};
use crate::tui::events::{Action, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::InputBuffer;

pub struct CampaignFormState {
    wizard: CampaignWizard,
    cursor: usize,
    keywords: InputBuffer,
    result_tx: mpsc::UnboundedSender<Result<Campaign>>,
    result_rx: mpsc::UnboundedReceiver<Result<Campaign>>,
}

impl CampaignFormState {
    pub fn new(product_id: Option<String>) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            wizard: CampaignWizard::new(product_id),
            cursor: 0,
            keywords: InputBuffer::new(),
            result_tx,
            result_rx,
        }
    }

    /// Drain the generate result. A generated campaign opens its detail.
    pub fn poll(&mut self, services: &Services) -> Option<Action> {
        let result = self.result_rx.try_recv().ok()?;
        match result {
            Ok(campaign) => {
                self.wizard.submit_succeeded();
                services.notify("Campaign generated", NotificationLevel::Success);
                Some(Action::Replace(Route::CampaignDetail(Some(campaign.id))))
            }
            Err(e) => {
                log::error!("Failed to generate campaign: {e}");
                self.wizard.submit_failed();
                None
            }
        }
    }

    fn option_count(&self) -> usize {
        match self.wizard.step() {
            CampaignStep::Channels => Channel::ALL.len(),
            CampaignStep::LaunchType => LaunchType::ALL.len(),
            CampaignStep::Tone => Tone::ALL.len(),
            CampaignStep::Keywords => 0,
        }
    }

    /// Pick the highlighted option on the current step.
    fn pick(&mut self) {
        match self.wizard.step() {
            CampaignStep::Channels => {
                if let Some(channel) = Channel::ALL.get(self.cursor) {
                    self.wizard.toggle_channel(*channel);
                }
            }
            CampaignStep::LaunchType => {
                if let Some(kind) = LaunchType::ALL.get(self.cursor) {
                    self.wizard.select_launch_type(*kind);
                }
            }
            CampaignStep::Tone => {
                if let Some(tone) = Tone::ALL.get(self.cursor) {
                    self.wizard.select_tone(*tone);
                }
            }
            CampaignStep::Keywords => {}
        }
    }

    /// Cursor position for the current step, on the existing pick if any.
    fn reset_cursor(&mut self) {
        self.cursor = match self.wizard.step() {
            CampaignStep::LaunchType => self
                .wizard
                .launch_type()
                .and_then(|t| LaunchType::ALL.iter().position(|o| *o == t)),
            CampaignStep::Tone => self
                .wizard
                .tone()
                .and_then(|t| Tone::ALL.iter().position(|o| *o == t)),
            _ => None,
        }
        .unwrap_or(0);
    }

    fn advance(&mut self, services: &Services) {
        match self.wizard.next() {
            StepOutcome::Advanced => self.reset_cursor(),
            StepOutcome::Submit(request) => {
                // next() only submits when a product id is present
                let Some(product_id) = self.wizard.product_id().map(str::to_string) else {
                    return;
                };
                let api = services.api.clone();
                let tx = self.result_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(api.generate_campaign(&product_id, &request).await);
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

        if self.wizard.step() == CampaignStep::Keywords && self.keywords.handle_key(key) {
            self.wizard.set_keywords(self.keywords.text());
            return Some(ViewResult::Consumed);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor = step_selection(self.cursor, self.option_count(), true);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = step_selection(self.cursor, self.option_count(), false);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char(' ') => {
                self.pick();
                Some(ViewResult::Consumed)
            }
            KeyCode::Enter => {
                if matches!(
                    self.wizard.step(),
                    CampaignStep::LaunchType | CampaignStep::Tone
                ) {
                    self.pick();
                }
                self.advance(services);
                Some(ViewResult::Consumed)
            }
            KeyCode::Esc => {
                if self.wizard.back() {
                    self.reset_cursor();
                    Some(ViewResult::Consumed)
                } else {
                    Some(ViewResult::Action(Action::Back))
                }
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Plan Campaign");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let lines = build_lines(&self.wizard, self.cursor, &self.keywords);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

fn option_line(label: &str, picked: bool, highlighted: bool, multi: bool) -> Line<'static> {
    let mark = match (multi, picked) {
        (true, true) => "[x]",
        (true, false) => "[ ]",
        (false, true) => "(•)",
        (false, false) => "( )",
    };
    let cursor = if highlighted { "▸" } else { " " };
    let style = if highlighted {
        theme::selected()
    } else if picked {
        theme::highlight()
    } else {
        Style::default().fg(theme::TEXT)
    };
    Line::from(vec![
        Span::raw(format!("  {cursor} {mark} ")),
        Span::styled(label.to_string(), style),
    ])
}

fn build_lines(wizard: &CampaignWizard, cursor: usize, keywords: &InputBuffer) -> Vec<Line<'static>> {
    let step = wizard.step();
    let mut lines = vec![
        blank(),
        progress_line(step.segment() + 1, CampaignStep::SEGMENTS, 10),
        blank(),
        text_line(step.title(), theme::heading()),
        blank(),
    ];

    match step {
        CampaignStep::Channels => {
            for (i, channel) in Channel::ALL.iter().enumerate() {
                lines.push(option_line(
                    channel.label(),
                    wizard.is_selected(*channel),
                    i == cursor,
                    true,
                ));
            }
        }
        CampaignStep::LaunchType => {
            for (i, kind) in LaunchType::ALL.iter().enumerate() {
                lines.push(option_line(
                    kind.label(),
                    wizard.launch_type() == Some(*kind),
                    i == cursor,
                    false,
                ));
            }
        }
        CampaignStep::Tone => {
            for (i, tone) in Tone::ALL.iter().enumerate() {
                lines.push(option_line(
                    tone.label(),
                    wizard.tone() == Some(*tone),
                    i == cursor,
                    false,
                ));
            }
            if let Some(tone) = Tone::ALL.get(cursor) {
                lines.push(blank());
                lines.push(text_line(format!("\"{}\"", tone.example()), theme::muted()));
            }
        }
        CampaignStep::Keywords => {
            lines.push(text_line(
                "Must-use keywords, separated by commas (optional)",
                theme::muted(),
            ));
            for line in keywords.to_lines(!wizard.is_submitting(), "e.g. ai, productivity, saas") {
                let mut spans = vec![Span::raw("    ")];
                spans.extend(line.spans);
                lines.push(Line::from(spans));
            }
        }
    }
    lines.push(blank());

    if let Some(error) = wizard.error() {
        lines.push(text_line(error, theme::error()));
        lines.push(blank());
    }

    if wizard.is_submitting() {
        lines.push(text_line("Generating your campaign...", theme::muted()));
        return lines;
    }

    let hints: Vec<(&str, &str)> = match step {
        CampaignStep::Channels => vec![
            ("j/k", "move"),
            ("Space", "toggle"),
            ("Enter", "next"),
            ("Esc", "back"),
        ],
        CampaignStep::LaunchType | CampaignStep::Tone => {
            vec![("j/k", "move"), ("Enter", "choose"), ("Esc", "back")]
        }
        CampaignStep::Keywords => vec![("Enter", "generate"), ("Esc", "back")],
    };
    lines.push(hint_line(&hints));
    lines
}
