//! Post view: one generated post with copy-to-clipboard for title and body.

use std::fmt::Display;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, TimeZone, Utc};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use super::{blank, hint_line, key_press, rule, text_line, ViewResult};
use crate::core::api::Result;
use crate::core::models::{Campaign, Channel, LaunchScript};
use crate::tui::events::Action;
use crate::tui::services::Services;
use crate::tui::theme;

pub const MISSING_CAMPAIGN_MESSAGE: &str = "Campaign ID not found";
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load campaign";
pub const NOT_FOUND_MESSAGE: &str = "Post not found";

const COPIED_FOR: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Title,
    Body,
}

impl CopyTarget {
    fn label(self) -> &'static str {
        match self {
            CopyTarget::Title => "title",
            CopyTarget::Body => "body",
        }
    }
}

/// A resolved post with its channel.
struct PostDisplay {
    channel: String,
    script: LaunchScript,
}

pub struct PostState {
    campaign_id: Option<String>,
    post_id: Option<String>,
    campaign_name: Option<String>,
    post: Option<PostDisplay>,
    loading: bool,
    error: Option<String>,
    copied: Option<(CopyTarget, Instant)>,
    data_tx: mpsc::UnboundedSender<Result<Campaign>>,
    data_rx: mpsc::UnboundedReceiver<Result<Campaign>>,
}

impl PostState {
    pub fn new(campaign_id: Option<String>, post_id: Option<String>) -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        Self {
            campaign_id: campaign_id.filter(|id| !id.trim().is_empty()),
            post_id: post_id.filter(|id| !id.trim().is_empty()),
            campaign_name: None,
            post: None,
            loading: false,
            error: None,
            copied: None,
            data_tx,
            data_rx,
        }
    }

    pub fn load(&mut self, services: &Services) {
        let Some(id) = self.campaign_id.clone() else {
            self.error = Some(MISSING_CAMPAIGN_MESSAGE.to_string());
            return;
        };
        if self.loading {
            return;
        }
        self.loading = true;
        let api = services.api.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(api.get_campaign(&id).await);
        });
    }

    pub fn poll(&mut self) {
        if let Ok(result) = self.data_rx.try_recv() {
            self.apply(result);
        }
        if let Some((_, at)) = self.copied {
            if at.elapsed() >= COPIED_FOR {
                self.copied = None;
            }
        }
    }

    fn apply(&mut self, result: Result<Campaign>) {
        self.loading = false;
        let campaign = match result {
            Ok(campaign) => campaign,
            Err(e) => {
                log::error!("Failed to load campaign for post: {e}");
                self.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                return;
            }
        };

        let found = self
            .post_id
            .as_deref()
            .and_then(|id| campaign.find_script(id))
            .map(|(group, script)| PostDisplay {
                channel: group.channel.clone(),
                script: script.clone(),
            });
        match found {
            Some(post) => {
                self.post = Some(post);
                self.error = None;
            }
            None => self.error = Some(NOT_FOUND_MESSAGE.to_string()),
        }
        self.campaign_name = Some(campaign.name);
    }

    fn copy(&mut self, target: CopyTarget) -> Option<ViewResult> {
        let post = self.post.as_ref()?;
        let text = match target {
            CopyTarget::Title => post.script.copy.title.clone(),
            CopyTarget::Body => post.script.copy.body.clone(),
        };
        self.copied = Some((target, Instant::now()));
        Some(ViewResult::Action(Action::Copy {
            label: target.label().to_string(),
            text,
        }))
    }

    pub fn handle_input(&mut self, event: &Event, _services: &Services) -> Option<ViewResult> {
        let key = key_press(event)?;
        match key.code {
            KeyCode::Char('t') => self.copy(CopyTarget::Title),
            KeyCode::Char('b') => self.copy(CopyTarget::Body),
            KeyCode::Esc => Some(ViewResult::Action(Action::Back)),
            _ => None,
        }
    }

    fn copied_target(&self) -> Option<CopyTarget> {
        self.copied
            .filter(|(_, at)| at.elapsed() < COPIED_FOR)
            .map(|(target, _)| target)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = self.campaign_name.as_deref().unwrap_or("Post");
        let block = theme::block_focused(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match (&self.post, &self.error) {
            (Some(post), _) => build_lines(post, self.copied_target(), &Local),
            (None, Some(error)) => vec![
                blank(),
                text_line(error.clone(), theme::error()),
                blank(),
                hint_line(&[("Esc", "back")]),
            ],
            (None, None) => vec![blank(), text_line("Loading post...", theme::muted())],
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

/// Long-form date, e.g. `Monday, March 3, 2025 at 09:30 AM`.
pub fn format_publish_date<Tz>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.with_timezone(tz)
        .format("%A, %B %-d, %Y at %I:%M %p")
        .to_string()
}

fn copy_marker(copied: Option<CopyTarget>, target: CopyTarget) -> Span<'static> {
    if copied == Some(target) {
        Span::styled("  ✓ Copied", theme::progress_filled())
    } else {
        Span::raw("")
    }
}

fn build_lines<Tz>(post: &PostDisplay, copied: Option<CopyTarget>, tz: &Tz) -> Vec<Line<'static>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let script = &post.script;
    let mut lines = vec![
        blank(),
        text_line(Channel::label_for(&post.channel), theme::heading()),
    ];
    let date = script
        .publish_date
        .as_ref()
        .map(|d| format_publish_date(d, tz))
        .unwrap_or_else(|| "Not scheduled".to_string());
    lines.push(text_line(date, theme::dim()));
    lines.push(blank());

    lines.push(Line::from(vec![
        Span::styled("  Title", theme::muted()),
        copy_marker(copied, CopyTarget::Title),
    ]));
    lines.push(text_line(script.copy.title.clone(), theme::highlight()));
    lines.push(blank());

    lines.push(Line::from(vec![
        Span::styled("  Body", theme::muted()),
        copy_marker(copied, CopyTarget::Body),
    ]));
    for body_line in script.copy.body.lines() {
        lines.push(text_line(body_line.to_string(), Style::default().fg(theme::TEXT)));
    }
    lines.push(blank());

    lines.push(rule(60));
    lines.push(hint_line(&[
        ("t", "copy title"),
        ("b", "copy body"),
        ("Esc", "back"),
    ]));
    lines
}
