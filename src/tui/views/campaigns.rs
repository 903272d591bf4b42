//! Campaigns view: generated campaigns with their launch type and post count.

use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use super::{blank, hint_line, key_press, rule, step_selection, text_line, ViewResult};
use crate::core::api::Result;
use crate::core::collections::{filter_by_name, remove_by_id};
use crate::core::models::{Campaign, Channel};
use crate::core::routes::Route;
use crate::core::text::truncate;
use crate::tui::events::{Action, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::InputBuffer;

pub const EMPTY_MESSAGE: &str = "No campaigns yet. Pick a product and plan your first launch!";
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load campaigns. Please try again.";
pub const DELETE_FAILURE_MESSAGE: &str = "Failed to delete campaign. Please try again.";

enum CampaignsMsg {
    Loaded(Result<Vec<Campaign>>),
    Deleted { id: String, result: Result<()> },
}

pub struct CampaignsState {
    campaigns: Vec<Campaign>,
    loaded: bool,
    loading: bool,
    error: Option<String>,
    selected: usize,
    search: InputBuffer,
    searching: bool,
    confirm_delete: Option<String>,
    deleting: bool,
    msg_tx: mpsc::UnboundedSender<CampaignsMsg>,
    msg_rx: mpsc::UnboundedReceiver<CampaignsMsg>,
}

impl Default for CampaignsState {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignsState {
    pub fn new() -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            campaigns: Vec::new(),
            loaded: false,
            loading: false,
            error: None,
            selected: 0,
            search: InputBuffer::new(),
            searching: false,
            confirm_delete: None,
            deleting: false,
            msg_tx,
            msg_rx,
        }
    }

    pub fn load(&mut self, services: &Services) {
        if self.loading {
            return;
        }
        self.loading = true;
        let api = services.api.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(CampaignsMsg::Loaded(api.get_campaigns().await));
        });
    }

    pub fn poll(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: CampaignsMsg) {
        match msg {
            CampaignsMsg::Loaded(result) => {
                self.loading = false;
                self.loaded = true;
                match result {
                    Ok(campaigns) => {
                        self.campaigns = campaigns;
                        self.error = None;
                        self.clamp_selection();
                    }
                    Err(e) => {
                        log::error!("Failed to load campaigns: {e}");
                        self.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                    }
                }
            }
            CampaignsMsg::Deleted { id, result } => {
                self.deleting = false;
                match result {
                    Ok(()) => {
                        remove_by_id(&mut self.campaigns, &id);
                        self.error = None;
                        self.clamp_selection();
                    }
                    Err(e) => {
                        log::error!("Failed to delete campaign {id}: {e}");
                        self.error = Some(DELETE_FAILURE_MESSAGE.to_string());
                    }
                }
            }
        }
    }

    fn visible(&self) -> Vec<&Campaign> {
        filter_by_name(&self.campaigns, self.search.text())
    }

    fn selected_campaign(&self) -> Option<&Campaign> {
        self.visible().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn start_delete(&mut self, services: &Services, id: String) {
        if self.deleting {
            return;
        }
        self.deleting = true;
        let services = services.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = services.api.delete_campaign(&id).await;
            if result.is_ok() {
                services.notify("Campaign deleted", NotificationLevel::Success);
            }
            let _ = tx.send(CampaignsMsg::Deleted { id, result });
        });
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> Option<ViewResult> {
        let key = key_press(event)?;

        if self.searching {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.searching = false,
                _ => {
                    if self.search.handle_key(key) {
                        self.selected = 0;
                    }
                }
            }
            return Some(ViewResult::Consumed);
        }

        if let Some(id) = self.confirm_delete.take() {
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                self.start_delete(services, id);
            }
            return Some(ViewResult::Consumed);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = step_selection(self.selected, self.visible().len(), true);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = step_selection(self.selected, self.visible().len(), false);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('G') => {
                self.selected = self.visible().len().saturating_sub(1);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('/') => {
                self.searching = true;
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('r') => {
                self.load(services);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('d') => {
                self.confirm_delete = Some(self.selected_campaign()?.id.clone());
                Some(ViewResult::Consumed)
            }
            KeyCode::Enter => {
                let id = self.selected_campaign()?.id.clone();
                Some(ViewResult::Action(Action::Navigate(Route::CampaignDetail(
                    Some(id),
                ))))
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, services: &Services) {
        let block = theme::block_focused("Campaigns");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = if self.loading && !self.loaded {
            vec![blank(), text_line("Loading campaigns...", theme::muted())]
        } else {
            build_lines(
                &self.visible(),
                self.campaigns.len(),
                self.selected,
                ListChrome {
                    search: self.search.text(),
                    searching: self.searching,
                    confirm_delete: self.confirm_delete.is_some(),
                    error: self.error.as_deref(),
                },
                services.display.description_max_len,
            )
        };

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

struct ListChrome<'a> {
    search: &'a str,
    searching: bool,
    confirm_delete: bool,
    error: Option<&'a str>,
}

fn channel_summary(channels: &[String]) -> String {
    channels
        .iter()
        .map(|c| Channel::label_for(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn build_lines(
    campaigns: &[&Campaign],
    total: usize,
    selected: usize,
    chrome: ListChrome,
    max_len: usize,
) -> Vec<Line<'static>> {
    let mut lines = vec![blank()];

    if chrome.searching || !chrome.search.is_empty() {
        let cursor = if chrome.searching { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled("  Search: ", theme::muted()),
            Span::raw(format!("{}{cursor}", chrome.search)),
        ]));
        lines.push(blank());
    }

    if let Some(error) = chrome.error {
        lines.push(text_line(error, theme::error()));
        lines.push(blank());
    }

    if total == 0 {
        lines.push(text_line(EMPTY_MESSAGE, theme::muted()));
        return lines;
    }

    for (i, campaign) in campaigns.iter().enumerate() {
        let is_selected = i == selected;
        let marker = if is_selected { "▸ " } else { "  " };
        let name_style = if is_selected {
            theme::selected()
        } else {
            theme::highlight()
        };
        let launch_type = campaign
            .launch_type_kind()
            .map(|t| t.label().to_string())
            .or_else(|| campaign.launch_type.clone())
            .unwrap_or_default();

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(campaign.name.clone(), name_style),
            Span::styled(
                format!("  {launch_type} · {} posts", campaign.post_count()),
                theme::dim(),
            ),
        ]));
        if !campaign.description.is_empty() {
            lines.push(text_line(
                truncate(&campaign.description, max_len),
                theme::muted(),
            ));
        }
        if !campaign.channels.is_empty() {
            lines.push(text_line(channel_summary(&campaign.channels), theme::dim()));
        }
        lines.push(blank());
    }

    lines.push(rule(60));
    if chrome.confirm_delete {
        lines.push(text_line(
            "Delete this campaign? y:confirm  any other key:cancel",
            theme::error(),
        ));
    } else {
        lines.push(hint_line(&[
            ("j/k", "select"),
            ("Enter", "open"),
            ("d", "delete"),
            ("/", "search"),
            ("r", "refresh"),
        ]));
    }
    lines
}
