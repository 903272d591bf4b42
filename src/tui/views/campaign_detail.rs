//! Campaign detail: every channel's generated posts, plus inline editing of
//! the campaign name and description.

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
use crate::core::models::{Campaign, CampaignUpdate, Channel, LaunchScript};
use crate::core::routes::Route;
use crate::core::text::{truncate_lines, truncate_trimmed};
use crate::tui::events::{Action, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::InputBuffer;

pub const MISSING_CAMPAIGN_MESSAGE: &str = "Campaign ID not found";
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load campaign";
pub const NAME_REQUIRED_MESSAGE: &str = "Name is required.";
pub const UPDATE_FAILURE_MESSAGE: &str = "Failed to update campaign. Please try again.";

/// Post titles are cut at this many characters.
const TITLE_MAX: usize = 60;
/// Post bodies show at most this many lines.
const BODY_LINES: usize = 3;

enum DetailMsg {
    Loaded(Result<Campaign>),
    Updated(Result<Campaign>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditField {
    Name,
    Description,
}

struct EditForm {
    name: InputBuffer,
    description: InputBuffer,
    focus: EditField,
    error: Option<String>,
    saving: bool,
}

impl EditForm {
    fn for_campaign(campaign: &Campaign) -> Self {
        Self {
            name: InputBuffer::new().with_text(campaign.name.clone()),
            description: InputBuffer::multiline().with_text(campaign.description.clone()),
            focus: EditField::Name,
            error: None,
            saving: false,
        }
    }

    fn focused_mut(&mut self) -> &mut InputBuffer {
        match self.focus {
            EditField::Name => &mut self.name,
            EditField::Description => &mut self.description,
        }
    }

    /// Validated update, or the error to show.
    fn to_update(&self) -> std::result::Result<CampaignUpdate, &'static str> {
        let name = self.name.text().trim();
        if name.is_empty() {
            return Err(NAME_REQUIRED_MESSAGE);
        }
        Ok(CampaignUpdate {
            name: name.to_string(),
            description: self.description.text().trim().to_string(),
        })
    }
}

pub struct CampaignDetailState {
    campaign_id: Option<String>,
    campaign: Option<Campaign>,
    loading: bool,
    error: Option<String>,
    selected: usize,
    edit: Option<EditForm>,
    msg_tx: mpsc::UnboundedSender<DetailMsg>,
    msg_rx: mpsc::UnboundedReceiver<DetailMsg>,
}

impl CampaignDetailState {
    pub fn new(campaign_id: Option<String>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            campaign_id: campaign_id.filter(|id| !id.trim().is_empty()),
            campaign: None,
            loading: false,
            error: None,
            selected: 0,
            edit: None,
            msg_tx,
            msg_rx,
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
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(DetailMsg::Loaded(api.get_campaign(&id).await));
        });
    }

    pub fn poll(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: DetailMsg) {
        match msg {
            DetailMsg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(campaign) => {
                        self.selected = self.selected.min(campaign.post_count().saturating_sub(1));
                        self.campaign = Some(campaign);
                        self.error = None;
                    }
                    Err(e) => {
                        log::error!("Failed to load campaign: {e}");
                        self.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                    }
                }
            }
            DetailMsg::Updated(result) => match result {
                Ok(campaign) => {
                    self.campaign = Some(campaign);
                    self.edit = None;
                }
                Err(e) => {
                    log::error!("Failed to update campaign: {e}");
                    if let Some(form) = self.edit.as_mut() {
                        form.saving = false;
                        form.error = Some(UPDATE_FAILURE_MESSAGE.to_string());
                    }
                }
            },
        }
    }

    fn posts(&self) -> Vec<&LaunchScript> {
        self.campaign
            .iter()
            .flat_map(|c| c.launch_scripts.iter())
            .flat_map(|g| g.scripts.iter())
            .collect()
    }

    fn save(&mut self, services: &Services) {
        let (Some(id), Some(form)) = (self.campaign_id.clone(), self.edit.as_mut()) else {
            return;
        };
        if form.saving {
            return;
        }
        let update = match form.to_update() {
            Ok(update) => update,
            Err(message) => {
                form.error = Some(message.to_string());
                return;
            }
        };
        form.saving = true;
        form.error = None;

        let services = services.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = services.api.update_campaign(&id, &update).await;
            if result.is_ok() {
                services.notify("Campaign updated", NotificationLevel::Success);
            }
            let _ = tx.send(DetailMsg::Updated(result));
        });
    }

    fn handle_edit_input(&mut self, event: &Event, services: &Services) -> Option<ViewResult> {
        let key = key_press(event)?;
        let form = self.edit.as_mut()?;
        if form.saving {
            return Some(ViewResult::Consumed);
        }
        match key.code {
            KeyCode::Esc => self.edit = None,
            KeyCode::Tab | KeyCode::BackTab => {
                form.focus = match form.focus {
                    EditField::Name => EditField::Description,
                    EditField::Description => EditField::Name,
                };
            }
            KeyCode::Enter if key.modifiers.is_empty() => self.save(services),
            _ => {
                if form.focused_mut().handle_key(key) {
                    form.error = None;
                }
            }
        }
        Some(ViewResult::Consumed)
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> Option<ViewResult> {
        if self.edit.is_some() {
            return self.handle_edit_input(event, services);
        }
        let key = key_press(event)?;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = step_selection(self.selected, self.posts().len(), true);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = step_selection(self.selected, self.posts().len(), false);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('r') => {
                self.load(services);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('e') => {
                let form = EditForm::for_campaign(self.campaign.as_ref()?);
                self.edit = Some(form);
                Some(ViewResult::Consumed)
            }
            KeyCode::Enter => {
                let post_id = self.posts().get(self.selected)?.id.clone();
                let campaign_id = self.campaign_id.clone()?;
                Some(ViewResult::Action(Action::Navigate(Route::Post {
                    campaign_id: Some(campaign_id),
                    post_id: Some(post_id),
                })))
            }
            KeyCode::Esc => Some(ViewResult::Action(Action::Back)),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .campaign
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Campaign");
        let block = theme::block_focused(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match (&self.campaign, &self.error) {
            (_, Some(error)) if self.campaign.is_none() => {
                vec![blank(), text_line(error.clone(), theme::error())]
            }
            (None, _) => vec![blank(), text_line("Loading campaign...", theme::muted())],
            (Some(campaign), _) => match &self.edit {
                Some(form) => build_edit_lines(form),
                None => build_lines(campaign, self.selected),
            },
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

fn build_lines(campaign: &Campaign, selected: usize) -> Vec<Line<'static>> {
    let mut lines = vec![blank()];

    if !campaign.description.is_empty() {
        lines.push(text_line(campaign.description.clone(), theme::muted()));
    }
    let mut meta = Vec::new();
    if let Some(kind) = campaign.launch_type_kind() {
        meta.push(kind.label().to_string());
    }
    if !campaign.keywords.is_empty() {
        meta.push(format!("Keywords: {}", campaign.keywords.join(", ")));
    }
    if !meta.is_empty() {
        lines.push(text_line(meta.join("  ·  "), theme::dim()));
    }
    lines.push(blank());

    if campaign.post_count() == 0 {
        lines.push(text_line("No posts generated for this campaign.", theme::muted()));
    }

    let mut index = 0;
    for group in &campaign.launch_scripts {
        lines.push(text_line(
            format!(
                "{} ({})",
                Channel::label_for(&group.channel),
                group.scripts.len()
            ),
            theme::heading(),
        ));
        for script in &group.scripts {
            let is_selected = index == selected;
            let marker = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                theme::selected()
            } else {
                theme::highlight()
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {marker}")),
                Span::styled(truncate_trimmed(&script.copy.title, TITLE_MAX), style),
            ]));
            for body_line in truncate_lines(&script.copy.body, BODY_LINES).lines() {
                lines.push(text_line(format!("    {body_line}"), theme::muted()));
            }
            lines.push(blank());
            index += 1;
        }
    }

    lines.push(rule(60));
    lines.push(hint_line(&[
        ("j/k", "select"),
        ("Enter", "open post"),
        ("e", "edit"),
        ("r", "refresh"),
        ("Esc", "back"),
    ]));
    lines
}

fn build_edit_lines(form: &EditForm) -> Vec<Line<'static>> {
    let mut lines = vec![blank()];
    for (field, label, buffer) in [
        (EditField::Name, "Name", &form.name),
        (EditField::Description, "Description", &form.description),
    ] {
        let focused = form.focus == field;
        let style = if focused {
            theme::heading()
        } else {
            theme::muted()
        };
        lines.push(text_line(label, style));
        for line in buffer.to_lines(focused && !form.saving, "") {
            let mut spans = vec![Span::raw("    ")];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
        lines.push(blank());
    }
    if let Some(error) = &form.error {
        lines.push(text_line(error.clone(), theme::error()));
        lines.push(blank());
    }
    if form.saving {
        lines.push(text_line("Saving...", theme::muted()));
    } else {
        lines.push(hint_line(&[
            ("Tab", "switch field"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ApiError;
    use crate::core::models::{ChannelScripts, PostCopy};
    use crate::tui::views::{lines_text, press, test_services};

    fn script(id: &str, title: &str, body: &str) -> LaunchScript {
        LaunchScript {
            id: id.into(),
            copy: PostCopy {
                title: title.into(),
                body: body.into(),
            },
            ..Default::default()
        }
    }

    fn campaign() -> Campaign {
        Campaign {
            id: "c1".into(),
            name: "Spring Launch".into(),
            description: "Launch week".into(),
            launch_scripts: vec![
                ChannelScripts {
                    channel: "x".into(),
                    scripts: vec![script("s1", "First post", "Short body")],
                },
                ChannelScripts {
                    channel: "reddit".into(),
                    scripts: vec![script("s2", &"T".repeat(70), &"word ".repeat(40))],
                },
            ],
            ..Default::default()
        }
    }

    fn loaded() -> CampaignDetailState {
        let mut state = CampaignDetailState::new(Some("c1".into()));
        state.apply(DetailMsg::Loaded(Ok(campaign())));
        state
    }

    #[test]
    fn test_groups_and_truncation() {
        let text = lines_text(&build_lines(&campaign(), 0));
        assert!(text.contains("X (Twitter) (1)"));
        assert!(text.contains("Reddit (1)"));
        assert!(text.contains(&format!("{}...", "T".repeat(60))));
        assert!(!text.contains(&"T".repeat(61)));
        assert!(text.contains("Short body"));
    }

    #[test]
    fn test_missing_id_is_inline_error() {
        let (services, _rx) = test_services();
        let mut state = CampaignDetailState::new(None);
        state.load(&services);
        assert_eq!(state.error.as_deref(), Some(MISSING_CAMPAIGN_MESSAGE));
    }

    #[test]
    fn test_enter_opens_post_across_groups() {
        let (services, _rx) = test_services();
        let mut state = loaded();
        state.handle_input(&press(KeyCode::Char('j')), &services);
        assert_eq!(
            state.handle_input(&press(KeyCode::Enter), &services),
            Some(ViewResult::Action(Action::Navigate(Route::Post {
                campaign_id: Some("c1".into()),
                post_id: Some("s2".into()),
            })))
        );
    }

    #[test]
    fn test_edit_requires_name() {
        let (services, _rx) = test_services();
        let mut state = loaded();
        state.handle_input(&press(KeyCode::Char('e')), &services);
        for _ in 0.."Spring Launch".len() {
            state.handle_input(&press(KeyCode::Backspace), &services);
        }
        state.handle_input(&press(KeyCode::Enter), &services);
        let form = state.edit.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some(NAME_REQUIRED_MESSAGE));
        assert!(!form.saving);
    }

    #[test]
    fn test_edit_keys_do_not_leak() {
        let (services, _rx) = test_services();
        let mut state = loaded();
        state.handle_input(&press(KeyCode::Char('e')), &services);
        state.handle_input(&press(KeyCode::Tab), &services);
        assert_eq!(
            state.handle_input(&press(KeyCode::Char('q')), &services),
            Some(ViewResult::Consumed)
        );
        assert_eq!(
            state.edit.as_ref().unwrap().description.text(),
            "Launch weekq"
        );
        state.handle_input(&press(KeyCode::Esc), &services);
        assert!(state.edit.is_none());
    }

    #[test]
    fn test_update_replaces_campaign() {
        let (services, _rx) = test_services();
        let mut state = loaded();
        state.handle_input(&press(KeyCode::Char('e')), &services);
        let mut updated = campaign();
        updated.name = "Renamed".into();
        state.apply(DetailMsg::Updated(Ok(updated)));
        assert!(state.edit.is_none());
        assert_eq!(state.campaign.as_ref().unwrap().name, "Renamed");
    }

    #[test]
    fn test_update_failure_keeps_form() {
        let (services, _rx) = test_services();
        let mut state = loaded();
        state.handle_input(&press(KeyCode::Char('e')), &services);
        state.apply(DetailMsg::Updated(Err(ApiError::status(500, None))));
        let form = state.edit.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some(UPDATE_FAILURE_MESSAGE));
    }
}
