//! Home view: onboarding progress plus the most recent products and campaigns.
//!
//! Both lists are fetched concurrently; the view stays in its loading state
//! until both have answered. The onboarding panel is derived from the counts
//! and Enter follows the current step.

use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use super::{blank, hint_line, key_press, rule, text_line, ViewResult};
use crate::core::api::Result;
use crate::core::dashboard::{load_dashboard, Dashboard};
use crate::core::models::{Campaign, Product};
use crate::core::onboarding::{step_route, OnboardingState, OnboardingStep};
use crate::core::routes::Route;
use crate::core::text::truncate;
use crate::tui::events::Action;
use crate::tui::services::Services;
use crate::tui::theme;

const RECENT_LIMIT: usize = 3;

struct DashboardLoaded {
    products: Result<Vec<Product>>,
    campaigns: Result<Vec<Campaign>>,
}

pub struct HomeState {
    dashboard: Dashboard,
    loaded: bool,
    loading: bool,
    errors: Vec<String>,
    data_tx: mpsc::UnboundedSender<DashboardLoaded>,
    data_rx: mpsc::UnboundedReceiver<DashboardLoaded>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeState {
    pub fn new() -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        Self {
            dashboard: Dashboard::default(),
            loaded: false,
            loading: false,
            errors: Vec::new(),
            data_tx,
            data_rx,
        }
    }

    pub fn load(&mut self, services: &Services) {
        if self.loading {
            return;
        }
        self.loading = true;
        let api = services.api.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let (products, campaigns) = load_dashboard(api.as_ref()).await;
            let _ = tx.send(DashboardLoaded {
                products,
                campaigns,
            });
        });
    }

    pub fn poll(&mut self) {
        if let Ok(data) = self.data_rx.try_recv() {
            self.apply(data);
        }
    }

    fn apply(&mut self, data: DashboardLoaded) {
        self.errors.clear();
        match data.products {
            Ok(products) => self.dashboard.products = products,
            Err(_) => self.errors.push("Failed to load products.".to_string()),
        }
        match data.campaigns {
            Ok(campaigns) => self.dashboard.campaigns = campaigns,
            Err(_) => self.errors.push("Failed to load campaigns.".to_string()),
        }
        self.loading = false;
        self.loaded = true;
    }

    pub fn onboarding(&self) -> OnboardingState {
        self.dashboard.onboarding()
    }

    /// The panel needs both counts; a failed list hides it.
    fn shows_onboarding(&self) -> bool {
        self.loaded && self.errors.is_empty() && self.onboarding().visible
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> Option<ViewResult> {
        let key = key_press(event)?;
        match key.code {
            KeyCode::Enter => {
                if !self.shows_onboarding() {
                    return None;
                }
                let route = step_route(self.onboarding().step, self.dashboard.first_product_id())?;
                Some(ViewResult::Action(Action::Navigate(route)))
            }
            KeyCode::Char('a') => Some(ViewResult::Action(Action::Navigate(Route::ProductForm))),
            KeyCode::Char('p') => Some(ViewResult::Action(Action::Navigate(Route::Products))),
            KeyCode::Char('c') => Some(ViewResult::Action(Action::Navigate(Route::Campaigns))),
            KeyCode::Char('r') => {
                self.load(services);
                Some(ViewResult::Consumed)
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, services: &Services) {
        let block = theme::block_focused("Home");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = if !self.loaded {
            vec![blank(), text_line("Loading your launches...", theme::muted())]
        } else {
            build_lines(
                &self.dashboard,
                &self.errors,
                services.display.description_max_len,
            )
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

fn onboarding_lines(state: OnboardingState) -> Vec<Line<'static>> {
    let mut lines = vec![
        text_line("Get started", theme::heading()),
        blank(),
    ];
    for step in OnboardingStep::ALL {
        let (marker, style) = if state.is_done(step) {
            ("✓", theme::muted())
        } else if step == state.step {
            ("▸", theme::highlight())
        } else {
            (" ", theme::dim())
        };
        let mut spans = vec![
            Span::raw(format!("  {marker} ")),
            Span::styled(format!("{}. {}", step.number(), step.title()), style),
        ];
        if let Some(estimate) = step.time_estimate() {
            spans.push(Span::styled(format!("  {estimate}"), theme::dim()));
        }
        lines.push(Line::from(spans));

        if step == state.step {
            lines.push(text_line(format!("    {}", step.description()), theme::muted()));
            if let Some(label) = step.button_label() {
                lines.push(Line::from(vec![
                    Span::raw("      "),
                    Span::styled(format!("[Enter] {label}"), theme::title()),
                ]));
            }
        }
    }
    lines.push(blank());
    lines
}

fn build_lines(dashboard: &Dashboard, errors: &[String], max_len: usize) -> Vec<Line<'static>> {
    let mut lines = vec![blank()];

    for error in errors {
        lines.push(text_line(error.clone(), theme::error()));
    }
    if !errors.is_empty() {
        lines.push(blank());
    }

    let onboarding = dashboard.onboarding();
    let show_onboarding = onboarding.visible && errors.is_empty();
    if show_onboarding {
        lines.extend(onboarding_lines(onboarding));
    }

    lines.push(text_line(
        format!("Products ({})", dashboard.products.len()),
        theme::heading(),
    ));
    if dashboard.products.is_empty() {
        lines.push(text_line("No products yet.", theme::dim()));
    }
    for product in dashboard.products.iter().take(RECENT_LIMIT) {
        lines.push(Line::from(vec![
            Span::raw("  • "),
            Span::styled(product.name.clone(), theme::highlight()),
            Span::styled(
                format!("  {}", truncate(product.summary(), max_len)),
                theme::muted(),
            ),
        ]));
    }
    lines.push(blank());

    lines.push(text_line(
        format!("Campaigns ({})", dashboard.campaigns.len()),
        theme::heading(),
    ));
    if dashboard.campaigns.is_empty() {
        lines.push(text_line("No campaigns yet.", theme::dim()));
    }
    for campaign in dashboard.campaigns.iter().take(RECENT_LIMIT) {
        lines.push(Line::from(vec![
            Span::raw("  • "),
            Span::styled(campaign.name.clone(), theme::highlight()),
            Span::styled(format!("  {} posts", campaign.post_count()), theme::dim()),
        ]));
    }

    lines.push(blank());
    lines.push(rule(60));
    let mut hints = vec![("a", "add product"), ("p", "products"), ("c", "campaigns")];
    if show_onboarding {
        hints.insert(0, ("Enter", "next step"));
    }
    hints.push(("r", "refresh"));
    lines.push(hint_line(&hints));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ApiError;
    use crate::tui::views::{lines_text, press, test_services};

    fn product(id: &str) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            ..Default::default()
        }
    }

    fn campaign(id: &str) -> Campaign {
        Campaign {
            id: id.into(),
            name: format!("Campaign {id}"),
            ..Default::default()
        }
    }

    fn loaded(products: Vec<Product>, campaigns: Vec<Campaign>) -> HomeState {
        let mut state = HomeState::new();
        state.apply(DashboardLoaded {
            products: Ok(products),
            campaigns: Ok(campaigns),
        });
        state
    }

    #[test]
    fn test_fresh_account_shows_first_step() {
        let state = loaded(vec![], vec![]);
        let text = lines_text(&build_lines(&state.dashboard, &state.errors, 60));
        assert!(text.contains("Get started"));
        assert!(text.contains("[Enter] Add Product"));
    }

    #[test]
    fn test_panel_hidden_once_campaigns_exist() {
        let state = loaded(vec![product("p1")], vec![campaign("c1")]);
        let text = lines_text(&build_lines(&state.dashboard, &state.errors, 60));
        assert!(!text.contains("Get started"));
        assert!(text.contains("Campaign c1"));
    }

    #[test]
    fn test_enter_follows_plan_step_to_first_product() {
        let (services, _rx) = test_services();
        let mut state = loaded(vec![product("p1"), product("p2")], vec![]);
        let result = state.handle_input(&press(KeyCode::Enter), &services);
        assert_eq!(
            result,
            Some(ViewResult::Action(Action::Navigate(Route::CampaignCreate(
                Some("p1".into())
            ))))
        );
    }

    #[test]
    fn test_enter_ignored_when_panel_hidden() {
        let (services, _rx) = test_services();
        let mut state = loaded(vec![product("p1")], vec![campaign("c1")]);
        assert!(state.handle_input(&press(KeyCode::Enter), &services).is_none());
    }

    #[test]
    fn test_partial_failure_keeps_other_list() {
        let mut state = HomeState::new();
        state.apply(DashboardLoaded {
            products: Err(ApiError::status(500, None)),
            campaigns: Ok(vec![campaign("c1")]),
        });
        assert_eq!(state.errors, vec!["Failed to load products.".to_string()]);
        assert_eq!(state.dashboard.campaigns.len(), 1);
        assert!(state.loaded);
    }

    #[test]
    fn test_failed_list_hides_onboarding() {
        let (services, _rx) = test_services();
        let mut state = HomeState::new();
        state.apply(DashboardLoaded {
            products: Err(ApiError::status(500, None)),
            campaigns: Ok(vec![]),
        });
        let text = lines_text(&build_lines(&state.dashboard, &state.errors, 60));
        assert!(!text.contains("Get started"));
        assert!(!text.contains("Add Product"));
        assert!(text.contains("Failed to load products."));
        assert!(state.handle_input(&press(KeyCode::Enter), &services).is_none());
    }

    #[test]
    fn test_recent_lists_capped() {
        let products = (0..5).map(|i| product(&i.to_string())).collect();
        let state = loaded(products, vec![]);
        let text = lines_text(&build_lines(&state.dashboard, &state.errors, 60));
        assert!(text.contains("Products (5)"));
        assert!(text.contains("Product 2"));
        assert!(!text.contains("Product 3"));
    }
}
