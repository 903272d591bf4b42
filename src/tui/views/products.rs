//! Products view: every product with a truncated description.
//!
//! Enter continues the product's flow: the enrichment chat while it is still
//! in progress, campaign creation once the chat is complete. `/` filters by
//! name, `d` deletes after a `y` confirmation.

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
use crate::core::models::Product;
use crate::core::routes::Route;
use crate::core::text::truncate;
use crate::tui::events::{Action, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::InputBuffer;

pub const EMPTY_MESSAGE: &str = "No products found. Add your first product to get started!";
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load products. Please try again.";
pub const DELETE_FAILURE_MESSAGE: &str = "Failed to delete product. Please try again.";

enum ProductsMsg {
    Loaded(Result<Vec<Product>>),
    Deleted { id: String, result: Result<()> },
}

pub struct ProductsState {
    products: Vec<Product>,
    loaded: bool,
    loading: bool,
    error: Option<String>,
    selected: usize,
    search: InputBuffer,
    searching: bool,
    confirm_delete: Option<String>,
    deleting: bool,
    msg_tx: mpsc::UnboundedSender<ProductsMsg>,
    msg_rx: mpsc::UnboundedReceiver<ProductsMsg>,
}

impl Default for ProductsState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductsState {
    pub fn new() -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            products: Vec::new(),
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
            let result = api.get_products().await;
            let _ = tx.send(ProductsMsg::Loaded(result));
        });
    }

    pub fn poll(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: ProductsMsg) {
        match msg {
            ProductsMsg::Loaded(Ok(products)) => {
                self.products = products;
                self.error = None;
                self.clamp_selection();
                self.loading = false;
                self.loaded = true;
            }
            ProductsMsg::Loaded(Err(e)) => {
                log::error!("Failed to load products: {e}");
                self.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                self.loading = false;
                self.loaded = true;
            }
            ProductsMsg::Deleted { id, result } => {
                self.deleting = false;
                match result {
                    Ok(()) => {
                        remove_by_id(&mut self.products, &id);
                        self.error = None;
                        self.clamp_selection();
                    }
                    Err(e) => {
                        log::error!("Failed to delete product {id}: {e}");
                        self.error = Some(DELETE_FAILURE_MESSAGE.to_string());
                    }
                }
            }
        }
    }

    fn visible(&self) -> Vec<&Product> {
        filter_by_name(&self.products, self.search.text())
    }

    fn selected_product(&self) -> Option<&Product> {
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
            let result = services.api.delete_product(&id).await;
            if result.is_ok() {
                services.notify("Product deleted", NotificationLevel::Success);
            }
            let _ = tx.send(ProductsMsg::Deleted { id, result });
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
            KeyCode::Char('/') => {
                self.searching = true;
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('r') => {
                self.load(services);
                Some(ViewResult::Consumed)
            }
            KeyCode::Char('a') => Some(ViewResult::Action(Action::Navigate(Route::ProductForm))),
            KeyCode::Char('c') => {
                let id = self.selected_product()?.id.clone();
                Some(ViewResult::Action(Action::Navigate(Route::CampaignCreate(
                    Some(id),
                ))))
            }
            KeyCode::Char('d') => {
                let id = self.selected_product()?.id.clone();
                self.confirm_delete = Some(id);
                Some(ViewResult::Consumed)
            }
            KeyCode::Enter => {
                let product = self.selected_product()?;
                let id = Some(product.id.clone());
                let route = if product.is_chat_completed() {
                    Route::CampaignCreate(id)
                } else {
                    Route::Chat(id)
                };
                Some(ViewResult::Action(Action::Navigate(route)))
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, services: &Services) {
        let block = theme::block_focused("All Products");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = if self.loading && !self.loaded {
            vec![blank(), text_line("Loading products...", theme::muted())]
        } else {
            build_lines(&ProductsView {
                products: &self.visible(),
                total: self.products.len(),
                selected: self.selected,
                search: self.search.text(),
                searching: self.searching,
                confirm_delete: self.confirm_delete.is_some(),
                error: self.error.as_deref(),
                max_len: services.display.description_max_len,
                width: inner.width as usize,
            })
        };

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

struct ProductsView<'a> {
    products: &'a [&'a Product],
    total: usize,
    selected: usize,
    search: &'a str,
    searching: bool,
    confirm_delete: bool,
    error: Option<&'a str>,
    max_len: usize,
    width: usize,
}

fn build_lines(view: &ProductsView) -> Vec<Line<'static>> {
    let mut lines = vec![blank()];

    if view.searching || !view.search.is_empty() {
        let cursor = if view.searching { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled("  Search: ", theme::muted()),
            Span::raw(format!("{}{cursor}", view.search)),
        ]));
        lines.push(blank());
    }

    if let Some(error) = view.error {
        lines.push(text_line(error, theme::error()));
        lines.push(blank());
    }

    if view.total == 0 {
        lines.push(text_line(EMPTY_MESSAGE, theme::muted()));
        lines.push(blank());
        lines.push(hint_line(&[("a", "add product"), ("r", "refresh")]));
        return lines;
    }

    if view.products.is_empty() {
        lines.push(text_line(
            format!("No products match \"{}\".", view.search),
            theme::muted(),
        ));
    }

    for (i, product) in view.products.iter().enumerate() {
        let is_selected = i == view.selected;
        let marker = if is_selected { "▸ " } else { "  " };
        let name_style = if is_selected {
            theme::selected()
        } else {
            theme::highlight()
        };
        let status = if product.is_chat_completed() {
            "ready"
        } else {
            "chat in progress"
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(product.name.clone(), name_style),
            Span::styled(format!("  ({status})"), theme::dim()),
        ]));
        lines.push(text_line(
            truncate(product.summary(), view.max_len),
            theme::muted(),
        ));
        lines.push(blank());
    }

    lines.push(rule(view.width.saturating_sub(4).min(60)));
    if view.confirm_delete {
        lines.push(text_line(
            "Delete this product? y:confirm  any other key:cancel",
            theme::error(),
        ));
    } else {
        lines.push(hint_line(&[
            ("j/k", "select"),
            ("Enter", "View"),
            ("c", "Create Campaign"),
            ("a", "add"),
            ("d", "delete"),
            ("/", "search"),
        ]));
    }
    lines
}
