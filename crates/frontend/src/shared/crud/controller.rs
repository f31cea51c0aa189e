use contracts::domain::common::CrudEntity;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::columns::Columns;
use super::flows::{self, DeleteOutcome, SaveOutcome};
use super::service::CrudService;
use super::state::ListState;
use crate::shared::config::AppConfig;
use crate::shared::http::ApiError;
use crate::shared::paginator::PageMove;
use crate::shared::toast::{use_toasts, ToastService};

/// Browser yes/no prompt.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Reactive wrapper around `ListState` for one list screen.
///
/// Results arriving after the owning component is gone are dropped.
pub struct ListController<S: CrudService> {
    pub state: RwSignal<ListState<S::Item>, LocalStorage>,
    service: Rc<S>,
    toasts: ToastService,
    min_loading_ms: u32,
    alive: Arc<AtomicBool>,
}

impl<S: CrudService> Clone for ListController<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            service: self.service.clone(),
            toasts: self.toasts,
            min_loading_ms: self.min_loading_ms,
            alive: self.alive.clone(),
        }
    }
}

impl<S: CrudService + 'static> ListController<S> {
    /// Must be called inside a component; teardown is tied to its owner.
    pub fn new(service: S, columns: Columns) -> Self {
        let config = AppConfig::get();
        let alive = Arc::new(AtomicBool::new(true));
        {
            let alive = alive.clone();
            on_cleanup(move || alive.store(false, Ordering::SeqCst));
        }
        Self {
            state: RwSignal::new_local(ListState::new(config.list.default_page_size, columns)),
            service: Rc::new(service),
            toasts: use_toasts(),
            min_loading_ms: config.list.min_loading_ms,
            alive,
        }
    }

    pub fn service(&self) -> Rc<S> {
        self.service.clone()
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn update(&self, f: impl FnOnce(&mut ListState<S::Item>)) {
        if self.is_alive() {
            let _ = self.state.try_update(f);
        }
    }

    pub fn load(&self) {
        self.start_load(false);
    }

    fn start_load(&self, is_search: bool) {
        let mut generation = 0;
        let mut query = None;
        self.update(|s| {
            generation = s.begin_load(is_search);
            query = Some(s.query());
        });
        let Some(query) = query else {
            return;
        };

        let this = self.clone();
        spawn_local(async move {
            let started = js_sys::Date::now();
            let result = flows::load_page(this.service.as_ref(), &query).await;

            let elapsed = js_sys::Date::now() - started;
            if result.is_err() && elapsed < f64::from(this.min_loading_ms) {
                TimeoutFuture::new(this.min_loading_ms - elapsed as u32).await;
            }
            if let Err(e) = &result {
                if this.is_alive() && !matches!(e, ApiError::Unauthorized) {
                    this.toasts.error(e.user_message());
                }
            }
            this.update(|s| {
                s.finish_load(generation, result);
            });
        });
    }

    /// First, previous, next, last or a numbered page.
    pub fn move_page(&self, step: PageMove) {
        self.navigate(|s| s.paginator.apply(step));
    }

    pub fn set_page_size(&self, size: usize) {
        self.navigate(|s| s.paginator.set_page_size(size));
    }

    fn navigate(&self, f: impl FnOnce(&mut ListState<S::Item>) -> bool) {
        let mut moved = false;
        self.update(|s| moved = f(s));
        if moved {
            log::debug!("Page changed, reloading {}", S::Item::list_name());
            self.load();
        }
    }

    pub fn stage_search(&self, text: String) {
        self.update(|s| s.stage_search(&text));
    }

    /// Enter key or search button.
    pub fn search(&self) {
        let mut changed = false;
        self.update(|s| changed = s.commit_search());
        if changed {
            self.start_load(true);
        }
    }

    pub fn clear_search(&self) {
        let mut changed = false;
        self.update(|s| changed = s.clear_search());
        if changed {
            self.start_load(true);
        }
    }

    pub fn toggle_column(&self, key: &str) {
        self.update(|s| {
            s.toggle_column(key);
        });
    }

    pub fn dismiss_error(&self) {
        self.update(|s| s.dismiss_error());
    }

    pub fn delete(&self, item: S::Item) {
        let this = self.clone();
        spawn_local(async move {
            match flows::delete_item(this.service.as_ref(), &item, confirm).await {
                Ok(DeleteOutcome::Deleted) => {
                    this.toasts.success(format!(
                        "{} \"{}\" deleted.",
                        S::Item::element_name(),
                        item.display_name()
                    ));
                    this.load();
                }
                Ok(DeleteOutcome::Cancelled) => {}
                Err(e) => this.report(e),
            }
        });
    }

    /// Flips the flag in place on success, without reloading.
    pub fn toggle_status(&self, item: S::Item) {
        let this = self.clone();
        spawn_local(async move {
            match flows::toggle_status(this.service.as_ref(), &item).await {
                Ok(active) => {
                    if let Some(id) = item.id() {
                        this.update(|s| {
                            s.set_item_status(id, active);
                        });
                    }
                    let label = if active { "activated" } else { "deactivated" };
                    this.toasts
                        .success(format!("\"{}\" {}.", item.display_name(), label));
                }
                Err(e) => this.report(e),
            }
        });
    }

    /// Validate and submit; `on_done` receives the outcome so the form can
    /// show field errors or close. The list reloads after a save.
    pub fn save(&self, item: S::Item, on_done: impl FnOnce(Result<SaveOutcome, ApiError>) + 'static) {
        let this = self.clone();
        spawn_local(async move {
            let result = flows::save_item(this.service.as_ref(), &item).await;
            match &result {
                Ok(outcome) => {
                    let verb = match outcome {
                        SaveOutcome::Created => "created",
                        SaveOutcome::Updated => "updated",
                    };
                    this.toasts
                        .success(format!("{} {}.", S::Item::element_name(), verb));
                    this.load();
                }
                Err(ApiError::Invalid(_)) => {}
                Err(e) => this.report(e.clone()),
            }
            if this.is_alive() {
                on_done(result);
            }
        });
    }

    fn report(&self, e: ApiError) {
        log::error!("{} action failed: {:?}", S::Item::element_name(), e);
        if !self.is_alive() || matches!(e, ApiError::Unauthorized) {
            return;
        }
        self.toasts.error(e.user_message());
    }
}
