//! Activity board controller: keeps the rendered board in sync with the service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ActivityBoard` owns no DOM. It talks to the service through an
//! `ActivitiesBackend`, writes through a `BoardStore` (a Leptos signal in the
//! browser), and schedules banner hides through a `StatusTimer`. All three
//! are handed in at construction so tests can drive the whole flow natively.
//!
//! DESIGN
//! ======
//! - Every successful mutation is followed by a full reload; the board is
//!   never patched locally.
//! - Each action awaits exactly one mutation. Concurrent actions are not
//!   serialized: whichever completes last owns the board and the banner.
//! - The banner has one pending hide at most. Showing a message drops the
//!   previous hide handle, which cancels it.
//! - Diagnostics go through the `log` facade; in the browser `console_log`
//!   forwards them to the console. Each failure emits exactly one record.

#[cfg(test)]
#[path = "board_sync_test.rs"]
mod board_sync_test;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::BoardConfig;
use crate::net::api::{ActivitiesBackend, ApiError};
use crate::state::board::BoardState;
use crate::state::status::StatusKind;

/// Shown when a signup is rejected without a `detail`.
pub const SIGNUP_REJECTED_FALLBACK: &str = "An error occurred";
/// Shown when a signup never completes or returns garbage.
pub const SIGNUP_FAILED_FALLBACK: &str = "Failed to sign up. Please try again.";
/// Shown when an unregister is rejected without a `detail`.
pub const UNREGISTER_REJECTED_FALLBACK: &str = "Failed to unregister";
/// Shown when an unregister never completes or returns garbage.
pub const UNREGISTER_FAILED_FALLBACK: &str = "Failed to unregister. Please try again.";

/// Write access to the rendered board.
pub trait BoardStore: Clone + 'static {
    fn update(&self, f: impl FnOnce(&mut BoardState));
}

impl BoardStore for leptos::prelude::RwSignal<BoardState> {
    fn update(&self, f: impl FnOnce(&mut BoardState)) {
        leptos::prelude::Update::update(self, f);
    }
}

impl BoardStore for Rc<RefCell<BoardState>> {
    fn update(&self, f: impl FnOnce(&mut BoardState)) {
        f(&mut *self.borrow_mut());
    }
}

/// One-shot delayed callbacks. Dropping the returned handle cancels the task.
pub trait StatusTimer: Clone + 'static {
    type Handle: 'static;

    fn schedule(&self, after: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `StatusTimer` over `setTimeout`. Dropping the `Timeout` clears it.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

#[cfg(feature = "csr")]
impl StatusTimer for BrowserTimer {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, after: Duration, task: Box<dyn FnOnce()>) -> Self::Handle {
        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, task)
    }
}

/// The board's view-controller.
pub struct ActivityBoard<B, S, T: StatusTimer> {
    backend: Rc<B>,
    store: S,
    timer: T,
    config: Rc<BoardConfig>,
    pending_hide: Rc<RefCell<Option<T::Handle>>>,
}

impl<B, S: Clone, T: StatusTimer> Clone for ActivityBoard<B, S, T> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            store: self.store.clone(),
            timer: self.timer.clone(),
            config: Rc::clone(&self.config),
            pending_hide: Rc::clone(&self.pending_hide),
        }
    }
}

impl<B, S, T> ActivityBoard<B, S, T>
where
    B: ActivitiesBackend,
    S: BoardStore,
    T: StatusTimer,
{
    pub fn new(backend: B, store: S, timer: T, config: BoardConfig) -> Self {
        Self {
            backend: Rc::new(backend),
            store,
            timer,
            config: Rc::new(config),
            pending_hide: Rc::new(RefCell::new(None)),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Fetch the directory and replace the whole board with it.
    ///
    /// On failure the list area switches to the failure notice. Nothing is
    /// retried and no error escapes.
    pub async fn load_and_render(&self) {
        match self.backend.list_activities().await {
            Ok(directory) => {
                log::debug!("loaded {} activities", directory.len());
                self.store.update(|s| s.apply_directory(&directory));
            }
            Err(e) => {
                log::error!("Error fetching activities: {e}");
                self.store.update(BoardState::mark_load_failed);
            }
        }
    }

    /// Register `email` for `activity`.
    ///
    /// Success shows the service's confirmation, clears the form and reloads;
    /// the confirmation's hide is armed once the reload settles. Failure only
    /// updates the banner; the form keeps its contents.
    pub async fn submit_signup(&self, activity: &str, email: &str) {
        let ttl = self.config.signup_status_ttl;
        match self.backend.signup(activity, email).await {
            Ok(message) => {
                self.show_status(StatusKind::Success, message, None);
                self.store.update(BoardState::reset_form);
                self.load_and_render().await;
                self.schedule_hide(ttl);
            }
            Err(ApiError::Rejected { status, detail }) => {
                log::warn!("signup rejected: activity={activity} status={status}");
                let text = detail
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| SIGNUP_REJECTED_FALLBACK.to_owned());
                self.show_status(StatusKind::Error, text, Some(ttl));
            }
            Err(e) => {
                log::error!("Error signing up: {e}");
                self.show_status(StatusKind::Error, SIGNUP_FAILED_FALLBACK, None);
            }
        }
    }

    /// Remove `email` from `activity`.
    ///
    /// Success reloads first, then confirms. Failure only updates the banner.
    pub async fn submit_unregister(&self, activity: &str, email: &str) {
        match self.backend.unregister(activity, email).await {
            Ok(message) => {
                self.load_and_render().await;
                let ttl = self.config.unregister_status_ttl;
                self.show_status(StatusKind::Success, message, Some(ttl));
            }
            Err(ApiError::Rejected { status, detail }) => {
                log::warn!("unregister rejected: activity={activity} status={status}");
                let text = detail
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| UNREGISTER_REJECTED_FALLBACK.to_owned());
                self.show_status(StatusKind::Error, text, None);
            }
            Err(e) => {
                log::error!("Error unregistering: {e}");
                self.show_status(StatusKind::Error, UNREGISTER_FAILED_FALLBACK, None);
            }
        }
    }

    /// Overwrite the banner and replace its pending hide.
    ///
    /// `ttl: None` keeps the message up until the next one replaces it.
    fn show_status(&self, kind: StatusKind, text: impl Into<String>, ttl: Option<Duration>) {
        let text = text.into();
        self.store.update(|s| s.status.show(kind, text));
        drop(self.pending_hide.take());
        if let Some(after) = ttl {
            self.schedule_hide(after);
        }
    }

    /// Hide whatever the banner shows after `after`, replacing any pending hide.
    fn schedule_hide(&self, after: Duration) {
        let store = self.store.clone();
        let handle = self
            .timer
            .schedule(after, Box::new(move || store.update(|s| s.status.hide())));
        drop(self.pending_hide.replace(Some(handle)));
    }
}
