//! Remote-backed lists and their refresh tasks.
//!
//! A [`RemoteList`] holds whatever the last successful fetch returned. The
//! fetching itself runs in a task started by [`spawn_refresh`], which hands
//! back a [`PollHandle`]; dropping or cancelling the handle tears the task
//! down.

use crate::error::Result;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// How often a view re-fetches its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Fetch once when the view is mounted.
    Once,
    /// Fetch on mount and then every interval until torn down.
    Every(Duration),
}

/// A list whose contents are replaced wholesale by each fetch.
#[derive(Debug, Clone)]
pub struct RemoteList<T> {
    items: Vec<T>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Time of the last successful fetch.
    pub last_updated: Option<DateTime<Utc>>,
    /// Currently highlighted row.
    pub selected_index: Option<usize>,
}

impl<T> Default for RemoteList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            last_updated: None,
            selected_index: None,
        }
    }
}

impl<T> RemoteList<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the contents with a fresh fetch.
    pub fn loaded(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
        self.last_updated = Some(Utc::now());
        self.selected_index = match self.selected_index {
            _ if self.items.is_empty() => None,
            Some(i) => Some(i.min(self.items.len() - 1)),
            None => Some(0),
        };
    }

    /// A failed fetch leaves the previous contents on screen.
    pub fn failed(&mut self) {
        self.loading = false;
    }

    /// Render every item through `template`.
    pub fn render_with<R>(&self, template: impl FnMut(&T) -> R) -> Vec<R> {
        self.items.iter().map(template).collect()
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected_index.and_then(|i| self.items.get(i))
    }

    /// Move the selection by `delta`, clamped to the list bounds.
    pub fn scroll(&mut self, delta: i32) {
        if self.items.is_empty() {
            self.selected_index = None;
            return;
        }
        let current = self.selected_index.unwrap_or(0) as i64;
        let max_index = (self.items.len() - 1) as i64;
        self.selected_index = Some((current + delta as i64).clamp(0, max_index) as usize);
    }

    pub fn go_to_top(&mut self) {
        if !self.items.is_empty() {
            self.selected_index = Some(0);
        }
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_index = self.items.len().checked_sub(1);
    }
}

/// Handle to a running refresh task.
///
/// The task stops when [`cancel`](Self::cancel) is called or the handle is
/// dropped. No fetch starts after that point; one already in flight may
/// still deliver its result.
#[derive(Debug)]
pub struct PollHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop the task.
    pub fn cancel(mut self) {
        self.stop();
    }

    /// Whether the task has run to completion or been torn down.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    fn stop(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(());
            self.task.abort();
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run `fetch` according to `policy` and pass each result to `sink`.
///
/// Fetches never overlap: the next tick is only awaited once the previous
/// fetch has completed, and ticks missed meanwhile are not made up.
pub fn spawn_refresh<T, F, Fut, S>(policy: RefreshPolicy, mut fetch: F, sink: S) -> PollHandle
where
    T: Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
    S: Fn(Result<T>) + Send + 'static,
{
    let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut ticker = match policy {
            RefreshPolicy::Once => None,
            RefreshPolicy::Every(period) => {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                Some(ticker)
            }
        };

        loop {
            if let Some(ticker) = ticker.as_mut() {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    _ = ticker.tick() => {}
                }
            }

            let result = tokio::select! {
                biased;
                _ = &mut cancel_rx => break,
                result = fetch() => result,
            };
            if let Err(e) = &result {
                tracing::warn!("Refresh failed: {}", e);
            }
            sink(result);

            if ticker.is_none() {
                break;
            }
        }
    });

    PollHandle {
        cancel_tx: Some(cancel_tx),
        task,
    }
}
