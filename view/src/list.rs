//! Mount lifecycle of the transaction list view.
//!
//! # Design
//! `mount` starts one fetch on the blocking pool and returns immediately,
//! leaving the view in `Loading`. Each mount owns the receiving half of a
//! oneshot channel; the fetch task sends its result there and the view
//! applies it in `settle` or `poll_updates`. `unmount` drops the receiver,
//! so a result that lands after unmount, or after a later remount, has
//! nowhere to go and the state only ever reflects the most recent fetch.
//! A fetch task that ends without sending (for example on runtime shutdown)
//! closes the channel, which the view reports as an unexpected error.

use std::sync::Arc;

use tokio::sync::oneshot::{self, error::TryRecvError};
use txreview_core::{ClientError, Transaction, TransactionService, Transport, UreqTransport};

use crate::locale::Locale;
use crate::render;
use crate::state::ViewState;

type FetchResult = Result<Vec<Transaction>, ClientError>;

pub struct TransactionList<T = UreqTransport> {
    service: Arc<TransactionService<T>>,
    locale: Locale,
    state: ViewState,
    mounted: bool,
    fetches: usize,
    /// Result of the current mount's fetch, until it has been applied.
    pending: Option<oneshot::Receiver<FetchResult>>,
}

impl<T: Transport + 'static> TransactionList<T> {
    pub fn new(service: Arc<TransactionService<T>>, locale: Locale) -> Self {
        Self {
            service,
            locale,
            state: ViewState::Loading,
            mounted: false,
            fetches: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of list fetches this view has started.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    /// Enter `Loading` and start the list fetch. A no-op while mounted.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.fetches += 1;
        self.state = ViewState::Loading;

        let (result_tx, result_rx) = oneshot::channel();
        self.pending = Some(result_rx);
        let service = Arc::clone(&self.service);
        tracing::debug!(fetch = self.fetches, "mounting transaction list");
        tokio::spawn(async move {
            let result = match tokio::task::spawn_blocking(move || service.list()).await {
                Ok(result) => result,
                Err(e) => Err(ClientError::Unexpected(e.to_string())),
            };
            // Fails only once this mount's receiver is gone.
            let _ = result_tx.send(result);
        });
    }

    /// Detach the view. A fetch still in flight will be ignored.
    pub fn unmount(&mut self) {
        if self.mounted {
            self.mounted = false;
            if self.pending.take().is_some() {
                tracing::debug!("discarding in-flight fetch");
            }
        }
    }

    /// Wait until the current fetch has been applied. Returns immediately
    /// when not mounted or already settled.
    pub async fn settle(&mut self) -> &ViewState {
        if let Some(pending) = self.pending.take() {
            let result = pending.await.unwrap_or_else(|_| Err(fetch_lost()));
            self.apply(result);
        }
        &self.state
    }

    /// Apply the fetch result if it has already arrived, without waiting.
    /// Returns true if the state changed.
    pub fn poll_updates(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        let result = match pending.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(fetch_lost()),
        };
        self.pending = None;
        self.apply(result);
        true
    }

    pub fn render(&self) -> String {
        render::render(&self.state, self.locale)
    }

    fn apply(&mut self, result: FetchResult) {
        if let Err(err) = &result {
            match err.as_api() {
                Some(api) => tracing::error!(status = api.status(), error = %api, "API error while loading transactions"),
                None => tracing::error!(error = %err, "failed to load transactions"),
            }
        }
        self.state = ViewState::from_result(result);
    }
}

fn fetch_lost() -> ClientError {
    ClientError::Unexpected("fetch task ended without a result".to_string())
}
