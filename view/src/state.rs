//! The list view's display state.

use txreview_core::{ApiError, ClientError, Transaction};

use crate::locale::Labels;

/// What the list view currently shows. Exactly one variant applies at a time.
#[derive(Debug)]
pub enum ViewState {
    /// Initial state, held until the mount's fetch completes.
    Loading,
    Failed(ClientError),
    Empty,
    /// At least one transaction, in server order.
    Loaded(Vec<Transaction>),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Loaded transactions; empty for every other state.
    pub fn transactions(&self) -> &[Transaction] {
        match self {
            ViewState::Loaded(txs) => txs,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn from_result(result: Result<Vec<Transaction>, ClientError>) -> Self {
        match result {
            Ok(txs) if txs.is_empty() => ViewState::Empty,
            Ok(txs) => ViewState::Loaded(txs),
            Err(err) => ViewState::Failed(err),
        }
    }
}

/// Text shown for a failed load.
///
/// A server-side failure names its status and message; a request that never
/// got an answer, or any other failure, gets the generic notice.
pub fn error_text(error: &ClientError, labels: &Labels) -> String {
    match error {
        ClientError::Api(ApiError::Http { status, message, .. }) => {
            format!("{} {status}: {message}", labels.error_prefix)
        }
        ClientError::Api(ApiError::Network { .. }) | ClientError::Unexpected(_) => labels.unexpected_error.to_string(),
    }
}
