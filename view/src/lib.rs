//! Transaction list view.
//!
//! # Overview
//! [`TransactionList`] fetches the transaction list once per mount and shows
//! one of three exclusive displays: a loading notice, an error, or the
//! content (a table, or an empty-state notice when there is nothing to
//! show). Rendering is plain text so the view works in any terminal.

pub mod list;
pub mod locale;
pub mod render;
pub mod state;

pub use list::TransactionList;
pub use locale::{Labels, Locale};
pub use render::{format_amount, Badge, Row};
pub use state::ViewState;
