//! Turns a [`ViewState`] into terminal text.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use txreview_core::Transaction;

use crate::locale::Locale;
use crate::state::{error_text, ViewState};

/// Review badge shown in the status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Flagged,
    Normal,
}

impl Badge {
    pub fn for_transaction(tx: &Transaction) -> Self {
        if tx.suspicious {
            Badge::Flagged
        } else {
            Badge::Normal
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        let labels = locale.labels();
        match self {
            Badge::Flagged => labels.badge_flagged,
            Badge::Normal => labels.badge_normal,
        }
    }
}

/// One table row with every cell already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub badge: Badge,
}

impl Row {
    pub fn new(tx: &Transaction, locale: Locale) -> Self {
        Self {
            id: tx.id.to_string(),
            date: locale.format_date(tx.transaction_date),
            description: tx.description.clone(),
            category: tx.category.clone(),
            amount: format_amount(tx.amount),
            badge: Badge::for_transaction(tx),
        }
    }
}

/// `$` followed by the amount to two decimal places.
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn rows(txs: &[Transaction], locale: Locale) -> Vec<Row> {
    txs.iter().map(|tx| Row::new(tx, locale)).collect()
}

pub fn render(state: &ViewState, locale: Locale) -> String {
    let labels = locale.labels();
    match state {
        ViewState::Loading => labels.loading.to_string(),
        ViewState::Failed(err) => format!("{}: {}", labels.error_prefix, error_text(err, labels)),
        ViewState::Empty => labels.empty.to_string(),
        ViewState::Loaded(txs) => {
            let table = table(&rows(txs, locale), locale);
            format!("{}\n{table}\n{}: {}", labels.title, labels.total, txs.len())
        }
    }
}

fn table(rows: &[Row], locale: Locale) -> Table {
    let labels = locale.labels();
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(vec![
        Cell::new(labels.col_id),
        Cell::new(labels.col_date),
        Cell::new(labels.col_description),
        Cell::new(labels.col_category),
        Cell::new(labels.col_amount).set_alignment(CellAlignment::Right),
        Cell::new(labels.col_status).set_alignment(CellAlignment::Center),
    ]);
    for row in rows {
        t.add_row(vec![
            Cell::new(&row.id),
            Cell::new(&row.date),
            Cell::new(&row.description),
            Cell::new(&row.category),
            Cell::new(&row.amount).set_alignment(CellAlignment::Right),
            Cell::new(row.badge.label(locale)).set_alignment(CellAlignment::Center),
        ]);
    }
    t
}
