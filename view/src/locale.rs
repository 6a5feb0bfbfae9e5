//! User-facing strings and date formats.

use chrono::NaiveDate;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Es,
}

/// Every piece of text the list view can show.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub title: &'static str,
    pub loading: &'static str,
    pub empty: &'static str,
    pub error_prefix: &'static str,
    pub unexpected_error: &'static str,
    pub col_id: &'static str,
    pub col_date: &'static str,
    pub col_description: &'static str,
    pub col_category: &'static str,
    pub col_amount: &'static str,
    pub col_status: &'static str,
    pub badge_flagged: &'static str,
    pub badge_normal: &'static str,
    pub total: &'static str,
}

const EN: Labels = Labels {
    title: "Transactions",
    loading: "Loading transactions...",
    empty: "No transactions available",
    error_prefix: "Error",
    unexpected_error: "Unexpected error while loading transactions",
    col_id: "ID",
    col_date: "Date",
    col_description: "Description",
    col_category: "Category",
    col_amount: "Amount",
    col_status: "Status",
    badge_flagged: "Flagged",
    badge_normal: "Normal",
    total: "Total transactions",
};

const ES: Labels = Labels {
    title: "Transacciones",
    loading: "Cargando transacciones...",
    empty: "No hay transacciones disponibles",
    error_prefix: "Error",
    unexpected_error: "Error inesperado al cargar las transacciones",
    col_id: "ID",
    col_date: "Fecha",
    col_description: "Descripción",
    col_category: "Categoría",
    col_amount: "Monto",
    col_status: "Estado",
    badge_flagged: "Sospechosa",
    badge_normal: "Normal",
    total: "Total de transacciones",
};

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }

    /// Short numeric date: `01/15/2024` for `En`, `15/01/2024` for `Es`.
    pub fn format_date(self, date: NaiveDate) -> String {
        let pattern = match self {
            Locale::En => "%m/%d/%Y",
            Locale::Es => "%d/%m/%Y",
        };
        date.format(pattern).to_string()
    }
}
