//! Mount the list view against the live mock server.

use std::sync::Arc;

use txreview_core::{ClientConfig, TransactionService};
use txreview_view::{Locale, TransactionList, ViewState};

async fn start_server(seed: Vec<mock_server::TransactionInput>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, seed));
    format!("http://{addr}/api")
}

fn list_for(base_url: &str, locale: Locale) -> TransactionList {
    let service = TransactionService::from_config(&ClientConfig::new(base_url));
    TransactionList::new(Arc::new(service), locale)
}

#[tokio::test]
async fn renders_one_row_per_seeded_transaction() {
    let base = start_server(mock_server::sample_data()).await;
    let mut list = list_for(&base, Locale::En);
    list.mount();
    list.settle().await;

    assert_eq!(list.state().transactions().len(), 5);
    let out = list.render();
    assert_eq!(out.matches("Flagged").count(), 2);
    assert_eq!(out.matches("Normal").count(), 3);
    assert!(out.contains("$2499.99"));
    assert!(out.contains("01/16/2024"));
    assert!(out.ends_with("Total transactions: 5"));
}

#[tokio::test]
async fn empty_server_renders_empty_notice() {
    let base = start_server(Vec::new()).await;
    let mut list = list_for(&base, Locale::Es);
    list.mount();

    assert!(matches!(list.settle().await, ViewState::Empty));
    assert_eq!(list.render(), "No hay transacciones disponibles");
}

#[tokio::test]
async fn wrong_base_path_renders_http_error() {
    let base = start_server(mock_server::sample_data()).await;
    let mut list = list_for(&format!("{base}/missing"), Locale::En);
    list.mount();
    list.settle().await;

    assert_eq!(list.render(), "Error: Error 404: HTTP 404: Not Found");
}
