//! Domain DTOs for the transaction API.
//!
//! # Design
//! These types mirror the remote schema but are defined independently of the
//! mock-server crate. Integration tests catch any schema drift between the
//! two. Field names go over the wire in camelCase (`transactionDate`,
//! `createdAt`) regardless of how the backing store names its columns.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single financial transaction as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub transaction_date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: String,
    /// Set by server-side review rules; marks the transaction for manual review.
    pub suspicious: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

/// Request payload for creating a transaction. The server assigns `id` and
/// `createdAt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub transaction_date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub suspicious: bool,
}

/// Aggregate figures over every stored transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub total: u64,
    pub total_amount: f64,
    pub average_amount: f64,
    pub suspicious_count: u64,
    pub category_breakdown: Vec<CategoryBreakdown>,
}

/// One row of the per-category breakdown in [`TransactionStats`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: u64,
    pub total_amount: f64,
}

/// A page of transactions. No endpoint returns this yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub content: Vec<Transaction>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub page: u32,
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_uses_camel_case_fields() {
        let tx = Transaction {
            id: 7,
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            amount: 100.5,
            description: "Groceries".to_string(),
            category: "food".to_string(),
            suspicious: false,
            created_at: None,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["transactionDate"], "2024-01-15");
        assert_eq!(json["amount"], 100.5);
        assert_eq!(json["suspicious"], false);
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn transaction_parses_created_at() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":1,"transactionDate":"2024-01-15","amount":100.50,"description":"Supermarket",
                "category":"groceries","suspicious":true,"createdAt":"2024-01-15T10:30:00"}"#,
        )
        .unwrap();
        let created = tx.created_at.unwrap();
        assert_eq!(created.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(created.format("%H:%M").to_string(), "10:30");
        assert!(tx.suspicious);
    }

    #[test]
    fn transaction_without_created_at_parses() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":2,"transactionDate":"2024-02-01","amount":5,"description":"x","category":"y","suspicious":false}"#,
        )
        .unwrap();
        assert!(tx.created_at.is_none());
        assert_eq!(tx.amount, 5.0);
    }

    #[test]
    fn new_transaction_defaults_suspicious_to_false() {
        let input: NewTransaction = serde_json::from_str(
            r#"{"transactionDate":"2024-03-03","amount":12.25,"description":"Bus","category":"transport"}"#,
        )
        .unwrap();
        assert!(!input.suspicious);
    }

    #[test]
    fn stats_parse_breakdown_in_order() {
        let stats: TransactionStats = serde_json::from_str(
            r#"{"total":3,"totalAmount":300.0,"averageAmount":100.0,"suspiciousCount":1,
                "categoryBreakdown":[{"category":"food","count":2,"totalAmount":200.0},
                                     {"category":"online","count":1,"totalAmount":100.0}]}"#,
        )
        .unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.category_breakdown.len(), 2);
        assert_eq!(stats.category_breakdown[0].category, "food");
        assert_eq!(stats.category_breakdown[1].count, 1);
    }
}
