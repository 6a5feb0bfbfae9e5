//! One call per endpoint: build, execute, parse.
//!
//! # Design
//! `TransactionService` pairs the stateless [`TransactionClient`] with a
//! [`Transport`]. Each method issues exactly one request. There is no retry
//! and no caching. A transport failure becomes [`ApiError::Network`];
//! everything else is whatever the client's normalization produced.

use crate::client::TransactionClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewTransaction, Transaction, TransactionStats};

#[derive(Debug, Clone)]
pub struct TransactionService<T = UreqTransport> {
    client: TransactionClient,
    transport: T,
}

impl TransactionService<UreqTransport> {
    /// Service over a fresh blocking ureq agent.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(TransactionClient::from_config(config), UreqTransport::new())
    }
}

impl<T: Transport> TransactionService<T> {
    pub fn new(client: TransactionClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// All transactions, in the order the server returns them.
    pub fn list(&self) -> Result<Vec<Transaction>, ClientError> {
        let response = self.send(self.client.build_list_transactions())?;
        Ok(self.client.parse_list_transactions(response)?)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Transaction, ClientError> {
        let response = self.send(self.client.build_get_transaction(id))?;
        Ok(self.client.parse_get_transaction(response)?)
    }

    /// Transactions the server has flagged for review.
    pub fn list_suspicious(&self) -> Result<Vec<Transaction>, ClientError> {
        let response = self.send(self.client.build_list_suspicious())?;
        Ok(self.client.parse_list_suspicious(response)?)
    }

    pub fn list_by_category(&self, category: &str) -> Result<Vec<Transaction>, ClientError> {
        let response = self.send(self.client.build_list_by_category(category))?;
        Ok(self.client.parse_list_by_category(response)?)
    }

    pub fn list_high_value(&self) -> Result<Vec<Transaction>, ClientError> {
        let response = self.send(self.client.build_list_high_value())?;
        Ok(self.client.parse_list_high_value(response)?)
    }

    /// Transactions dated within the last `days` days, newest first.
    pub fn list_recent(&self, days: u32) -> Result<Vec<Transaction>, ClientError> {
        let response = self.send(self.client.build_list_recent(days))?;
        Ok(self.client.parse_list_recent(response)?)
    }

    pub fn create(&self, input: &NewTransaction) -> Result<Transaction, ClientError> {
        let request = self.client.build_create_transaction(input)?;
        let response = self.send(request)?;
        Ok(self.client.parse_create_transaction(response)?)
    }

    pub fn update(&self, id: i64, transaction: &Transaction) -> Result<Transaction, ClientError> {
        let request = self.client.build_update_transaction(id, transaction)?;
        let response = self.send(request)?;
        Ok(self.client.parse_update_transaction(response)?)
    }

    pub fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self.send(self.client.build_delete_transaction(id))?;
        Ok(self.client.parse_delete_transaction(response)?)
    }

    /// Aggregate figures. Servers without this endpoint answer with an
    /// ordinary HTTP error.
    pub fn stats(&self) -> Result<TransactionStats, ClientError> {
        let response = self.send(self.client.build_stats())?;
        Ok(self.client.parse_stats(response)?)
    }

    /// `(category, count)` pairs, largest count first.
    pub fn count_by_category(&self) -> Result<Vec<(String, u64)>, ClientError> {
        let response = self.send(self.client.build_count_by_category())?;
        Ok(self.client.parse_count_by_category(response)?)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        tracing::debug!(method, %url, "sending request");
        match self.transport.execute(request) {
            Ok(response) => {
                tracing::debug!(method, %url, status = response.status, "received response");
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(method, %url, error = %e, "no response received");
                Err(ApiError::network())
            }
        }
    }
}
