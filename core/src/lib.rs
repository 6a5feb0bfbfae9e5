//! Client core for the transaction review API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A [`Transport`] performs the
//! round-trip; [`TransactionService`] strings the three steps together for
//! each endpoint.
//!
//! # Design
//! - `TransactionClient` is stateless and holds only the base URL, which is
//!   injected through [`ClientConfig`].
//! - Every response passes through one normalization routine, so callers see
//!   a single error shape: [`ApiError`] for anything HTTP-shaped (including
//!   "no response at all", reported as status 0), [`ClientError::Unexpected`]
//!   for the rest.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::{TransactionClient, DEFAULT_RECENT_DAYS};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ClientError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::TransactionService;
pub use transport::{Transport, UreqTransport};
pub use types::{CategoryBreakdown, NewTransaction, Transaction, TransactionPage, TransactionStats};
