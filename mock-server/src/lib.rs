use std::{cmp::Ordering, collections::BTreeMap, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Days, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Transactions at or above this amount are listed as high value.
pub const HIGH_VALUE_THRESHOLD: f64 = 2000.0;

/// Window used by the recent listing when no `days` is given.
pub const DEFAULT_RECENT_DAYS: i64 = 30;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub transaction_date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub suspicious: bool,
    pub created_at: NaiveDateTime,
}

/// Body accepted by create and update. Update ignores any `id` or
/// `createdAt` it is sent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub transaction_date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub suspicious: bool,
}

impl TransactionInput {
    fn is_valid(&self) -> bool {
        self.amount.is_finite()
            && self.amount > 0.0
            && !self.description.trim().is_empty()
            && !self.category.trim().is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: u64,
    pub total_amount: f64,
    pub average_amount: f64,
    pub suspicious_count: u64,
    pub category_breakdown: Vec<CategoryCount>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
    pub total_amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub timestamp: i64,
}

/// Error response: status plus a JSON `{"message", "timestamp"}` body.
pub struct ApiFailure(StatusCode, String);

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.1,
            timestamp: Utc::now().timestamp_millis(),
        };
        (self.0, Json(body)).into_response()
    }
}

// Extractor rejections get the same JSON body as handler errors.
impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        ApiFailure(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiFailure {
    fn from(rejection: PathRejection) -> Self {
        ApiFailure(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiFailure {
    fn from(rejection: QueryRejection) -> Self {
        ApiFailure(rejection.status(), rejection.body_text())
    }
}

fn not_found(id: i64) -> ApiFailure {
    ApiFailure(StatusCode::NOT_FOUND, format!("Transaction not found with ID: {id}"))
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    rows: BTreeMap<i64, Transaction>,
}

impl Store {
    fn insert(&mut self, input: TransactionInput) -> Transaction {
        self.next_id += 1;
        let tx = Transaction {
            id: self.next_id,
            transaction_date: input.transaction_date,
            amount: input.amount,
            description: input.description,
            category: input.category,
            suspicious: input.suspicious,
            created_at: Utc::now().naive_utc(),
        };
        self.rows.insert(tx.id, tx.clone());
        tx
    }

    /// Newest first; ties broken by larger amount.
    fn sorted_by_date(&self, keep: impl Fn(&Transaction) -> bool) -> Vec<Transaction> {
        let mut txs: Vec<Transaction> = self.rows.values().filter(|&tx| keep(tx)).cloned().collect();
        txs.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then(b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal))
        });
        txs
    }

    /// Per-category counts, largest first, alphabetical within equal counts.
    fn category_counts(&self) -> Vec<CategoryCount> {
        let mut breakdown: BTreeMap<&str, (u64, f64)> = BTreeMap::new();
        for tx in self.rows.values() {
            let entry = breakdown.entry(tx.category.as_str()).or_default();
            entry.0 += 1;
            entry.1 += tx.amount;
        }
        let mut counts: Vec<CategoryCount> = breakdown
            .into_iter()
            .map(|(category, (count, total_amount))| CategoryCount {
                category: category.to_string(),
                count,
                total_amount,
            })
            .collect();
        // Stable sort keeps the BTreeMap's alphabetical order for ties.
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }
}

#[derive(Debug, Deserialize)]
struct RecentParams {
    days: Option<i64>,
}

pub type Db = Arc<RwLock<Store>>;

/// Router with an empty store.
pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router whose store is pre-populated with `seed`, ids assigned in order.
pub fn app_with(seed: Vec<TransactionInput>) -> Router {
    let mut store = Store::default();
    for input in seed {
        store.insert(input);
    }
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/suspicious", get(list_suspicious))
        .route("/transactions/high-value", get(list_high_value))
        .route("/transactions/recent", get(list_recent))
        .route("/transactions/stats", get(stats))
        .route("/transactions/stats/by-category", get(count_by_category))
        .route("/transactions/category/{category}", get(list_by_category))
        .route(
            "/transactions/{id}",
            get(get_transaction).put(update_transaction).delete(delete_transaction),
        )
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run_with(listener: TcpListener, seed: Vec<TransactionInput>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(seed)).await
}

/// A handful of sample rows for local demos.
pub fn sample_data() -> Vec<TransactionInput> {
    let row = |y, m, d, amount, description: &str, category: &str, suspicious| TransactionInput {
        transaction_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        amount,
        description: description.to_string(),
        category: category.to_string(),
        suspicious,
    };
    vec![
        row(2024, 1, 15, 100.5, "Supermarket", "groceries", false),
        row(2024, 1, 16, 5000.0, "Wire transfer to unknown account", "transfer", true),
        row(2024, 1, 17, 75.3, "Fuel", "transport", false),
        row(2024, 1, 18, 1200.0, "Monthly rent", "housing", false),
        row(2024, 1, 19, 2499.99, "Electronics marketplace", "online", true),
    ]
}

async fn list_transactions(State(db): State<Db>) -> Json<Vec<Transaction>> {
    let store = db.read().await;
    let txs = store.sorted_by_date(|_| true);
    tracing::info!(count = txs.len(), "listing transactions");
    Json(txs)
}

async fn list_suspicious(State(db): State<Db>) -> Json<Vec<Transaction>> {
    Json(db.read().await.sorted_by_date(|tx| tx.suspicious))
}

async fn list_by_category(State(db): State<Db>, Path(category): Path<String>) -> Json<Vec<Transaction>> {
    Json(db.read().await.sorted_by_date(|tx| tx.category == category))
}

async fn list_high_value(State(db): State<Db>) -> Json<Vec<Transaction>> {
    let mut txs = db.read().await.sorted_by_date(|tx| tx.amount >= HIGH_VALUE_THRESHOLD);
    txs.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    Json(txs)
}

async fn list_recent(
    State(db): State<Db>,
    params: Result<Query<RecentParams>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, ApiFailure> {
    let Query(params) = params?;
    let days = params.days.unwrap_or(DEFAULT_RECENT_DAYS);
    let since = u64::try_from(days)
        .ok()
        .filter(|&d| d > 0)
        .and_then(|d| Local::now().date_naive().checked_sub_days(Days::new(d)))
        .ok_or_else(|| ApiFailure(StatusCode::BAD_REQUEST, "Days must be positive".to_string()))?;
    let txs = db.read().await.sorted_by_date(|tx| tx.transaction_date >= since);
    tracing::info!(days, count = txs.len(), "listing recent transactions");
    Ok(Json(txs))
}

async fn stats(State(db): State<Db>) -> Json<Stats> {
    let store = db.read().await;
    let total = store.rows.len() as u64;
    let total_amount: f64 = store.rows.values().map(|tx| tx.amount).sum();
    Json(Stats {
        total,
        total_amount,
        average_amount: if total == 0 { 0.0 } else { total_amount / total as f64 },
        suspicious_count: store.rows.values().filter(|tx| tx.suspicious).count() as u64,
        category_breakdown: store.category_counts(),
    })
}

/// `[category, count]` pairs.
async fn count_by_category(State(db): State<Db>) -> Json<Vec<(String, u64)>> {
    let counts = db.read().await.category_counts();
    Json(counts.into_iter().map(|c| (c.category, c.count)).collect())
}

async fn create_transaction(
    State(db): State<Db>,
    input: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiFailure> {
    let Json(input) = input?;
    if !input.is_valid() {
        return Err(ApiFailure(StatusCode::BAD_REQUEST, "Transaction data is not valid".to_string()));
    }
    let tx = db.write().await.insert(input);
    tracing::info!(id = tx.id, "created transaction");
    Ok((StatusCode::CREATED, Json(tx)))
}

async fn get_transaction(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Transaction>, ApiFailure> {
    let Path(id) = id?;
    let store = db.read().await;
    store.rows.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn update_transaction(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
    input: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<Json<Transaction>, ApiFailure> {
    let Path(id) = id?;
    let Json(input) = input?;
    if !input.is_valid() {
        return Err(ApiFailure(StatusCode::BAD_REQUEST, "Transaction data is not valid".to_string()));
    }
    let mut store = db.write().await;
    let tx = store.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
    tx.transaction_date = input.transaction_date;
    tx.amount = input.amount;
    tx.description = input.description;
    tx.category = input.category;
    tx.suspicious = input.suspicious;
    Ok(Json(tx.clone()))
}

async fn delete_transaction(
    State(db): State<Db>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiFailure> {
    let Path(id) = id?;
    let mut store = db.write().await;
    store
        .rows
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(id))
}
