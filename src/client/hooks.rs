use chrono::NaiveDate;

use crate::client::api::ApiClient;
use crate::client::query_cache::{QueryCache, QueryState};
use crate::models::{Me, Summary};

pub const ME_KEY: &str = "/api/auth/me";

/// The signed-in user, refreshed at most once per staleness window.
pub async fn use_me(client: &ApiClient, cache: &QueryCache<Me>) -> QueryState<Me> {
    cache.fetch(ME_KEY, || client.me()).await
}

pub fn summary_key(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    let mut key = String::from("/api/summary");
    let mut params = Vec::new();
    if let Some(from) = from {
        params.push(format!("from={}", from));
    }
    if let Some(to) = to {
        params.push(format!("to={}", to));
    }
    if !params.is_empty() {
        key.push('?');
        key.push_str(&params.join("&"));
    }
    key
}

pub async fn use_summary(
    client: &ApiClient,
    cache: &QueryCache<Summary>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> QueryState<Summary> {
    cache
        .fetch(&summary_key(from, to), || client.summary(from, to))
        .await
}
