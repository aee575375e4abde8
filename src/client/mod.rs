//! Client side of the API: an HTTP client, a keyed query cache with a
//! staleness window, and the data hooks built from the two.

pub mod api;
pub mod hooks;
pub mod query_cache;

pub use api::{ApiClient, ClientError};
pub use query_cache::{is_stale, QueryCache, QueryState, DEFAULT_STALE_TIME};
