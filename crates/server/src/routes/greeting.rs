use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::ServerState;

pub const DEFAULT_NAME: &str = "World";

/// Resolve `name` from raw query pairs: repeated values are comma-joined,
/// a missing parameter falls back to `World`, an empty one is kept as is.
pub fn name_param(params: &[(String, String)]) -> String {
    let values: Vec<&str> = params
        .iter()
        .filter(|(k, _)| k == "name")
        .map(|(_, v)| v.as_str())
        .collect();
    if values.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        values.join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub id: u64,
    pub content: String,
}

/// Process-wide greeting id source. The first id handed out is 1.
#[derive(Debug, Default)]
pub struct GreetingCounter {
    counter: AtomicU64,
}

impl GreetingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new value.
    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Last id handed out, 0 if none yet.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

/// GET /hello?name=X -> `Hello X!`
pub async fn hello(Query(params): Query<Vec<(String, String)>>) -> String {
    format!("Hello {}!", name_param(&params))
}

/// GET /greeting?name=X -> `{"id": N, "content": "Hello, X!"}`
pub async fn greeting(
    State(state): State<ServerState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Greeting> {
    let id = state.greetings.next();
    Json(Greeting { id, content: format!("Hello, {}!", name_param(&params)) })
}
