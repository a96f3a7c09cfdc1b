//! GET / - static description of the API.

use axum::Json;
use serde_json::{Value, json};

/// GET / - Welcome message and endpoint listing. No side effects.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to PoultryLlama Chat API.",
        "endpoints": {
            "/chat/": "Communicate with the LLM to understand more about poultry farming.",
        },
    }))
}
