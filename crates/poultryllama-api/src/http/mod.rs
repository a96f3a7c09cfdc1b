//! HTTP layer for PoultryLlama.
//!
//! Axum-based API: `POST /chat/` for conversation turns, `GET /` for the
//! endpoint listing, `GET /health` for liveness.

pub mod error;
pub mod handlers;
pub mod router;
