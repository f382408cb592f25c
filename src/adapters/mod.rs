//! Adapters - Implementations of the ports against real infrastructure.
//!
//! - `postgres` - sqlx-backed repositories and the access checker
//! - `http` - Axum transport layer

pub mod http;
pub mod postgres;
