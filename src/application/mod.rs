//! Application layer - orchestrates domain operations through ports.
//!
//! Handlers load aggregates, run domain logic, and persist outcomes.
//! They hold no business rules of their own.

pub mod handlers;
