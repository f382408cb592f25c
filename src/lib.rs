//! PYP Recruitment - Fellowship recruitment administration backend
//!
//! This crate implements the recruitment pipeline: yearly application
//! cycles, the fixed six-stage screening sequence, applicant enrollment,
//! and batch screening rounds.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
