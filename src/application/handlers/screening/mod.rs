//! Screening command handlers.

mod process_batch;

pub use process_batch::{ProcessBatchCommand, ProcessBatchError, ProcessBatchHandler};
