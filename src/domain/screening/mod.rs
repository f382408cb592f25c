//! Screening domain - decisions, audit records, and the batch
//! processor that drives the stage state machine.

mod decision;
mod processor;
mod record;

pub use decision::{RejectionReason, ScreeningDecision};
pub use processor::{RoundOutcome, ScreeningProcessor};
pub use record::ScreeningRecord;
