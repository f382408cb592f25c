//! Cycle domain - recruitment rounds and their stage pipeline.

mod aggregate;
mod stage;

pub use aggregate::{Cycle, StageAdvance};
pub use stage::{Stage, StageName};
