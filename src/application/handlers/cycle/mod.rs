//! Cycle command and query handlers.

mod get_current_cycle;
mod list_stages;
mod open_cycle;

pub use get_current_cycle::{GetCurrentCycleError, GetCurrentCycleHandler};
pub use list_stages::{ListStagesError, ListStagesHandler, ListStagesQuery};
pub use open_cycle::{OpenCycleCommand, OpenCycleError, OpenCycleHandler};
