//! Cycle repository port.
//!
//! Defines the contract for persisting and retrieving Cycle aggregates
//! together with their seeded stages and stage rosters.
//!
//! # Design
//!
//! - **Single-writer**: only `save` ever promotes a cycle to current,
//!   and it demotes every other cycle in the same transaction.
//! - **Aggregate-scoped**: a loaded cycle always carries all of its
//!   stages and their memberships.

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{CycleId, DomainError};
use async_trait::async_trait;

/// Repository port for Cycle aggregate persistence.
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Persist a newly opened cycle.
    ///
    /// Must, in one transaction: demote any currently current cycle,
    /// insert the new cycle as current, and insert its six stages with
    /// their `is_current` flags as the aggregate carries them.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, cycle: &Cycle) -> Result<(), DomainError>;

    /// Find the single current cycle, if one has ever been opened.
    async fn find_current(&self) -> Result<Option<Cycle>, DomainError>;

    /// Find a cycle by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &CycleId) -> Result<Option<Cycle>, DomainError>;
}
