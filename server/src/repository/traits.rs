//! Repository Layer - Core Traits
//!
//! Read-side contract shared by every repository. Creation differs per
//! entity and lives on the concrete repositories.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// Core repository trait for entity lookups
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities ordered by ID
    async fn list(&self) -> DomainResult<Vec<T>>;
}
