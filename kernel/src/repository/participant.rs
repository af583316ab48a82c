use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::participant::Participant;

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Resolves names to participant records, creating any that do not exist
    /// yet. Input names are expected to be distinct; matching is exact and
    /// case-sensitive. Idempotent: resolving the same name twice never
    /// creates a second row.
    async fn resolve(&self, names: Vec<String>) -> AppResult<Vec<Participant>>;
}
