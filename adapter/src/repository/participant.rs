use async_trait::async_trait;
use derive_new::new;
use kernel::model::participant::Participant;
use kernel::repository::participant::ParticipantRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::participant::ParticipantRow, ConnectionPool};

#[derive(new)]
pub struct ParticipantRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ParticipantRepository for ParticipantRepositoryImpl {
    async fn resolve(&self, names: Vec<String>) -> AppResult<Vec<Participant>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        // Create-or-fetch: the unique constraint on participant_name makes
        // two concurrent resolutions of the same new name converge on one
        // row.
        sqlx::query(
            r#"
                INSERT INTO participants (participant_name)
                SELECT unnest($1::text[])
                ON CONFLICT (participant_name) DO NOTHING
            "#,
        )
        .bind(&names)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let rows: Vec<ParticipantRow> = sqlx::query_as(
            r#"
                SELECT participant_id, participant_name
                FROM participants
                WHERE participant_name = ANY($1)
                ORDER BY participant_id
            "#,
        )
        .bind(&names)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Participant::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn resolve_creates_missing_names_once(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ParticipantRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let first = repo
            .resolve(vec!["Alice".into(), "Bob".into()])
            .await?;
        assert_eq!(first.len(), 2);

        // Resolving again returns the same records, no new rows.
        let second = repo
            .resolve(vec!["Alice".into(), "Bob".into()])
            .await?;
        assert_eq!(first, second);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM participants")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 2);
        Ok(())
    }

    #[sqlx::test]
    async fn resolve_collapses_duplicate_names_in_one_call(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = ParticipantRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let participants = repo
            .resolve(vec!["Alice".into(), "Alice".into()])
            .await?;
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].name, "Alice");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM participants")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[sqlx::test]
    async fn resolve_is_case_sensitive(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ParticipantRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let participants = repo
            .resolve(vec!["Alice".into(), "alice".into()])
            .await?;
        assert_eq!(participants.len(), 2);
        Ok(())
    }

    #[sqlx::test]
    async fn resolve_of_nothing_is_nothing(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ParticipantRepositoryImpl::new(ConnectionPool::new(pool));
        assert!(repo.resolve(vec![]).await?.is_empty());
        Ok(())
    }
}
