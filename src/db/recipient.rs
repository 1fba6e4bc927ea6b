use sqlx::Row;
use tracing::{debug, instrument};

use super::core::Database;
use crate::recipient::Recipient;
use crate::TARGET_DB;

const UPSERT_RECIPIENT: &str = r#"
    INSERT INTO recipients (id, user_id, name, nickname, relationship, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
    ON CONFLICT(user_id, id) DO UPDATE SET
        name = ?3,
        nickname = ?4,
        relationship = ?5,
        updated_at = ?6
"#;

impl Database {
    /// Insert a recipient for a user, or update it if that user already has the id.
    pub async fn add_recipient(&self, user_id: &str, recipient: &Recipient) -> Result<(), sqlx::Error> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(UPSERT_RECIPIENT)
            .bind(&recipient.id)
            .bind(user_id)
            .bind(&recipient.name)
            .bind(&recipient.nickname)
            .bind(&recipient.relationship)
            .bind(&now)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// Store a batch of recipients for a user in a single transaction.
    #[instrument(target = "db", level = "debug", skip(self, recipients))]
    pub async fn add_recipients(
        &self,
        user_id: &str,
        recipients: &[Recipient],
    ) -> Result<usize, sqlx::Error> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut tx = self.pool().begin().await?;

        for recipient in recipients {
            sqlx::query(UPSERT_RECIPIENT)
                .bind(&recipient.id)
                .bind(user_id)
                .bind(&recipient.name)
                .bind(&recipient.nickname)
                .bind(&recipient.relationship)
                .bind(&now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!(
            target: TARGET_DB,
            "Stored {} recipients for user {}", recipients.len(), user_id
        );
        Ok(recipients.len())
    }

    /// Load every recipient belonging to a user, oldest first.
    pub async fn recipients_for_user(&self, user_id: &str) -> Result<Vec<Recipient>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, nickname, relationship
            FROM recipients
            WHERE user_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Recipient {
                id: row.get("id"),
                name: row.get("name"),
                nickname: row.get("nickname"),
                relationship: row.get("relationship"),
            })
            .collect())
    }

    /// Delete one of a user's recipients. Returns whether anything was removed.
    pub async fn delete_recipient(&self, user_id: &str, id: &str) -> Result<bool, sqlx::Error> {
        let rows_affected = sqlx::query("DELETE FROM recipients WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool())
            .await?
            .rows_affected();
        Ok(rows_affected > 0)
    }
}
